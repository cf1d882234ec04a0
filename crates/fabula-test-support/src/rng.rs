//! Scripted dice for tests.

use std::collections::VecDeque;

use fabula_core::rng::DeterministicRng;

/// Always rolls the lowest face. For tests that never look at dice.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// Rolls scripted faces in order, one per die, and remembers the range of
/// every die it was asked for.
///
/// Panics when the script runs out or a face falls outside the die's range,
/// so a test cannot silently roll something the engine never could.
#[derive(Debug, Clone, Default)]
pub struct SequenceRng {
    faces: VecDeque<u32>,
    ranges: Vec<(u32, u32)>,
}

impl SequenceRng {
    /// Scripts the faces to roll, in order.
    #[must_use]
    pub fn new(faces: Vec<u32>) -> Self {
        Self {
            faces: faces.into(),
            ranges: Vec::new(),
        }
    }

    /// `(min, max)` of every die rolled so far.
    #[must_use]
    pub fn ranges(&self) -> &[(u32, u32)] {
        &self.ranges
    }

    /// Faces not yet rolled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let face = self
            .faces
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted face left for a d{max} roll"));
        assert!(
            (min..=max).contains(&face),
            "scripted face {face} is outside [{min}, {max}]"
        );
        self.ranges.push((min, max));
        face
    }
}
