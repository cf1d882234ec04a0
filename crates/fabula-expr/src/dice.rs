//! Dice notation expansion.

use std::sync::LazyLock;

use fabula_core::rng::DeterministicRng;
use regex::{Captures, Regex};

use crate::EvalError;

/// Upper bound on dice rolled by a single `NdM` term.
pub const MAX_DICE: u32 = 1000;

static DICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d*)d(\d+)\b").expect("dice regex must compile"));

/// Rewrites every `NdM` term (N defaults to 1) into the decimal sum of N
/// rolls in `[1, M]`.
///
/// # Errors
///
/// Returns `EvalError::InvalidDice` for zero-sided dice, more than
/// [`MAX_DICE`] dice, or counts that do not fit in `u32`.
pub fn expand_dice(expression: &str, rng: &mut dyn DeterministicRng) -> Result<String, EvalError> {
    let mut out = String::with_capacity(expression.len());
    let mut last = 0;
    for caps in DICE.captures_iter(expression) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&expression[last..whole.start()]);
        let total = roll(&caps, rng)?;
        out.push_str(&total.to_string());
        last = whole.end();
    }
    out.push_str(&expression[last..]);
    Ok(out)
}

fn roll(caps: &Captures<'_>, rng: &mut dyn DeterministicRng) -> Result<u64, EvalError> {
    let term = &caps[0];
    let count = match &caps[1] {
        "" => 1,
        digits => digits
            .parse::<u32>()
            .map_err(|_| EvalError::InvalidDice(term.to_owned()))?,
    };
    let sides = caps[2]
        .parse::<u32>()
        .map_err(|_| EvalError::InvalidDice(term.to_owned()))?;
    if sides == 0 || count > MAX_DICE {
        return Err(EvalError::InvalidDice(term.to_owned()));
    }
    Ok((0..count)
        .map(|_| u64::from(rng.next_u32_range(1, sides)))
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_test_support::SequenceRng;

    #[test]
    fn test_expands_each_term_with_its_own_rolls() {
        // Arrange
        let mut rng = SequenceRng::new(vec![3, 5, 20]);

        // Act
        let expanded = expand_dice("2d6 + d20 + 4", &mut rng).unwrap();

        // Assert
        assert_eq!(expanded, "8 + 20 + 4");
        assert_eq!(rng.ranges(), &[(1, 6), (1, 6), (1, 20)]);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_leaves_identifiers_containing_d_digits_alone() {
        let mut rng = SequenceRng::new(vec![]);

        assert_eq!(expand_dice("speed2 + hp", &mut rng).unwrap(), "speed2 + hp");
    }

    #[test]
    fn test_rejects_zero_sided_and_oversized_rolls() {
        let mut rng = SequenceRng::new(vec![]);

        assert!(matches!(
            expand_dice("2d0", &mut rng),
            Err(EvalError::InvalidDice(_))
        ));
        assert!(matches!(
            expand_dice("5000d6", &mut rng),
            Err(EvalError::InvalidDice(_))
        ));
    }

    #[test]
    fn test_zero_dice_sum_to_zero() {
        let mut rng = SequenceRng::new(vec![]);

        assert_eq!(expand_dice("0d6", &mut rng).unwrap(), "0");
    }
}
