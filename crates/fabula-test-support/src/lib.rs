//! Shared test mocks and utilities for the Fabula narrative script engine.

mod clock;
mod port;
mod rng;
mod scenes;

pub use clock::FixedClock;
pub use port::{Response, ScriptedPort};
pub use rng::{MockRng, SequenceRng};
pub use scenes::{FailingSceneLoader, InMemorySceneLoader};
