//! Fabula Core — shared domain abstractions.
//!
//! This crate defines the command model, the execution state, snapshot values
//! and the collaborator traits (presentation port, scene loader, snapshot
//! store, clock, RNG) that the engine depends on. It contains no
//! infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod port;
pub mod rng;
pub mod scene;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod value;
