//! Fabula Engine — executes command sequences against a presentation port.
//!
//! The interpreter runs on a single thread and is the only writer of its
//! [`ExecutionState`](fabula_core::state::ExecutionState). Save and load
//! requests reach it through the port's blocking waits and are applied in
//! place, so a snapshot is never taken or restored concurrently with a
//! command.

mod handlers;
pub mod interpreter;
pub mod saves;
pub mod snapshot_manager;

pub use interpreter::{Interpreter, Outcome, Services};

/// Version recorded in save records.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
