//! Pieces of the headless runner that are exercised by tests: settings loading,
//! output sinks, pointer translation and the paced tick loop.

pub mod pointer;
pub mod runner;
pub mod settings;
pub mod sinks;
