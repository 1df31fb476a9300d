pub mod commands;
pub mod config;
pub mod error;
#[cfg(test)]
pub(crate) mod fake;
pub mod queue;
pub mod simulated;
pub mod state;
pub mod store;
pub mod sync;
pub mod system;
pub mod traits;
pub mod track;
pub mod volume;
