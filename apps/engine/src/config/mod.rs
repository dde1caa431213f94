//! Runtime configuration read from the environment.

pub mod engine;

pub use engine::{ConfigError, EngineConfig};
