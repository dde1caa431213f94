//! Shared test utilities for the engine's unit and integration tests.

pub mod logging;
