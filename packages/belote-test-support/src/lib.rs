//! Belote engine test support utilities
//!
//! This crate provides utilities shared by the engine's unit and integration
//! tests. Today that is the unified logging initialisation.

pub mod test_logging;
