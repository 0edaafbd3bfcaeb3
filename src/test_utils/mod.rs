//! Test utilities for unit testing the views.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - An in-memory API implementing every remote port, with failure injection
//! - Recording implementations of the local UI ports
//! - A tracing capture for asserting what reaches the console

mod api_mocks;
mod factories;
mod log_capture;
mod ui_mocks;

pub use api_mocks::*;
pub use factories::*;
pub use log_capture::*;
pub use ui_mocks::*;
