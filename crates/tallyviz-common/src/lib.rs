//! # tallyviz Common
//!
//! Shared error type, logging bootstrap, and test utilities for tallyviz.
//!
//! This crate provides the foundational pieces used across all other crates
//! in the tallyviz workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod macros;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{ChartError, Result};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LogFormat, LoggingConfig};
