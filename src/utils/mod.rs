//! Utility modules for common functionality.
//!
//! - constants: Shared defaults (poll interval, challenge lifetime, gateways)
//! - http: Retryable HTTP client construction
//! - logging: Logging utilities
//! - tests: Builders for test fixtures

pub mod constants;
pub mod http;
pub mod logging;

pub use constants::*;
