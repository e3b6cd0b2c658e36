//! Error types for repository operations.
//!
//! Covers failures while loading chain definitions into the registry and while
//! changing its contents.

use log::error;
use std::error::Error;
use std::fmt;

use crate::models::ConfigError;

/// Errors that can occur during repository operations
#[derive(Debug)]
pub enum RepositoryError {
	/// A chain definition was rejected
	ValidationError(String),

	/// Chain definitions could not be loaded from disk
	LoadError(String),

	/// The requested chain is not registered
	NotFound(u64),
}

impl RepositoryError {
	fn format_message(&self) -> String {
		match self {
			Self::ValidationError(msg) => format!("Validation error: {}", msg),
			Self::LoadError(msg) => format!("Load error: {}", msg),
			Self::NotFound(id) => format!("Chain not registered: {}", id),
		}
	}

	/// Create a new validation error with the given message
	///
	/// Also logs the error message at the error level.
	pub fn validation_error(msg: impl Into<String>) -> Self {
		let error = Self::ValidationError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Create a new load error with the given message
	///
	/// Also logs the error message at the error level.
	pub fn load_error(msg: impl Into<String>) -> Self {
		let error = Self::LoadError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn not_found(chain_id: u64) -> Self {
		let error = Self::NotFound(chain_id);
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for RepositoryError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for RepositoryError {}

impl From<ConfigError> for RepositoryError {
	fn from(err: ConfigError) -> Self {
		Self::load_error(err.to_string())
	}
}
