//! Logging setup for hosts embedding the verifier.
//!
//! The crate itself only emits `tracing` events (and `log` records from error
//! constructors). A host that has no subscriber of its own can install the
//! compact stdout subscriber provided here.
//!
//! The filter comes from `RUST_LOG`, then `LOG_LEVEL`, and defaults to `info`.
//! A `.env` file in the working directory is read first when present.
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Fallback filter directive
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Resolves the filter from the environment
pub fn env_filter() -> EnvFilter {
	EnvFilter::try_from_default_env()
		.or_else(|_| {
			std::env::var("LOG_LEVEL")
				.map_err(|e| e.to_string())
				.and_then(|level| EnvFilter::try_new(level).map_err(|e| e.to_string()))
		})
		.unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Installs the global subscriber writing to stdout
pub fn setup_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
	dotenvy::dotenv().ok();
	setup_logging_with_writer(std::io::stdout)
}

/// Installs the global subscriber writing to `writer`
///
/// Fails if a global subscriber is already installed.
pub fn setup_logging_with_writer<W>(
	writer: W,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::registry()
		.with(env_filter())
		.with(
			fmt::layer()
				.with_writer(writer)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(false)
						.compact(),
				)
				.fmt_fields(fmt::format::PrettyFields::new()),
		)
		.try_init()?;
	Ok(())
}
