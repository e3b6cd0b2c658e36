use std::{collections::HashSet, path::Path};

use crate::models::{ChainConfig, ConfigLoader};

use super::error::ConfigError;

/// Largest accepted native currency precision
const MAX_DECIMALS: u8 = 36;

impl ConfigLoader for ChainConfig {
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(u64, Self)>,
	{
		let chain_dir = path.unwrap_or(Path::new("config/chains"));
		let mut pairs = Vec::new();
		let mut seen = HashSet::new();

		if !chain_dir.exists() {
			return Err(ConfigError::file_error("chains directory not found"));
		}

		for entry in std::fs::read_dir(chain_dir)? {
			let entry = entry?;
			let path = entry.path();

			if !Self::is_json_file(&path) {
				continue;
			}

			match Self::load_from_path(&path) {
				Ok(chain) => {
					if !seen.insert(chain.id) {
						return Err(ConfigError::duplicate_error(chain.id));
					}
					pairs.push((chain.id, chain));
				}
				Err(e) => {
					tracing::warn!(path = %path.display(), error = %e, "Skipping chain definition");
				}
			}
		}

		Ok(T::from_iter(pairs))
	}

	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let file = std::fs::File::open(path)?;
		let config: ChainConfig = serde_json::from_reader(file)?;

		if let Err(validation_error) = config.validate() {
			return Err(ConfigError::validation_error(validation_error));
		}

		Ok(config)
	}

	fn validate(&self) -> Result<(), String> {
		if self.name.trim().is_empty() {
			return Err("Chain name must not be empty".to_string());
		}

		if !self
			.rpc_endpoints()
			.iter()
			.all(|url| url.starts_with("http://") || url.starts_with("https://"))
		{
			return Err("All RPC endpoints must start with http:// or https://".to_string());
		}

		if self.native_currency.decimals > MAX_DECIMALS {
			return Err(format!(
				"Native currency decimals must be at most {}",
				MAX_DECIMALS
			));
		}

		Ok(())
	}
}
