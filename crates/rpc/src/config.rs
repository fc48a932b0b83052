//! Reader configuration.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Failure to load a [`ReaderConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The file could not be read.
	#[error("could not read config {path}: {source}")]
	Io {
		/// Path that was read.
		path: PathBuf,
		/// Underlying I/O error.
		source: std::io::Error,
	},
	/// The TOML was malformed or contained invalid values.
	#[error("invalid config: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Tuning and naming for registry reads.
///
/// Every field is optional in TOML and falls back to its default.
///
/// ```toml
/// address_batch_size = 50
/// details_batch_size = 20
/// minipool_manager = "rocketMinipoolManager"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderConfig {
	/// Window size for single-call index lookups.
	pub address_batch_size: NonZeroUsize,
	/// Window size for per-item detail fetches.
	///
	/// Each detail fetch fans out into several reads of its own, so this is
	/// kept below `address_batch_size` to bound total in-flight calls.
	pub details_batch_size: NonZeroUsize,
	/// Name of the minipool manager contract.
	pub minipool_manager: String,
	/// Name of the rETH token contract.
	pub reth_token: String,
	/// Name of the nETH token contract.
	pub neth_token: String,
}

/// Default window size for index lookups.
pub const DEFAULT_ADDRESS_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(50).unwrap();

/// Default window size for detail fetches.
pub const DEFAULT_DETAILS_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(20).unwrap();

impl Default for ReaderConfig {
	fn default() -> Self {
		Self {
			address_batch_size: DEFAULT_ADDRESS_BATCH_SIZE,
			details_batch_size: DEFAULT_DETAILS_BATCH_SIZE,
			minipool_manager: "rocketMinipoolManager".to_string(),
			reth_token: "rocketETHToken".to_string(),
			neth_token: "rocketNodeETHToken".to_string(),
		}
	}
}

impl ReaderConfig {
	/// Parses a TOML document.
	pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}

	/// Reads and parses a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&src)
	}

	/// Overrides both batch sizes.
	pub fn batch_sizes(mut self, address: NonZeroUsize, details: NonZeroUsize) -> Self {
		self.address_batch_size = address;
		self.details_batch_size = details;
		self
	}
}
