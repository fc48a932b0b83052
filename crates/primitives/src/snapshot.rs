use std::fmt;

use serde::{Deserialize, Serialize};

/// Historical chain state a read applies to.
///
/// Reads take `Option<Snapshot>`, where `None` means the latest state. The
/// marker is opaque to the collectors: every nested call of one logical
/// operation receives the same value unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Snapshot {
	block: u64,
}

impl Snapshot {
	/// State as of the given block number.
	pub const fn at_block(block: u64) -> Self {
		Self { block }
	}

	/// Block number this snapshot refers to.
	pub const fn block(self) -> u64 {
		self.block
	}
}

impl fmt::Display for Snapshot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "block #{}", self.block)
	}
}
