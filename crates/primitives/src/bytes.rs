use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Failure to parse a fixed-size identity from its hex form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
	/// The input contained non-hex characters or an odd number of digits.
	#[error("invalid hex: {0}")]
	InvalidHex(#[from] hex::FromHexError),
	/// The decoded byte count does not match the identity width.
	#[error("expected {expected} bytes, found {found}")]
	InvalidLength {
		/// Width of the target type.
		expected: usize,
		/// Decoded byte count.
		found: usize,
	},
}

macro_rules! fixed_bytes {
	($(#[$meta:meta])* $name:ident, $len:expr) => {
		$(#[$meta])*
		#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub struct $name([u8; $len]);

		impl $name {
			/// Width in bytes.
			pub const LEN: usize = $len;

			/// The all-zero value.
			pub const ZERO: Self = Self([0u8; $len]);

			/// Wraps raw bytes.
			pub const fn new(bytes: [u8; $len]) -> Self {
				Self(bytes)
			}

			/// Borrows the raw bytes.
			pub const fn as_bytes(&self) -> &[u8; $len] {
				&self.0
			}

			/// Returns `true` for the all-zero value.
			pub fn is_zero(&self) -> bool {
				self.0.iter().all(|b| *b == 0)
			}

			/// Copies from a slice of exactly [`Self::LEN`] bytes.
			pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
				let arr: [u8; $len] = bytes.try_into().map_err(|_| ParseError::InvalidLength {
					expected: $len,
					found: bytes.len(),
				})?;
				Ok(Self(arr))
			}

			/// Lowercase hex with a `0x` prefix.
			pub fn to_hex(&self) -> String {
				format!("0x{}", hex::encode(self.0))
			}
		}

		impl Default for $name {
			fn default() -> Self {
				Self::ZERO
			}
		}

		impl From<[u8; $len]> for $name {
			fn from(bytes: [u8; $len]) -> Self {
				Self(bytes)
			}
		}

		impl AsRef<[u8]> for $name {
			fn as_ref(&self) -> &[u8] {
				&self.0
			}
		}

		impl FromStr for $name {
			type Err = ParseError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
				Self::from_slice(&hex::decode(digits)?)
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.to_hex())
			}
		}

		impl fmt::Debug for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, concat!(stringify!($name), "({})"), self.to_hex())
			}
		}

		impl Serialize for $name {
			fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
				serializer.serialize_str(&self.to_hex())
			}
		}

		impl<'de> Deserialize<'de> for $name {
			fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
				let s = String::deserialize(deserializer)?;
				s.parse().map_err(D::Error::custom)
			}
		}
	};
}

fixed_bytes!(
	/// 20-byte account or contract address. Identity key of a minipool.
	Address,
	20
);

fixed_bytes!(
	/// 48-byte BLS public key of a beacon chain validator.
	ValidatorPubkey,
	48
);
