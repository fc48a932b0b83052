//! Serde adapter writing arbitrary-precision amounts as decimal strings.
//!
//! Use with `#[serde(with = "poolview_primitives::amount")]` on `BigUint`
//! fields so JSON consumers never see a lossy float.

use num_bigint::BigUint;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

/// Serializes `value` as a base-10 string.
pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
	serializer.collect_str(value)
}

/// Parses a base-10 string.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
	let s = String::deserialize(deserializer)?;
	s.parse().map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
	use serde::{Deserialize, Serialize};

	use super::*;

	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct Holder {
		#[serde(with = "crate::amount")]
		wei: BigUint,
	}

	#[test]
	fn amounts_are_decimal_strings() {
		let holder = Holder {
			wei: BigUint::from(34u32) * crate::units::wei_per_eth(),
		};
		let json = serde_json::to_string(&holder).unwrap();
		assert_eq!(json, r#"{"wei":"34000000000000000000"}"#);
		assert_eq!(serde_json::from_str::<Holder>(&json).unwrap(), holder);
		assert!(serde_json::from_str::<Holder>(r#"{"wei":"-1"}"#).is_err());
	}
}
