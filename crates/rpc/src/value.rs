use num_bigint::BigUint;
use poolview_primitives::{Address, ValidatorPubkey};

use crate::error::DecodeError;

/// A decoded argument or return value of a remote call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
	/// Unsigned integer of arbitrary width.
	Uint(BigUint),
	/// Boolean.
	Bool(bool),
	/// 20-byte address.
	Address(Address),
	/// Dynamic byte string.
	Bytes(Vec<u8>),
}

impl Value {
	/// Name of the value kind, for diagnostics.
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::Uint(_) => "uint",
			Self::Bool(_) => "bool",
			Self::Address(_) => "address",
			Self::Bytes(_) => "bytes",
		}
	}
}

impl From<u64> for Value {
	fn from(v: u64) -> Self {
		Self::Uint(BigUint::from(v))
	}
}

impl From<BigUint> for Value {
	fn from(v: BigUint) -> Self {
		Self::Uint(v)
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Self::Bool(v)
	}
}

impl From<Address> for Value {
	fn from(v: Address) -> Self {
		Self::Address(v)
	}
}

impl From<ValidatorPubkey> for Value {
	fn from(v: ValidatorPubkey) -> Self {
		Self::Bytes(v.as_bytes().to_vec())
	}
}

/// Typed extraction from a decoded [`Value`].
pub trait FromValue: Sized {
	/// Extracts `Self`, failing when the value has another kind or does not fit.
	fn from_value(value: Value) -> Result<Self, DecodeError>;
}

fn mismatch(expected: &'static str, found: &Value) -> DecodeError {
	DecodeError::Mismatch { expected, found: found.kind() }
}

impl FromValue for Value {
	fn from_value(value: Value) -> Result<Self, DecodeError> {
		Ok(value)
	}
}

impl FromValue for BigUint {
	fn from_value(value: Value) -> Result<Self, DecodeError> {
		match value {
			Value::Uint(v) => Ok(v),
			other => Err(mismatch("uint", &other)),
		}
	}
}

impl FromValue for u64 {
	fn from_value(value: Value) -> Result<Self, DecodeError> {
		let wide = BigUint::from_value(value)?;
		u64::try_from(&wide).map_err(|_| DecodeError::Overflow { value: wide, target: "u64" })
	}
}

impl FromValue for bool {
	fn from_value(value: Value) -> Result<Self, DecodeError> {
		match value {
			Value::Bool(v) => Ok(v),
			other => Err(mismatch("bool", &other)),
		}
	}
}

impl FromValue for Address {
	fn from_value(value: Value) -> Result<Self, DecodeError> {
		match value {
			Value::Address(v) => Ok(v),
			other => Err(mismatch("address", &other)),
		}
	}
}

impl FromValue for ValidatorPubkey {
	fn from_value(value: Value) -> Result<Self, DecodeError> {
		match value {
			Value::Bytes(bytes) => Ok(ValidatorPubkey::from_slice(&bytes)?),
			other => Err(mismatch("bytes", &other)),
		}
	}
}
