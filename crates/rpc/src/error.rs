//! Error taxonomy for remote reads.

use num_bigint::BigUint;
use poolview_primitives::ParseError;
use tokio::task::JoinError;

/// Result type for this crate and the collectors built on it.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a single call across the reader boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ReadError {
	/// The request never produced a response (connection, timeout, ...).
	#[error("transport error: {0}")]
	Transport(String),
	/// The call executed and reverted.
	#[error("execution reverted: {0}")]
	Reverted(String),
	/// The response could not be decoded into a value.
	#[error("undecodable response: {0}")]
	Decode(String),
	/// No contract is registered under the name.
	#[error("unknown contract {0}")]
	UnknownContract(String),
}

/// A decoded value had the wrong shape for the requested type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
	/// The value is of a different kind.
	#[error("expected {expected}, found {found}")]
	Mismatch {
		/// Kind the caller asked for.
		expected: &'static str,
		/// Kind the reader returned.
		found: &'static str,
	},
	/// An unsigned integer is too wide for the target type.
	#[error("{value} does not fit in {target}")]
	Overflow {
		/// Decoded integer.
		value: BigUint,
		/// Name of the target type.
		target: &'static str,
	},
	/// Bytes of the wrong length for a fixed-size identity.
	#[error(transparent)]
	Bytes(#[from] ParseError),
}

/// Errors surfaced by client operations.
///
/// Any single failing read fails the whole enclosing operation; nothing here
/// is retried or swallowed. The context string names the registry, item and
/// attribute that failed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// A remote call failed.
	#[error("could not {context}: {source}")]
	Read {
		/// What was being read.
		context: String,
		/// Underlying call failure.
		source: ReadError,
	},
	/// A remote call returned a value of the wrong shape.
	#[error("could not {context}: {source}")]
	Decode {
		/// What was being read.
		context: String,
		/// Shape mismatch.
		source: DecodeError,
	},
	/// A named contract could not be resolved to a handle.
	#[error("could not resolve contract {name}: {source}")]
	Resolve {
		/// Contract name.
		name: String,
		/// Underlying resolution failure.
		source: ReadError,
	},
	/// A spawned read task panicked or was cancelled.
	#[error("read task failed: {0}")]
	Task(#[from] JoinError),
}

impl Error {
	/// Returns the underlying call failure for read and resolution errors.
	pub fn read_error(&self) -> Option<&ReadError> {
		match self {
			Self::Read { source, .. } | Self::Resolve { source, .. } => Some(source),
			_ => None,
		}
	}

	/// Returns the read context, if any.
	pub fn context(&self) -> Option<&str> {
		match self {
			Self::Read { context, .. } | Self::Decode { context, .. } => Some(context),
			_ => None,
		}
	}
}
