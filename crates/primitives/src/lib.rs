//! Core value types shared by every poolview crate: fixed-size on-chain
//! identities, the snapshot marker, and denomination conversion.

/// Serde adapter for wei amounts.
pub mod amount;
/// Fixed-size byte identities (addresses and validator keys).
pub mod bytes;
/// Historical-state marker passed through every read.
pub mod snapshot;
/// Wei, gwei and eth conversion.
pub mod units;

pub use bigdecimal::BigDecimal;
pub use bytes::{Address, ParseError, ValidatorPubkey};
pub use num_bigint::BigUint;
pub use snapshot::Snapshot;
pub use units::UnitError;
