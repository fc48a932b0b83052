//! Conversion between wei (the base integer denomination), gwei and eth.
//!
//! Up-conversions to wei go through an exact decimal representation and
//! truncate toward zero; any fractional wei is discarded, never rounded up.
//! Results wider than 256 bits are rejected.
//! Down-conversions from wei are exact.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};

/// Decimal places between wei and eth.
pub const ETH_DECIMALS: u32 = 18;

/// Decimal places between wei and gwei.
pub const GWEI_DECIMALS: u32 = 9;

/// Largest number of decimal digits a wei amount can have: amounts are
/// 256-bit on chain.
pub const MAX_WEI_DIGITS: u64 = 78;

/// Conversion failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
	/// Amounts are non-negative; the input was below zero.
	#[error("negative amount {0}")]
	Negative(BigDecimal),
	/// The amount does not fit in 256 bits of wei.
	#[error("amount {0} is out of range")]
	OutOfRange(BigDecimal),
}

/// Number of wei in one eth.
pub fn wei_per_eth() -> BigUint {
	BigUint::from(10u32).pow(ETH_DECIMALS)
}

/// Number of wei in one gwei.
pub fn wei_per_gwei() -> BigUint {
	BigUint::from(10u32).pow(GWEI_DECIMALS)
}

/// Converts an eth amount to wei, truncating sub-wei remainders.
pub fn eth_to_wei(eth: &BigDecimal) -> Result<BigUint, UnitError> {
	to_base(eth, ETH_DECIMALS)
}

/// Converts wei to an exact eth amount.
pub fn wei_to_eth(wei: &BigUint) -> BigDecimal {
	from_base(wei, ETH_DECIMALS)
}

/// Converts a gwei amount to wei, truncating sub-wei remainders.
pub fn gwei_to_wei(gwei: &BigDecimal) -> Result<BigUint, UnitError> {
	to_base(gwei, GWEI_DECIMALS)
}

/// Converts wei to an exact gwei amount.
pub fn wei_to_gwei(wei: &BigUint) -> BigDecimal {
	from_base(wei, GWEI_DECIMALS)
}

fn to_base(value: &BigDecimal, decimals: u32) -> Result<BigUint, UnitError> {
	let (digits, scale) = value.as_bigint_and_exponent();
	if digits.is_negative() {
		return Err(UnitError::Negative(value.clone()));
	}
	if digits.is_zero() {
		return Ok(BigUint::zero());
	}
	let out_of_range = || UnitError::OutOfRange(value.clone());

	// value = digits * 10^-scale, so base = digits * 10^(decimals - scale).
	let shift = i64::from(decimals).checked_sub(scale).ok_or_else(out_of_range)?;
	let width = u64::try_from(digits.magnitude().to_str_radix(10).len()).map_err(|_| out_of_range())?;
	let base = if shift >= 0 {
		let shift = shift.unsigned_abs();
		if shift.saturating_add(width) > MAX_WEI_DIGITS {
			return Err(out_of_range());
		}
		digits * pow10(shift).ok_or_else(out_of_range)?
	} else {
		let drop = shift.unsigned_abs();
		// Every significant digit is below one base unit.
		if drop >= width {
			return Ok(BigUint::zero());
		}
		// BigInt division truncates toward zero.
		digits / pow10(drop).ok_or_else(out_of_range)?
	};

	let base = base.to_biguint().unwrap_or_default();
	if base.bits() > 256 {
		return Err(out_of_range());
	}
	Ok(base)
}

fn from_base(value: &BigUint, decimals: u32) -> BigDecimal {
	BigDecimal::new(BigInt::from(value.clone()), i64::from(decimals)).normalized()
}

fn pow10(exp: u64) -> Option<BigInt> {
	let exp = u32::try_from(exp).ok()?;
	Some(BigInt::from(10u32).pow(exp))
}
