//! Reads against the rETH and nETH staking token contracts.
//!
//! Every read takes an optional [`Snapshot`]; `None` reads the latest state.

use std::fmt;

use num_bigint::BigUint;
use poolview_primitives::{Address, Snapshot};
use poolview_rpc::{Client, Contract, ReaderConfig, Result, Value};
use serde::{Deserialize, Serialize};

/// Staking token issued by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
	/// Liquid staking token held by depositors.
	Reth,
	/// Token minted to node operators on withdrawal.
	Neth,
}

impl Token {
	/// Ticker used in messages.
	pub const fn symbol(self) -> &'static str {
		match self {
			Self::Reth => "rETH",
			Self::Neth => "nETH",
		}
	}

	/// Registry name of the token contract under `config`.
	pub fn contract_name(self, config: &ReaderConfig) -> &str {
		match self {
			Self::Reth => &config.reth_token,
			Self::Neth => &config.neth_token,
		}
	}

	async fn contract(self, client: &Client) -> Result<Contract> {
		client.contract(self.contract_name(client.config())).await
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.symbol())
	}
}

/// Native and token balances of one holder, all in wei.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balances {
	/// Native currency balance.
	#[serde(with = "poolview_primitives::amount")]
	pub eth: BigUint,
	/// nETH token balance.
	#[serde(with = "poolview_primitives::amount")]
	pub neth: BigUint,
	/// rETH token balance.
	#[serde(with = "poolview_primitives::amount")]
	pub reth: BigUint,
}

/// Total supply of `token`.
pub async fn total_supply(client: &Client, token: Token, at: Option<Snapshot>) -> Result<BigUint> {
	let contract = token.contract(client).await?;
	client
		.read(&contract, "totalSupply", &[], at, || format!("get {token} total supply"))
		.await
}

/// `holder`'s balance of `token`.
pub async fn balance_of(client: &Client, token: Token, holder: Address, at: Option<Snapshot>) -> Result<BigUint> {
	let contract = token.contract(client).await?;
	client
		.read(&contract, "balanceOf", &[Value::from(holder)], at, || {
			format!("get {token} balance of {holder}")
		})
		.await
}

/// Native currency held by the `token` contract itself.
pub async fn contract_eth_balance(client: &Client, token: Token, at: Option<Snapshot>) -> Result<BigUint> {
	let contract = token.contract(client).await?;
	let address = contract.address();
	client
		.balance_at(address, at, || format!("get {token} contract ETH balance"))
		.await
}

/// Native, nETH and rETH balances of `holder`, read concurrently.
///
/// On failure the first error in field order is returned.
pub async fn balances(client: &Client, holder: Address, at: Option<Snapshot>) -> Result<Balances> {
	let (eth, neth, reth) = tokio::join!(
		client.balance_at(holder, at, || format!("get {holder} ETH balance")),
		balance_of(client, Token::Neth, holder, at),
		balance_of(client, Token::Reth, holder, at),
	);
	tracing::trace!(%holder, ?at, "tokens.balances");

	Ok(Balances {
		eth: eth?,
		neth: neth?,
		reth: reth?,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn contract_names_follow_config() {
		let mut config = ReaderConfig::default();
		assert_eq!(Token::Reth.contract_name(&config), "rocketETHToken");
		assert_eq!(Token::Neth.contract_name(&config), "rocketNodeETHToken");

		config.neth_token = "testNodeToken".into();
		assert_eq!(Token::Neth.contract_name(&config), "testNodeToken");
	}

	#[test]
	fn symbols() {
		assert_eq!(Token::Reth.to_string(), "rETH");
		assert_eq!(Token::Neth.symbol(), "nETH");
	}
}
