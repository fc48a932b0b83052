use num_bigint::BigUint;
use poolview_primitives::{Address, Snapshot, ValidatorPubkey};
use poolview_rpc::{Client, FromValue, Result, Value};
use serde::{Deserialize, Serialize};

use crate::registry::manager;

/// Assembled attributes of one minipool at one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinipoolDetails {
	/// Minipool contract address.
	pub address: Address,
	/// Whether the manager knows this minipool.
	pub exists: bool,
	/// Validator public key.
	pub pubkey: ValidatorPubkey,
	/// Total validator balance at withdrawal, in wei.
	#[serde(with = "poolview_primitives::amount")]
	pub withdrawal_total_balance: BigUint,
	/// Node operator's share of the withdrawal balance, in wei.
	#[serde(with = "poolview_primitives::amount")]
	pub withdrawal_node_balance: BigUint,
	/// Whether the minipool has been marked withdrawable.
	pub withdrawable: bool,
	/// Whether the validator withdrawal has been processed.
	pub withdrawal_processed: bool,
}

async fn attribute<T: FromValue>(client: &Client, minipool: Address, method: &str, what: &str, at: Option<Snapshot>) -> Result<T> {
	let manager = manager(client).await?;
	client
		.read(&manager, method, &[Value::from(minipool)], at, || format!("get minipool {minipool} {what}"))
		.await
}

/// Whether `minipool` exists.
pub async fn minipool_exists(client: &Client, minipool: Address, at: Option<Snapshot>) -> Result<bool> {
	attribute(client, minipool, "getMinipoolExists", "exists status", at).await
}

/// Validator public key of `minipool`.
pub async fn minipool_pubkey(client: &Client, minipool: Address, at: Option<Snapshot>) -> Result<ValidatorPubkey> {
	attribute(client, minipool, "getMinipoolPubkey", "pubkey", at).await
}

/// Total balance of `minipool` at withdrawal.
pub async fn minipool_withdrawal_total_balance(client: &Client, minipool: Address, at: Option<Snapshot>) -> Result<BigUint> {
	attribute(client, minipool, "getMinipoolWithdrawalTotalBalance", "withdrawal total balance", at).await
}

/// Node balance of `minipool` at withdrawal.
pub async fn minipool_withdrawal_node_balance(client: &Client, minipool: Address, at: Option<Snapshot>) -> Result<BigUint> {
	attribute(client, minipool, "getMinipoolWithdrawalNodeBalance", "withdrawal node balance", at).await
}

/// Whether `minipool` is withdrawable.
pub async fn minipool_withdrawable(client: &Client, minipool: Address, at: Option<Snapshot>) -> Result<bool> {
	attribute(client, minipool, "getMinipoolWithdrawable", "withdrawable status", at).await
}

/// Whether the validator withdrawal of `minipool` has been processed.
pub async fn minipool_withdrawal_processed(client: &Client, minipool: Address, at: Option<Snapshot>) -> Result<bool> {
	attribute(client, minipool, "getMinipoolWithdrawalProcessed", "withdrawal processed status", at).await
}

/// Fetches every attribute of `minipool` concurrently and assembles them.
///
/// All six reads are in flight together and all of them finish before the
/// record is built. If any read fails the first failure in attribute order
/// is returned and the others are dropped; no partial record is produced.
pub async fn minipool_details(client: &Client, minipool: Address, at: Option<Snapshot>) -> Result<MinipoolDetails> {
	let (exists, pubkey, withdrawal_total_balance, withdrawal_node_balance, withdrawable, withdrawal_processed) = tokio::join!(
		minipool_exists(client, minipool, at),
		minipool_pubkey(client, minipool, at),
		minipool_withdrawal_total_balance(client, minipool, at),
		minipool_withdrawal_node_balance(client, minipool, at),
		minipool_withdrawable(client, minipool, at),
		minipool_withdrawal_processed(client, minipool, at),
	);

	Ok(MinipoolDetails {
		address: minipool,
		exists: exists?,
		pubkey: pubkey?,
		withdrawal_total_balance: withdrawal_total_balance?,
		withdrawal_node_balance: withdrawal_node_balance?,
		withdrawable: withdrawable?,
		withdrawal_processed: withdrawal_processed?,
	})
}

/// Address of the minipool running the validator with `pubkey`.
pub async fn minipool_by_pubkey(client: &Client, pubkey: ValidatorPubkey, at: Option<Snapshot>) -> Result<Address> {
	let manager = manager(client).await?;
	client
		.read(&manager, "getMinipoolByPubkey", &[Value::from(pubkey)], at, || {
			format!("get validator {pubkey} minipool address")
		})
		.await
}
