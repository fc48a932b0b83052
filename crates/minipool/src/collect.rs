use std::sync::Arc;

use poolview_primitives::{Address, Snapshot, ValidatorPubkey};
use poolview_rpc::{Client, Result};
use poolview_worker::{TaskClass, collect_batched};

use crate::details::{MinipoolDetails, minipool_details, minipool_pubkey};
use crate::registry::{Registry, address_at, count};

/// Every address in `registry`, in index order.
pub async fn addresses(client: &Client, registry: Registry, at: Option<Snapshot>) -> Result<Vec<Address>> {
	let count = count(client, registry, at).await?;
	tracing::debug!(%registry, count, ?at, "minipool.addresses");

	let shared = client.clone();
	collect_batched(TaskClass::IndexLookup, count, client.config().address_batch_size, move |index| {
		let client = shared.clone();
		async move { address_at(&client, registry, index, at).await }
	})
	.await
}

/// Every minipool address.
pub async fn minipool_addresses(client: &Client, at: Option<Snapshot>) -> Result<Vec<Address>> {
	addresses(client, Registry::All, at).await
}

/// Addresses of minipools whose withdrawal is unprocessed.
pub async fn unprocessed_minipool_addresses(client: &Client, at: Option<Snapshot>) -> Result<Vec<Address>> {
	addresses(client, Registry::Unprocessed, at).await
}

/// Addresses of the minipools owned by `node`.
pub async fn node_minipool_addresses(client: &Client, node: Address, at: Option<Snapshot>) -> Result<Vec<Address>> {
	addresses(client, Registry::Node(node), at).await
}

/// Validator keys of `node`'s validating minipools, in index order.
///
/// The validating registry only yields minipool addresses, so every index
/// costs two chained reads inside the same task: the address, then its key.
pub async fn node_validating_minipool_pubkeys(client: &Client, node: Address, at: Option<Snapshot>) -> Result<Vec<ValidatorPubkey>> {
	let registry = Registry::NodeValidating(node);
	let count = count(client, registry, at).await?;
	tracing::debug!(%registry, count, ?at, "minipool.validating_pubkeys");

	let shared = client.clone();
	collect_batched(TaskClass::IndexLookup, count, client.config().address_batch_size, move |index| {
		let client = shared.clone();
		async move {
			let minipool = address_at(&client, registry, index, at).await?;
			minipool_pubkey(&client, minipool, at).await
		}
	})
	.await
}

/// Details of every minipool in `addresses`, in the same order.
///
/// Uses the smaller details window: each item fans out into several reads
/// of its own.
pub async fn load_minipool_details(client: &Client, addresses: Vec<Address>, at: Option<Snapshot>) -> Result<Vec<MinipoolDetails>> {
	let count = addresses.len() as u64;
	let addresses: Arc<[Address]> = addresses.into();

	let shared = client.clone();
	collect_batched(TaskClass::DetailFetch, count, client.config().details_batch_size, move |index| {
		let client = shared.clone();
		let minipool = addresses[index as usize];
		async move { minipool_details(&client, minipool, at).await }
	})
	.await
}

/// Details of every minipool in `registry`.
pub async fn minipools_in(client: &Client, registry: Registry, at: Option<Snapshot>) -> Result<Vec<MinipoolDetails>> {
	let addresses = addresses(client, registry, at).await?;
	load_minipool_details(client, addresses, at).await
}

/// Details of every minipool.
pub async fn minipools(client: &Client, at: Option<Snapshot>) -> Result<Vec<MinipoolDetails>> {
	minipools_in(client, Registry::All, at).await
}

/// Details of minipools whose withdrawal is unprocessed.
pub async fn unprocessed_minipools(client: &Client, at: Option<Snapshot>) -> Result<Vec<MinipoolDetails>> {
	minipools_in(client, Registry::Unprocessed, at).await
}

/// Details of the minipools owned by `node`.
pub async fn node_minipools(client: &Client, node: Address, at: Option<Snapshot>) -> Result<Vec<MinipoolDetails>> {
	minipools_in(client, Registry::Node(node), at).await
}
