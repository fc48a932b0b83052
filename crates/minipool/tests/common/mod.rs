//! Shared fixture for minipool integration tests.

#![allow(dead_code)]

use std::num::NonZeroUsize;
use std::sync::Arc;

use num_bigint::BigUint;
use poolview_minipool::MinipoolDetails;
use poolview_primitives::{Address, ValidatorPubkey};
use poolview_rpc::test_helpers::MemoryChain;
use poolview_rpc::{Client, ReaderConfig, Value};

pub const MANAGER: Address = Address::new([0xaa; 20]);
pub const NODE: Address = Address::new([0x0d; 20]);

pub struct Fixture {
	pub chain: Arc<MemoryChain>,
	pub client: Client,
}

/// Chain with the manager deployed and the given batch sizes.
pub fn fixture(address_batch: usize, details_batch: usize) -> Fixture {
	let _ = tracing_subscriber::fmt::try_init();
	let chain = MemoryChain::new();
	chain.deploy("rocketMinipoolManager", MANAGER);
	let config = ReaderConfig::default().batch_sizes(
		NonZeroUsize::new(address_batch).unwrap(),
		NonZeroUsize::new(details_batch).unwrap(),
	);
	let client = chain.client(config);
	Fixture { chain, client }
}

pub fn addr(n: u64) -> Address {
	let mut bytes = [0u8; 20];
	bytes[0] = 0x01;
	bytes[12..].copy_from_slice(&n.to_be_bytes());
	Address::new(bytes)
}

pub fn pubkey(n: u64) -> ValidatorPubkey {
	let mut bytes = [0x80u8; 48];
	bytes[40..].copy_from_slice(&n.to_be_bytes());
	ValidatorPubkey::new(bytes)
}

pub fn eth(n: u64) -> BigUint {
	BigUint::from(n) * poolview_primitives::units::wei_per_eth()
}

/// Expected record for minipool `n` as stored by [`store_details`].
pub fn details(n: u64) -> MinipoolDetails {
	MinipoolDetails {
		address: addr(n),
		exists: true,
		pubkey: pubkey(n),
		withdrawal_total_balance: eth(32 + n),
		withdrawal_node_balance: eth(16 + n),
		withdrawable: n % 2 == 0,
		withdrawal_processed: n % 3 == 0,
	}
}

pub fn store_details(chain: &MemoryChain, record: &MinipoolDetails) {
	let args = || vec![Value::from(record.address)];
	chain.set(MANAGER, "getMinipoolExists", args(), record.exists);
	chain.set(MANAGER, "getMinipoolPubkey", args(), record.pubkey);
	chain.set(MANAGER, "getMinipoolWithdrawalTotalBalance", args(), record.withdrawal_total_balance.clone());
	chain.set(MANAGER, "getMinipoolWithdrawalNodeBalance", args(), record.withdrawal_node_balance.clone());
	chain.set(MANAGER, "getMinipoolWithdrawable", args(), record.withdrawable);
	chain.set(MANAGER, "getMinipoolWithdrawalProcessed", args(), record.withdrawal_processed);
	chain.set(MANAGER, "getMinipoolByPubkey", vec![Value::from(record.pubkey)], record.address);
}

/// Fills the global registry with minipools `0..count`, details included.
pub fn populate_all(chain: &MemoryChain, count: u64) {
	chain.set(MANAGER, "getMinipoolCount", vec![], count);
	for i in 0..count {
		chain.set(MANAGER, "getMinipoolAt", vec![Value::from(i)], addr(i));
		store_details(chain, &details(i));
	}
}

/// Sets a registry's count to zero for every scope used in the tests.
pub fn empty_registries(chain: &MemoryChain) {
	chain.set(MANAGER, "getMinipoolCount", vec![], 0u64);
	chain.set(MANAGER, "getUnprocessedMinipoolCount", vec![], 0u64);
	chain.set(MANAGER, "getNodeMinipoolCount", vec![Value::from(NODE)], 0u64);
	chain.set(MANAGER, "getNodeValidatingMinipoolCount", vec![Value::from(NODE)], 0u64);
}

/// Index arguments of every `method` call made so far.
pub fn indices_called(chain: &MemoryChain, method: &str) -> Vec<u64> {
	chain
		.calls()
		.into_iter()
		.filter(|c| c.method == method)
		.filter_map(|c| match c.args.last() {
			Some(Value::Uint(i)) => u64::try_from(i).ok(),
			_ => None,
		})
		.collect()
}
