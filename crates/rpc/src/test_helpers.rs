//! In-memory chain for exercising collectors without a node.
//!
//! [`MemoryChain`] implements both [`RemoteReader`] and [`ContractResolver`].
//! It records every call, can inject failures for chosen calls, and can add
//! latency or a rendezvous barrier to make concurrency observable.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use num_bigint::BigUint;
use parking_lot::Mutex;
use poolview_primitives::{Address, Snapshot};
use tokio::sync::Barrier;

use crate::config::ReaderConfig;
use crate::error::ReadError;
use crate::reader::{ContractResolver, RemoteReader};
use crate::value::Value;
use crate::Client;

/// One call observed by a [`MemoryChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
	/// Target contract.
	pub contract: Address,
	/// Method name.
	pub method: String,
	/// Call arguments.
	pub args: Vec<Value>,
	/// Snapshot the call was made at.
	pub at: Option<Snapshot>,
}

type CallKey = (Address, String, Vec<Value>);

#[derive(Default)]
struct ChainState {
	contracts: HashMap<String, Address>,
	values: HashMap<(Option<Snapshot>, CallKey), Value>,
	balances: HashMap<(Option<Snapshot>, Address), BigUint>,
	failures: HashMap<CallKey, ReadError>,
	balance_failures: HashMap<Address, ReadError>,
	calls: Vec<CallRecord>,
}

/// Programmable in-memory chain.
///
/// Values stored without a snapshot are the latest state and the fallback for
/// snapshots with no override of their own.
#[derive(Default)]
pub struct MemoryChain {
	state: Mutex<ChainState>,
	resolutions: AtomicUsize,
	in_flight: AtomicUsize,
	peak_in_flight: AtomicUsize,
	latency: Mutex<Option<Duration>>,
	barrier: Mutex<Option<Arc<Barrier>>>,
}

impl MemoryChain {
	/// Creates an empty chain.
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Builds a [`Client`] reading from this chain.
	pub fn client(self: &Arc<Self>, config: ReaderConfig) -> Client {
		Client::new(self.clone(), self.clone(), config)
	}

	/// Registers a contract name.
	pub fn deploy(&self, name: &str, address: Address) {
		self.state.lock().contracts.insert(name.to_string(), address);
	}

	/// Sets the latest return value of a call.
	pub fn set(&self, contract: Address, method: &str, args: Vec<Value>, value: impl Into<Value>) {
		self.state.lock().values.insert((None, (contract, method.to_string(), args)), value.into());
	}

	/// Sets the return value of a call at one snapshot.
	pub fn set_at(&self, at: Snapshot, contract: Address, method: &str, args: Vec<Value>, value: impl Into<Value>) {
		self.state.lock().values.insert((Some(at), (contract, method.to_string(), args)), value.into());
	}

	/// Sets the latest native balance of an account.
	pub fn set_balance(&self, holder: Address, wei: impl Into<BigUint>) {
		self.state.lock().balances.insert((None, holder), wei.into());
	}

	/// Sets the native balance of an account at one snapshot.
	pub fn set_balance_at(&self, at: Snapshot, holder: Address, wei: impl Into<BigUint>) {
		self.state.lock().balances.insert((Some(at), holder), wei.into());
	}

	/// Makes a call fail with `error` at every snapshot.
	pub fn fail(&self, contract: Address, method: &str, args: Vec<Value>, error: ReadError) {
		self.state.lock().failures.insert((contract, method.to_string(), args), error);
	}

	/// Makes native balance reads of `holder` fail with `error` at every
	/// snapshot.
	pub fn fail_balance(&self, holder: Address, error: ReadError) {
		self.state.lock().balance_failures.insert(holder, error);
	}

	/// Delays every call and balance read.
	pub fn set_latency(&self, latency: Duration) {
		*self.latency.lock() = Some(latency);
	}

	/// Makes every call wait on `barrier` before answering.
	pub fn set_barrier(&self, barrier: Arc<Barrier>) {
		*self.barrier.lock() = Some(barrier);
	}

	/// All calls made so far, in arrival order.
	pub fn calls(&self) -> Vec<CallRecord> {
		self.state.lock().calls.clone()
	}

	/// Number of calls made to `method`.
	pub fn calls_to(&self, method: &str) -> usize {
		self.state.lock().calls.iter().filter(|c| c.method == method).count()
	}

	/// Total number of calls made.
	pub fn call_count(&self) -> usize {
		self.state.lock().calls.len()
	}

	/// Number of times a contract name was resolved.
	pub fn resolutions(&self) -> usize {
		self.resolutions.load(Ordering::SeqCst)
	}

	/// Highest number of calls that were in flight together.
	pub fn peak_in_flight(&self) -> usize {
		self.peak_in_flight.load(Ordering::SeqCst)
	}

	/// Number of calls currently in flight.
	pub fn in_flight(&self) -> usize {
		self.in_flight.load(Ordering::SeqCst)
	}

	/// Counts a call as in flight until the returned guard drops, which also
	/// covers calls whose task is aborted mid-read.
	async fn enter(&self) -> InFlight<'_> {
		let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
		self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
		let guard = InFlight(&self.in_flight);
		let latency = *self.latency.lock();
		if let Some(latency) = latency {
			tokio::time::sleep(latency).await;
		}
		let barrier = self.barrier.lock().clone();
		if let Some(barrier) = barrier {
			barrier.wait().await;
		}
		guard
	}
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		self.0.fetch_sub(1, Ordering::SeqCst);
	}
}

#[async_trait]
impl RemoteReader for MemoryChain {
	async fn call(&self, contract: Address, method: &str, args: &[Value], at: Option<Snapshot>) -> Result<Value, ReadError> {
		self.state.lock().calls.push(CallRecord {
			contract,
			method: method.to_string(),
			args: args.to_vec(),
			at,
		});
		let _in_flight = self.enter().await;

		let key = (contract, method.to_string(), args.to_vec());
		let state = self.state.lock();
		if let Some(err) = state.failures.get(&key) {
			Err(err.clone())
		} else {
			let snapshot_value = at.and_then(|s| state.values.get(&(Some(s), key.clone())));
			snapshot_value
				.or_else(|| state.values.get(&(None, key.clone())))
				.cloned()
				.ok_or_else(|| ReadError::Reverted(format!("{method} has no value for {args:?}")))
		}
	}

	async fn balance_at(&self, holder: Address, at: Option<Snapshot>) -> Result<BigUint, ReadError> {
		let _in_flight = self.enter().await;
		let state = self.state.lock();
		if let Some(err) = state.balance_failures.get(&holder) {
			return Err(err.clone());
		}
		Ok(at
			.and_then(|s| state.balances.get(&(Some(s), holder)))
			.or_else(|| state.balances.get(&(None, holder)))
			.cloned()
			.unwrap_or_default())
	}
}

#[async_trait]
impl ContractResolver for MemoryChain {
	async fn resolve(&self, name: &str) -> Result<Address, ReadError> {
		self.resolutions.fetch_add(1, Ordering::SeqCst);
		self.state
			.lock()
			.contracts
			.get(name)
			.copied()
			.ok_or_else(|| ReadError::UnknownContract(name.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const TOKEN: Address = Address::new([0x4e; 20]);
	const HOLDER: Address = Address::new([0x77; 20]);

	#[tokio::test]
	async fn aborted_call_leaves_nothing_in_flight() {
		let chain = MemoryChain::new();
		chain.set(TOKEN, "totalSupply", vec![], 1u64);
		chain.set_latency(Duration::from_secs(60));

		let reader = Arc::clone(&chain);
		let task = tokio::spawn(async move { reader.call(TOKEN, "totalSupply", &[], None).await });
		while chain.in_flight() == 0 {
			tokio::task::yield_now().await;
		}
		task.abort();
		assert!(task.await.unwrap_err().is_cancelled());

		assert_eq!(chain.in_flight(), 0);
		assert_eq!(chain.peak_in_flight(), 1);
	}

	#[tokio::test]
	async fn balance_failure_is_returned() {
		let chain = MemoryChain::new();
		chain.set_balance(HOLDER, 9u64);
		assert_eq!(chain.balance_at(HOLDER, None).await, Ok(BigUint::from(9u64)));

		chain.fail_balance(HOLDER, ReadError::Transport("reset".into()));
		assert_eq!(chain.balance_at(HOLDER, None).await, Err(ReadError::Transport("reset".into())));
		assert_eq!(chain.balance_at(TOKEN, None).await, Ok(BigUint::default()));
		assert_eq!(chain.in_flight(), 0);
	}
}
