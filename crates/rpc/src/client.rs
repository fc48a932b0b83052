use std::fmt;
use std::sync::Arc;

use num_bigint::BigUint;
use poolview_primitives::{Address, Snapshot};

use crate::config::ReaderConfig;
use crate::contracts::{Contract, ContractRegistry};
use crate::error::{Error, Result};
use crate::reader::{ContractResolver, RemoteReader};
use crate::value::{FromValue, Value};

/// Shared context for every registry read.
///
/// Cheap to clone; clones share the reader, the contract handle cache and
/// the configuration. Spawned read tasks each hold a clone.
#[derive(Clone)]
pub struct Client {
	inner: Arc<ClientInner>,
}

struct ClientInner {
	reader: Arc<dyn RemoteReader>,
	contracts: ContractRegistry,
	config: ReaderConfig,
}

impl Client {
	/// Creates a client over a reader and a contract resolver.
	pub fn new(reader: Arc<dyn RemoteReader>, resolver: Arc<dyn ContractResolver>, config: ReaderConfig) -> Self {
		Self {
			inner: Arc::new(ClientInner {
				reader,
				contracts: ContractRegistry::new(resolver),
				config,
			}),
		}
	}

	/// Active configuration.
	pub fn config(&self) -> &ReaderConfig {
		&self.inner.config
	}

	/// Contract handle cache.
	pub fn contracts(&self) -> &ContractRegistry {
		&self.inner.contracts
	}

	/// Returns the memoized handle for a named contract.
	pub async fn contract(&self, name: &str) -> Result<Contract> {
		self.inner.contracts.get(name).await
	}

	/// Calls `method` on `contract` and decodes the result as `T`.
	///
	/// `context` describes the read for error messages ("get minipool 3
	/// address") and is only evaluated on failure.
	pub async fn read<T, C>(&self, contract: &Contract, method: &str, args: &[Value], at: Option<Snapshot>, context: C) -> Result<T>
	where
		T: FromValue,
		C: FnOnce() -> String,
	{
		tracing::trace!(contract = contract.name(), method, ?at, "rpc.call");
		match self.inner.reader.call(contract.address(), method, args, at).await {
			Ok(value) => T::from_value(value).map_err(|source| Error::Decode { context: context(), source }),
			Err(source) => Err(Error::Read { context: context(), source }),
		}
	}

	/// Native currency balance of `holder`, in wei.
	pub async fn balance_at<C>(&self, holder: Address, at: Option<Snapshot>, context: C) -> Result<BigUint>
	where
		C: FnOnce() -> String,
	{
		tracing::trace!(%holder, ?at, "rpc.balance");
		self.inner
			.reader
			.balance_at(holder, at)
			.await
			.map_err(|source| Error::Read { context: context(), source })
	}
}

impl fmt::Debug for Client {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Client")
			.field("contracts", &self.inner.contracts)
			.field("config", &self.inner.config)
			.finish_non_exhaustive()
	}
}
