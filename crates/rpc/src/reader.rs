use async_trait::async_trait;
use num_bigint::BigUint;
use poolview_primitives::{Address, Snapshot};

use crate::error::ReadError;
use crate::value::Value;

/// One read-only call against the chain.
///
/// Implementations own transport, encoding and any retry policy; callers see
/// a decoded [`Value`] or a [`ReadError`]. `at` selects historical state and
/// is forwarded unchanged; `None` reads the latest state.
#[async_trait]
pub trait RemoteReader: Send + Sync {
	/// Calls a view method on a contract.
	async fn call(&self, contract: Address, method: &str, args: &[Value], at: Option<Snapshot>) -> Result<Value, ReadError>;

	/// Returns the native currency balance of an account, in wei.
	async fn balance_at(&self, holder: Address, at: Option<Snapshot>) -> Result<BigUint, ReadError>;
}

/// Resolves a contract name to its deployed address.
///
/// Results are memoized by [`crate::ContractRegistry`], so implementations
/// are called at most once per name per successful resolution.
#[async_trait]
pub trait ContractResolver: Send + Sync {
	/// Looks up the current address registered for `name`.
	async fn resolve(&self, name: &str) -> Result<Address, ReadError>;
}
