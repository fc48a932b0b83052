//! Memoized contract handles.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use poolview_primitives::Address;
use tokio::sync::OnceCell;

use crate::Result;
use crate::reader::ContractResolver;

/// Resolved handle to a named contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contract {
	name: Arc<str>,
	address: Address,
}

impl Contract {
	/// Creates a handle from a name and its resolved address.
	pub fn new(name: impl Into<Arc<str>>, address: Address) -> Self {
		Self { name: name.into(), address }
	}

	/// Registered contract name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Deployed address.
	pub const fn address(&self) -> Address {
		self.address
	}
}

impl fmt::Display for Contract {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}@{}", self.name, self.address)
	}
}

/// Cache of contract handles keyed by name.
///
/// Each name is resolved at most once. Concurrent first use is single-flight:
/// one caller runs [`ContractResolver::resolve`] while the others wait for its
/// result. A failed resolution is not cached and the next caller retries.
///
/// # Concurrency
///
/// - `slots`: the map lock is held only to find or insert a name's cell,
///   never across the resolver call.
/// - each cell serializes its own initialization; once set it is read
///   without locking.
pub struct ContractRegistry {
	resolver: Arc<dyn ContractResolver>,
	slots: Mutex<HashMap<String, Arc<OnceCell<Contract>>>>,
}

impl ContractRegistry {
	/// Creates an empty cache in front of `resolver`.
	pub fn new(resolver: Arc<dyn ContractResolver>) -> Self {
		Self {
			resolver,
			slots: Mutex::new(HashMap::new()),
		}
	}

	/// Returns the handle for `name`, resolving it on first use.
	///
	/// # Errors
	///
	/// Returns [`crate::Error::Resolve`] if the resolver fails.
	pub async fn get(&self, name: &str) -> Result<Contract> {
		let cell = self.slot(name);
		let contract = cell
			.get_or_try_init(|| async {
				let address = self.resolver.resolve(name).await.map_err(|source| crate::Error::Resolve {
					name: name.to_string(),
					source,
				})?;
				tracing::debug!(contract = name, %address, "rpc.contract.resolved");
				Ok::<_, crate::Error>(Contract::new(name, address))
			})
			.await?;
		Ok(contract.clone())
	}

	/// Returns the handle for `name` if it has already been resolved.
	pub fn cached(&self, name: &str) -> Option<Contract> {
		self.slots.lock().get(name).and_then(|cell| cell.get().cloned())
	}

	/// Number of resolved handles.
	pub fn len(&self) -> usize {
		self.slots.lock().values().filter(|cell| cell.initialized()).count()
	}

	/// Returns `true` if nothing has been resolved yet.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn slot(&self, name: &str) -> Arc<OnceCell<Contract>> {
		let mut slots = self.slots.lock();
		Arc::clone(slots.entry(name.to_string()).or_default())
	}
}

impl fmt::Debug for ContractRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ContractRegistry").field("resolved", &self.len()).finish_non_exhaustive()
	}
}
