use std::fmt;

use poolview_primitives::{Address, Snapshot};
use poolview_rpc::{Client, Contract, Result, Value};

/// One of the indexed minipool registries held by the manager contract.
///
/// Each registry has its own count and its own dense index space. The same
/// minipool can sit at different indices in different registries, or be
/// missing from some of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Registry {
	/// Every minipool ever created.
	All,
	/// Minipools whose withdrawal has not been processed.
	Unprocessed,
	/// Minipools owned by a node.
	Node(Address),
	/// A node's minipools with an active validator.
	NodeValidating(Address),
}

impl Registry {
	fn count_method(self) -> &'static str {
		match self {
			Self::All => "getMinipoolCount",
			Self::Unprocessed => "getUnprocessedMinipoolCount",
			Self::Node(_) => "getNodeMinipoolCount",
			Self::NodeValidating(_) => "getNodeValidatingMinipoolCount",
		}
	}

	fn at_method(self) -> &'static str {
		match self {
			Self::All => "getMinipoolAt",
			Self::Unprocessed => "getUnprocessedMinipoolAt",
			Self::Node(_) => "getNodeMinipoolAt",
			Self::NodeValidating(_) => "getNodeValidatingMinipoolAt",
		}
	}

	/// Node the registry is scoped to, if any.
	pub const fn node(self) -> Option<Address> {
		match self {
			Self::All | Self::Unprocessed => None,
			Self::Node(node) | Self::NodeValidating(node) => Some(node),
		}
	}

	/// Call arguments: the scoping node first, then the index.
	fn args(self, index: Option<u64>) -> Vec<Value> {
		self.node().map(Value::from).into_iter().chain(index.map(Value::from)).collect()
	}
}

impl fmt::Display for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::All => f.write_str("minipool"),
			Self::Unprocessed => f.write_str("unprocessed minipool"),
			Self::Node(node) => write!(f, "node {node} minipool"),
			Self::NodeValidating(node) => write!(f, "node {node} validating minipool"),
		}
	}
}

pub(crate) async fn manager(client: &Client) -> Result<Contract> {
	client.contract(&client.config().minipool_manager).await
}

/// Number of minipools in `registry`.
pub async fn count(client: &Client, registry: Registry, at: Option<Snapshot>) -> Result<u64> {
	let manager = manager(client).await?;
	client
		.read(&manager, registry.count_method(), &registry.args(None), at, || format!("get {registry} count"))
		.await
}

/// Address of the minipool at `index` in `registry`.
pub async fn address_at(client: &Client, registry: Registry, index: u64, at: Option<Snapshot>) -> Result<Address> {
	let manager = manager(client).await?;
	client
		.read(&manager, registry.at_method(), &registry.args(Some(index)), at, || {
			format!("get {registry} {index} address")
		})
		.await
}
