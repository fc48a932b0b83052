//! Minipool registry reads.
//!
//! Every collection follows the same shape: one count read, then one read per
//! index fanned out in bounded windows by [`poolview_worker::collect_batched`].
//! Detail collections add a second, inner fan-out over the attributes of each
//! minipool.
//!
//! All reads of one operation use the same snapshot, and any single failing
//! read fails the whole operation with no partial result.

mod collect;
mod details;
mod registry;

pub use collect::{
	addresses, load_minipool_details, minipool_addresses, minipools, minipools_in, node_minipool_addresses, node_minipools,
	node_validating_minipool_pubkeys, unprocessed_minipool_addresses, unprocessed_minipools,
};
pub use details::{
	MinipoolDetails, minipool_by_pubkey, minipool_details, minipool_exists, minipool_pubkey, minipool_withdrawable,
	minipool_withdrawal_node_balance, minipool_withdrawal_processed, minipool_withdrawal_total_balance,
};
pub use registry::{Registry, address_at, count};
