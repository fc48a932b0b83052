//! Shared task primitives for fanning remote reads out over Tokio.
//!
//! * [`TaskClass`]: labels spawned work for tracing.
//! * [`WorkerJoinSet`]: a classified [`tokio::task::JoinSet`].
//! * [`collect_batched`]: ordered, windowed, fail-fast collection of `count`
//!   independently fetchable items.

mod batch;
mod class;
mod join_set;

pub use batch::{Windows, collect_batched, windows};
pub use class::TaskClass;
pub use join_set::WorkerJoinSet;
