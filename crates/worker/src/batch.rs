use std::future::Future;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::sync::Arc;

use tokio::task::JoinError;

use crate::{TaskClass, WorkerJoinSet};

/// Consecutive index windows covering `[0, count)`.
///
/// Every window holds `batch_size` indices except possibly the last.
#[derive(Debug, Clone)]
pub struct Windows {
	next: u64,
	count: u64,
	batch_size: u64,
}

/// Partitions `[0, count)` into windows of at most `batch_size` indices.
pub fn windows(count: u64, batch_size: NonZeroUsize) -> Windows {
	Windows {
		next: 0,
		count,
		batch_size: u64::try_from(batch_size.get()).unwrap_or(u64::MAX),
	}
}

impl Iterator for Windows {
	type Item = Range<u64>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.next >= self.count {
			return None;
		}
		let start = self.next;
		let end = start.saturating_add(self.batch_size).min(self.count);
		self.next = end;
		Some(start..end)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = (self.count - self.next.min(self.count)).div_ceil(self.batch_size);
		let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for Windows {}

/// Fetches `count` items by index, at most `batch_size` at a time, and
/// returns them in index order.
///
/// Windows run strictly one after another. Inside a window one task is
/// spawned per index and the window is a barrier: every task is joined before
/// the next window starts. Slot `i` of the result always holds the output of
/// `fetch(i)`, whatever order the tasks completed in.
///
/// The first error observed in a window wins. Its siblings are aborted, their
/// outputs and any further errors are dropped, later windows never start, and
/// no partial collection is returned. Which error counts as "first" among
/// concurrently failing tasks is unspecified.
pub async fn collect_batched<T, E, F, Fut>(class: TaskClass, count: u64, batch_size: NonZeroUsize, fetch: F) -> Result<Vec<T>, E>
where
	F: Fn(u64) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<T, E>> + Send + 'static,
	T: Send + 'static,
	E: From<JoinError> + Send + 'static,
{
	let plan = windows(count, batch_size);
	tracing::debug!(
		worker_class = class.as_str(),
		count,
		batch_size = batch_size.get(),
		windows = plan.len(),
		"worker.batch.start"
	);

	let fetch = Arc::new(fetch);
	let mut items = Vec::with_capacity(usize::try_from(count).unwrap_or_default());
	for window in plan {
		let start = window.start;
		match run_window(class, window, &fetch).await {
			Ok(batch) => items.extend(batch),
			Err(err) => {
				tracing::debug!(worker_class = class.as_str(), window_start = start, "worker.batch.abort");
				return Err(err);
			}
		}
	}

	tracing::debug!(worker_class = class.as_str(), count, "worker.batch.done");
	Ok(items)
}

async fn run_window<T, E, F, Fut>(class: TaskClass, window: Range<u64>, fetch: &Arc<F>) -> Result<Vec<T>, E>
where
	F: Fn(u64) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<T, E>> + Send + 'static,
	T: Send + 'static,
	E: From<JoinError> + Send + 'static,
{
	let mut set = WorkerJoinSet::new(class);
	for index in window.clone() {
		let fetch = Arc::clone(fetch);
		set.spawn(async move { (index, fetch(index).await) });
	}

	let mut slots: Vec<Option<T>> = window.clone().map(|_| None).collect();
	while let Some(joined) = set.join_next().await {
		let failure = match joined {
			Ok((index, Ok(item))) => {
				if let Some(slot) = usize::try_from(index - window.start).ok().and_then(|i| slots.get_mut(i)) {
					*slot = Some(item);
				}
				continue;
			}
			Ok((_, Err(err))) => err,
			Err(join_err) => E::from(join_err),
		};
		set.shutdown().await;
		return Err(failure);
	}

	let batch: Vec<T> = slots.into_iter().flatten().collect();
	debug_assert_eq!(batch.len() as u64, window.end - window.start);
	Ok(batch)
}

#[cfg(test)]
mod tests;
