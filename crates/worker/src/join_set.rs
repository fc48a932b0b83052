use std::future::Future;

use tokio::task::{JoinError, JoinSet};

use crate::TaskClass;

/// Classified wrapper for a Tokio [`JoinSet`].
///
/// Every task in the set carries the same [`TaskClass`], which is attached to
/// the trace events emitted on spawn and shutdown.
#[derive(Debug)]
pub struct WorkerJoinSet<T> {
	class: TaskClass,
	inner: JoinSet<T>,
}

impl<T> WorkerJoinSet<T>
where
	T: Send + 'static,
{
	/// Creates an empty join set for the given task class.
	pub fn new(class: TaskClass) -> Self {
		Self { class, inner: JoinSet::new() }
	}

	/// Spawns a future into the set on the current runtime.
	pub fn spawn<F>(&mut self, fut: F)
	where
		F: Future<Output = T> + Send + 'static,
	{
		tracing::trace!(worker_class = self.class.as_str(), pending = self.inner.len(), "worker.join_set.spawn");
		self.inner.spawn(fut);
	}

	/// Waits for the next completed task.
	pub async fn join_next(&mut self) -> Option<Result<T, JoinError>> {
		self.inner.join_next().await
	}

	/// Aborts every remaining task and waits until all of them have exited.
	///
	/// Outputs of tasks that finish before observing the abort are dropped.
	pub async fn shutdown(&mut self) {
		tracing::trace!(worker_class = self.class.as_str(), pending = self.inner.len(), "worker.join_set.shutdown");
		self.inner.shutdown().await;
	}
}
