use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use proptest::prelude::*;
use tokio::sync::Barrier;

use super::*;

#[derive(Debug, PartialEq, Eq)]
enum TestError {
	Fetch(u64),
	Join,
}

impl From<JoinError> for TestError {
	fn from(_: JoinError) -> Self {
		Self::Join
	}
}

fn size(n: usize) -> NonZeroUsize {
	NonZeroUsize::new(n).unwrap()
}

#[test]
fn windows_of_seventy_three_by_twenty() {
	let plan: Vec<_> = windows(73, size(20)).collect();
	assert_eq!(plan, vec![0..20, 20..40, 40..60, 60..73]);
	assert_eq!(windows(73, size(20)).len(), 4);
}

#[test]
fn windows_of_zero_is_empty() {
	assert_eq!(windows(0, size(50)).count(), 0);
}

proptest! {
	#[test]
	fn windows_cover_every_index_once(count in 0u64..2_000, batch in 1usize..128) {
		let plan: Vec<_> = windows(count, size(batch)).collect();
		let mut expected = 0;
		for (i, w) in plan.iter().enumerate() {
			prop_assert_eq!(w.start, expected);
			prop_assert!(w.end > w.start);
			if i + 1 < plan.len() {
				prop_assert_eq!(w.end - w.start, batch as u64);
			} else {
				prop_assert!(w.end - w.start <= batch as u64);
			}
			expected = w.end;
		}
		prop_assert_eq!(expected, count);
		prop_assert_eq!(plan.len(), windows(count, size(batch)).len());
	}
}

#[tokio::test]
async fn empty_collection_issues_no_fetches() {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let items: Vec<u64> = collect_batched(TaskClass::IndexLookup, 0, size(20), move |i| {
		counter.fetch_add(1, Ordering::SeqCst);
		async move { Ok::<_, TestError>(i) }
	})
	.await
	.unwrap();

	assert!(items.is_empty());
	assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn results_follow_index_order() {
	let items = collect_batched(TaskClass::IndexLookup, 137, size(16), |i| async move {
		// Later indices in a window finish first.
		tokio::time::sleep(Duration::from_micros(200 - (i % 16) * 10)).await;
		Ok::<_, TestError>(i * 3)
	})
	.await
	.unwrap();

	assert_eq!(items.len(), 137);
	for (i, value) in items.iter().enumerate() {
		assert_eq!(*value, i as u64 * 3);
	}
}

#[tokio::test]
async fn failure_stops_later_windows() {
	let calls = Arc::new(AtomicUsize::new(0));
	let highest = Arc::new(AtomicU64::new(0));
	let (c, h) = (Arc::clone(&calls), Arc::clone(&highest));

	let result = collect_batched(TaskClass::IndexLookup, 73, size(20), move |i| {
		c.fetch_add(1, Ordering::SeqCst);
		h.fetch_max(i, Ordering::SeqCst);
		async move { if i == 45 { Err(TestError::Fetch(i)) } else { Ok(i) } }
	})
	.await;

	assert_eq!(result, Err(TestError::Fetch(45)));
	assert!(highest.load(Ordering::SeqCst) < 60);
	assert!(calls.load(Ordering::SeqCst) <= 60);
	assert!(calls.load(Ordering::SeqCst) > 40);
}

#[tokio::test]
async fn one_of_several_errors_is_returned() {
	let result = collect_batched(TaskClass::DetailFetch, 10, size(10), |i| async move {
		if i % 3 == 0 { Err(TestError::Fetch(i)) } else { Ok(i) }
	})
	.await;

	match result {
		Err(TestError::Fetch(i)) => assert_eq!(i % 3, 0),
		other => panic!("expected a fetch error, got {other:?}"),
	}
}

#[tokio::test]
async fn panicking_task_fails_the_collection() {
	let result = collect_batched(TaskClass::IndexLookup, 5, size(5), |i| async move {
		assert_ne!(i, 2, "boom");
		Ok::<_, TestError>(i)
	})
	.await;

	assert_eq!(result, Err(TestError::Join));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn window_tasks_run_concurrently() {
	// Every task parks on a barrier sized to the window: the collection only
	// completes if all tasks of a window are in flight together.
	let barrier = Arc::new(Barrier::new(20));
	let b = Arc::clone(&barrier);
	let items = tokio::time::timeout(
		Duration::from_secs(5),
		collect_batched(TaskClass::IndexLookup, 60, size(20), move |i| {
			let b = Arc::clone(&b);
			async move {
				b.wait().await;
				Ok::<_, TestError>(i)
			}
		}),
	)
	.await
	.expect("window tasks did not overlap")
	.unwrap();

	assert_eq!(items, (0..60).collect::<Vec<_>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn in_flight_never_exceeds_batch_size() {
	let in_flight = Arc::new(AtomicUsize::new(0));
	let peak = Arc::new(AtomicUsize::new(0));
	let (f, p) = (Arc::clone(&in_flight), Arc::clone(&peak));

	collect_batched(TaskClass::DetailFetch, 95, size(7), move |i| {
		let (f, p) = (Arc::clone(&f), Arc::clone(&p));
		async move {
			let now = f.fetch_add(1, Ordering::SeqCst) + 1;
			p.fetch_max(now, Ordering::SeqCst);
			tokio::time::sleep(Duration::from_micros(50)).await;
			f.fetch_sub(1, Ordering::SeqCst);
			Ok::<_, TestError>(i)
		}
	})
	.await
	.unwrap();

	assert!(peak.load(Ordering::SeqCst) <= 7);
	assert_eq!(in_flight.load(Ordering::SeqCst), 0);
}
