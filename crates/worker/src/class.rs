/// Execution classes used to label spawned work in traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Single-call index lookups (address at index, count).
	IndexLookup,
	/// Per-item work that fans out into several remote reads of its own.
	DetailFetch,
}

impl TaskClass {
	/// Stable label for structured logging.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::IndexLookup => "index_lookup",
			Self::DetailFetch => "detail_fetch",
		}
	}
}
