//! Read-only remote call boundary for on-chain registries.
//!
//! This crate owns everything between the collectors and the transport:
//! * [`RemoteReader`] and [`ContractResolver`]: the injected call interface.
//! * [`Value`] and [`FromValue`]: decoded return values and typed extraction.
//! * [`ContractRegistry`]: memoized, single-flight contract handle cache.
//! * [`Client`]: the context handed to every read, bundling the reader, the
//!   handle cache and the [`ReaderConfig`].

#![warn(missing_docs)]

mod client;
pub mod config;
mod contracts;
pub mod error;
mod reader;
#[cfg(any(test, feature = "test-support"))]
pub mod test_helpers;
mod value;

pub use client::Client;
pub use config::ReaderConfig;
pub use contracts::{Contract, ContractRegistry};
pub use error::{DecodeError, Error, ReadError, Result};
pub use reader::{ContractResolver, RemoteReader};
pub use value::{FromValue, Value};
