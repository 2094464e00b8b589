//! # domain2ip
//!
//! Bulk domain-to-IP resolution for Rust.
//!
//! `domain2ip` turns raw user input — bare hostnames, internationalized
//! domain names, literal IPs, or full URLs — into deduplicated, numerically
//! ordered sets of IPv4 and IPv6 addresses, resolving many inputs
//! concurrently under a bounded worker pool.
//!
//! ## Features
//!
//! - **Input normalization**: URL host extraction, IDNA encoding, label
//!   validation, literal-IP canonicalization
//! - **Dual resolver backends**: async hickory-dns (default) or the system
//!   resolver via `getaddrinfo`
//! - **Per-record-type queries**: independent A and AAAA lookups, each
//!   bounded by a caller-supplied timeout
//! - **Bounded fan-out**: semaphore-limited concurrency with per-item error
//!   isolation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use domain2ip::dns::{default_resolver, resolve_many};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let resolver = default_resolver();
//!     let inputs = vec!["example.com".to_string(), "https://example.org/x".to_string()];
//!     let results = resolve_many(resolver, &inputs, Duration::from_secs(5), 4).await;
//!     for (host, entry) in &results {
//!         println!("{host}: {entry:?}");
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Core error definitions
//! - [`dns`] - Validation, resolver backends, and batch dispatch
//! - [`cli`] - Command-line front-end used by the `domain2ip` binary

pub mod base;
pub mod cli;
pub mod dns;
