//! DNS Resolution Module
//!
//! Provides input validation and pluggable DNS resolution with support for:
//! - Async hickory-dns resolver (primary, behind the `hickory-dns` feature)
//! - System resolver (getaddrinfo via thread pool) as the fallback backend
//! - Bounded-concurrency batch dispatch with per-item error isolation
//!
//! # Architecture
//!
//! The [`Resolve`] trait is the core abstraction that allows the two
//! resolver backends to be used interchangeably. The backend is chosen once
//! at startup by [`default_resolver`] based on which capability was compiled
//! in; call sites never branch on it. [`normalize`] turns raw user input
//! into the canonical key the resolvers accept, and [`resolve_many`] fans a
//! whole batch out across bounded workers.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain2ip::dns::{default_resolver, resolve_host, normalize};
//! use std::time::Duration;
//!
//! let resolver = default_resolver();
//! let host = normalize("https://Example.com/path")?;
//! let result = resolve_host(resolver.as_ref(), &host, Duration::from_secs(5)).await?;
//! println!("ipv4: {:?}, ipv6: {:?}", result.ipv4, result.ipv6);
//! ```

mod batch;
mod gai;
#[cfg(feature = "hickory-dns")]
mod hickory;
mod resolve;
mod validate;

pub use batch::{resolve_many, ResultEntry, ResultsMap};
pub use gai::GaiResolver;
#[cfg(feature = "hickory-dns")]
pub use hickory::HickoryResolver;
pub use resolve::{default_resolver, resolve_host, Name, Resolve, ResolveResult, Resolving};
pub use validate::{is_ip_address, normalize};
