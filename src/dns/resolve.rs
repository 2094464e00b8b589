//! Core DNS resolution types and traits.
//!
//! This module defines the `Resolve` trait and supporting types that form
//! the foundation of the resolution layer.

use crate::base::DnsError;
use serde::Serialize;
use std::{
    collections::BTreeSet,
    fmt,
    future::Future,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    pin::Pin,
    sync::Arc,
    time::Duration,
};

/// A canonical host to resolve into IP addresses.
///
/// This is a lightweight wrapper around a hostname string that provides
/// a type-safe way to pass already-normalized hosts to resolvers.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Resolved addresses for a single host, split by family.
///
/// The ordered-set representation gives deduplication and ascending numeric
/// ordering for free: `2.2.2.2` sorts before `10.0.0.1` by address value,
/// not by string comparison. Both fields serialize as JSON arrays of
/// address strings. Empty sets are valid (no records found).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolveResult {
    pub ipv4: BTreeSet<Ipv4Addr>,
    pub ipv6: BTreeSet<Ipv6Addr>,
}

impl ResolveResult {
    /// Builds a result holding exactly one literal address in the matching
    /// family's set.
    pub fn from_literal(ip: IpAddr) -> Self {
        let mut result = Self::default();
        match ip {
            IpAddr::V4(v4) => {
                result.ipv4.insert(v4);
            }
            IpAddr::V6(v6) => {
                result.ipv6.insert(v6);
            }
        }
        result
    }

    /// True when neither family produced any address.
    pub fn is_empty(&self) -> bool {
        self.ipv4.is_empty() && self.ipv6.is_empty()
    }
}

/// Alias for the `Future` type returned by a DNS resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<ResolveResult, DnsError>> + Send>>;

/// Trait for DNS resolution.
///
/// This is the seam between the batch dispatcher and the two backends.
/// Implementations must be thread-safe.
///
/// # Design Notes
///
/// - Uses `&self` for concurrent resolution without mutable access.
/// - Returns boxed futures for trait object compatibility.
/// - Every implementation must return or fail within `timeout`, even when
///   the underlying primitive has looser timeout semantics.
pub trait Resolve: Send + Sync {
    /// Resolves a canonical host to its IPv4/IPv6 address sets.
    fn resolve(&self, name: Name, timeout: Duration) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name, timeout: Duration) -> Resolving {
        (**self).resolve(name, timeout)
    }
}

/// Resolves a canonical host, short-circuiting literal IPs.
///
/// A host that is itself a literal IP address never issues a network call:
/// the address is returned in the matching family's set with the other set
/// empty. Everything else is delegated to `resolver`.
pub async fn resolve_host(
    resolver: &dyn Resolve,
    host: &str,
    timeout: Duration,
) -> Result<ResolveResult, DnsError> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ResolveResult::from_literal(ip));
    }
    resolver.resolve(Name::new(host), timeout).await
}

/// Returns the backend selected at build time.
///
/// With the `hickory-dns` feature (the default) this is the async
/// hickory-dns resolver; otherwise the system `getaddrinfo` resolver.
pub fn default_resolver() -> Arc<dyn Resolve> {
    #[cfg(feature = "hickory-dns")]
    {
        Arc::new(super::HickoryResolver::new())
    }
    #[cfg(not(feature = "hickory-dns"))]
    {
        Arc::new(super::GaiResolver::new())
    }
}
