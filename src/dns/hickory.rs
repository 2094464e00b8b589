//! Async DNS resolver using hickory-dns.
//!
//! This resolver issues independent A and AAAA queries per host, each
//! bounded by the caller's timeout, and is the preferred backend when the
//! `hickory-dns` feature is enabled.
//!
//! # Performance
//!
//! Unlike `GaiResolver`, this resolver is fully async and doesn't require
//! spawning blocking tasks. It maintains connection pools to DNS servers
//! for better performance under load.

use super::{Name, Resolve, ResolveResult, Resolving};
use crate::base::DnsError;
use futures::future::try_join;
use hickory_resolver::{
    config::ResolverConfig, name_server::TokioConnectionProvider, proto::ProtoErrorKind,
    ResolveError, ResolveErrorKind, TokioResolver,
};
use std::{
    collections::BTreeSet,
    net::{Ipv4Addr, Ipv6Addr},
    sync::LazyLock,
    time::Duration,
};

/// Async DNS resolver backed by hickory-dns.
///
/// The underlying resolver is lazily initialized on first use and shared
/// across all instances via a static `LazyLock`. It automatically
/// configures itself from the system's DNS settings; if those cannot be
/// read, it falls back to sensible defaults.
#[derive(Debug, Clone)]
pub struct HickoryResolver {
    resolver: &'static LazyLock<TokioResolver>,
}

impl HickoryResolver {
    /// Creates a new `HickoryResolver`.
    pub fn new() -> Self {
        static RESOLVER: LazyLock<TokioResolver> = LazyLock::new(|| {
            let builder = match TokioResolver::builder_tokio() {
                Ok(builder) => {
                    tracing::debug!("Using system DNS configuration");
                    builder
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Failed to read system DNS config, using defaults"
                    );
                    TokioResolver::builder_with_config(
                        ResolverConfig::default(),
                        TokioConnectionProvider::default(),
                    )
                }
            };

            builder.build()
        });

        Self {
            resolver: &RESOLVER,
        }
    }
}

impl Default for HickoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a per-query hickory error onto the crate taxonomy.
///
/// `None` means "no records of this type" — an empty result for the
/// family, not a failure; the other family's query still counts.
fn classify(host: &str, err: &ResolveError) -> Option<DnsError> {
    if err.is_nx_domain() {
        return Some(DnsError::NxDomain(host.to_string()));
    }
    if err.is_no_records_found() {
        return None;
    }
    if let ResolveErrorKind::Proto(proto) = err.kind() {
        match proto.kind() {
            ProtoErrorKind::Timeout => return Some(DnsError::Timeout(host.to_string())),
            ProtoErrorKind::NoConnections => {
                return Some(DnsError::NoNameservers(host.to_string()))
            }
            _ => {}
        }
    }
    Some(DnsError::ResolutionFailed(host.to_string()))
}

async fn lookup_a(
    resolver: &TokioResolver,
    host: &str,
    timeout: Duration,
) -> Result<BTreeSet<Ipv4Addr>, DnsError> {
    match tokio::time::timeout(timeout, resolver.ipv4_lookup(host)).await {
        Err(_) => Err(DnsError::Timeout(host.to_string())),
        Ok(Ok(lookup)) => Ok(lookup.iter().map(|record| record.0).collect()),
        Ok(Err(e)) => {
            tracing::debug!(domain = %host, error = %e, "A query failed");
            match classify(host, &e) {
                None => Ok(BTreeSet::new()),
                Some(err) => Err(err),
            }
        }
    }
}

async fn lookup_aaaa(
    resolver: &TokioResolver,
    host: &str,
    timeout: Duration,
) -> Result<BTreeSet<Ipv6Addr>, DnsError> {
    match tokio::time::timeout(timeout, resolver.ipv6_lookup(host)).await {
        Err(_) => Err(DnsError::Timeout(host.to_string())),
        Ok(Ok(lookup)) => Ok(lookup.iter().map(|record| record.0).collect()),
        Ok(Err(e)) => {
            tracing::debug!(domain = %host, error = %e, "AAAA query failed");
            match classify(host, &e) {
                None => Ok(BTreeSet::new()),
                Some(err) => Err(err),
            }
        }
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, name: Name, timeout: Duration) -> Resolving {
        let shared = self.clone();
        Box::pin(async move {
            let host = name.as_str();
            let resolver: &TokioResolver = shared.resolver;
            tracing::debug!(domain = %host, "resolving via hickory-dns");

            let (ipv4, ipv6) = try_join(
                lookup_a(resolver, host, timeout),
                lookup_aaaa(resolver, host, timeout),
            )
            .await?;

            tracing::debug!(
                domain = %host,
                ipv4 = ipv4.len(),
                ipv6 = ipv6.len(),
                "hickory-dns resolution complete"
            );
            Ok(ResolveResult { ipv4, ipv6 })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hickory_resolver_is_clone() {
        let r1 = HickoryResolver::new();
        let r2 = r1.clone();
        // Both should point to the same static resolver
        assert!(std::ptr::eq(r1.resolver, r2.resolver));
    }

    #[tokio::test]
    async fn test_hickory_resolver_invalid_domain() {
        let resolver = HickoryResolver::new();
        let result = resolver
            .resolve(
                Name::new("this-domain-definitely-does-not-exist.invalid"),
                Duration::from_secs(2),
            )
            .await;

        // NXDOMAIN with a working network, timeout or no-connections
        // without one; a resolution failure either way.
        let err = result.expect_err("the .invalid TLD must never resolve");
        assert!(err.is_resolution_failure());
    }
}
