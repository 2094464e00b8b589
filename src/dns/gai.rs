//! System DNS resolver using getaddrinfo.
//!
//! This resolver uses the operating system's native DNS resolution via
//! `getaddrinfo`, executed in a thread pool to avoid blocking the async
//! runtime. It is the fallback backend when hickory-dns is compiled out.

use super::{Name, Resolve, ResolveResult, Resolving};
use crate::base::DnsError;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::time::Duration;

/// System DNS resolver using `getaddrinfo` in a thread pool.
///
/// This resolver wraps the standard library's `ToSocketAddrs` trait and
/// executes resolution in `tokio::task::spawn_blocking`. A single combined
/// lookup returns both families; the addresses are partitioned into
/// ipv4/ipv6 sets afterwards. `getaddrinfo` has no deadline of its own, so
/// the whole call is additionally bounded by `tokio::time::timeout`.
#[derive(Clone, Debug, Default)]
pub struct GaiResolver;

impl GaiResolver {
    /// Creates a new `GaiResolver`.
    pub fn new() -> Self {
        Self
    }
}

/// Splits socket addresses by address family into a `ResolveResult`.
fn partition(addrs: Vec<SocketAddr>) -> ResolveResult {
    let mut result = ResolveResult::default();
    for addr in addrs {
        match addr.ip() {
            IpAddr::V4(v4) => {
                result.ipv4.insert(v4);
            }
            IpAddr::V6(v6) => {
                result.ipv6.insert(v6);
            }
        }
    }
    result
}

impl Resolve for GaiResolver {
    fn resolve(&self, name: Name, timeout: Duration) -> Resolving {
        Box::pin(async move {
            let host = name.as_str().to_string();
            let domain = host.clone();

            let lookup = tokio::task::spawn_blocking(move || {
                tracing::debug!(host = %host, "resolving via getaddrinfo");
                (host.as_str(), 0u16)
                    .to_socket_addrs()
                    .map(|iter| iter.collect::<Vec<_>>())
            });

            // The blocking thread cannot be interrupted; a timed-out lookup
            // is abandoned and its thread finishes in the background.
            let joined = match tokio::time::timeout(timeout, lookup).await {
                Err(_) => {
                    tracing::debug!(domain = %domain, "getaddrinfo exceeded the deadline");
                    return Err(DnsError::Timeout(domain));
                }
                Ok(joined) => joined,
            };

            let addrs = joined
                .map_err(|e| {
                    tracing::error!(error = %e, "DNS resolution task failed");
                    DnsError::ResolutionFailed(domain.clone())
                })?
                .map_err(|e| {
                    tracing::debug!(domain = %domain, error = %e, "DNS resolution failed");
                    DnsError::ResolutionFailed(domain.clone())
                })?;

            tracing::debug!(domain = %domain, count = addrs.len(), "DNS resolution complete");
            Ok(partition(addrs))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr, SocketAddrV4, SocketAddrV6};

    #[test]
    fn test_partition_splits_by_family() {
        let addrs = vec![
            SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(192, 0, 2, 1), 0)),
            SocketAddr::V6(SocketAddrV6::new(Ipv6Addr::LOCALHOST, 0, 0, 0)),
            SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(192, 0, 2, 1), 0)),
        ];

        let result = partition(addrs);
        assert_eq!(result.ipv4.len(), 1); // duplicate collapsed
        assert_eq!(result.ipv6.len(), 1);
    }

    #[test]
    fn test_partition_orders_numerically() {
        let addrs = vec![
            SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 1), 0)),
            SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(2, 2, 2, 2), 0)),
        ];

        let result = partition(addrs);
        let rendered: Vec<String> = result.ipv4.iter().map(|ip| ip.to_string()).collect();
        assert_eq!(rendered, ["2.2.2.2", "10.0.0.1"]);
    }

    #[tokio::test]
    async fn test_gai_resolver_localhost() {
        let resolver = GaiResolver::new();
        let result = resolver
            .resolve(Name::new("localhost"), Duration::from_secs(5))
            .await;

        // localhost should resolve on any system; soft-fail when the
        // environment has no resolver at all.
        if let Ok(result) = result {
            assert!(!result.is_empty());
        } else {
            println!("GaiResolver failed for localhost - possibly no network access");
        }
    }
}
