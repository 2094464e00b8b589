//! Batch dispatch: fan many raw inputs out to validate+resolve pairs.
//!
//! Each item is processed independently — normalization first, then
//! resolution — and every failure is converted into a result-map entry at
//! the item boundary. One item can never abort or affect another.

use super::{normalize, resolve_host, Resolve, ResolveResult};
use serde::Serialize;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::Semaphore;

/// Outcome for a single input: resolved addresses or an error string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResultEntry {
    /// Successful resolution; serializes as `{"ipv4": [...], "ipv6": [...]}`.
    Resolved(ResolveResult),
    /// Failed normalization or resolution; serializes as `{"error": "..."}`.
    Failed { error: String },
}

impl ResultEntry {
    /// True when this entry records a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, ResultEntry::Failed { .. })
    }
}

/// Mapping from canonical host (or raw input, on normalization failure) to
/// its outcome. Population order is unspecified when concurrency > 1.
pub type ResultsMap = HashMap<String, ResultEntry>;

/// Processes one raw input into its `(key, entry)` pair.
///
/// Normalization failures are keyed by the raw input as given and never
/// reach the resolver; resolution outcomes are keyed by the canonical host.
async fn resolve_one(resolver: &dyn Resolve, raw: &str, timeout: Duration) -> (String, ResultEntry) {
    let host = match normalize(raw) {
        Ok(host) => host,
        Err(e) => {
            return (
                raw.to_string(),
                ResultEntry::Failed {
                    error: e.to_string(),
                },
            )
        }
    };

    match resolve_host(resolver, &host, timeout).await {
        Ok(result) => (host, ResultEntry::Resolved(result)),
        Err(e) => (
            host,
            ResultEntry::Failed {
                error: e.to_string(),
            },
        ),
    }
}

/// Resolves a batch of raw inputs under bounded concurrency.
///
/// With `max_workers <= 1` or a single input the batch runs sequentially in
/// input order. Otherwise items are spawned as tasks throttled by a
/// semaphore with `max_workers` permits. If two inputs normalize to the
/// same canonical key, the later-completing one wins.
pub async fn resolve_many(
    resolver: Arc<dyn Resolve>,
    inputs: &[String],
    timeout: Duration,
    max_workers: usize,
) -> ResultsMap {
    let mut results = ResultsMap::with_capacity(inputs.len());
    if inputs.is_empty() {
        return results;
    }

    if max_workers <= 1 || inputs.len() == 1 {
        for raw in inputs {
            let (key, entry) = resolve_one(resolver.as_ref(), raw, timeout).await;
            results.insert(key, entry);
        }
        return results;
    }

    let semaphore = Arc::new(Semaphore::new(max_workers));
    let mut handles = Vec::with_capacity(inputs.len());
    for raw in inputs {
        let raw = raw.clone();
        let resolver = Arc::clone(&resolver);
        let semaphore = Arc::clone(&semaphore);
        handles.push(tokio::spawn(async move {
            // The semaphore is never closed, so acquisition cannot fail
            // outside runtime teardown.
            let _permit = semaphore.acquire_owned().await.ok();
            resolve_one(resolver.as_ref(), &raw, timeout).await
        }));
    }

    for handle in handles {
        match handle.await {
            Ok((key, entry)) => {
                results.insert(key, entry);
            }
            Err(e) => {
                tracing::error!(error = %e, "resolution worker failed");
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::DnsError;
    use crate::dns::{Name, Resolving};
    use std::net::Ipv4Addr;

    /// Scripted backend: outcome depends on the host being resolved.
    struct ScriptedResolver;

    impl Resolve for ScriptedResolver {
        fn resolve(&self, name: Name, _timeout: Duration) -> Resolving {
            let host = name.as_str().to_string();
            Box::pin(async move {
                match host.as_str() {
                    "timeout.example" => Err(DnsError::Timeout(host)),
                    "missing.example" => Err(DnsError::NxDomain(host)),
                    _ => {
                        let mut result = ResolveResult::default();
                        result.ipv4.insert(Ipv4Addr::new(192, 0, 2, 1));
                        Ok(result)
                    }
                }
            })
        }
    }

    struct PanickingResolver;

    impl Resolve for PanickingResolver {
        fn resolve(&self, name: Name, _timeout: Duration) -> Resolving {
            panic!("resolver invoked for '{name}'");
        }
    }

    fn inputs(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let results = resolve_many(
            Arc::new(ScriptedResolver),
            &[],
            Duration::from_secs(1),
            4,
        )
        .await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_sequential_batch() {
        let results = resolve_many(
            Arc::new(ScriptedResolver),
            &inputs(&["ok.example", "missing.example"]),
            Duration::from_secs(1),
            1,
        )
        .await;

        assert_eq!(results.len(), 2);
        assert!(!results["ok.example"].is_error());
        assert_eq!(
            results["missing.example"],
            ResultEntry::Failed {
                error: "domain does not exist: 'missing.example'".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_concurrent_batch_isolates_failures() {
        let raw = inputs(&[
            "ok.example",
            "timeout.example",
            "missing.example",
            "also-ok.example",
            "not a valid domain!",
        ]);
        let results =
            resolve_many(Arc::new(ScriptedResolver), &raw, Duration::from_secs(1), 8).await;

        // Every input appears, failures never suppress successes.
        assert_eq!(results.len(), 5);
        assert!(!results["ok.example"].is_error());
        assert!(!results["also-ok.example"].is_error());
        assert!(results["timeout.example"].is_error());
        assert!(results["missing.example"].is_error());
        assert!(results["not a valid domain!"].is_error());
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_the_resolver() {
        let results = resolve_many(
            Arc::new(PanickingResolver),
            &inputs(&["ftp://example.com", "example..com"]),
            Duration::from_secs(1),
            1,
        )
        .await;

        assert_eq!(results.len(), 2);
        // Keyed by the raw input as given, with the validation message.
        assert_eq!(
            results["ftp://example.com"],
            ResultEntry::Failed {
                error: "unsupported URL scheme: 'ftp'".to_string()
            }
        );
        assert!(results["example..com"].is_error());
    }

    #[tokio::test]
    async fn test_literal_ips_never_reach_the_resolver() {
        let results = resolve_many(
            Arc::new(PanickingResolver),
            &inputs(&["192.0.2.7", "[2001:db8::1]"]),
            Duration::from_secs(1),
            4,
        )
        .await;

        assert_eq!(results.len(), 2);
        assert!(!results["192.0.2.7"].is_error());
        assert!(!results["2001:db8::1"].is_error());
    }

    #[tokio::test]
    async fn test_duplicate_canonical_keys_collapse() {
        let results = resolve_many(
            Arc::new(ScriptedResolver),
            &inputs(&["Example.COM", "example.com", "http://example.com/"]),
            Duration::from_secs(1),
            4,
        )
        .await;

        // Three raw spellings, one canonical key; last write wins.
        assert_eq!(results.len(), 1);
        assert!(results.contains_key("example.com"));
    }

    #[tokio::test]
    async fn test_worker_panic_is_contained() {
        let raw = inputs(&["ok.example", "192.0.2.9"]);
        // PanickingResolver fires for ok.example (not a literal); the panic
        // is confined to its task and the literal entry still lands.
        let results =
            resolve_many(Arc::new(PanickingResolver), &raw, Duration::from_secs(1), 4).await;

        assert!(results.contains_key("192.0.2.9"));
        assert!(!results.contains_key("ok.example"));
    }
}
