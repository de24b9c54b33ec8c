//! Cache ledger for keyed requests
//!
//! Bookkeeping half of the data-fetch layer: the reactive store in the
//! dashboard crate consults this ledger to decide when a network call is
//! actually issued and whether a resolved response is still current.
//!
//! Rules enforced here:
//!
//! - one in-flight request per key (single flight); concurrent readers of
//!   the same key share it,
//! - last-fetch-wins: invalidation bumps the key's generation, so a
//!   response carrying a stale token is discarded on arrival,
//! - subscriber counting: invalidation only asks for an immediate refetch
//!   while some consumer is mounted; resolutions after the last consumer
//!   unmounted settle into the cache without anyone observing them.
//!
//! Entries are lazily created and never evicted except through
//! [`CacheLedger::invalidate`].

use std::collections::HashMap;

/// Proof that a fetch was started; carries the generation it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken {
    generation: u64,
}

#[derive(Debug, Default)]
struct Entry {
    generation: u64,
    in_flight: bool,
    subscribers: usize,
    populated: bool,
}

/// Per-key request bookkeeping for the process-wide cache store.
#[derive(Debug, Default)]
pub struct CacheLedger {
    entries: HashMap<String, Entry>,
}

impl CacheLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mounted consumer for `key`. Returns `true` when the
    /// caller should issue a (re)validation fetch: there is always stale
    /// tolerance - cached data keeps rendering while the fetch runs - but
    /// a fetch already in flight is simply shared.
    pub fn subscribe(&mut self, key: &str) -> bool {
        let entry = self.entries.entry(key.to_string()).or_default();
        entry.subscribers += 1;
        !entry.in_flight
    }

    /// Drops one consumer registration for `key`.
    pub fn unsubscribe(&mut self, key: &str) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
        }
    }

    pub fn has_subscribers(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|e| e.subscribers > 0)
    }

    pub fn is_populated(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|e| e.populated)
    }

    /// Claims the fetch slot for `key`. Returns `None` when a request is
    /// already in flight - the caller must not issue a duplicate.
    pub fn begin_fetch(&mut self, key: &str) -> Option<FetchToken> {
        let entry = self.entries.entry(key.to_string()).or_default();
        if entry.in_flight {
            return None;
        }
        entry.in_flight = true;
        Some(FetchToken {
            generation: entry.generation,
        })
    }

    /// Reports a resolved fetch. Returns `true` when the response is still
    /// current for `key` and should be stored; a response from a
    /// generation that has since been invalidated is discarded.
    pub fn settle(&mut self, key: &str, token: FetchToken) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        if token.generation != entry.generation {
            return false;
        }
        entry.in_flight = false;
        entry.populated = true;
        true
    }

    /// Marks `key` stale: abandons any in-flight request (its response
    /// will fail the generation check) and returns `true` when a mounted
    /// consumer exists, i.e. the caller should refetch immediately.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            return false;
        };
        entry.generation += 1;
        entry.in_flight = false;
        entry.populated = false;
        entry.subscribers > 0
    }

    /// Invalidates every key under `prefix` (a collection path invalidates
    /// its pages, its count and its by-id entries at once). Returns the
    /// keys whose consumers expect an immediate refetch.
    pub fn invalidate_prefix(&mut self, prefix: &str) -> Vec<String> {
        let keys: Vec<String> = self
            .entries
            .keys()
            .filter(|k| key_in_scope(k, prefix))
            .cloned()
            .collect();
        keys.into_iter()
            .filter(|key| self.invalidate(key))
            .collect()
    }
}

/// Scope match on a path boundary: `/venda` covers `/venda`,
/// `/venda?page=...` and `/venda/42`, but never `/vendedor/...`.
fn key_in_scope(key: &str, prefix: &str) -> bool {
    match key.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flight_deduplication() {
        let mut ledger = CacheLedger::new();
        ledger.subscribe("/vendedor?page=0&items=10");

        let first = ledger.begin_fetch("/vendedor?page=0&items=10");
        assert!(first.is_some());
        // A second consumer mounting while the fetch runs shares it.
        assert!(!ledger.subscribe("/vendedor?page=0&items=10"));
        assert!(ledger.begin_fetch("/vendedor?page=0&items=10").is_none());

        assert!(ledger.settle("/vendedor?page=0&items=10", first.unwrap()));
        assert!(ledger.is_populated("/vendedor?page=0&items=10"));
    }

    #[test]
    fn test_last_fetch_wins_after_invalidation() {
        let mut ledger = CacheLedger::new();
        ledger.subscribe("/produto?page=0&items=10");

        let stale = ledger.begin_fetch("/produto?page=0&items=10").unwrap();
        // A mutation lands while the first fetch is still in the air.
        assert!(ledger.invalidate("/produto?page=0&items=10"));
        let fresh = ledger.begin_fetch("/produto?page=0&items=10").unwrap();

        // The fresh response is retained regardless of arrival order.
        assert!(ledger.settle("/produto?page=0&items=10", fresh));
        assert!(!ledger.settle("/produto?page=0&items=10", stale));
    }

    #[test]
    fn test_invalidate_without_subscribers_defers_refetch() {
        let mut ledger = CacheLedger::new();
        ledger.subscribe("/cliente?page=0&items=10");
        let token = ledger.begin_fetch("/cliente?page=0&items=10").unwrap();
        ledger.settle("/cliente?page=0&items=10", token);
        ledger.unsubscribe("/cliente?page=0&items=10");

        // Nobody is mounted: mark stale, do not refetch now.
        assert!(!ledger.invalidate("/cliente?page=0&items=10"));
        // The next consumer to mount revalidates.
        assert!(ledger.subscribe("/cliente?page=0&items=10"));
    }

    #[test]
    fn test_resolution_after_unmount_is_unobserved() {
        let mut ledger = CacheLedger::new();
        ledger.subscribe("/receita/9");
        let token = ledger.begin_fetch("/receita/9").unwrap();
        ledger.unsubscribe("/receita/9");

        // The response still settles into the cache, but no consumer
        // remains to observe it.
        assert!(ledger.settle("/receita/9", token));
        assert!(!ledger.has_subscribers("/receita/9"));
    }

    #[test]
    fn test_prefix_invalidation_covers_pages_count_and_ids() {
        let mut ledger = CacheLedger::new();
        for key in ["/venda?page=0&items=10", "/venda/count", "/venda/42"] {
            ledger.subscribe(key);
            let token = ledger.begin_fetch(key).unwrap();
            ledger.settle(key, token);
        }
        ledger.subscribe("/vendedor/count");

        let mut refetch = ledger.invalidate_prefix("/venda");
        refetch.sort();
        assert_eq!(
            refetch,
            vec!["/venda/42", "/venda/count", "/venda?page=0&items=10"]
        );
        // `/vendedor` shares the string prefix but not the path scope.
        assert!(ledger.begin_fetch("/vendedor/count").is_some());
    }

    #[test]
    fn test_scope_matching_respects_path_boundaries() {
        assert!(key_in_scope("/venda", "/venda"));
        assert!(key_in_scope("/venda?page=1&items=10", "/venda"));
        assert!(key_in_scope("/venda/42", "/venda"));
        assert!(!key_in_scope("/vendedor/count", "/venda"));
        assert!(!key_in_scope("/produto", "/venda"));
    }

    #[test]
    fn test_unknown_key_operations_are_noops() {
        let mut ledger = CacheLedger::new();
        assert!(!ledger.invalidate("/nada"));
        assert!(!ledger.settle("/nada", FetchToken { generation: 0 }));
        ledger.unsubscribe("/nada");
        assert!(!ledger.has_subscribers("/nada"));
    }
}
