//! # Query Cache
//!
//! Results of read-only queries are cached under a `QueryKey`. A mutation that
//! changes server state marks the affected keys stale through the
//! `QueryClient` capability; whoever renders a stale key refetches it.
//!
//! The cache is an injected collaborator owned by the event loop, never global.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::rpc::UsageSnapshot;

/// Identifies one cached query result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `messages.getMany`, keyed by project.
    Messages { project_id: String },
    /// `usage.status`, one entry per caller.
    UsageStatus,
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Messages { project_id } => write!(f, "messages.getMany[{project_id}]"),
            QueryKey::UsageStatus => write!(f, "usage.status"),
        }
    }
}

/// The capability mutations need: mark a key stale.
pub trait QueryClient {
    fn invalidate(&mut self, key: &QueryKey);
}

/// Cached payload for a key.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    Usage(UsageSnapshot),
}

#[derive(Debug)]
struct Entry {
    value: Option<CachedValue>,
    stale: bool,
}

/// In-memory query cache.
///
/// Keys are tracked even before they hold data, so an invalidation of a key
/// nobody has fetched yet is still recorded and picked up by the next fetch.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Entry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh result for `key`.
    pub fn set(&mut self, key: QueryKey, value: CachedValue) {
        self.entries.insert(
            key,
            Entry {
                value: Some(value),
                stale: false,
            },
        );
    }

    /// Last stored value, stale or not.
    pub fn get(&self, key: &QueryKey) -> Option<&CachedValue> {
        self.entries.get(key).and_then(|e| e.value.as_ref())
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).is_some_and(|e| e.stale)
    }

    /// Remove and return every stale key, clearing the flag.
    ///
    /// Callers refetch what they can; keys they don't render stay cached.
    pub fn take_stale(&mut self) -> Vec<QueryKey> {
        let mut stale = Vec::new();
        for (key, entry) in self.entries.iter_mut() {
            if entry.stale {
                entry.stale = false;
                stale.push(key.clone());
            }
        }
        stale
    }
}

impl QueryClient for QueryCache {
    fn invalidate(&mut self, key: &QueryKey) {
        debug!("Invalidating query {}", key);
        self.entries
            .entry(key.clone())
            .and_modify(|e| e.stale = true)
            .or_insert(Entry {
                value: None,
                stale: true,
            });
    }
}
