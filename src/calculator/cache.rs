use crate::calculator::computer::{NodeKey, ScriptComputer, ScriptSource};
use crate::config::DEFAULT_CACHE_CAPACITY;
use crate::translator::CompileError;
use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;
use std::any::Any;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

struct CacheEntry {
    /// Pins the node's allocation so its address stays unique while cached.
    _anchor: Weak<dyn Any + Send + Sync>,
    computer: Arc<ScriptComputer>,
}

/// Point-in-time counters of a [`ScriptCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Translator runs, at most one per cached node
    pub compilations: u64,
    pub evictions: u64,
    pub len: usize,
}

/// Bounded LRU map from node identity to its memoized compilation.
pub struct ScriptCache {
    entries: Mutex<LruCache<NodeKey, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    compilations: AtomicU64,
    evictions: AtomicU64,
}

impl ScriptCache {
    /// Create a cache holding up to `capacity` nodes; `0` means the default.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or(NonZeroUsize::new(DEFAULT_CACHE_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);

        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            compilations: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    /// Compiled script for `source`, translating it at most once per node.
    pub fn build(&self, source: impl Into<ScriptSource>) -> Result<Arc<str>, CompileError> {
        self.computer(source.into()).compute_with(|| {
            self.compilations.fetch_add(1, Ordering::Relaxed);
        })
    }

    /// The single computer responsible for `source`'s node.
    pub fn computer(&self, source: ScriptSource) -> Arc<ScriptComputer> {
        let key = source.key();

        if let Some(entry) = self.entries.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::trace!("Script cache hit for {key:?}");
            return Arc::clone(&entry.computer);
        }

        // built outside the lock; may lose the race below
        let anchor = source.anchor();
        let candidate = Arc::new(ScriptComputer::new(source));
        self.insert_or_join(key, anchor, candidate)
    }

    /// Store `candidate` under `key` unless another caller got there first, in
    /// which case the stored computer wins and `candidate` is dropped.
    fn insert_or_join(
        &self,
        key: NodeKey,
        anchor: Weak<dyn Any + Send + Sync>,
        candidate: Arc<ScriptComputer>,
    ) -> Arc<ScriptComputer> {
        let mut entries = self.entries.lock();
        if let Some(winner) = entries.peek(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::trace!("Script cache lost insert race for {key:?}");
            return Arc::clone(&winner.computer);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        log::trace!("Script cache miss for {key:?}");

        let entry = CacheEntry {
            _anchor: anchor,
            computer: Arc::clone(&candidate),
        };
        if let Some((evicted, _)) = entries.push(key, entry) {
            if evicted != key {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                log::debug!("Evicted {evicted:?} from script cache");
            }
        }

        candidate
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            compilations: self.compilations.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            len: self.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    /// Whether `source`'s node has an entry, without touching recency.
    pub fn contains(&self, source: &ScriptSource) -> bool {
        self.entries.lock().contains(&source.key())
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for ScriptCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for ScriptCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptCache")
            .field("capacity", &self.capacity())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Function, FunctionArg};

    #[test]
    fn test_late_insert_joins_stored_computer() {
        let cache = ScriptCache::new(4);
        let node = Arc::new(Function::new("UPPER", vec![FunctionArg::constant("z")]));
        let source = ScriptSource::from(Arc::clone(&node));
        let key = source.key();

        // a second caller missed in the first lookup and built its own computer...
        let late = Arc::new(ScriptComputer::new(source.clone()));
        // ...while the first caller stored theirs
        let stored = cache.computer(source.clone());

        let joined = cache.insert_or_join(key, source.anchor(), Arc::clone(&late));
        assert!(Arc::ptr_eq(&joined, &stored));
        assert!(!Arc::ptr_eq(&joined, &late));

        // the late computer never ran and the stored one is unchanged
        assert!(!late.is_computed());
        assert!(Arc::ptr_eq(&cache.computer(source), &stored));

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.len, 1);
        assert_eq!(stats.compilations, 0);
    }
}
