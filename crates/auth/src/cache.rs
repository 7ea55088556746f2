//! Memoization of compiled globs.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use crate::pattern::GlobPattern;

/// Bounded, thread-safe map from exact pattern text to its compiled glob.
///
/// Eviction is first-in-first-out. Entries are pure functions of their key, so
/// a miss or an eviction only costs a recompile and never changes a result.
#[derive(Debug)]
pub struct PatternCache {
    capacity: usize,
    inner: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, Arc<GlobPattern>>,
    order: VecDeque<String>,
}

impl PatternCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(CacheState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.order.clear();
    }

    /// Fetch the compiled glob for `pattern`, compiling on a miss.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Arc<GlobPattern>, regex::Error> {
        if self.capacity == 0 {
            return GlobPattern::compile(pattern).map(Arc::new);
        }

        if let Some(hit) = self.lock().entries.get(pattern) {
            return Ok(Arc::clone(hit));
        }

        // Compile outside the lock; a racing thread may insert the same key.
        let compiled = Arc::new(GlobPattern::compile(pattern)?);

        let mut state = self.lock();
        if let Some(existing) = state.entries.get(pattern) {
            return Ok(Arc::clone(existing));
        }
        while state.entries.len() >= self.capacity {
            let Some(oldest) = state.order.pop_front() else {
                break;
            };
            state.entries.remove(&oldest);
        }
        state.order.push_back(pattern.to_string());
        state
            .entries
            .insert(pattern.to_string(), Arc::clone(&compiled));
        Ok(compiled)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        // Every entry is recomputable, so a panic elsewhere cannot leave bad data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
