use std::collections::HashMap;
use std::sync::Arc;

use echo_client::SuggestionSet;

use crate::key::ItemKey;

/// Fetched suggestion sets, one per item.
///
/// Unbounded unless a capacity is given; with a capacity, inserting past
/// it evicts the least recently expanded entry that is not pinned. When
/// every entry is pinned the cache grows past its capacity instead.
pub struct SuggestionCache {
    entries: HashMap<ItemKey, Entry>,
    capacity: Option<usize>,
    tick: u64,
}

struct Entry {
    set: Arc<SuggestionSet>,
    last_expanded: u64,
}

impl SuggestionCache {
    /// `Some(0)` is raised to one entry.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.map(|c| c.max(1)),
            tick: 0,
        }
    }

    pub fn get(&self, key: &ItemKey) -> Option<Arc<SuggestionSet>> {
        self.entries.get(key).map(|e| e.set.clone())
    }

    pub fn contains(&self, key: &ItemKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Record an expansion. Returns whether the key is cached.
    pub fn touch(&mut self, key: &ItemKey) -> bool {
        self.tick += 1;
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.last_expanded = self.tick;
                true
            }
            None => false,
        }
    }

    /// Store a set; returns the key evicted to make room, if any.
    /// Keys for which `pinned` holds are never evicted.
    pub fn insert<F>(&mut self, key: ItemKey, set: SuggestionSet, pinned: F) -> Option<ItemKey>
    where
        F: Fn(&ItemKey) -> bool,
    {
        self.tick += 1;
        let evicted = match self.capacity {
            Some(cap) if self.entries.len() >= cap && !self.entries.contains_key(&key) => {
                let oldest = self
                    .entries
                    .iter()
                    .filter(|(k, _)| !pinned(*k))
                    .min_by_key(|(_, e)| e.last_expanded)
                    .map(|(k, _)| k.clone());
                if let Some(k) = &oldest {
                    self.entries.remove(k);
                }
                oldest
            }
            _ => None,
        };
        self.entries.insert(
            key,
            Entry {
                set: Arc::new(set),
                last_expanded: self.tick,
            },
        );
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
