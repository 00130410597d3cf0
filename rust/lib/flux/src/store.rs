use std::any::Any;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::pattern::Pattern;
use crate::value::{StateValue, SubscriptionId};

/// Callback invoked with the changed path and its new value.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Path-keyed state with change notification.
///
/// Writers call `set` / `update`; every subscriber whose pattern matches
/// the written path is called synchronously afterwards, outside the
/// value lock, so a subscriber may read the store.
pub struct StateStore {
    values: RwLock<BTreeMap<String, StateValue>>,
    subscribers: RwLock<Vec<Subscriber>>,
    next_id: AtomicU64,
}

struct Subscriber {
    id: SubscriptionId,
    pattern: Pattern,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Store `value` at `path` and notify subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        let value = StateValue::new(value);
        self.values
            .write()
            .unwrap()
            .insert(path.to_string(), value.clone());
        self.notify(path, &value);
    }

    /// Read-modify-write `path` under a single write lock, then notify.
    ///
    /// `f` receives the current value if it is a `T`. Two concurrent
    /// `update`s on one path never observe the same old value.
    pub fn update<T, F>(&self, path: &str, f: F) -> T
    where
        T: Any + Clone + Send + Sync,
        F: FnOnce(Option<&T>) -> T,
    {
        let (next, value) = {
            let mut values = self.values.write().unwrap();
            let current = values.get(path).and_then(|v| v.downcast_ref::<T>());
            let next = f(current);
            let value = StateValue::new(next.clone());
            values.insert(path.to_string(), value.clone());
            (next, value)
        };
        self.notify(path, &value);
        next
    }

    /// Typed read: clone the value at `path` out as `T`.
    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.values
            .read()
            .unwrap()
            .get(path)
            .and_then(|v| v.downcast_cloned::<T>())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.values.read().unwrap().contains_key(path)
    }

    /// Register `handler` for writes to paths matching `pattern`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().unwrap().push(Subscriber {
            id,
            pattern: Pattern::parse(pattern),
            handler: Arc::new(handler),
        });
        id
    }

    /// Drop a subscription. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.write().unwrap().retain(|s| s.id != id);
    }

    fn notify(&self, path: &str, value: &StateValue) {
        let handlers: Vec<ChangeHandler> = self
            .subscribers
            .read()
            .unwrap()
            .iter()
            .filter(|s| s.pattern.matches(path))
            .map(|s| s.handler.clone())
            .collect();
        for handler in handlers {
            handler(path, value);
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
