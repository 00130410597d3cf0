use std::any::Any;
use std::future::Future;
use std::sync::Arc;

use crate::router::{Payload, Router};
use crate::store::StateStore;
use crate::value::{StateValue, SubscriptionId};

/// State store plus request router.
///
/// ```ignore
/// let flux = Flux::new();
/// flux.on("inbox/refresh", |_, _, store| async move {
///     store.set("inbox/error", ErrorBanner(None));
/// });
/// flux.subscribe("inbox/#", |path, _| println!("{} changed", path));
/// flux.emit("inbox/refresh", RefreshReq::default()).await;
/// ```
pub struct Flux {
    store: Arc<StateStore>,
    router: Router,
}

impl Flux {
    pub fn new() -> Self {
        Self {
            store: Arc::new(StateStore::new()),
            router: Router::new(),
        }
    }

    pub fn get_as<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.store.get_as(path)
    }

    /// Send a request to every handler matching `path` and wait for them.
    pub async fn emit<T: Any + Send + Sync>(&self, path: &str, payload: T) {
        self.emit_arc(path, Arc::new(payload)).await;
    }

    pub async fn emit_arc(&self, path: &str, payload: Payload) {
        self.router
            .dispatch(path, payload, Arc::clone(&self.store))
            .await;
    }

    /// Register a request handler for `pattern`.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.router.on(pattern, handler);
    }

    /// Observe state writes under `pattern`. Called on the writer's thread.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        self.store.subscribe(pattern, handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.store.unsubscribe(id);
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }
}

impl Default for Flux {
    fn default() -> Self {
        Self::new()
    }
}
