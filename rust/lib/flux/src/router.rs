use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use crate::pattern::Pattern;
use crate::store::StateStore;

/// Boxed future returned by a request handler.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased request payload.
pub type Payload = Arc<dyn Any + Send + Sync>;

type ErasedHandler = Arc<dyn Fn(String, Payload, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Routes request paths to async handlers.
///
/// Every handler whose pattern matches runs, in registration order, one
/// after another. A path without handlers is dropped silently.
pub struct Router {
    routes: RwLock<Vec<(Pattern, ErasedHandler)>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: RwLock::new(Vec::new()),
        }
    }

    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: ErasedHandler = Arc::new(
            move |path: String, payload: Payload, store: Arc<StateStore>| -> BoxFuture {
                Box::pin(handler(path, payload, store))
            },
        );
        self.routes
            .write()
            .unwrap()
            .push((Pattern::parse(pattern), handler));
    }

    pub async fn dispatch(&self, path: &str, payload: Payload, store: Arc<StateStore>) {
        // Snapshot so no lock is held across handler awaits.
        let handlers: Vec<ErasedHandler> = self
            .routes
            .read()
            .unwrap()
            .iter()
            .filter(|(p, _)| p.matches(path))
            .map(|(_, h)| h.clone())
            .collect();
        if handlers.is_empty() {
            tracing::debug!(path, "no handler for request");
        }
        for handler in handlers {
            handler(path.to_string(), payload.clone(), store.clone()).await;
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct ToggleReq {
        id: String,
    }

    #[tokio::test]
    async fn handler_receives_typed_payload() {
        let router = Router::new();
        router.on("suggestions/toggle", |_, payload, store: Arc<StateStore>| async move {
            let req = payload.downcast_ref::<ToggleReq>().unwrap();
            store.set("last-toggled", req.id.clone());
        });

        let store = Arc::new(StateStore::new());
        router
            .dispatch(
                "suggestions/toggle",
                Arc::new(ToggleReq { id: "17".into() }),
                store.clone(),
            )
            .await;
        assert_eq!(store.get_as::<String>("last-toggled").as_deref(), Some("17"));
    }

    #[tokio::test]
    async fn unmatched_path_is_noop() {
        let router = Router::new();
        let calls = Arc::new(AtomicU64::new(0));
        let calls_c = calls.clone();
        router.on("inbox/refresh", move |_, _, _| {
            let calls = calls_c.clone();
            async move {
                calls.fetch_add(1, Ordering::Relaxed);
            }
        });

        router
            .dispatch("inbox/initialize", Arc::new(()), Arc::new(StateStore::new()))
            .await;
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn all_matching_handlers_run_in_order() {
        let router = Router::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for (pattern, tag) in [("inbox/refresh", "exact"), ("inbox/+", "single"), ("#", "all")] {
            let order = order.clone();
            router.on(pattern, move |path, _, _| {
                let order = order.clone();
                async move {
                    order.lock().unwrap().push(format!("{}:{}", tag, path));
                }
            });
        }

        router
            .dispatch("inbox/refresh", Arc::new(()), Arc::new(StateStore::new()))
            .await;
        assert_eq!(
            *order.lock().unwrap(),
            vec!["exact:inbox/refresh", "single:inbox/refresh", "all:inbox/refresh"]
        );
    }

    #[tokio::test]
    async fn handlers_may_await() {
        let router = Router::new();
        router.on("slow", |_, _, store: Arc<StateStore>| async move {
            tokio::task::yield_now().await;
            store.set("done", true);
        });
        let store = Arc::new(StateStore::new());
        router.dispatch("slow", Arc::new(()), store.clone()).await;
        assert_eq!(store.get_as::<bool>("done"), Some(true));
    }
}
