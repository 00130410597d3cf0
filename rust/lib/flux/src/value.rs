use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A type-erased, shared state value.
///
/// Renderers read the same allocation the handlers wrote; cloning a
/// `StateValue` only bumps a reference count.
#[derive(Clone)]
pub struct StateValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl StateValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Borrow the value as `T`, or `None` if it holds another type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Clone the value out as `T`.
    pub fn downcast_cloned<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateValue")
            .field("type", &self.type_name)
            .finish()
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Banner(Option<String>);

    #[test]
    fn downcast_to_stored_type() {
        let v = StateValue::new(Banner(Some("Failed to fetch comments".into())));
        assert_eq!(
            v.downcast_ref::<Banner>(),
            Some(&Banner(Some("Failed to fetch comments".into())))
        );
        assert!(v.downcast_ref::<String>().is_none());
    }

    #[test]
    fn downcast_cloned_detaches_from_store() {
        let v = StateValue::new(vec![1u32, 2, 3]);
        let mut copy = v.downcast_cloned::<Vec<u32>>().unwrap();
        copy.push(4);
        assert_eq!(v.downcast_ref::<Vec<u32>>().unwrap().len(), 3);
    }

    #[test]
    fn clones_share_allocation() {
        let v1 = StateValue::new(vec![0u8; 4096]);
        let v2 = v1.clone();
        let p1 = v1.downcast_ref::<Vec<u8>>().unwrap().as_ptr();
        let p2 = v2.downcast_ref::<Vec<u8>>().unwrap().as_ptr();
        assert_eq!(p1, p2);
    }

    #[test]
    fn debug_shows_type_name() {
        let v = StateValue::new(Banner(None));
        assert!(format!("{:?}", v).contains("Banner"));
    }

    fn _assert_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StateValue>();
    }
}
