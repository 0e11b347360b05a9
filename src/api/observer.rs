//! Anchor lifecycle observers
//!
//! Observers are held in an ordered subscription list. [`ObserverSet::set`]
//! keeps the single-observer behavior (last attached wins) while
//! [`ObserverSet::subscribe`] adds listeners alongside existing ones.
//! Panicking callbacks are caught and logged so they cannot abort an
//! in-flight registry operation.
//!
//! Observers need not be `Send`. A set is parameterized by the trait-object
//! type it stores: `dyn AnchorObserver` for single-threaded registries and
//! `dyn AnchorObserver + Send` behind [`SharedAnchorRegistry`].
//!
//! [`SharedAnchorRegistry`]: crate::api::shared::SharedAnchorRegistry

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::api::types::{Anchor, AnchorId};

/// Receives anchor lifecycle notifications. Both callbacks are optional.
pub trait AnchorObserver {
    fn on_anchor_placed(&mut self, _anchor: &Anchor) {}

    fn on_anchor_removed(&mut self, _anchor_id: &AnchorId) {}
}

/// Observer trait object that can box a concrete observer `T`
pub trait ObserverBox<T>: AnchorObserver {
    fn boxed(observer: T) -> Box<Self>;
}

impl<T: AnchorObserver + 'static> ObserverBox<T> for dyn AnchorObserver {
    fn boxed(observer: T) -> Box<Self> {
        Box::new(observer)
    }
}

impl<T: AnchorObserver + Send + 'static> ObserverBox<T> for dyn AnchorObserver + Send {
    fn boxed(observer: T) -> Box<Self> {
        Box::new(observer)
    }
}

/// Callback function type for anchor placement
pub type PlacedCallback = Box<dyn FnMut(&Anchor) + Send>;

/// Callback function type for anchor removal
pub type RemovedCallback = Box<dyn FnMut(&AnchorId) + Send>;

/// Observer assembled from closures. `Send`, so it can also be attached
/// to a shared registry.
#[derive(Default)]
pub struct CallbackObserver {
    on_placed: Option<PlacedCallback>,
    on_removed: Option<RemovedCallback>,
}

impl CallbackObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_placed<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Anchor) + Send + 'static,
    {
        self.on_placed = Some(Box::new(callback));
        self
    }

    pub fn on_removed<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&AnchorId) + Send + 'static,
    {
        self.on_removed = Some(Box::new(callback));
        self
    }
}

impl AnchorObserver for CallbackObserver {
    fn on_anchor_placed(&mut self, anchor: &Anchor) {
        if let Some(callback) = self.on_placed.as_mut() {
            callback(anchor);
        }
    }

    fn on_anchor_removed(&mut self, anchor_id: &AnchorId) {
        if let Some(callback) = self.on_removed.as_mut() {
            callback(anchor_id);
        }
    }
}

/// Subscription registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u32);

impl SubscriptionHandle {
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Ordered list of attached observers
pub struct ObserverSet<O: ?Sized + AnchorObserver = dyn AnchorObserver> {
    observers: Vec<(SubscriptionHandle, Box<O>)>,
    handle_counter: u32,
}

impl<O: ?Sized + AnchorObserver> ObserverSet<O> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            handle_counter: 0,
        }
    }

    /// Replace every attached observer with `observer`.
    ///
    /// Detached observers are dropped without being notified.
    pub fn set(&mut self, observer: Box<O>) -> SubscriptionHandle {
        self.observers.clear();
        self.subscribe(observer)
    }

    /// Attach an additional observer after the existing ones
    pub fn subscribe(&mut self, observer: Box<O>) -> SubscriptionHandle {
        self.handle_counter += 1;
        let handle = SubscriptionHandle(self.handle_counter);
        self.observers.push((handle, observer));
        handle
    }

    /// Detach an observer, returning whether the handle was attached
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(h, _)| *h != handle);
        self.observers.len() != before
    }

    pub fn clear(&mut self) {
        self.observers.clear();
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) fn notify_placed(&mut self, anchor: &Anchor) {
        for (handle, observer) in self.observers.iter_mut() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| observer.on_anchor_placed(anchor)));
            if outcome.is_err() {
                tracing::error!(
                    subscription = handle.id(),
                    anchor_id = %anchor.id(),
                    "anchor observer panicked in on_anchor_placed"
                );
            }
        }
    }

    pub(crate) fn notify_removed(&mut self, anchor_id: &AnchorId) {
        for (handle, observer) in self.observers.iter_mut() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| observer.on_anchor_removed(anchor_id)));
            if outcome.is_err() {
                tracing::error!(
                    subscription = handle.id(),
                    anchor_id = %anchor_id,
                    "anchor observer panicked in on_anchor_removed"
                );
            }
        }
    }
}

impl<O: ?Sized + AnchorObserver> Default for ObserverSet<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: ?Sized + AnchorObserver> fmt::Debug for ObserverSet<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverSet")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Metadata, Rotation};
    use nalgebra::Vector3;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    fn sample_anchor() -> Anchor {
        Anchor::new(
            AnchorId::new("anchor_1".to_string()),
            Vector3::zeros(),
            Rotation::default(),
            None,
            Metadata::new(),
        )
    }

    fn counting_observer(counter: Arc<Mutex<u32>>) -> Box<dyn AnchorObserver> {
        Box::new(CallbackObserver::new().on_placed(move |_| *counter.lock().unwrap() += 1))
    }

    #[test]
    fn test_set_replaces_previous_observers() {
        let first = Arc::new(Mutex::new(0));
        let second = Arc::new(Mutex::new(0));
        let mut set = ObserverSet::new();

        set.subscribe(counting_observer(first.clone()));
        set.subscribe(counting_observer(first.clone()));
        set.set(counting_observer(second.clone()));
        assert_eq!(set.len(), 1);

        set.notify_placed(&sample_anchor());
        assert_eq!(*first.lock().unwrap(), 0);
        assert_eq!(*second.lock().unwrap(), 1);
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let counter = Arc::new(Mutex::new(0));
        let mut set = ObserverSet::new();

        let a = set.subscribe(counting_observer(counter.clone()));
        let b = set.subscribe(counting_observer(counter.clone()));
        assert_ne!(a, b);

        set.notify_placed(&sample_anchor());
        assert_eq!(*counter.lock().unwrap(), 2);

        assert!(set.unsubscribe(a));
        assert!(!set.unsubscribe(a));
        set.notify_placed(&sample_anchor());
        assert_eq!(*counter.lock().unwrap(), 3);
    }

    #[test]
    fn test_missing_callbacks_are_skipped() {
        let mut set: ObserverSet = ObserverSet::new();
        set.set(Box::new(CallbackObserver::new()));
        set.notify_placed(&sample_anchor());
        set.notify_removed(&AnchorId::new("anchor_1".to_string()));
    }

    #[test]
    fn test_panicking_observer_is_isolated() {
        let counter = Arc::new(Mutex::new(0));
        let mut set: ObserverSet = ObserverSet::new();
        set.subscribe(Box::new(
            CallbackObserver::new().on_removed(|_| panic!("observer failure")),
        ));
        let removed = counter.clone();
        set.subscribe(Box::new(
            CallbackObserver::new().on_removed(move |_| *removed.lock().unwrap() += 1),
        ));

        set.notify_removed(&AnchorId::new("anchor_1".to_string()));
        assert_eq!(*counter.lock().unwrap(), 1);
    }

    struct UiList {
        ids: Rc<RefCell<Vec<AnchorId>>>,
    }

    impl AnchorObserver for UiList {
        fn on_anchor_placed(&mut self, anchor: &Anchor) {
            self.ids.borrow_mut().push(anchor.id().clone());
        }
    }

    #[test]
    fn test_non_send_observer_boxes_into_local_set() {
        let ids = Rc::new(RefCell::new(Vec::new()));
        let mut set: ObserverSet = ObserverSet::new();
        set.set(<dyn AnchorObserver as ObserverBox<UiList>>::boxed(UiList { ids: ids.clone() }));

        set.notify_placed(&sample_anchor());
        assert_eq!(*ids.borrow(), vec![AnchorId::new("anchor_1".to_string())]);
    }

    #[test]
    fn test_send_set_accepts_callback_observer() {
        let counter = Arc::new(Mutex::new(0));
        let mut set: ObserverSet<dyn AnchorObserver + Send> = ObserverSet::new();
        let placed = counter.clone();
        set.subscribe(<dyn AnchorObserver + Send as ObserverBox<_>>::boxed(
            CallbackObserver::new().on_placed(move |_| *placed.lock().unwrap() += 1),
        ));

        set.notify_placed(&sample_anchor());
        assert_eq!(*counter.lock().unwrap(), 1);
    }
}
