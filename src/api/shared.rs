//! Thread-safe registry handle
//!
//! [`AnchorRegistry`](crate::api::registry::AnchorRegistry) has no internal locking. `SharedAnchorRegistry` wraps
//! it in a mutex so a UI thread and background workers can drive one
//! registry; each operation holds the lock for its full duration. Observers
//! attached here must be `Send`.

use nalgebra::Vector3;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::observer::{AnchorObserver, SubscriptionHandle};
use crate::api::registry::SendAnchorRegistry;
use crate::api::types::{Anchor, AnchorId, Metadata, Rotation};
use crate::core::GeographicPosition;
use crate::utils::config::AnchorSystemConfig;
use crate::validation::error::{RegistryResult, TransformResult};

/// Cloneable, lock-guarded handle to one [`SendAnchorRegistry`]
#[derive(Debug, Clone, Default)]
pub struct SharedAnchorRegistry {
    inner: Arc<Mutex<SendAnchorRegistry>>,
}

impl SharedAnchorRegistry {
    pub fn new(registry: SendAnchorRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Build and validate a registry from system config
    pub fn from_config(config: &AnchorSystemConfig) -> RegistryResult<Self> {
        SendAnchorRegistry::build(config).map(Self::new)
    }

    /// Run `f` with exclusive access to the registry
    pub fn with<R>(&self, f: impl FnOnce(&mut SendAnchorRegistry) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn create_anchor(
        &self,
        position: Vector3<f64>,
        rotation: impl Into<Rotation>,
        metadata: Option<Metadata>,
    ) -> RegistryResult<AnchorId> {
        self.lock().create_anchor(position, rotation, metadata)
    }

    pub fn create_geo_anchor(
        &self,
        geographic: GeographicPosition,
        rotation: impl Into<Rotation>,
        metadata: Option<Metadata>,
    ) -> RegistryResult<AnchorId> {
        self.lock().create_geo_anchor(geographic, rotation, metadata)
    }

    /// Cloned record of a live anchor
    pub fn resolve_anchor(&self, anchor_id: &str) -> Option<Anchor> {
        self.lock().resolve_anchor(anchor_id).cloned()
    }

    pub fn delete_anchor(&self, anchor_id: &str) -> Option<Anchor> {
        self.lock().delete_anchor(anchor_id)
    }

    pub fn get_anchors(&self) -> Vec<Anchor> {
        self.lock().get_anchors()
    }

    pub fn get_all_anchors(&self) -> Vec<AnchorId> {
        self.lock().get_all_anchors()
    }

    pub fn set_observer(&self, observer: impl AnchorObserver + Send + 'static) -> SubscriptionHandle {
        self.lock().set_observer(observer)
    }

    pub fn subscribe(&self, observer: impl AnchorObserver + Send + 'static) -> SubscriptionHandle {
        self.lock().subscribe(observer)
    }

    pub fn set_reference_location(&self, lat: f64, lng: f64, alt: f64) -> TransformResult<()> {
        self.lock().set_reference_location(lat, lng, alt)
    }

    pub fn is_ar_enabled(&self) -> bool {
        self.lock().is_ar_enabled()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Observer panics are caught inside the registry, so a poisoned lock
    // still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, SendAnchorRegistry> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl From<SendAnchorRegistry> for SharedAnchorRegistry {
    fn from(registry: SendAnchorRegistry) -> Self {
        Self::new(registry)
    }
}
