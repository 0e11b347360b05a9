//! Anchor registry
//!
//! Authoritative in-memory set of live anchors. Identifiers come from a
//! per-instance monotonic counter and are never reused, so they stay unique
//! even when anchors are created within the same instant.

use indexmap::IndexMap;
use nalgebra::Vector3;
use std::fmt;

use crate::algorithms::coordinates::{CoordinateTransformEngine, CoordinateValidator};
use crate::api::observer::{AnchorObserver, ObserverBox, ObserverSet, SubscriptionHandle};
use crate::api::types::{Anchor, AnchorId, Metadata, Rotation, RESERVED_FIELDS};
use crate::core::{GeographicPosition, LocalOffset};
use crate::utils::config::{AnchorSystemConfig, RegistryConfig};
use crate::validation::error::{RegistryError, RegistryResult, TransformResult};

/// Registry of live anchors with lifecycle notifications.
///
/// `O` is the observer trait object stored; the default accepts any
/// observer, including `Rc`/`RefCell` based ones.
pub struct AnchorRegistry<O: ?Sized + AnchorObserver = dyn AnchorObserver> {
    /// Live anchors in insertion order
    anchors: IndexMap<AnchorId, Anchor>,
    /// Attached observers
    observers: ObserverSet<O>,
    /// Geographic annotation and conversion
    transform: CoordinateTransformEngine,
    config: RegistryConfig,
    /// Last issued identifier sequence number
    id_counter: u64,
}

/// Registry whose observers are all `Send`, as held by
/// [`SharedAnchorRegistry`](crate::api::shared::SharedAnchorRegistry)
pub type SendAnchorRegistry = AnchorRegistry<dyn AnchorObserver + Send>;

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self::with_parts(config, CoordinateTransformEngine::new())
    }

    /// Create a registry around an existing transform engine
    pub fn with_parts(config: RegistryConfig, transform: CoordinateTransformEngine) -> Self {
        Self::assemble(config, transform)
    }

    /// Build the registry and its engine from system config.
    ///
    /// The config is validated first; violations surface as
    /// [`RegistryError::InvalidConfig`].
    pub fn from_config(config: &AnchorSystemConfig) -> RegistryResult<Self> {
        Self::build(config)
    }
}

impl<O: ?Sized + AnchorObserver> AnchorRegistry<O> {
    pub(crate) fn assemble(config: RegistryConfig, transform: CoordinateTransformEngine) -> Self {
        Self {
            anchors: IndexMap::new(),
            observers: ObserverSet::new(),
            transform,
            config,
            id_counter: 0,
        }
    }

    pub(crate) fn build(config: &AnchorSystemConfig) -> RegistryResult<Self> {
        config.validate()?;
        let transform = CoordinateTransformEngine::from_config(config.transform.clone())?;
        Ok(Self::assemble(config.registry.clone(), transform))
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Place an anchor at a local scene position.
    ///
    /// Observers are notified before this returns. Fails only when the
    /// configured anchor limit is reached.
    pub fn create_anchor(
        &mut self,
        position: Vector3<f64>,
        rotation: impl Into<Rotation>,
        metadata: Option<Metadata>,
    ) -> RegistryResult<AnchorId> {
        let geographic = if self.config.annotate_geographic && self.transform.has_reference() {
            Some(self.transform.to_geographic(position.x, position.y, position.z)?)
        } else {
            None
        };

        self.insert_anchor(position, rotation.into(), geographic, metadata)
    }

    /// Place an anchor at a geographic position, converted through the
    /// transform engine. Requires a reference location; out-of-range
    /// positions are rejected while range validation is enabled.
    pub fn create_geo_anchor(
        &mut self,
        geographic: GeographicPosition,
        rotation: impl Into<Rotation>,
        metadata: Option<Metadata>,
    ) -> RegistryResult<AnchorId> {
        if self.transform.config().validate_ranges {
            CoordinateValidator::validate_position(&geographic)?;
        }
        let local = self.transform.to_local_position(&geographic)?;
        self.insert_anchor(local.to_vector(), rotation.into(), Some(geographic), metadata)
    }

    /// Look up a live anchor. Unknown identifiers yield `None`.
    pub fn resolve_anchor(&self, anchor_id: &str) -> Option<&Anchor> {
        self.anchors.get(anchor_id)
    }

    /// Remove an anchor if present.
    ///
    /// `on_anchor_removed` fires whether or not the anchor existed.
    pub fn delete_anchor(&mut self, anchor_id: &str) -> Option<Anchor> {
        let removed = self.anchors.shift_remove(anchor_id);

        let id = match &removed {
            Some(anchor) => {
                tracing::debug!(anchor_id, remaining = self.anchors.len(), "anchor deleted");
                anchor.id().clone()
            }
            None => {
                tracing::debug!(anchor_id, "delete of unknown anchor");
                AnchorId::new(anchor_id.to_string())
            }
        };

        self.observers.notify_removed(&id);
        removed
    }

    /// Snapshot of all live anchors in insertion order
    pub fn get_anchors(&self) -> Vec<Anchor> {
        self.anchors.values().cloned().collect()
    }

    /// Identifiers of all live anchors, same order as [`Self::get_anchors`]
    pub fn get_all_anchors(&self) -> Vec<AnchorId> {
        self.anchors.keys().cloned().collect()
    }

    /// Anchors within `radius` meters of a local scene position
    pub fn find_nearby_anchors(&self, position: &Vector3<f64>, radius: f64) -> Vec<&Anchor> {
        self.anchors
            .values()
            .filter(|anchor| anchor.distance_to(position) <= radius)
            .collect()
    }

    /// Remove every anchor, notifying observers once per anchor
    pub fn clear(&mut self) {
        let drained: Vec<AnchorId> = self.anchors.drain(..).map(|(id, _)| id).collect();
        tracing::debug!(count = drained.len(), "registry cleared");
        for id in &drained {
            self.observers.notify_removed(id);
        }
    }

    pub fn contains(&self, anchor_id: &str) -> bool {
        self.anchors.contains_key(anchor_id)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Replace the attached observer(s) with `observer`
    pub fn set_observer<T>(&mut self, observer: T) -> SubscriptionHandle
    where
        O: ObserverBox<T>,
    {
        self.observers.set(O::boxed(observer))
    }

    /// Attach an additional observer
    pub fn subscribe<T>(&mut self, observer: T) -> SubscriptionHandle
    where
        O: ObserverBox<T>,
    {
        self.observers.subscribe(O::boxed(observer))
    }

    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        self.observers.unsubscribe(handle)
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    /// AR capability probe. Static for the registry's lifetime.
    pub fn is_ar_enabled(&self) -> bool {
        self.config.ar_capable
    }

    pub fn set_reference_location(&mut self, lat: f64, lng: f64, alt: f64) -> TransformResult<()> {
        self.transform.set_reference_location(lat, lng, alt)
    }

    pub fn transform(&self) -> &CoordinateTransformEngine {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut CoordinateTransformEngine {
        &mut self.transform
    }

    /// Local offset of an anchor's position
    pub fn local_offset(&self, anchor_id: &str) -> Option<LocalOffset> {
        self.resolve_anchor(anchor_id).map(|a| LocalOffset::from(*a.position()))
    }

    fn insert_anchor(
        &mut self,
        position: Vector3<f64>,
        rotation: Rotation,
        geographic: Option<GeographicPosition>,
        metadata: Option<Metadata>,
    ) -> RegistryResult<AnchorId> {
        if let Some(limit) = self.config.max_anchors {
            if self.anchors.len() >= limit {
                return Err(RegistryError::CapacityExceeded { limit });
            }
        }

        let id = self.next_id()?;
        let metadata = metadata.unwrap_or_default();

        for key in RESERVED_FIELDS.iter().filter(|k| metadata.contains_key(**k)) {
            tracing::debug!(anchor_id = %id, key, "reserved key kept in anchor metadata");
        }

        let anchor = Anchor::new(id.clone(), position, rotation, geographic, metadata);
        self.anchors.insert(id.clone(), anchor);

        tracing::debug!(
            anchor_id = %id,
            x = position.x,
            y = position.y,
            z = position.z,
            "anchor created"
        );

        if let Some(anchor) = self.anchors.get(&id) {
            self.observers.notify_placed(anchor);
        }

        Ok(id)
    }

    fn next_id(&mut self) -> RegistryResult<AnchorId> {
        self.id_counter += 1;
        let id = AnchorId::new(format!("{}_{}", self.config.id_prefix, self.id_counter));
        if self.anchors.contains_key(&id) {
            return Err(RegistryError::IdentityCollision { id: id.to_string() });
        }
        Ok(id)
    }
}

impl<O: ?Sized + AnchorObserver> Default for AnchorRegistry<O> {
    fn default() -> Self {
        Self::assemble(RegistryConfig::default(), CoordinateTransformEngine::new())
    }
}

impl<O: ?Sized + AnchorObserver> fmt::Debug for AnchorRegistry<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchorRegistry")
            .field("anchors", &self.anchors)
            .field("observers", &self.observers)
            .field("transform", &self.transform)
            .field("config", &self.config)
            .field("id_counter", &self.id_counter)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::observer::CallbackObserver;
    use crate::core::ReferenceLocation;
    use crate::validation::error::TransformError;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Placed(AnchorId, Vector3<f64>),
        Removed(AnchorId),
    }

    fn recording_observer(log: Arc<Mutex<Vec<Event>>>) -> CallbackObserver {
        let placed = log.clone();
        CallbackObserver::new()
            .on_placed(move |a| {
                placed.lock().unwrap().push(Event::Placed(a.id().clone(), *a.position()))
            })
            .on_removed(move |id| log.lock().unwrap().push(Event::Removed(id.clone())))
    }

    #[test]
    fn test_resolve_unknown_anchor_is_none() {
        let registry = AnchorRegistry::new();
        assert!(registry.resolve_anchor("anchor_1").is_none());
        assert!(registry.resolve_anchor("").is_none());
    }

    #[test]
    fn test_create_resolve_delete() {
        let mut registry = AnchorRegistry::new();
        let first = registry
            .create_anchor(Vector3::new(0.0, 0.0, 0.0), Rotation::default(), None)
            .unwrap();
        let second = registry
            .create_anchor(Vector3::new(1.0, 2.0, 3.0), Rotation::default(), None)
            .unwrap();

        let anchors = registry.get_anchors();
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].id(), &first);
        assert_eq!(anchors[1].position(), &Vector3::new(1.0, 2.0, 3.0));

        let removed = registry.delete_anchor(first.as_str()).unwrap();
        assert_eq!(removed.id(), &first);
        assert!(registry.resolve_anchor(first.as_str()).is_none());
        assert_eq!(
            registry.resolve_anchor(second.as_str()).map(|a| *a.position()),
            Some(Vector3::new(1.0, 2.0, 3.0))
        );
        assert_eq!(registry.get_all_anchors(), vec![second]);
    }

    #[test]
    fn test_resolve_returns_stored_record() {
        let mut registry = AnchorRegistry::new();
        let mut metadata = Metadata::new();
        metadata.insert("label".to_string(), json!("north door"));
        let id = registry
            .create_anchor(Vector3::new(4.0, 0.0, -2.0), Vector3::new(0.0, 1.57, 0.0), Some(metadata))
            .unwrap();

        let anchor = registry.resolve_anchor(id.as_str()).unwrap();
        assert_eq!(anchor.id(), &id);
        assert_eq!(anchor.rotation(), &Rotation::Euler(Vector3::new(0.0, 1.57, 0.0)));
        assert_eq!(anchor.metadata()["label"], json!("north door"));
        assert_eq!(registry.get_anchors()[0], *anchor);
    }

    #[test]
    fn test_identifiers_unique_and_not_reused() {
        let mut registry = AnchorRegistry::new();
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let id = registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();
            assert!(seen.insert(id.clone()));
            registry.delete_anchor(id.as_str());
        }
        let id = registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();
        assert!(!seen.contains(&id));
        assert_eq!(id, "anchor_101");
    }

    #[test]
    fn test_anchor_listings_agree() {
        let mut registry = AnchorRegistry::new();
        for i in 0..5 {
            registry
                .create_anchor(Vector3::new(i as f64, 0.0, 0.0), Rotation::default(), None)
                .unwrap();
        }
        registry.delete_anchor("anchor_3");

        let anchors = registry.get_anchors();
        let ids = registry.get_all_anchors();
        assert_eq!(anchors.len(), ids.len());
        let from_anchors: Vec<AnchorId> = anchors.iter().map(|a| a.id().clone()).collect();
        assert_eq!(from_anchors, ids);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_observer_receives_lifecycle_events() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = AnchorRegistry::new();
        registry.set_observer(recording_observer(log.clone()));

        let id = registry
            .create_anchor(Vector3::new(1.0, 2.0, 3.0), Rotation::default(), None)
            .unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec![Event::Placed(id.clone(), Vector3::new(1.0, 2.0, 3.0))]
        );

        registry.delete_anchor(id.as_str());
        assert_eq!(log.lock().unwrap().len(), 2);
        assert_eq!(log.lock().unwrap()[1], Event::Removed(id));
    }

    #[test]
    fn test_delete_unknown_still_notifies() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = AnchorRegistry::new();
        registry.set_observer(recording_observer(log.clone()));

        assert!(registry.delete_anchor("never_created").is_none());
        let events = log.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], Event::Removed(AnchorId::new("never_created".to_string())));
    }

    #[test]
    fn test_set_observer_replaces_previous() {
        let old_log = Arc::new(Mutex::new(Vec::new()));
        let new_log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = AnchorRegistry::new();

        registry.set_observer(recording_observer(old_log.clone()));
        registry.set_observer(recording_observer(new_log.clone()));
        registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();

        assert!(old_log.lock().unwrap().is_empty());
        assert_eq!(new_log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_subscribers_all_notified() {
        let a = Arc::new(Mutex::new(Vec::new()));
        let b = Arc::new(Mutex::new(Vec::new()));
        let mut registry = AnchorRegistry::new();
        registry.subscribe(recording_observer(a.clone()));
        let handle = registry.subscribe(recording_observer(b.clone()));

        registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();
        assert!(registry.unsubscribe(handle));
        registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();

        assert_eq!(a.lock().unwrap().len(), 2);
        assert_eq!(b.lock().unwrap().len(), 1);

        registry.clear_observers();
        registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();
        assert_eq!(a.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_panicking_observer_does_not_corrupt_state() {
        let mut registry = AnchorRegistry::new();
        registry.set_observer(
            CallbackObserver::new()
                .on_placed(|_| panic!("placed failure"))
                .on_removed(|_| panic!("removed failure")),
        );

        let id = registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();
        assert!(registry.resolve_anchor(id.as_str()).is_some());

        assert!(registry.delete_anchor(id.as_str()).is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_metadata_cannot_override_reserved_fields() {
        let mut registry = AnchorRegistry::new();
        let mut metadata = Metadata::new();
        metadata.insert("id".to_string(), json!("hijacked"));
        metadata.insert("timestamp".to_string(), json!(0));

        let id = registry.create_anchor(Vector3::zeros(), Rotation::default(), Some(metadata)).unwrap();

        assert!(registry.resolve_anchor("hijacked").is_none());
        let anchor = registry.resolve_anchor(id.as_str()).unwrap();
        assert_eq!(anchor.id(), &id);
        assert_eq!(anchor.metadata()["id"], json!("hijacked"));
    }

    #[test]
    fn test_capacity_limit() {
        let mut registry = AnchorRegistry::with_config(RegistryConfig {
            max_anchors: Some(2),
            ..RegistryConfig::default()
        });
        let first = registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();
        registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();

        let err = registry
            .create_anchor(Vector3::zeros(), Rotation::default(), None)
            .unwrap_err();
        assert_eq!(err, RegistryError::CapacityExceeded { limit: 2 });
        assert_eq!(registry.len(), 2);

        registry.delete_anchor(first.as_str());
        assert!(registry.create_anchor(Vector3::zeros(), Rotation::default(), None).is_ok());
    }

    #[test]
    fn test_geographic_annotation() {
        let mut registry = AnchorRegistry::new();
        let bare = registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();
        assert!(registry.resolve_anchor(bare.as_str()).unwrap().geographic().is_none());

        registry.set_reference_location(37.0, -122.0, 0.0).unwrap();
        let id = registry
            .create_anchor(Vector3::new(0.0, 5.0, 110.54), Rotation::default(), None)
            .unwrap();
        let geo = *registry.resolve_anchor(id.as_str()).unwrap().geographic().unwrap();
        assert!((geo.lat - 37.001).abs() < 1e-9);
        assert!((geo.lng + 122.0).abs() < 1e-9);
        assert!((geo.alt - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_annotation_can_be_disabled() {
        let mut registry = AnchorRegistry::with_config(RegistryConfig {
            annotate_geographic: false,
            ..RegistryConfig::default()
        });
        registry.set_reference_location(37.0, -122.0, 0.0).unwrap();
        let id = registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();
        assert!(registry.resolve_anchor(id.as_str()).unwrap().geographic().is_none());
    }

    #[test]
    fn test_geo_anchor_requires_reference() {
        let mut registry = AnchorRegistry::new();
        let err = registry
            .create_geo_anchor(GeographicPosition::new(37.0, -122.0), Rotation::default(), None)
            .unwrap_err();
        assert_eq!(err, RegistryError::Transform(TransformError::ReferenceNotSet));
        assert!(registry.is_empty());

        registry.set_reference_location(37.0, -122.0, 0.0).unwrap();
        let target = GeographicPosition::new(37.001, -122.0).with_altitude(3.0);
        let id = registry.create_geo_anchor(target, Rotation::default(), None).unwrap();

        let anchor = registry.resolve_anchor(id.as_str()).unwrap();
        assert_eq!(anchor.geographic(), Some(&target));
        assert!((anchor.position().z - 110.54).abs() < 1e-6);
        assert!((anchor.position().y - 3.0).abs() < 1e-12);
        assert!(anchor.position().x.abs() < 1e-9);

        let offset = registry.local_offset(id.as_str()).unwrap();
        assert!((offset.z - 110.54).abs() < 1e-6);
    }

    #[test]
    fn test_find_nearby_anchors() {
        let mut registry = AnchorRegistry::new();
        let near = registry.create_anchor(Vector3::new(1.0, 0.0, 0.0), Rotation::default(), None).unwrap();
        registry.create_anchor(Vector3::new(10.0, 0.0, 0.0), Rotation::default(), None).unwrap();
        let edge = registry.create_anchor(Vector3::new(0.0, 0.0, 2.0), Rotation::default(), None).unwrap();

        let found: Vec<&AnchorId> = registry
            .find_nearby_anchors(&Vector3::zeros(), 2.0)
            .into_iter()
            .map(|a| a.id())
            .collect();
        assert_eq!(found, vec![&near, &edge]);
    }

    #[test]
    fn test_clear_notifies_each_anchor() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = AnchorRegistry::new();
        registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();
        registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();
        registry.set_observer(recording_observer(log.clone()));

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                Event::Removed(AnchorId::new("anchor_1".to_string())),
                Event::Removed(AnchorId::new("anchor_2".to_string())),
            ]
        );
    }

    #[test]
    fn test_ar_capability_is_static() {
        let mut registry = AnchorRegistry::new();
        assert!(registry.is_ar_enabled());
        registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();
        assert!(registry.is_ar_enabled());

        let disabled = AnchorRegistry::with_config(RegistryConfig {
            ar_capable: false,
            ..RegistryConfig::default()
        });
        assert!(!disabled.is_ar_enabled());
    }

    #[test]
    fn test_from_config() {
        let mut config = AnchorSystemConfig::default();
        config.registry.id_prefix = "site".to_string();
        config.transform.reference = Some(ReferenceLocation::new(10.0, 20.0));

        let mut registry = AnchorRegistry::from_config(&config).unwrap();
        assert!(registry.transform().has_reference());
        let id = registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();
        assert_eq!(id, "site_1");
        assert_eq!(
            registry.resolve_anchor(id.as_str()).unwrap().geographic(),
            Some(&GeographicPosition::new(10.0, 20.0))
        );
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let mut config = AnchorSystemConfig::default();
        config.registry.max_anchors = Some(0);
        match AnchorRegistry::from_config(&config) {
            Err(RegistryError::InvalidConfig { parameter, .. }) => {
                assert_eq!(parameter, "registry.max_anchors")
            }
            other => panic!("expected InvalidConfig, got {:?}", other.map(|r| r.len())),
        }

        let mut config = AnchorSystemConfig::default();
        config.registry.id_prefix.clear();
        assert!(matches!(
            AnchorRegistry::from_config(&config),
            Err(RegistryError::InvalidConfig { ref parameter, .. }) if parameter == "registry.id_prefix"
        ));

        let mut config = AnchorSystemConfig::default();
        config.transform.max_operational_radius_m = f64::NAN;
        assert!(matches!(
            AnchorRegistry::from_config(&config),
            Err(RegistryError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_geo_anchor_out_of_range_rejected() {
        let mut registry = AnchorRegistry::new();
        registry.set_reference_location(37.0, -122.0, 0.0).unwrap();

        let err = registry
            .create_geo_anchor(GeographicPosition::new(91.0, -122.0), Rotation::default(), None)
            .unwrap_err();
        assert_eq!(err, RegistryError::Transform(TransformError::LatitudeOutOfRange { value: 91.0 }));
        assert!(registry.is_empty());

        let mut lenient = AnchorSystemConfig::default();
        lenient.transform.validate_ranges = false;
        lenient.transform.reference = Some(ReferenceLocation::new(37.0, -122.0));
        let mut registry = AnchorRegistry::from_config(&lenient).unwrap();
        assert!(registry
            .create_geo_anchor(GeographicPosition::new(91.0, -122.0), Rotation::default(), None)
            .is_ok());
    }

    #[test]
    fn test_non_send_observer_on_local_registry() {
        struct PlacedIds(Rc<RefCell<Vec<AnchorId>>>);

        impl AnchorObserver for PlacedIds {
            fn on_anchor_placed(&mut self, anchor: &Anchor) {
                self.0.borrow_mut().push(anchor.id().clone());
            }
        }

        let ids = Rc::new(RefCell::new(Vec::new()));
        let mut registry = AnchorRegistry::new();
        registry.set_observer(PlacedIds(ids.clone()));

        let id = registry.create_anchor(Vector3::zeros(), Rotation::default(), None).unwrap();
        assert_eq!(*ids.borrow(), vec![id]);
    }
}
