//! Anchor records and identifiers

use chrono::{DateTime, Utc};
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::core::GeographicPosition;

/// Caller-supplied anchor metadata
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Field names of the anchor record itself. Metadata keys with these names
/// are stored inside [`Anchor::metadata`] and never replace the real fields.
pub const RESERVED_FIELDS: [&str; 5] = ["id", "position", "rotation", "timestamp", "created_at"];

/// Opaque anchor identifier, unique among the anchors of one registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorId(String);

impl AnchorId {
    pub(crate) fn new(id: String) -> Self {
        AnchorId(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AnchorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AnchorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for AnchorId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AnchorId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Anchor orientation. The registry stores it without interpreting it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Rotation {
    /// Euler angles in radians
    Euler(Vector3<f64>),
    Quaternion(UnitQuaternion<f64>),
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::Euler(Vector3::zeros())
    }
}

impl From<Vector3<f64>> for Rotation {
    fn from(euler: Vector3<f64>) -> Self {
        Rotation::Euler(euler)
    }
}

impl From<UnitQuaternion<f64>> for Rotation {
    fn from(q: UnitQuaternion<f64>) -> Self {
        Rotation::Quaternion(q)
    }
}

/// A persistent placement in the local scene.
///
/// Identity and creation time are fixed at creation; there is no update
/// operation, repositioning is delete + create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    id: AnchorId,
    position: Vector3<f64>,
    rotation: Rotation,
    created_at: DateTime<Utc>,
    geographic: Option<GeographicPosition>,
    metadata: Metadata,
}

impl Anchor {
    pub(crate) fn new(
        id: AnchorId,
        position: Vector3<f64>,
        rotation: Rotation,
        geographic: Option<GeographicPosition>,
        metadata: Metadata,
    ) -> Self {
        Self {
            id,
            position,
            rotation,
            created_at: Utc::now(),
            geographic,
            metadata,
        }
    }

    pub fn id(&self) -> &AnchorId {
        &self.id
    }

    /// Position in local scene coordinates (meters)
    pub fn position(&self) -> &Vector3<f64> {
        &self.position
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Geographic coordinates, if a reference location was set at creation
    pub fn geographic(&self) -> Option<&GeographicPosition> {
        self.geographic.as_ref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Distance to a local scene point
    pub fn distance_to(&self, point: &Vector3<f64>) -> f64 {
        (self.position - point).norm()
    }
}
