//! Anchor registry API
//!
//! Single-threaded [`AnchorRegistry`], its observer contract, and a
//! mutex-guarded handle for multi-threaded callers.

pub mod types;
pub mod observer;
pub mod registry;
pub mod shared;

pub use types::{Anchor, AnchorId, Metadata, Rotation, RESERVED_FIELDS};
pub use observer::{AnchorObserver, CallbackObserver, ObserverBox, ObserverSet, SubscriptionHandle};
pub use registry::{AnchorRegistry, SendAnchorRegistry};
pub use shared::SharedAnchorRegistry;
