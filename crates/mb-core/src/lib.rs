//! Mind Board core: scene tree, identifiers, node and connector model, viewport math.

pub mod config;
pub mod id;
pub mod model;
pub mod scene;
pub mod viewport;

pub use config::{BoardConfig, ZoomModifier};
pub use id::{ConnectionId, ElementId, NodeId};
pub use model::*;
pub use scene::{Attribute, Element, Marker, Scene, SceneChange, SceneTree, Tag};
pub use viewport::{ViewportState, ZoomLimits};

// Re-export geometry types so downstream crates agree on one kurbo version
pub use kurbo::{Point, Rect, Size, Vec2};
