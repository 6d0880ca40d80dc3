//! Observable side effects of board events.
//!
//! Hosts drain these after each dispatch and mirror them onto their real
//! surface (class toggles, focus, node placement, link creation).

use mb_core::{ConnectionId, ElementId, NodeId, SceneChange, ViewportState};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    PanZoomEnabled,
    PanZoomDisabled,
    ViewportChanged {
        state: ViewportState,
    },
    Scene {
        change: SceneChange,
    },
    NodeCreated {
        node: NodeId,
        element: ElementId,
        x: f64,
        y: f64,
    },
    NodeMoved {
        node: NodeId,
        x: f64,
        y: f64,
    },
    NodeResized {
        node: NodeId,
        width: f64,
        height: f64,
    },
    ConnectionCreated {
        connection: ConnectionId,
        source: NodeId,
        target: NodeId,
    },
    ElementsDraggable {
        enabled: bool,
    },
    ModeChanged {
        from: &'static str,
        to: &'static str,
    },
}
