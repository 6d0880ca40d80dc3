//! Gesture modes.
//!
//! Exactly one mode is current per board. Everything a gesture needs while
//! it runs lives in its variant. A press on a node container the node
//! lifecycle does not know still enters the gesture, with no node, so
//! pan/zoom stays off until the pointer is released.

use mb_core::{ElementId, NodeId, Point};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum GestureMode {
    #[default]
    Idle,

    /// `last` is the previous pointer position in screen space.
    Panning { last: Point },

    /// `node` is `None` when the pressed container belongs to no known node;
    /// moves are then swallowed.
    DraggingNode { node: Option<NodeId>, last: Point },

    ResizingNode { node: Option<NodeId>, last: Point },

    /// `source` is `None` for anchors outside any known node; such a drag
    /// can never complete. `cursor` is in board space.
    DrawingConnection {
        source: Option<NodeId>,
        cursor: Point,
    },

    EditingText { node: NodeId, field: ElementId },
}

impl GestureMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether pan/zoom gestures must be switched off while in this mode.
    pub fn suppresses_pan_zoom(&self) -> bool {
        matches!(
            self,
            Self::DraggingNode { .. } | Self::ResizingNode { .. } | Self::DrawingConnection { .. }
        )
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::ResizingNode { .. })
    }

    /// The node under resize, if any.
    pub fn resize_target(&self) -> Option<NodeId> {
        match self {
            Self::ResizingNode { node, .. } => *node,
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::DraggingNode { .. } => "draggingNode",
            Self::ResizingNode { .. } => "resizingNode",
            Self::DrawingConnection { .. } => "drawingConnection",
            Self::EditingText { .. } => "editingText",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pointer_gestures_suppress_pan_zoom() {
        let node = NodeId::intern("gesture_node");
        let at = Point::ZERO;
        assert!(!GestureMode::Idle.suppresses_pan_zoom());
        assert!(!GestureMode::Panning { last: at }.suppresses_pan_zoom());
        assert!(GestureMode::DraggingNode { node: Some(node), last: at }.suppresses_pan_zoom());
        assert!(GestureMode::ResizingNode { node: Some(node), last: at }.suppresses_pan_zoom());
        assert!(GestureMode::DraggingNode { node: None, last: at }.suppresses_pan_zoom());
        assert!(
            GestureMode::DrawingConnection {
                source: None,
                cursor: at
            }
            .suppresses_pan_zoom()
        );
    }

    #[test]
    fn resize_target_only_while_resizing() {
        let node = NodeId::intern("gesture_resize");
        let at = Point::ZERO;
        assert_eq!(
            GestureMode::ResizingNode { node: Some(node), last: at }.resize_target(),
            Some(node)
        );
        assert_eq!(
            GestureMode::DraggingNode { node: Some(node), last: at }.resize_target(),
            None
        );
    }

    #[test]
    fn resize_without_known_node_is_still_resizing() {
        let mode = GestureMode::ResizingNode {
            node: None,
            last: Point::ZERO,
        };
        assert!(mode.is_resizing());
        assert_eq!(mode.resize_target(), None);
        assert!(!GestureMode::Idle.is_resizing());
    }
}
