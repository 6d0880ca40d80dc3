//! Node lifecycle boundary.
//!
//! The board never builds node content itself: it asks a [`NodeLifecycle`]
//! to create nodes from drop payloads and to keep the single active-node
//! selection. [`NodeStore`] is the in-memory implementation used by default.

use mb_core::{Attribute, BoardNode, Element, ElementId, Marker, NodeId, Point, Scene, Size, Tag};
use std::collections::HashMap;

/// Owner of node existence and of the active-node flag.
pub trait NodeLifecycle {
    /// Build a node from `template` under `parent`, its top-left corner at
    /// `at` (board space). Returns `None` if the node could not be attached.
    fn create_node(
        &mut self,
        scene: &mut Scene,
        parent: ElementId,
        at: Point,
        template: &str,
    ) -> Option<NodeId>;

    fn node(&self, id: NodeId) -> Option<&BoardNode>;

    fn node_mut(&mut self, id: NodeId) -> Option<&mut BoardNode>;

    /// Every known node, in creation order.
    fn node_ids(&self) -> Vec<NodeId>;

    /// The node whose container element is `container`.
    fn node_for_element(&self, container: ElementId) -> Option<NodeId>;

    fn active_node(&self) -> Option<NodeId>;

    /// Move the active marker to `node`. The previous node loses its marker
    /// before the new one gets it.
    fn set_active_node(&mut self, scene: &mut Scene, node: Option<NodeId>);

    fn clear_active_selection(&mut self, scene: &mut Scene) {
        self.set_active_node(scene, None);
    }
}

#[derive(Debug, Clone)]
pub struct NodeStore {
    nodes: HashMap<NodeId, BoardNode>,
    by_element: HashMap<ElementId, NodeId>,
    order: Vec<NodeId>,
    active: Option<NodeId>,
    default_size: Size,
}

impl NodeStore {
    pub fn new(default_size: Size) -> Self {
        Self {
            nodes: HashMap::new(),
            by_element: HashMap::new(),
            order: Vec::new(),
            active: None,
            default_size,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &BoardNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new(Size::new(200.0, 120.0))
    }
}

/// Attach the element skeleton of one node:
///
/// ```text
/// container [NodeContainer]
/// └── body [Node]
///     ├── drag strip [DragDiv]
///     ├── description <textarea> [Description] readonly disabled
///     ├── link action [LinkAction] > <svg>
///     └── resize <button> [ResizeButton]
/// ```
fn build_node_elements(scene: &mut Scene, parent: ElementId) -> Option<ElementId> {
    let container = scene.add_element(parent, Element::div().with_marker(Marker::NodeContainer))?;
    let body = scene.add_element(container, Element::div().with_marker(Marker::Node))?;
    scene.add_element(body, Element::div().with_marker(Marker::DragDiv))?;
    scene.add_element(
        body,
        Element::new(Tag::TextArea)
            .with_marker(Marker::Description)
            .with_attribute(Attribute::ReadOnly)
            .with_attribute(Attribute::Disabled),
    )?;
    let link = scene.add_element(body, Element::div().with_marker(Marker::LinkAction))?;
    scene.add_element(link, Element::new(Tag::Svg))?;
    scene.add_element(
        body,
        Element::new(Tag::Button).with_marker(Marker::ResizeButton),
    )?;
    Some(container)
}

impl NodeLifecycle for NodeStore {
    fn create_node(
        &mut self,
        scene: &mut Scene,
        parent: ElementId,
        at: Point,
        template: &str,
    ) -> Option<NodeId> {
        let element = build_node_elements(scene, parent)?;
        let id = NodeId::fresh();
        self.nodes.insert(
            id,
            BoardNode {
                id,
                element,
                position: at,
                size: self.default_size,
                template: template.to_string(),
            },
        );
        self.by_element.insert(element, id);
        self.order.push(id);
        log::debug!("created node {id} at ({:.1}, {:.1})", at.x, at.y);
        Some(id)
    }

    fn node(&self, id: NodeId) -> Option<&BoardNode> {
        self.nodes.get(&id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut BoardNode> {
        self.nodes.get_mut(&id)
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.order.clone()
    }

    fn node_for_element(&self, container: ElementId) -> Option<NodeId> {
        self.by_element.get(&container).copied()
    }

    fn active_node(&self) -> Option<NodeId> {
        self.active
    }

    fn set_active_node(&mut self, scene: &mut Scene, node: Option<NodeId>) {
        if self.active == node {
            return;
        }
        if let Some(prev) = self.active.take()
            && let Some(prev) = self.nodes.get(&prev)
        {
            scene.remove_marker(prev.element, Marker::ActiveNode);
        }
        if let Some(next) = node.and_then(|id| self.nodes.get(&id)) {
            scene.add_marker(next.element, Marker::ActiveNode);
            self.active = Some(next.id);
        }
    }
}
