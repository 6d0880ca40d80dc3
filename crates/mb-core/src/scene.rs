//! Retained element tree standing in for the host's DOM.
//!
//! The board never talks to a concrete UI toolkit. Instead every element the
//! controller cares about lives in a [`Scene`]: a parent→child tree whose
//! elements carry marker classes (`nodeContainer`, `linkAction`, ...) and a
//! couple of boolean attributes. Hit classification only needs the
//! [`SceneTree`] capability (parent + marker + tag lookups), so hosts with
//! their own tree can implement that trait directly.
//!
//! Every effective mutation is journaled as a [`SceneChange`]. The board
//! drains the journal into its effect stream so a host can mirror class
//! toggles, attribute removals and focus moves onto real widgets.

use crate::id::ElementId;
use petgraph::Direction;
use petgraph::stable_graph::StableDiGraph;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Element kind. Only the distinctions the board reacts to are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    Div,
    Button,
    TextArea,
    Svg,
    /// Connector endpoint dot. Pressing one starts a connection drag.
    Circle,
}

/// Marker classes recognised by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Marker {
    /// Sentinel: ancestor walks stop here.
    CanvasRoot,
    NodeContainer,
    /// Valid connection target.
    Node,
    /// Valid connection source.
    LinkAction,
    ResizeButton,
    DragDiv,
    Description,
    Hidden,
    ActiveNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    ReadOnly,
    Disabled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub markers: SmallVec<[Marker; 3]>,
    pub attributes: SmallVec<[Attribute; 2]>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            markers: SmallVec::new(),
            attributes: SmallVec::new(),
        }
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        if !self.attributes.contains(&attribute) {
            self.attributes.push(attribute);
        }
        self
    }
}

/// A journaled scene mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "camelCase")]
pub enum SceneChange {
    ElementAdded { element: ElementId, parent: ElementId },
    MarkerAdded { element: ElementId, marker: Marker },
    MarkerRemoved { element: ElementId, marker: Marker },
    AttributeRemoved { element: ElementId, attribute: Attribute },
    Focused { element: ElementId },
    Blurred { element: ElementId },
}

/// The capability hit classification needs from a UI tree.
pub trait SceneTree {
    type Handle: Copy + Eq;

    fn parent_of(&self, handle: Self::Handle) -> Option<Self::Handle>;

    fn has_marker(&self, handle: Self::Handle, marker: Marker) -> bool;

    fn tag_of(&self, handle: Self::Handle) -> Option<Tag>;
}

/// The element tree. Edges go parent → child.
#[derive(Debug, Clone)]
pub struct Scene {
    tree: StableDiGraph<Element, ()>,
    root: ElementId,
    focused: Option<ElementId>,
    journal: Vec<SceneChange>,
}

impl Scene {
    /// An empty scene holding only the document root.
    #[must_use]
    pub fn new() -> Self {
        let mut tree = StableDiGraph::new();
        let root = ElementId(tree.add_node(Element::div()));
        Self {
            tree,
            root,
            focused: None,
            journal: Vec::new(),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.tree.contains_node(id.0)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.tree.node_weight(id.0)
    }

    /// Append `element` as the last child of `parent`.
    /// Returns `None` when `parent` is not part of this scene.
    pub fn add_element(&mut self, parent: ElementId, element: Element) -> Option<ElementId> {
        if !self.contains(parent) {
            log::warn!("add_element: parent {parent:?} is not part of this scene");
            return None;
        }
        let idx = self.tree.add_node(element);
        self.tree.add_edge(parent.0, idx, ());
        let id = ElementId(idx);
        self.journal.push(SceneChange::ElementAdded { element: id, parent });
        Some(id)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.tree
            .neighbors_directed(id.0, Direction::Incoming)
            .next()
            .map(ElementId)
    }

    /// Children in insertion order.
    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        let mut children: Vec<ElementId> = self
            .tree
            .neighbors_directed(id.0, Direction::Outgoing)
            .map(ElementId)
            .collect();
        children.sort();
        children
    }

    pub fn has_marker(&self, id: ElementId, marker: Marker) -> bool {
        self.element(id).is_some_and(|e| e.markers.contains(&marker))
    }

    /// Returns true if the marker was not present before.
    pub fn add_marker(&mut self, id: ElementId, marker: Marker) -> bool {
        let Some(element) = self.tree.node_weight_mut(id.0) else {
            return false;
        };
        if element.markers.contains(&marker) {
            return false;
        }
        element.markers.push(marker);
        self.journal.push(SceneChange::MarkerAdded { element: id, marker });
        true
    }

    /// Returns true if the marker was present.
    pub fn remove_marker(&mut self, id: ElementId, marker: Marker) -> bool {
        let Some(element) = self.tree.node_weight_mut(id.0) else {
            return false;
        };
        let before = element.markers.len();
        element.markers.retain(|m| *m != marker);
        if element.markers.len() == before {
            return false;
        }
        self.journal.push(SceneChange::MarkerRemoved { element: id, marker });
        true
    }

    pub fn has_attribute(&self, id: ElementId, attribute: Attribute) -> bool {
        self.element(id)
            .is_some_and(|e| e.attributes.contains(&attribute))
    }

    pub fn remove_attribute(&mut self, id: ElementId, attribute: Attribute) -> bool {
        let Some(element) = self.tree.node_weight_mut(id.0) else {
            return false;
        };
        let before = element.attributes.len();
        element.attributes.retain(|a| *a != attribute);
        if element.attributes.len() == before {
            return false;
        }
        self.journal.push(SceneChange::AttributeRemoved {
            element: id,
            attribute,
        });
        true
    }

    /// First descendant of `id` (document order, `id` excluded) carrying `marker`.
    pub fn query_descendant(&self, id: ElementId, marker: Marker) -> Option<ElementId> {
        let mut stack: VecDeque<ElementId> = self.children(id).into();
        while let Some(current) = stack.pop_front() {
            if self.has_marker(current, marker) {
                return Some(current);
            }
            // Depth-first: children go before the remaining siblings.
            for child in self.children(current).into_iter().rev() {
                stack.push_front(child);
            }
        }
        None
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Move focus to `id`. Focusing the already focused element is a no-op.
    pub fn focus(&mut self, id: ElementId) -> bool {
        if !self.contains(id) || self.focused == Some(id) {
            return false;
        }
        if let Some(prev) = self.focused.take() {
            self.journal.push(SceneChange::Blurred { element: prev });
        }
        self.focused = Some(id);
        self.journal.push(SceneChange::Focused { element: id });
        true
    }

    /// Drop focus, returning the element that had it.
    pub fn blur(&mut self) -> Option<ElementId> {
        let prev = self.focused.take()?;
        self.journal.push(SceneChange::Blurred { element: prev });
        Some(prev)
    }

    pub fn drain_changes(&mut self) -> Vec<SceneChange> {
        std::mem::take(&mut self.journal)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneTree for Scene {
    type Handle = ElementId;

    fn parent_of(&self, handle: ElementId) -> Option<ElementId> {
        self.parent(handle)
    }

    fn has_marker(&self, handle: ElementId, marker: Marker) -> bool {
        Scene::has_marker(self, handle, marker)
    }

    fn tag_of(&self, handle: ElementId) -> Option<Tag> {
        self.element(handle).map(|e| e.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn children_keep_insertion_order() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add_element(root, Element::div()).unwrap();
        let b = scene.add_element(root, Element::div()).unwrap();
        let c = scene.add_element(root, Element::div()).unwrap();
        assert_eq!(scene.children(root), vec![a, b, c]);
        assert_eq!(scene.parent(b), Some(root));
        assert_eq!(scene.parent(root), None);
    }

    #[test]
    fn marker_toggles_only_journal_real_changes() {
        let mut scene = Scene::new();
        let el = scene.add_element(scene.root(), Element::div()).unwrap();
        scene.drain_changes();

        assert!(scene.add_marker(el, Marker::ActiveNode));
        assert!(!scene.add_marker(el, Marker::ActiveNode));
        assert!(scene.remove_marker(el, Marker::ActiveNode));
        assert!(!scene.remove_marker(el, Marker::ActiveNode));

        assert_eq!(
            scene.drain_changes(),
            vec![
                SceneChange::MarkerAdded {
                    element: el,
                    marker: Marker::ActiveNode
                },
                SceneChange::MarkerRemoved {
                    element: el,
                    marker: Marker::ActiveNode
                },
            ]
        );
    }

    #[test]
    fn query_descendant_is_depth_first() {
        let mut scene = Scene::new();
        let root = scene.root();
        let outer = scene.add_element(root, Element::div()).unwrap();
        let deep = scene
            .add_element(outer, Element::div().with_marker(Marker::Description))
            .unwrap();
        let _late = scene
            .add_element(root, Element::div().with_marker(Marker::Description))
            .unwrap();
        assert_eq!(scene.query_descendant(root, Marker::Description), Some(deep));
        assert_eq!(scene.query_descendant(deep, Marker::Description), None);
    }

    #[test]
    fn focus_moves_blur_previous() {
        let mut scene = Scene::new();
        let a = scene.add_element(scene.root(), Element::new(Tag::TextArea)).unwrap();
        let b = scene.add_element(scene.root(), Element::new(Tag::TextArea)).unwrap();
        scene.drain_changes();

        assert!(scene.focus(a));
        assert!(!scene.focus(a));
        assert!(scene.focus(b));
        assert_eq!(scene.blur(), Some(b));
        assert_eq!(scene.blur(), None);
        assert_eq!(
            scene.drain_changes(),
            vec![
                SceneChange::Focused { element: a },
                SceneChange::Blurred { element: a },
                SceneChange::Focused { element: b },
                SceneChange::Blurred { element: b },
            ]
        );
    }

    #[test]
    fn attributes_are_removed_once() {
        let mut scene = Scene::new();
        let desc = scene
            .add_element(
                scene.root(),
                Element::new(Tag::TextArea)
                    .with_attribute(Attribute::ReadOnly)
                    .with_attribute(Attribute::Disabled),
            )
            .unwrap();
        assert!(scene.remove_attribute(desc, Attribute::ReadOnly));
        assert!(!scene.remove_attribute(desc, Attribute::ReadOnly));
        assert!(scene.has_attribute(desc, Attribute::Disabled));
    }

    #[test]
    fn adding_under_unknown_parent_fails() {
        let mut scene = Scene::new();
        let mut other = Scene::new();
        let foreign = other.add_element(other.root(), Element::div()).unwrap();
        assert_eq!(scene.add_element(foreign, Element::div()), None);
    }
}
