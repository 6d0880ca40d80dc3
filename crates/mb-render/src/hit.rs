//! Hit classification: pressed element → logical board region.
//!
//! Walks the ancestor chain upward from the pressed element. Each marker is
//! searched separately, in priority order (resize handle, link affordance,
//! node container); within one search the closest ancestor wins. Walks stop
//! at the canvas root sentinel, so anything not claimed by a node is
//! `Background`.

use mb_core::{Marker, SceneTree, Tag};

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit<H> {
    /// The node container that was pressed.
    NodeBody(H),
    /// A link-action element or a connector anchor shape.
    LinkAffordance(H),
    /// The element owning the pressed resize handle.
    ResizeHandle(H),
    Background,
}

/// Closest element carrying `marker`, starting at `start` itself.
///
/// Returns `None` as soon as the canvas root is reached (the root itself
/// never matches) or the chain runs out.
pub fn closest<T: SceneTree>(tree: &T, start: T::Handle, marker: Marker) -> Option<T::Handle> {
    let mut current = Some(start);
    while let Some(handle) = current {
        if tree.has_marker(handle, Marker::CanvasRoot) {
            return None;
        }
        if tree.has_marker(handle, marker) {
            return Some(handle);
        }
        current = tree.parent_of(handle);
    }
    None
}

/// Classify the element a pointer-down landed on.
pub fn classify<T: SceneTree>(tree: &T, target: T::Handle) -> Hit<T::Handle> {
    if let Some(handle) = closest(tree, target, Marker::ResizeButton)
        && let Some(owner) = tree.parent_of(handle)
        && !tree.has_marker(owner, Marker::CanvasRoot)
    {
        log::trace!("classify: resize handle");
        return Hit::ResizeHandle(owner);
    }

    if tree.tag_of(target) == Some(Tag::Circle) {
        log::trace!("classify: connector anchor");
        return Hit::LinkAffordance(target);
    }
    if let Some(link) = closest(tree, target, Marker::LinkAction) {
        log::trace!("classify: link affordance");
        return Hit::LinkAffordance(link);
    }

    if let Some(container) = closest(tree, target, Marker::NodeContainer) {
        log::trace!("classify: node body");
        return Hit::NodeBody(container);
    }

    log::trace!("classify: background");
    Hit::Background
}

#[cfg(test)]
mod tests {
    use super::*;
    use mb_core::{Element, ElementId, Scene};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    struct Fixture {
        scene: Scene,
        canvas: ElementId,
        container: ElementId,
        body: ElementId,
        desc: ElementId,
        link: ElementId,
        link_icon: ElementId,
        resize: ElementId,
    }

    /// canvas > container > body > {desc, link > icon, resize}
    fn fixture() -> Fixture {
        let mut scene = Scene::new();
        let canvas = scene
            .add_element(scene.root(), Element::div().with_marker(Marker::CanvasRoot))
            .unwrap();
        let container = scene
            .add_element(canvas, Element::div().with_marker(Marker::NodeContainer))
            .unwrap();
        let body = scene
            .add_element(container, Element::div().with_marker(Marker::Node))
            .unwrap();
        let desc = scene
            .add_element(body, Element::new(Tag::TextArea).with_marker(Marker::Description))
            .unwrap();
        let link = scene
            .add_element(body, Element::div().with_marker(Marker::LinkAction))
            .unwrap();
        let link_icon = scene.add_element(link, Element::new(Tag::Svg)).unwrap();
        let resize = scene
            .add_element(body, Element::new(Tag::Button).with_marker(Marker::ResizeButton))
            .unwrap();
        Fixture {
            scene,
            canvas,
            container,
            body,
            desc,
            link,
            link_icon,
            resize,
        }
    }

    #[test]
    fn node_parts_classify_by_priority() {
        let f = fixture();
        assert_eq!(classify(&f.scene, f.desc), Hit::NodeBody(f.container));
        assert_eq!(classify(&f.scene, f.body), Hit::NodeBody(f.container));
        assert_eq!(classify(&f.scene, f.link_icon), Hit::LinkAffordance(f.link));
        assert_eq!(classify(&f.scene, f.resize), Hit::ResizeHandle(f.body));
    }

    #[test]
    fn canvas_and_outside_are_background() {
        let f = fixture();
        assert_eq!(classify(&f.scene, f.canvas), Hit::Background);
        assert_eq!(classify(&f.scene, f.scene.root()), Hit::Background);
    }

    #[test]
    fn circle_anywhere_is_a_link_affordance() {
        let mut f = fixture();
        let svg = f.scene.add_element(f.canvas, Element::new(Tag::Svg)).unwrap();
        let dot = f.scene.add_element(svg, Element::new(Tag::Circle)).unwrap();
        assert_eq!(classify(&f.scene, dot), Hit::LinkAffordance(dot));
    }

    #[test]
    fn sentinel_hides_markers_above_it() {
        let mut scene = Scene::new();
        let outer = scene
            .add_element(scene.root(), Element::div().with_marker(Marker::NodeContainer))
            .unwrap();
        let canvas = scene
            .add_element(outer, Element::div().with_marker(Marker::CanvasRoot))
            .unwrap();
        let inner = scene.add_element(canvas, Element::div()).unwrap();
        assert_eq!(closest(&scene, inner, Marker::NodeContainer), None);
        assert_eq!(classify(&scene, inner), Hit::Background);
    }

    proptest! {
        #[test]
        fn classification_terminates_on_any_chain(
            markers in proptest::collection::vec(0u8..6, 1..40),
        ) {
            let mut scene = Scene::new();
            let mut current = scene.root();
            let mut chain = Vec::new();
            for m in &markers {
                let element = match m {
                    0 => Element::div().with_marker(Marker::CanvasRoot),
                    1 => Element::div().with_marker(Marker::NodeContainer),
                    2 => Element::div().with_marker(Marker::LinkAction),
                    3 => Element::div().with_marker(Marker::ResizeButton),
                    4 => Element::new(Tag::Svg),
                    _ => Element::div(),
                };
                current = scene.add_element(current, element).unwrap();
                chain.push((current, *m));
            }
            let (leaf, leaf_marker) = *chain.last().unwrap();
            let hit = classify(&scene, leaf);

            // If the leaf's nearest interesting ancestor is the sentinel, nothing matches.
            let nearest = chain.iter().rev().map(|(_, m)| *m).find(|m| *m < 4);
            if nearest == Some(0) {
                prop_assert_eq!(hit, Hit::Background);
            }
            if leaf_marker == 1 {
                let is_node_side = matches!(hit, Hit::NodeBody(_) | Hit::LinkAffordance(_) | Hit::ResizeHandle(_));
                prop_assert!(is_node_side);
            }
        }
    }
}
