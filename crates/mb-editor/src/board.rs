//! The board controller.
//!
//! `Board` ties the scene, the node lifecycle, the viewport and the
//! connection graph together. Every input goes through [`Board::dispatch`],
//! one event at a time; each event runs to completion and leaves its
//! observable consequences in the effect queue.
//!
//! ## Pointer-down routing
//!
//! | Pressed region | Result |
//! |----------------|--------|
//! | resize handle | node activated, `ResizingNode`, pan/zoom and dragging off |
//! | link affordance / anchor | `DrawingConnection`, pan/zoom off |
//! | node body | node activated, `DraggingNode`, pan/zoom off |
//! | background | selection cleared, stays `Idle` |
//!
//! Pointer-up ends any gesture: pan/zoom back on, transform recorded, `Idle`.

use crate::effects::Effect;
use crate::error::{BoardError, BoardResult};
use crate::gesture::GestureMode;
use crate::graph::ConnectionGraph;
use crate::input::{DropEffect, InputEvent, Modifiers, ZoomDirection};
use crate::nodes::{NodeLifecycle, NodeStore};
use crate::viewport::ViewportManager;
use mb_core::{
    Attribute, BoardConfig, BoardNode, ConnectionId, ElementId, Marker, NodeId, Point, Scene,
    Size, ViewportState,
};
use mb_render::{Hit, LinkGeometry, classify, closest};
use std::time::Duration;

/// Everything that only exists between `initialize` and `teardown`.
#[derive(Debug)]
struct Session {
    container: ElementId,
    viewport: ViewportManager,
    connections: ConnectionGraph,
    mode: GestureMode,
}

#[derive(Debug)]
pub struct Board<N: NodeLifecycle = NodeStore> {
    scene: Scene,
    nodes: N,
    config: BoardConfig,
    session: Option<Session>,
    effects: Vec<Effect>,
}

impl Board<NodeStore> {
    /// A board backed by the in-memory node store.
    pub fn with_config(scene: Scene, config: BoardConfig) -> BoardResult<Self> {
        let nodes = NodeStore::new(config.default_node_size);
        Self::new(scene, nodes, config)
    }
}

impl<N: NodeLifecycle> Board<N> {
    pub fn new(scene: Scene, nodes: N, config: BoardConfig) -> BoardResult<Self> {
        config.validate().map_err(BoardError::InvalidConfig)?;
        Ok(Self {
            scene,
            nodes,
            config,
            session: None,
            effects: Vec::new(),
        })
    }

    /// Bind the board to `container`: the container becomes the canvas
    /// root, the viewport starts at identity and every node the lifecycle
    /// already knows is registered for connections.
    pub fn initialize(&mut self, container: ElementId, size: Size) -> BoardResult<()> {
        if self.session.is_some() {
            return Err(BoardError::AlreadyInitialized);
        }
        if !self.scene.contains(container) {
            return Err(BoardError::UnknownElement(container));
        }
        self.scene.add_marker(container, Marker::CanvasRoot);

        let mut viewport = ViewportManager::new(
            self.config.zoom_limits(),
            self.config.zoom_step,
            self.config.reset_duration,
        );
        viewport.set_container_size(size);

        let mut connections =
            ConnectionGraph::new(self.config.connector, self.config.elements_draggable);
        connections.configure_selectors(Marker::LinkAction, Marker::Node, self.config.selector);
        connections.set_zoom(viewport.scale());
        for id in self.nodes.node_ids() {
            if let Some(node) = self.nodes.node(id) {
                connections.register_node(id, node.element);
            }
        }

        log::info!(
            "board initialized on {container:?} ({}x{}, {} nodes)",
            size.width,
            size.height,
            connections.node_count()
        );
        self.session = Some(Session {
            container,
            viewport,
            connections,
            mode: GestureMode::Idle,
        });
        self.flush_scene();
        Ok(())
    }

    /// Release the session. Events sent afterwards fail with
    /// [`BoardError::NotInitialized`] until the board is initialized again.
    pub fn teardown(&mut self) -> BoardResult<()> {
        let Some(session) = self.session.take() else {
            return Err(BoardError::NotInitialized {
                operation: "teardown",
            });
        };
        self.scene.blur();
        self.scene.remove_marker(session.container, Marker::CanvasRoot);
        log::info!(
            "board torn down in {} mode, {} connections released",
            session.mode.name(),
            session.connections.connection_count()
        );
        self.flush_scene();
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// The single transition function: apply one input event.
    pub fn dispatch(&mut self, event: InputEvent) -> BoardResult<()> {
        let operation = event.name();
        let Self {
            scene,
            nodes,
            config,
            session,
            effects,
        } = self;
        let Some(session) = session.as_mut() else {
            return Err(BoardError::NotInitialized { operation });
        };
        log::trace!("dispatch {operation} in {}", session.mode.name());

        let mut tx = Transition {
            scene,
            nodes,
            config,
            session,
            out: effects,
        };
        let before = tx.session.viewport.state();
        let result = tx.apply(event);
        tx.sync_viewport(before);
        tx.flush_scene();
        result
    }

    // ─── Entry points ────────────────────────────────────────────────────

    pub fn on_pointer_down(&mut self, x: f64, y: f64, target: ElementId) -> BoardResult<()> {
        self.dispatch(InputEvent::pointer_down(x, y, target))
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, pressed: bool) -> BoardResult<()> {
        self.dispatch(InputEvent::pointer_move(x, y, pressed))
    }

    pub fn on_pointer_up(&mut self, x: f64, y: f64, target: Option<ElementId>) -> BoardResult<()> {
        self.dispatch(InputEvent::pointer_up(x, y, target))
    }

    pub fn on_double_click(&mut self, target: ElementId) -> BoardResult<()> {
        self.dispatch(InputEvent::DoubleClick { target })
    }

    /// Answer a drag-over: the board always accepts drops as moves.
    pub fn on_drag_over(&mut self, drop_effect: DropEffect) -> BoardResult<DropEffect> {
        self.dispatch(InputEvent::DragOver { drop_effect })?;
        Ok(DropEffect::Move)
    }

    pub fn on_drop(
        &mut self,
        x: f64,
        y: f64,
        drop_effect: DropEffect,
        payload: &str,
    ) -> BoardResult<()> {
        self.dispatch(InputEvent::Drop {
            x,
            y,
            drop_effect,
            payload: payload.to_string(),
        })
    }

    pub fn on_wheel(
        &mut self,
        x: f64,
        y: f64,
        delta_x: f64,
        delta_y: f64,
        modifiers: Modifiers,
    ) -> BoardResult<()> {
        self.dispatch(InputEvent::Wheel {
            x,
            y,
            delta_x,
            delta_y,
            modifiers,
        })
    }

    pub fn zoom_button(&mut self, direction: ZoomDirection) -> BoardResult<()> {
        self.dispatch(InputEvent::ZoomButton(direction))
    }

    pub fn reset_view_button(&mut self) -> BoardResult<()> {
        self.dispatch(InputEvent::ResetViewButton)
    }

    pub fn advance_animation(&mut self, elapsed: Duration) -> BoardResult<()> {
        self.dispatch(InputEvent::AnimationFrame { elapsed })
    }

    /// The bound container changed size.
    pub fn resize_container(&mut self, size: Size) -> BoardResult<()> {
        let session = self.session.as_mut().ok_or(BoardError::NotInitialized {
            operation: "resizeContainer",
        })?;
        session.viewport.set_container_size(size);
        Ok(())
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for hosts building their own elements. Changes
    /// made here show up in the effect queue with the next event.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn nodes(&self) -> &N {
        &self.nodes
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn mode(&self) -> Option<GestureMode> {
        self.session.as_ref().map(|s| s.mode)
    }

    pub fn viewport(&self) -> Option<&ViewportManager> {
        self.session.as_ref().map(|s| &s.viewport)
    }

    pub fn viewport_state(&self) -> Option<ViewportState> {
        self.viewport().map(ViewportManager::state)
    }

    pub fn connections(&self) -> Option<&ConnectionGraph> {
        self.session.as_ref().map(|s| &s.connections)
    }

    /// Geometry of a committed connection at the nodes' current bounds.
    pub fn link_geometry(&self, id: ConnectionId) -> Option<LinkGeometry> {
        let session = self.session.as_ref()?;
        session
            .connections
            .link_geometry(id, |node| self.nodes.node(node).map(BoardNode::bounds))
    }

    /// Geometry of the connection being drawn, if there is one.
    pub fn floating_link(&self) -> Option<LinkGeometry> {
        let session = self.session.as_ref()?;
        let GestureMode::DrawingConnection {
            source: Some(source),
            cursor,
        } = session.mode
        else {
            return None;
        };
        let bounds = self.nodes.node(source)?.bounds();
        Some(session.connections.floating_link(bounds, cursor))
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        self.flush_scene();
        std::mem::take(&mut self.effects)
    }

    /// Drained effects as a JSON array.
    pub fn drain_effects_json(&mut self) -> BoardResult<String> {
        let effects = self.drain_effects();
        Ok(serde_json::to_string(&effects)?)
    }

    fn flush_scene(&mut self) {
        let changes = self.scene.drain_changes();
        self.effects
            .extend(changes.into_iter().map(|change| Effect::Scene { change }));
    }
}

/// Split borrow of a board for the duration of one event.
struct Transition<'a, N> {
    scene: &'a mut Scene,
    nodes: &'a mut N,
    config: &'a BoardConfig,
    session: &'a mut Session,
    out: &'a mut Vec<Effect>,
}

impl<N: NodeLifecycle> Transition<'_, N> {
    fn apply(&mut self, event: InputEvent) -> BoardResult<()> {
        let wheel_delta = event.wheel_delta();
        match event {
            InputEvent::PointerDown { x, y, target } => {
                self.pointer_down(Point::new(x, y), target)?
            }
            InputEvent::PointerMove { x, y, pressed } => self.pointer_move(Point::new(x, y), pressed),
            InputEvent::PointerUp { target, .. } => self.pointer_up(target),
            InputEvent::DoubleClick { target } => self.double_click(target)?,
            InputEvent::Wheel {
                x, y, modifiers, ..
            } => {
                let held = modifiers.holds(self.config.zoom_modifier);
                let delta = wheel_delta.unwrap_or_default();
                self.session
                    .viewport
                    .zoom_by_gesture(delta, Point::new(x, y), held);
            }
            InputEvent::DragOver { .. } => {}
            InputEvent::Drop {
                x,
                y,
                drop_effect,
                payload,
            } => self.drop_node(Point::new(x, y), drop_effect, &payload),
            InputEvent::ZoomButton(direction) => {
                self.session.viewport.zoom(direction);
            }
            InputEvent::ResetViewButton => self.session.viewport.reset_view(),
            InputEvent::AnimationFrame { elapsed } => {
                self.session.viewport.advance(elapsed);
            }
        }
        Ok(())
    }

    /// Queue `effect` behind the scene changes made so far.
    fn emit(&mut self, effect: Effect) {
        self.flush_scene();
        self.out.push(effect);
    }

    fn flush_scene(&mut self) {
        let changes = self.scene.drain_changes();
        self.out
            .extend(changes.into_iter().map(|change| Effect::Scene { change }));
    }

    /// Switch modes, keeping pan/zoom and the global drag switch in step
    /// with the new mode.
    fn enter(&mut self, mode: GestureMode) {
        let from = std::mem::replace(&mut self.session.mode, mode);
        if from.name() != mode.name() {
            log::debug!("gesture {} → {}", from.name(), mode.name());
            self.emit(Effect::ModeChanged {
                from: from.name(),
                to: mode.name(),
            });
        }

        if mode.suppresses_pan_zoom() {
            self.session.viewport.cancel_animation();
            if self.session.viewport.disable() {
                self.emit(Effect::PanZoomDisabled);
            }
        } else if self.session.viewport.enable() {
            self.emit(Effect::PanZoomEnabled);
        }

        let draggable = !mode.is_resizing() && self.config.elements_draggable;
        if self.session.connections.set_elements_draggable(draggable) {
            self.emit(Effect::ElementsDraggable { enabled: draggable });
        }
    }

    /// End the running gesture and take note of the transform.
    fn conclude(&mut self) {
        self.enter(GestureMode::Idle);
        self.session.viewport.record();
    }

    /// Node owning `element`, found through its container.
    fn node_at(&self, element: ElementId) -> Option<NodeId> {
        let container = closest(&*self.scene, element, Marker::NodeContainer)?;
        let node = self.nodes.node_for_element(container);
        if node.is_none() {
            log::warn!("node container {container:?} is unknown to the node lifecycle");
        }
        node
    }

    fn pointer_down(&mut self, at: Point, target: ElementId) -> BoardResult<()> {
        if !self.scene.contains(target) {
            return Err(BoardError::UnknownElement(target));
        }
        self.scene.blur();
        if !self.session.mode.is_idle() {
            log::debug!("{} superseded by pointer-down", self.session.mode.name());
            self.conclude();
        }

        match classify(&*self.scene, target) {
            Hit::ResizeHandle(owner) => {
                let node = self.node_at(owner);
                if node.is_some() {
                    self.nodes.set_active_node(self.scene, node);
                }
                self.enter(GestureMode::ResizingNode { node, last: at });
            }
            Hit::LinkAffordance(anchor) => {
                let source = self.node_at(anchor);
                let cursor = self.session.viewport.screen_to_board(at);
                self.enter(GestureMode::DrawingConnection { source, cursor });
            }
            Hit::NodeBody(container) => {
                let node = self.node_at(container);
                if node.is_some() {
                    self.nodes.set_active_node(self.scene, node);
                }
                self.enter(GestureMode::DraggingNode { node, last: at });
            }
            Hit::Background => self.nodes.clear_active_selection(self.scene),
        }
        Ok(())
    }

    fn pointer_move(&mut self, at: Point, pressed: bool) {
        let view = self.session.viewport.state();
        match self.session.mode {
            GestureMode::Idle => {
                if pressed && self.session.viewport.is_enabled() {
                    self.enter(GestureMode::Panning { last: at });
                }
            }
            GestureMode::Panning { last } => {
                if !pressed {
                    self.conclude();
                    return;
                }
                self.session.viewport.pan_by(at - last);
                self.session.mode = GestureMode::Panning { last: at };
            }
            GestureMode::DraggingNode { node, last } => {
                self.session.mode = GestureMode::DraggingNode { node, last: at };
                if !self.session.connections.elements_draggable() {
                    return;
                }
                let Some(node) = node else {
                    return;
                };
                let delta = view.screen_delta_to_board(at - last);
                let Some(moved) = self.nodes.node_mut(node) else {
                    return;
                };
                moved.position += delta;
                let position = moved.position;
                log::trace!("drag {node} → ({:.1}, {:.1})", position.x, position.y);
                self.emit(Effect::NodeMoved {
                    node,
                    x: position.x,
                    y: position.y,
                });
            }
            GestureMode::ResizingNode { node, last } => {
                self.session.mode = GestureMode::ResizingNode { node, last: at };
                let Some(node) = node else {
                    return;
                };
                let delta = view.screen_delta_to_board(at - last);
                let min = self.config.min_node_size;
                let Some(resized) = self.nodes.node_mut(node) else {
                    return;
                };
                resized.size = Size::new(
                    (resized.size.width + delta.x).max(min.width),
                    (resized.size.height + delta.y).max(min.height),
                );
                let size = resized.size;
                log::trace!("resize {node} → {:.1}x{:.1}", size.width, size.height);
                self.emit(Effect::NodeResized {
                    node,
                    width: size.width,
                    height: size.height,
                });
            }
            GestureMode::DrawingConnection { source, .. } => {
                let cursor = view.screen_to_board(at);
                self.session.mode = GestureMode::DrawingConnection { source, cursor };
            }
            GestureMode::EditingText { .. } => {}
        }
    }

    fn pointer_up(&mut self, target: Option<ElementId>) {
        if let GestureMode::DrawingConnection { source, .. } = self.session.mode {
            self.complete_connection(source, target);
        }
        if !self.session.mode.is_idle() {
            self.conclude();
        }
    }

    fn complete_connection(&mut self, source: Option<NodeId>, released_on: Option<ElementId>) {
        let Some(source) = source else {
            log::debug!("connection ignored: drag did not start on a node");
            return;
        };
        let Some(released_on) = released_on.filter(|el| self.scene.contains(*el)) else {
            log::debug!("connection ignored: released outside the scene");
            return;
        };
        let Some(drop_target) = self
            .session
            .connections
            .target_element(&*self.scene, released_on)
        else {
            log::debug!("connection ignored: {released_on:?} is not a connection target");
            return;
        };
        let Some(target) = closest(&*self.scene, drop_target, Marker::NodeContainer)
            .and_then(|container| self.session.connections.node_for_element(container))
        else {
            log::debug!("connection ignored: {drop_target:?} belongs to no registered node");
            return;
        };
        match self.session.connections.add_connection(source, target) {
            Ok(connection) => self.emit(Effect::ConnectionCreated {
                connection,
                source,
                target,
            }),
            Err(err) => log::debug!("connection ignored: {err}"),
        }
    }

    fn double_click(&mut self, target: ElementId) -> BoardResult<()> {
        if !self.scene.contains(target) {
            return Err(BoardError::UnknownElement(target));
        }
        let Some(container) = closest(&*self.scene, target, Marker::NodeContainer) else {
            log::trace!("double-click outside any node");
            return Ok(());
        };
        let Some(node) = self.nodes.node_for_element(container) else {
            log::warn!("node container {container:?} is unknown to the node lifecycle");
            return Ok(());
        };
        let Some(field) = self.scene.query_descendant(container, Marker::Description) else {
            log::debug!("node {node} has no description field");
            return Ok(());
        };

        if self.nodes.active_node() != Some(node) {
            self.nodes.clear_active_selection(self.scene);
        }
        if !matches!(
            self.session.mode,
            GestureMode::Idle | GestureMode::EditingText { .. }
        ) {
            self.conclude();
        }

        if let Some(strip) = self.scene.query_descendant(container, Marker::DragDiv) {
            self.scene.add_marker(strip, Marker::Hidden);
        }
        self.scene.remove_attribute(field, Attribute::ReadOnly);
        self.scene.remove_attribute(field, Attribute::Disabled);
        self.scene.focus(field);
        self.enter(GestureMode::EditingText { node, field });
        Ok(())
    }

    fn drop_node(&mut self, at: Point, drop_effect: DropEffect, payload: &str) {
        if drop_effect != DropEffect::Move {
            log::debug!("drop ignored: effect {drop_effect:?} is not a move");
            return;
        }
        self.conclude();

        let position = self.session.viewport.screen_to_board(at);
        let container = self.session.container;
        let Some(node) = self
            .nodes
            .create_node(self.scene, container, position, payload)
        else {
            log::warn!("drop at ({:.1}, {:.1}) created no node", at.x, at.y);
            return;
        };
        let Some(created) = self.nodes.node(node) else {
            return;
        };
        let (element, placed) = (created.element, created.position);
        self.session.connections.register_node(node, element);
        self.emit(Effect::NodeCreated {
            node,
            element,
            x: placed.x,
            y: placed.y,
        });
    }

    /// Report a transform change and push a new scale to the connection
    /// graph.
    fn sync_viewport(&mut self, before: ViewportState) {
        let state = self.session.viewport.state();
        if state == before {
            return;
        }
        if state.scale != before.scale {
            self.session.connections.set_zoom(state.scale);
        }
        self.emit(Effect::ViewportChanged { state });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mb_core::Element;
    use pretty_assertions::assert_eq;

    fn board() -> (Board, ElementId) {
        let mut scene = Scene::new();
        let canvas = scene.add_element(scene.root(), Element::div()).unwrap();
        let mut board = Board::with_config(scene, BoardConfig::default()).unwrap();
        board.initialize(canvas, Size::new(800.0, 600.0)).unwrap();
        board.drain_effects();
        (board, canvas)
    }

    fn drop_node(board: &mut Board, x: f64, y: f64) -> NodeId {
        board.on_drop(x, y, DropEffect::Move, "<node/>").unwrap();
        board
            .drain_effects()
            .into_iter()
            .find_map(|e| match e {
                Effect::NodeCreated { node, .. } => Some(node),
                _ => None,
            })
            .unwrap()
    }

    fn part(board: &Board, node: NodeId, marker: Marker) -> ElementId {
        let container = board.nodes().node(node).unwrap().element;
        board.scene().query_descendant(container, marker).unwrap()
    }

    #[test]
    fn events_before_initialize_fail_fast() {
        let mut board = Board::with_config(Scene::new(), BoardConfig::default()).unwrap();
        let err = board.zoom_button(ZoomDirection::In).unwrap_err();
        assert!(matches!(
            err,
            BoardError::NotInitialized {
                operation: "zoomButton"
            }
        ));
        assert!(board.teardown().is_err());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = BoardConfig {
            min_scale: 2.0,
            max_scale: 1.0,
            ..BoardConfig::default()
        };
        assert!(matches!(
            Board::with_config(Scene::new(), config),
            Err(BoardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn initialize_twice_is_an_error() {
        let (mut board, canvas) = board();
        assert!(matches!(
            board.initialize(canvas, Size::ZERO),
            Err(BoardError::AlreadyInitialized)
        ));
    }

    #[test]
    fn resize_disables_dragging_globally_until_release() {
        let (mut board, _) = board();
        let node = drop_node(&mut board, 0.0, 0.0);
        let handle = part(&board, node, Marker::ResizeButton);

        board.on_pointer_down(190.0, 110.0, handle).unwrap();
        assert_eq!(board.mode().unwrap().resize_target(), Some(node));
        assert!(!board.connections().unwrap().elements_draggable());
        assert_eq!(board.nodes().active_node(), Some(node));

        board.on_pointer_move(250.0, 90.0, true).unwrap();
        let size = board.nodes().node(node).unwrap().size;
        assert_eq!(size, Size::new(260.0, 100.0));

        board.on_pointer_move(-500.0, -500.0, true).unwrap();
        assert_eq!(board.nodes().node(node).unwrap().size, Size::new(40.0, 40.0));

        board.on_pointer_up(0.0, 0.0, None).unwrap();
        assert!(board.connections().unwrap().elements_draggable());
        assert!(board.viewport().unwrap().is_enabled());
    }

    #[test]
    fn dragging_moves_node_in_board_space() {
        let (mut board, _) = board();
        board.zoom_button(ZoomDirection::Out).unwrap();
        let node = drop_node(&mut board, 400.0, 300.0);
        let start = board.nodes().node(node).unwrap().position;
        let body = part(&board, node, Marker::DragDiv);

        board.on_pointer_down(410.0, 310.0, body).unwrap();
        board.on_pointer_move(420.0, 310.0, true).unwrap();
        let scale = board.viewport_state().unwrap().scale;
        let moved = board.nodes().node(node).unwrap().position;
        assert!((moved.x - start.x - 10.0 / scale).abs() < 1e-9);
        assert_eq!(moved.y, start.y);
    }

    #[test]
    fn background_press_then_move_pans() {
        let (mut board, canvas) = board();
        board.on_pointer_down(10.0, 10.0, canvas).unwrap();
        assert_eq!(board.mode(), Some(GestureMode::Idle));

        board.on_pointer_move(30.0, 15.0, true).unwrap();
        board.on_pointer_move(50.0, 20.0, true).unwrap();
        let state = board.viewport_state().unwrap();
        assert_eq!((state.pan_x, state.pan_y), (20.0, 5.0));

        board.on_pointer_up(50.0, 20.0, Some(canvas)).unwrap();
        assert_eq!(board.viewport().unwrap().recorded(), state);
        assert_eq!(board.mode(), Some(GestureMode::Idle));
    }

    #[test]
    fn floating_link_follows_cursor_while_drawing() {
        let (mut board, _) = board();
        let node = drop_node(&mut board, 0.0, 0.0);
        let link = part(&board, node, Marker::LinkAction);

        assert!(board.floating_link().is_none());
        board.on_pointer_down(150.0, 60.0, link).unwrap();
        board.on_pointer_move(500.0, 60.0, true).unwrap();
        let geometry = board.floating_link().unwrap();
        assert_eq!(geometry.path.p3, Point::new(500.0, 60.0));

        board.on_pointer_up(500.0, 60.0, None).unwrap();
        assert!(board.floating_link().is_none());
        assert_eq!(board.connections().unwrap().connection_count(), 0);
    }

    #[test]
    fn effects_drain_as_json() {
        let (mut board, _) = board();
        board.zoom_button(ZoomDirection::In).unwrap();
        let json = board.drain_effects_json().unwrap();
        assert!(json.starts_with("[{\"type\":\"viewportChanged\""), "{json}");
        assert_eq!(board.drain_effects_json().unwrap(), "[]");
    }

    #[test]
    fn teardown_releases_the_session() {
        let (mut board, canvas) = board();
        board.teardown().unwrap();
        assert!(!board.scene().has_marker(canvas, Marker::CanvasRoot));
        assert!(matches!(
            board.on_pointer_down(0.0, 0.0, canvas),
            Err(BoardError::NotInitialized { .. })
        ));
        board.initialize(canvas, Size::new(800.0, 600.0)).unwrap();
        assert_eq!(board.mode(), Some(GestureMode::Idle));
    }
}
