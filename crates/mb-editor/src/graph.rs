//! Connection graph manager: the sole owner of connection existence.
//!
//! Nodes that take part in connections are registered with their scene
//! element; connections are directed edges of a `StableDiGraph` so edge
//! handles stay valid when other links are removed. Parallel links are
//! allowed, self-links are not.

use crate::error::ConnectError;
use mb_core::{ConnectionId, ConnectorStyle, ElementId, EndpointShape, Marker, NodeId, Rect, Scene};
use mb_render::{LinkGeometry, closest, floating_link, link_geometry};
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// A directed link between two nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub source: NodeId,
    pub target: NodeId,
    pub style: ConnectorStyle,
}

/// Which elements start and accept connection drags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selectors {
    pub source: Marker,
    pub target: Marker,
    pub style: ConnectorStyle,
}

#[derive(Debug, Clone)]
pub struct ConnectionGraph {
    graph: StableDiGraph<NodeId, ConnectorStyle>,
    index: HashMap<NodeId, NodeIndex>,
    /// Node container element → node, for resolving dropped connections.
    containers: HashMap<ElementId, NodeId>,
    selectors: Option<Selectors>,
    connector: ConnectorStyle,
    /// Global default: whether managed elements may be dragged.
    elements_draggable: bool,
    zoom: f64,
}

impl ConnectionGraph {
    pub fn new(connector: ConnectorStyle, elements_draggable: bool) -> Self {
        Self {
            graph: StableDiGraph::new(),
            index: HashMap::new(),
            containers: HashMap::new(),
            selectors: None,
            connector,
            elements_draggable,
            zoom: 1.0,
        }
    }

    /// Declare the source and target markers. Called once at initialization;
    /// a second call replaces the first.
    pub fn configure_selectors(&mut self, source: Marker, target: Marker, style: ConnectorStyle) {
        if self.selectors.is_some() {
            log::warn!("connection selectors configured twice, replacing");
        }
        self.selectors = Some(Selectors {
            source,
            target,
            style,
        });
    }

    /// Closest ancestor of `element` that accepts a dropped connection.
    pub fn target_element(&self, scene: &Scene, element: ElementId) -> Option<ElementId> {
        let selectors = self.selectors.as_ref()?;
        closest(scene, element, selectors.target)
    }

    /// Make `id`, rendered by the container `element`, available as a
    /// connection source and target.
    pub fn register_node(&mut self, id: NodeId, element: ElementId) {
        if self.index.contains_key(&id) {
            log::warn!("node {id} registered twice; keeping its connections");
            self.containers.retain(|_, node| *node != id);
        } else {
            let idx = self.graph.add_node(id);
            self.index.insert(id, idx);
        }
        self.containers.insert(element, id);
    }

    /// Forget a node together with every connection touching it.
    pub fn unregister_node(&mut self, id: NodeId) -> bool {
        self.containers.retain(|_, node| *node != id);
        match self.index.remove(&id) {
            Some(idx) => self.graph.remove_node(idx).is_some(),
            None => false,
        }
    }

    pub fn is_registered(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// The registered node rendered by `container`.
    pub fn node_for_element(&self, container: ElementId) -> Option<NodeId> {
        self.containers.get(&container).copied()
    }

    /// Commit a directed connection. Self-links are refused; duplicates are not.
    pub fn add_connection(
        &mut self,
        source: NodeId,
        target: NodeId,
    ) -> Result<ConnectionId, ConnectError> {
        if source == target {
            return Err(ConnectError::SelfLoop(source));
        }
        let from = *self
            .index
            .get(&source)
            .ok_or(ConnectError::UnregisteredNode(source))?;
        let to = *self
            .index
            .get(&target)
            .ok_or(ConnectError::UnregisteredNode(target))?;
        let edge = self.graph.add_edge(from, to, self.connector);
        log::debug!("connected {source} → {target}");
        Ok(ConnectionId::new(edge))
    }

    pub fn remove_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        let connection = self.connection(id)?;
        self.graph.remove_edge(id.edge());
        Some(connection)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<Connection> {
        let (from, to) = self.graph.edge_endpoints(id.edge())?;
        Some(Connection {
            id,
            source: self.graph[from],
            target: self.graph[to],
            style: *self.graph.edge_weight(id.edge())?,
        })
    }

    /// All connections in handle order.
    pub fn connections(&self) -> Vec<Connection> {
        let mut ids: Vec<ConnectionId> = self.graph.edge_indices().map(ConnectionId::new).collect();
        ids.sort();
        ids.into_iter().filter_map(|id| self.connection(id)).collect()
    }

    /// Connections running from `source` to `target` (direction matters).
    pub fn connections_between(&self, source: NodeId, target: NodeId) -> Vec<ConnectionId> {
        let (Some(&from), Some(&to)) = (self.index.get(&source), self.index.get(&target)) else {
            return Vec::new();
        };
        let mut ids: Vec<ConnectionId> = self
            .graph
            .edges_directed(from, Direction::Outgoing)
            .filter(|e| e.target() == to)
            .map(|e| ConnectionId::new(e.id()))
            .collect();
        ids.sort();
        ids
    }

    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn elements_draggable(&self) -> bool {
        self.elements_draggable
    }

    /// Flip the global drag switch. Returns true if it changed.
    pub fn set_elements_draggable(&mut self, draggable: bool) -> bool {
        let changed = self.elements_draggable != draggable;
        self.elements_draggable = draggable;
        changed
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Track the viewport scale so endpoint dots keep their on-screen size.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > 0.0 {
            self.zoom = zoom;
        }
    }

    /// `style` with its endpoint dots counter-scaled by the current zoom.
    fn decorated(&self, style: ConnectorStyle) -> ConnectorStyle {
        let mut style = style;
        let EndpointShape::Dot { radius } = style.endpoint.shape;
        style.endpoint.shape = EndpointShape::Dot {
            radius: radius / self.zoom,
        };
        style
    }

    /// Current geometry of a connection, from the nodes' present bounds.
    pub fn link_geometry(
        &self,
        id: ConnectionId,
        bounds_of: impl Fn(NodeId) -> Option<Rect>,
    ) -> Option<LinkGeometry> {
        let connection = self.connection(id)?;
        let source = bounds_of(connection.source)?;
        let target = bounds_of(connection.target)?;
        Some(link_geometry(source, target, &self.decorated(connection.style)))
    }

    /// Geometry of the link being dragged out of `source` toward `cursor`
    /// (board space), in the selector style.
    pub fn floating_link(&self, source: Rect, cursor: mb_core::Point) -> LinkGeometry {
        let style = self
            .selectors
            .map(|s| s.style)
            .unwrap_or(self.connector);
        floating_link(source, cursor, &self.decorated(style))
    }
}
