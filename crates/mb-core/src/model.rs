//! Board data model: nodes and the visual style of connectors.
//!
//! Connection *existence* is owned by the editor's connection graph; this
//! module only describes what a node is and how a link is painted.

use crate::id::{ElementId, NodeId};
use kurbo::{Point, Rect, Size};
use serde::Serialize;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn hex_pair(hi: u8, lo: u8) -> Option<f32> {
    Some((hex_val(hi)? << 4 | hex_val(lo)?) as f32 / 255.0)
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let b = hex.as_bytes();
        match b.len() {
            3 => {
                let short = |c: u8| hex_val(c).map(|v| (v * 17) as f32 / 255.0);
                Some(Self::rgba(short(b[0])?, short(b[1])?, short(b[2])?, 1.0))
            }
            6 => Some(Self::rgba(
                hex_pair(b[0], b[1])?,
                hex_pair(b[2], b[3])?,
                hex_pair(b[4], b[5])?,
                1.0,
            )),
            8 => Some(Self::rgba(
                hex_pair(b[0], b[1])?,
                hex_pair(b[2], b[3])?,
                hex_pair(b[4], b[5])?,
                hex_pair(b[6], b[7])?,
            )),
            _ => None,
        }
    }

    /// `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (byte(self.r), byte(self.g), byte(self.b), byte(self.a));
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

/// `#030303`, the ink used for endpoint dots and selector connectors.
pub const INK: Color = Color::rgba(3.0 / 255.0, 3.0 / 255.0, 3.0 / 255.0, 1.0);

// ─── Connector style ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConnectorKind {
    /// Cubic curve; `curviness` is the control-point distance from each anchor.
    Bezier { curviness: f64 },
    Straight,
}

/// Where a link attaches to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorKind {
    /// Re-picks the face of the node closest to the other end on every layout.
    Continuous,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum EndpointShape {
    Dot { radius: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointStyle {
    pub shape: EndpointShape,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
}

impl Default for EndpointStyle {
    fn default() -> Self {
        Self {
            shape: EndpointShape::Dot { radius: 5.0 },
            fill: INK,
            stroke: INK,
            stroke_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorStyle {
    pub connector: ConnectorKind,
    pub stroke: Color,
    pub stroke_width: f64,
    pub anchor: AnchorKind,
    pub endpoint: EndpointStyle,
}

impl ConnectorStyle {
    /// Style of a committed connection: black bezier, continuous anchors,
    /// small ink dots at both ends.
    pub fn committed() -> Self {
        Self {
            connector: ConnectorKind::Bezier { curviness: 150.0 },
            stroke: Color::BLACK,
            stroke_width: 1.0,
            anchor: AnchorKind::Continuous,
            endpoint: EndpointStyle::default(),
        }
    }

    /// Style declared for link-affordance sources and node targets.
    pub fn selector() -> Self {
        Self {
            connector: ConnectorKind::Bezier { curviness: 150.0 },
            stroke: INK,
            stroke_width: 2.0,
            anchor: AnchorKind::Continuous,
            endpoint: EndpointStyle::default(),
        }
    }
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self::committed()
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// A node on the board. `element` is the node container in the scene,
/// shared between the node store and the connection graph.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardNode {
    pub id: NodeId,
    pub element: ElementId,
    /// Top-left corner in board space.
    pub position: Point,
    pub size: Size,
    /// Template payload the node was dropped with.
    pub template: String,
}

impl BoardNode {
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}
