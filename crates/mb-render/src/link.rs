//! Connector geometry.
//!
//! Links are recomputed from the current node bounds every time they are
//! asked for, so moving or resizing a node moves its links with it.

use kurbo::{Circle, CubicBez, Point, Rect, Vec2};
use mb_core::{AnchorKind, ConnectorKind, ConnectorStyle, EndpointShape};

/// Where a link meets a node, and the outward direction of that face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub point: Point,
    pub normal: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkGeometry {
    pub path: CubicBez,
    pub source_dot: Circle,
    pub target_dot: Circle,
    pub stroke_width: f64,
}

fn unit(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len > f64::EPSILON { v / len } else { Vec2::ZERO }
}

/// Anchor on `bounds` facing `toward`.
///
/// `Continuous` picks the midpoint of whichever face looks at `toward`
/// (compared relative to the box's aspect), `Center` uses the center.
pub fn anchor(bounds: Rect, toward: Point, kind: AnchorKind) -> Anchor {
    let center = bounds.center();
    let d = toward - center;
    match kind {
        AnchorKind::Center => Anchor {
            point: center,
            normal: unit(d),
        },
        AnchorKind::Continuous => {
            let horizontal = d.x.abs() * bounds.height() >= d.y.abs() * bounds.width();
            if horizontal {
                let (x, nx) = if d.x >= 0.0 {
                    (bounds.x1, 1.0)
                } else {
                    (bounds.x0, -1.0)
                };
                Anchor {
                    point: Point::new(x, center.y),
                    normal: Vec2::new(nx, 0.0),
                }
            } else {
                let (y, ny) = if d.y >= 0.0 {
                    (bounds.y1, 1.0)
                } else {
                    (bounds.y0, -1.0)
                };
                Anchor {
                    point: Point::new(center.x, y),
                    normal: Vec2::new(0.0, ny),
                }
            }
        }
    }
}

fn curve(from: Anchor, to: Anchor, kind: ConnectorKind) -> CubicBez {
    match kind {
        ConnectorKind::Straight => CubicBez::new(
            from.point,
            from.point.lerp(to.point, 1.0 / 3.0),
            from.point.lerp(to.point, 2.0 / 3.0),
            to.point,
        ),
        ConnectorKind::Bezier { curviness } => {
            // Short links would loop back on themselves with the full offset.
            let reach = curviness.min(from.point.distance(to.point) / 2.0);
            CubicBez::new(
                from.point,
                from.point + from.normal * reach,
                to.point + to.normal * reach,
                to.point,
            )
        }
    }
}

fn dot(at: Point, style: &ConnectorStyle) -> Circle {
    let EndpointShape::Dot { radius } = style.endpoint.shape;
    Circle::new(at, radius)
}

/// Geometry of a committed link between two node rectangles.
pub fn link_geometry(source: Rect, target: Rect, style: &ConnectorStyle) -> LinkGeometry {
    let from = anchor(source, target.center(), style.anchor);
    let to = anchor(target, source.center(), style.anchor);
    LinkGeometry {
        path: curve(from, to, style.connector),
        source_dot: dot(from.point, style),
        target_dot: dot(to.point, style),
        stroke_width: style.stroke_width,
    }
}

/// Geometry of a link still being drawn: its loose end follows the cursor.
pub fn floating_link(source: Rect, cursor: Point, style: &ConnectorStyle) -> LinkGeometry {
    let from = anchor(source, cursor, style.anchor);
    let to = Anchor {
        point: cursor,
        normal: unit(from.point - cursor),
    };
    LinkGeometry {
        path: curve(from, to, style.connector),
        source_dot: dot(from.point, style),
        target_dot: dot(cursor, style),
        stroke_width: style.stroke_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn continuous_anchor_faces_the_other_node() {
        let node = Rect::new(0.0, 0.0, 100.0, 50.0);
        let right = anchor(node, Point::new(400.0, 30.0), AnchorKind::Continuous);
        assert_eq!(right.point, Point::new(100.0, 25.0));
        assert_eq!(right.normal, Vec2::new(1.0, 0.0));

        let below = anchor(node, Point::new(60.0, 500.0), AnchorKind::Continuous);
        assert_eq!(below.point, Point::new(50.0, 50.0));

        let left = anchor(node, Point::new(-300.0, 0.0), AnchorKind::Continuous);
        assert_eq!(left.point, Point::new(0.0, 25.0));
    }

    #[test]
    fn link_follows_node_position() {
        let style = ConnectorStyle::committed();
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(300.0, 0.0, 400.0, 100.0);
        let before = link_geometry(a, b, &style);
        assert_eq!(before.path.p0, Point::new(100.0, 50.0));
        assert_eq!(before.path.p3, Point::new(300.0, 50.0));

        let moved = b + Vec2::new(0.0, 400.0);
        let after = link_geometry(a, moved, &style);
        assert_eq!(after.path.p0, Point::new(50.0, 100.0));
        assert_eq!(after.path.p3, Point::new(350.0, 400.0));
        assert_eq!(after.target_dot.center, after.path.p3);
    }

    #[test]
    fn short_links_limit_control_reach() {
        let style = ConnectorStyle::committed();
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(30.0, 0.0, 40.0, 10.0);
        let link = link_geometry(a, b, &style);
        // Anchors are 20 apart, so control points sit 10 out from each face.
        assert_eq!(link.path.p1, Point::new(20.0, 5.0));
        assert_eq!(link.path.p2, Point::new(20.0, 5.0));
    }

    #[test]
    fn floating_end_sits_on_cursor() {
        let style = ConnectorStyle::selector();
        let source = Rect::new(0.0, 0.0, 100.0, 100.0);
        let cursor = Point::new(250.0, 40.0);
        let link = floating_link(source, cursor, &style);
        assert_eq!(link.path.p3, cursor);
        assert_eq!(link.target_dot.center, cursor);
        assert_eq!(link.stroke_width, 2.0);
    }
}
