//! Node shapes
//!
//! Each shape knows how to:
//! - Produce its outline, relative to the node center
//! - Find the boundary point in a given direction
//! - Clip a link toward another node
//! - Resize a node so its title fits inside
//!
//! Shapes carry only their own parameters; the node's position and size are
//! passed in. Fitting a title writes `width`, `height` and `text_size` on the
//! node it is given.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::graph::Node;
use crate::types::{Angle, EPSILON, Point, Size};

use super::defaults;
use super::path_data::PathData;
use super::text::{ContainerSize, TextMetrics};

/// Common behavior for all node shapes
#[enum_dispatch]
pub trait NodeShape {
    /// Outline centered on the origin (the renderer translates to the node).
    fn path(&self, node: &Node) -> PathData;

    /// Boundary point in direction `angle` from the node center.
    fn get_point(&self, node: &Node, angle: &Angle) -> Point;

    /// Where a straight link from this node's center toward `other`'s center
    /// leaves the outline. `None` when the centers coincide or the result is
    /// not finite.
    fn intersect(&self, node: &Node, other: &Node) -> Option<Point> {
        let dx = other.x - node.x;
        let dy = other.y - node.y;
        if dx.abs() < EPSILON && dy.abs() < EPSILON {
            return None;
        }
        let p = self.get_point(node, &Angle::of_vector(dx, dy));
        p.is_finite().then_some(p)
    }

    /// Resize `node` to hold a title with the given constraints.
    fn resize_for_title(&self, node: &mut Node, size: &ContainerSize);
}

/// The shape variants a node can take. Serialized with a `class` tag.
#[enum_dispatch(NodeShape)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum Shape {
    Circle(Circle),
    Rect(Rect),
}

impl Default for Shape {
    fn default() -> Self {
        Shape::Circle(Circle::default())
    }
}

impl Shape {
    /// Resize `node` to fit its title, unless the title is unchanged since
    /// the last fit. Returns whether the node was refitted.
    ///
    /// The shape is taken by value so the node can be borrowed mutably.
    pub fn fit_title_inside(self, node: &mut Node, metrics: &dyn TextMetrics) -> bool {
        if node.prev_title.as_deref() == Some(node.title.as_str()) {
            return false;
        }
        let size = metrics.container_size(&node.title);
        self.resize_for_title(node, &size);
        node.prev_title = Some(node.title.clone());
        true
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Circle(_) => "Circle",
            Shape::Rect(_) => "Rect",
        }
    }
}

// ============================================================================
// Shape Types
// ============================================================================

/// An ellipse inscribed in the node's box (a circle for square nodes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Circle {}

impl NodeShape for Circle {
    fn path(&self, node: &Node) -> PathData {
        let rx = node.width / 2.0;
        let ry = node.height / 2.0;
        PathData::new()
            .m(-rx, 0.0)
            .rel_a(rx, ry, 0.0, true, false, node.width, 0.0)
            .rel_a(rx, ry, 0.0, true, false, -node.width, 0.0)
    }

    fn get_point(&self, node: &Node, angle: &Angle) -> Point {
        Point::new(
            node.x + node.width * angle.cos() * 0.5,
            node.y + node.height * angle.sin() * 0.5,
        )
    }

    /// Square node whose area holds twice the text area; the text box is the
    /// inscribed square.
    fn resize_for_title(&self, node: &mut Node, size: &ContainerSize) {
        let side = (size.min_area * 2.0)
            .sqrt()
            .ceil()
            .max(size.min_width)
            .max(size.min_height);
        node.width = side;
        node.height = side;
        let inner = (side / std::f64::consts::SQRT_2).ceil();
        node.text_size = Some(Size::new(inner, inner));
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Width / height ratio used when fitting a title
    #[serde(default = "default_aspect")]
    pub aspect: f64,
}

fn default_aspect() -> f64 {
    defaults::RECT_ASPECT
}

impl Rect {
    /// Non-positive or non-finite aspect ratios fall back to 1.
    pub fn new(aspect: f64) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            defaults::RECT_ASPECT
        };
        Rect { aspect }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Rect::new(defaults::RECT_ASPECT)
    }
}

impl NodeShape for Rect {
    fn path(&self, node: &Node) -> PathData {
        let (w, h) = (node.width, node.height);
        PathData::new()
            .m(-w / 2.0, -h / 2.0)
            .rel_l(w, 0.0)
            .rel_l(0.0, h)
            .rel_l(-w, 0.0)
            .z()
    }

    /// Cast a ray from the center: try the vertical edge first, then the
    /// horizontal one. A ray that hits neither yields the center.
    fn get_point(&self, node: &Node, angle: &Angle) -> Point {
        let hw = node.width / 2.0;
        let hh = node.height / 2.0;
        let (sin, cos) = (angle.sin(), angle.cos());
        let center = node.center();

        let edge_x = if cos > EPSILON {
            Some(hw)
        } else if cos < -EPSILON {
            Some(-hw)
        } else {
            None
        };
        if let Some(x) = edge_x {
            let y = x / cos * sin;
            if y < hh + EPSILON && y > -hh - EPSILON {
                return center.add(Point::new(x, y));
            }
        }

        let edge_y = if sin > EPSILON {
            Some(hh)
        } else if sin < -EPSILON {
            Some(-hh)
        } else {
            None
        };
        if let Some(y) = edge_y {
            let x = y / sin * cos;
            if x < hw + EPSILON && x > -hw - EPSILON {
                return center.add(Point::new(x, y));
            }
        }

        center
    }

    fn resize_for_title(&self, node: &mut Node, size: &ContainerSize) {
        let aspect = Rect::new(self.aspect).aspect;
        node.width = (aspect * size.min_area.sqrt()).ceil().max(size.min_width);
        node.height = size.min_height.max(node.width / aspect);
        node.text_size = Some(Size::new(node.width, node.height));
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::text::MonospaceMetrics;
    use crate::graph::NodeId;

    fn node(x: f64, y: f64, w: f64, h: f64, shape: Shape) -> Node {
        Node::new(NodeId(0), x, y, w, h).with_shape(shape)
    }

    fn circle(x: f64, y: f64, w: f64, h: f64) -> Node {
        node(x, y, w, h, Shape::Circle(Circle::default()))
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Node {
        node(x, y, w, h, Shape::Rect(Rect::default()))
    }

    fn on_rect_perimeter(n: &Node, p: Point) -> bool {
        let dx = (p.x - n.x).abs();
        let dy = (p.y - n.y).abs();
        let (hw, hh) = (n.width / 2.0, n.height / 2.0);
        let on_vertical = (dx - hw).abs() < 1e-6 && dy <= hh + 1e-6;
        let on_horizontal = (dy - hh).abs() < 1e-6 && dx <= hw + 1e-6;
        on_vertical || on_horizontal
    }

    #[test]
    fn circle_outline() {
        let n = circle(5.0, 5.0, 20.0, 10.0);
        assert_eq!(n.path().to_string(), "M-10,0a10,5,0,1,0,20,0a10,5,0,1,0,-20,0");
    }

    #[test]
    fn circle_points_on_ellipse() {
        let n = circle(0.0, 0.0, 20.0, 10.0);
        let east = n.point_at(&Angle::degrees(0.0));
        assert!(east.approx_eq(Point::new(10.0, 0.0), 1e-9));
        let south = n.point_at(&Angle::degrees(90.0));
        assert!(south.approx_eq(Point::new(0.0, 5.0), 1e-9));
        let west = n.point_at(&Angle::degrees(180.0));
        assert!(west.approx_eq(Point::new(-10.0, 0.0), 1e-9));
    }

    #[test]
    fn circle_intersect_toward_other_node() {
        let a = circle(0.0, 0.0, 20.0, 20.0);
        let b = circle(100.0, 0.0, 10.0, 10.0);
        let p = a.intersect(&b).unwrap();
        assert!(p.approx_eq(Point::new(10.0, 0.0), 1e-9));
        let q = b.intersect(&a).unwrap();
        assert!(q.approx_eq(Point::new(95.0, 0.0), 1e-9));
    }

    #[test]
    fn intersect_with_coincident_centers_is_none() {
        let a = circle(3.0, 3.0, 20.0, 20.0);
        let b = rect(3.0, 3.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), None);
        assert_eq!(b.intersect(&a), None);
    }

    #[test]
    fn rect_outline() {
        let n = rect(0.0, 0.0, 40.0, 20.0);
        assert_eq!(n.path().to_string(), "M-20,-10l40,0l0,20l-40,0Z");
    }

    #[test]
    fn rect_points_hit_edges() {
        let n = rect(10.0, 10.0, 40.0, 20.0);
        let east = n.point_at(&Angle::degrees(0.0));
        assert!(east.approx_eq(Point::new(30.0, 10.0), 1e-9));
        let south = n.point_at(&Angle::degrees(90.0));
        assert!(south.approx_eq(Point::new(10.0, 20.0), 1e-9));
        let corner = n.point_at(&Angle::of_vector(2.0, 1.0));
        assert!(corner.approx_eq(Point::new(30.0, 20.0), 1e-9));
    }

    #[test]
    fn rect_points_lie_on_perimeter() {
        let n = rect(-5.0, 7.0, 30.0, 12.0);
        for deg in (0..360).step_by(7) {
            let p = n.point_at(&Angle::degrees(deg as f64));
            assert!(on_rect_perimeter(&n, p), "{deg}° gave {p}");
        }
    }

    #[test]
    fn degenerate_rect_returns_center() {
        let n = rect(4.0, 2.0, 0.0, 0.0);
        let p = n.point_at(&Angle::degrees(33.0));
        assert_eq!(p, Point::new(4.0, 2.0));
    }

    #[test]
    fn circle_fit_title() {
        let metrics = MonospaceMetrics {
            char_width: 10.0,
            line_height: 40.0,
        };
        let mut n = circle(0.0, 0.0, 10.0, 10.0).with_title("hello");
        assert!(n.fit_title_inside(&metrics));
        // area 50*40 = 2000, sqrt(4000) = 63.2 -> 64
        assert_eq!((n.width, n.height), (64.0, 64.0));
        // 64 / sqrt(2) = 45.25 -> 46
        assert_eq!(n.text_size, Some(Size::new(46.0, 46.0)));
    }

    #[test]
    fn circle_fit_is_floored_at_min_width() {
        let metrics = MonospaceMetrics {
            char_width: 10.0,
            line_height: 1.0,
        };
        let mut n = circle(0.0, 0.0, 10.0, 10.0).with_title("abcdefghij");
        n.fit_title_inside(&metrics);
        // sqrt(2 * 100) = 14.1 -> 15, but the word is 100 wide
        assert_eq!(n.width, 100.0);
    }

    #[test]
    fn rect_fit_title() {
        let metrics = MonospaceMetrics {
            char_width: 10.0,
            line_height: 20.0,
        };
        let mut n = node(0.0, 0.0, 10.0, 10.0, Shape::Rect(Rect::new(2.0))).with_title("hello");
        n.fit_title_inside(&metrics);
        // 2 * sqrt(1000) = 63.2 -> 64; height = max(20, 32)
        assert_eq!((n.width, n.height), (64.0, 32.0));
        assert_eq!(n.text_size, Some(Size::new(64.0, 32.0)));
    }

    #[test]
    fn fit_is_memoized_on_title() {
        let metrics = MonospaceMetrics::default();
        let mut n = rect(0.0, 0.0, 10.0, 10.0).with_title("one");
        assert!(n.fit_title_inside(&metrics));
        n.width = 999.0;
        assert!(!n.fit_title_inside(&metrics));
        assert_eq!(n.width, 999.0);

        n.title = "two words".to_string();
        assert!(n.fit_title_inside(&metrics));
        assert_ne!(n.width, 999.0);
    }

    #[test]
    fn shape_class_tag_round_trips() {
        let json = serde_json::to_string(&Shape::Rect(Rect::new(1.5))).unwrap();
        assert_eq!(json, r#"{"class":"Rect","aspect":1.5}"#);
        let circle: Shape = serde_json::from_str(r#"{"class":"Circle"}"#).unwrap();
        assert_eq!(circle, Shape::Circle(Circle::default()));
        let rect: Shape = serde_json::from_str(r#"{"class":"Rect"}"#).unwrap();
        assert_eq!(rect, Shape::Rect(Rect::default()));
        assert!(serde_json::from_str::<Shape>(r#"{"class":"Hexagon"}"#).is_err());
    }
}
