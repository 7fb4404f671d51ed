//! Link routing
//!
//! A link path strategy computes two descriptors for a link:
//! - the *draw* path, stored on the link (line plus optional arrowhead)
//! - the *text* path, returned to the caller, always running left to right
//!   so a title laid along it never reads upside down
//!
//! Routing writes `link.path` and `link.reversed`.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::graph::{Link, Node};
use crate::types::{Angle, EPSILON, Point};

use super::defaults;
use super::path_data::PathData;

/// Common behavior for all link path strategies
#[enum_dispatch]
pub trait LinkPath {
    /// Route `link` between `source` and `target` (the same node for a
    /// reflexive link). Stores the draw path and reading direction on the
    /// link and returns the text path.
    fn path(&self, link: &mut Link, source: &Node, target: &Node) -> PathData;
}

/// Link path variants. Serialized with a `class` tag.
#[enum_dispatch(LinkPath)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class")]
pub enum PathKind {
    Line(Line),
}

impl Default for PathKind {
    fn default() -> Self {
        PathKind::Line(Line::default())
    }
}

/// Straight segment between the two node outlines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Line {
    /// Where a self-loop leaves the node
    pub loop_start: Angle,
    /// Where a self-loop comes back
    pub loop_end: Angle,
    pub arrow: bool,
    pub arrow_length: f64,
    /// Half-opening of the arrowhead
    pub arrow_angle: Angle,
}

impl Default for Line {
    fn default() -> Self {
        Line {
            loop_start: Angle::degrees(defaults::LOOP_START),
            loop_end: Angle::degrees(defaults::LOOP_END),
            arrow: false,
            arrow_length: defaults::ARROW_LENGTH,
            arrow_angle: Angle::degrees(defaults::ARROW_ANGLE),
        }
    }
}

impl Line {
    pub fn with_arrow(mut self) -> Self {
        self.arrow = true;
        self
    }

    /// Arrow length, falling back to the default for non-positive values.
    fn arrow_length(&self) -> f64 {
        if self.arrow_length.is_finite() && self.arrow_length > 0.0 {
            self.arrow_length
        } else {
            defaults::ARROW_LENGTH
        }
    }

    /// Filled triangle with its tip on `dst`, pointing away from `src`.
    fn arrow_head(&self, src: Point, dst: Point) -> PathData {
        let length = self.arrow_length();
        let back = src.sub(dst).normalize();
        let b = back.rotate(&self.arrow_angle).mul(length).add(dst);
        let c = back.rotate(&-self.arrow_angle).mul(length).add(dst);
        PathData::new().move_to(dst).line_to(b).line_to(c).z()
    }

    /// Elliptical arc between two boundary points of the node.
    fn self_loop(&self, link: &mut Link, node: &Node) -> PathData {
        let src = node.point_at(&self.loop_start);
        let dst = node.point_at(&self.loop_end);
        let (rx, ry) = (node.width / 2.0, node.height / 2.0);

        let path = PathData::new()
            .move_to(src)
            .a(rx, ry, 0.0, true, false, dst.x, dst.y);
        link.reversed = false;
        link.path = path.clone();
        path
    }
}

impl LinkPath for Line {
    fn path(&self, link: &mut Link, source: &Node, target: &Node) -> PathData {
        if link.is_reflexive() {
            return self.self_loop(link, source);
        }

        let src = source.intersect(target).unwrap_or_else(|| source.center());
        let dst = target.intersect(source).unwrap_or_else(|| target.center());

        let mut draw = if self.arrow {
            // Stop the line at the arrowhead's base.
            let d = dst.sub(src);
            let l = d.length();
            let tip = self.arrow_length() * self.arrow_angle.cos();
            let end = if l > EPSILON {
                d.mul(1.0 - tip / l).add(src)
            } else {
                dst
            };
            PathData::new().move_to(src).line_to(end)
        } else {
            PathData::new().move_to(src).line_to(dst)
        };
        if self.arrow {
            draw = draw.append(self.arrow_head(src, dst));
        }
        link.path = draw;

        link.reversed = src.x > dst.x;
        let (from, to) = if link.reversed { (dst, src) } else { (src, dst) };
        PathData::new().move_to(from).line_to(to)
    }
}
