//! Per-graph configuration
//!
//! Holds the default shape and path strategies (an entity whose strategy
//! equals these is exported without one), size defaults, bbox padding and
//! how coordinate-less nodes are placed.

use serde::{Deserialize, Serialize};

use crate::errors::SnapshotError;
use crate::geometry::{PathKind, Shape, defaults};
use crate::types::Point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphConfig {
    /// Directed graphs keep `a-b` and `b-a` as distinct links
    pub directed: bool,
    pub node: NodeOptions,
    pub link: LinkOptions,
    pub bbox_padding: f64,
    pub placement: Placement,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            directed: false,
            node: NodeOptions::default(),
            link: LinkOptions::default(),
            bbox_padding: defaults::BBOX_PADDING,
            placement: Placement::default(),
        }
    }
}

impl GraphConfig {
    /// Parse a possibly partial configuration; missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeOptions {
    /// Width/height for records without one
    pub default_size: f64,
    /// Floor for width/height
    pub min_size: f64,
    pub shape: Shape,
}

impl Default for NodeOptions {
    fn default() -> Self {
        NodeOptions {
            default_size: defaults::NODE_SIZE,
            min_size: defaults::NODE_MIN_SIZE,
            shape: Shape::default(),
        }
    }
}

impl NodeOptions {
    /// Missing, zero, negative or non-finite sizes take `default_size`; the
    /// result is floored at `min_size`.
    pub fn size(&self, requested: Option<f64>) -> f64 {
        let size = match requested {
            Some(s) if s.is_finite() && s > 0.0 => s,
            _ => self.default_size,
        };
        size.max(self.min_size)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkOptions {
    pub shape: PathKind,
}

/// Where nodes imported without coordinates go.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Placement {
    /// Everything at (0, 0)
    Origin,
    /// Golden-angle spiral around the origin, keyed on insertion ordinal
    Spiral { spacing: f64 },
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Spiral {
            spacing: defaults::SPIRAL_SPACING,
        }
    }
}

impl Placement {
    /// Position for the `ordinal`-th node (0-based).
    pub fn position(&self, ordinal: usize) -> Point {
        match *self {
            Placement::Origin => Point::ZERO,
            Placement::Spiral { spacing } => {
                let golden = std::f64::consts::PI * (3.0 - 5f64.sqrt());
                let n = ordinal as f64;
                let r = spacing * n.sqrt();
                let theta = n * golden;
                Point::new(r * theta.cos(), r * theta.sin())
            }
        }
    }
}
