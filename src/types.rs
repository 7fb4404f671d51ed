//! Vector primitives shared by every geometry computation.
//!
//! `Point` is a plain `Copy` value: every "mutating" operation consumes the
//! point and returns the updated one, so calls chain
//! (`a.sub(b).normalize().mul(k).add(c)`) and the caller's copy is never
//! aliased. `Angle` evaluates its sine and cosine exactly once.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

/// Lengths below this are treated as zero by `normalize` and the shape math.
pub const EPSILON: f64 = 1e-8;

/// 2D point / vector in world coordinates (Y grows downward, like SVG).
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn add(self, p: Point) -> Point {
        Point::new(self.x + p.x, self.y + p.y)
    }

    #[inline]
    pub fn sub(self, p: Point) -> Point {
        Point::new(self.x - p.x, self.y - p.y)
    }

    /// Scale both coordinates by `k`.
    #[inline]
    pub fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.to_dvec2().length()
    }

    /// Unit vector in the same direction. Vectors shorter than [`EPSILON`]
    /// are returned unchanged instead of dividing by (almost) zero.
    pub fn normalize(self) -> Point {
        let l = self.length();
        if l > EPSILON {
            Point::new(self.x / l, self.y / l)
        } else {
            self
        }
    }

    /// Rotate around the origin by `angle` (standard rotation matrix).
    pub fn rotate(self, angle: &Angle) -> Point {
        dvec2(angle.cos(), angle.sin()).rotate(self.to_dvec2()).into()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn to_dvec2(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    /// Distance-based comparison used by tests and degeneracy checks.
    pub fn approx_eq(self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() < eps && (self.y - other.y).abs() < eps
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        p.to_dvec2()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::add(self, rhs)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::sub(self, rhs)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::mul(self, rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An angle with its trigonometric values precomputed.
///
/// Immutable after construction. Serializes as degrees.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Angle {
    deg: f64,
    rad: f64,
    sin: f64,
    cos: f64,
}

impl Angle {
    /// Build from `value`, interpreted as radians when `is_radians` is set.
    /// Non-finite input is treated as zero.
    pub fn new(value: f64, is_radians: bool) -> Self {
        let value = if value.is_finite() { value } else { 0.0 };
        let (deg, rad) = if is_radians {
            (value.to_degrees(), value)
        } else {
            (value, value.to_radians())
        };
        let (sin, cos) = rad.sin_cos();
        Angle { deg, rad, sin, cos }
    }

    pub fn degrees(deg: f64) -> Self {
        Self::new(deg, false)
    }

    pub fn radians(rad: f64) -> Self {
        Self::new(rad, true)
    }

    /// Direction of the vector `(dx, dy)`.
    pub fn of_vector(dx: f64, dy: f64) -> Self {
        Self::radians(dy.atan2(dx))
    }

    #[inline]
    pub fn deg(&self) -> f64 {
        self.deg
    }

    #[inline]
    pub fn rad(&self) -> f64 {
        self.rad
    }

    #[inline]
    pub fn sin(&self) -> f64 {
        self.sin
    }

    #[inline]
    pub fn cos(&self) -> f64 {
        self.cos
    }
}

impl Default for Angle {
    fn default() -> Self {
        Angle::degrees(0.0)
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        self.deg == other.deg
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle {
            deg: -self.deg,
            rad: -self.rad,
            sin: -self.sin,
            cos: self.cos,
        }
    }
}

impl From<f64> for Angle {
    fn from(deg: f64) -> Self {
        Angle::degrees(deg)
    }
}

impl From<Angle> for f64 {
    fn from(angle: Angle) -> Self {
        angle.deg
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.deg)
    }
}

/// Width/height pair (text measurements, node extents).
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    pub fn area(self) -> f64 {
        self.width * self.height
    }
}
