//! Points, angles and the radial geometry of the chromatic circle.
//!
//! Coordinates are in a y-up system centered on the circle, so `(0, r)` is the
//! top of a circle of radius `r`. Renderers with a y-down canvas (SVG, most
//! screen APIs) flip the y axis when drawing.

pub mod connectivity;
pub mod layout;
pub mod svg;
pub mod trace;

use serde::Serialize;

/// Just a typedef for the floating point type used for coordinates, etc.
/// This only exists to make it a bit easier to change to f32 if that's ever
/// needed.
pub type Float = f64;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
  pub x: Float,
  pub y: Float,
}

impl Point {
  pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

  pub fn new(x: Float, y: Float) -> Point {
    Point { x, y }
  }

  pub fn distance_to(&self, other: Point) -> Float {
    (other.x - self.x).hypot(other.y - self.y)
  }

  /// Linear interpolation from `self` (t = 0) towards `other` (t = 1).
  pub fn lerp(&self, other: Point, t: Float) -> Point {
    Point {
      x: self.x + (other.x - self.x) * t,
      y: self.y + (other.y - self.y) * t,
    }
  }

  pub fn offset(&self, dx: Float, dy: Float) -> Point {
    Point {
      x: self.x + dx,
      y: self.y + dy,
    }
  }
}

impl From<(Float, Float)> for Point {
  fn from(p: (Float, Float)) -> Self {
    Point { x: p.0, y: p.1 }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Angle {
  Degrees(Float),
  Radians(Float),
}

impl From<Float> for Angle {
  fn from(f: Float) -> Self {
    Angle::Degrees(f)
  }
}

impl Angle {
  pub fn as_degrees(&self) -> Float {
    match self {
      Angle::Degrees(d) => *d,
      Angle::Radians(r) => r.to_degrees(),
    }
  }

  pub fn as_radians(&self) -> Float {
    match self {
      Angle::Degrees(d) => d.to_radians(),
      Angle::Radians(r) => *r,
    }
  }
}

/// Convert polar coordinates in the form of (center, radius, angle) to
/// Cartesian (x,y) coordinates. Angles are measured counter-clockwise from
/// the positive x axis.
pub fn polar_to_cartesian(center: Point, radius: Float, angle: Angle) -> Point {
  let a = angle.as_radians();
  Point {
    x: center.x + (radius * a.cos()),
    y: center.y + (radius * a.sin()),
  }
}

#[cfg(test)]
pub(crate) fn assert_close(actual: Point, expected: Point) {
  let eps = 1e-9;
  assert!(
    (actual.x - expected.x).abs() < eps && (actual.y - expected.y).abs() < eps,
    "expected {expected:?}, got {actual:?}"
  );
}
