//! Helpers for describing scene geometry as SVG path data.

use super::{Float, Point};

/// Maps a y-up scene point onto a y-down SVG canvas whose scene origin sits at `center`.
pub fn to_canvas(center: Point, p: Point) -> Point {
  Point {
    x: center.x + p.x,
    y: center.y - p.y,
  }
}

/// Return a String describing an SVG move to the given point `p`.
pub fn move_to(p: Point) -> String {
  format!("M {}, {}", p.x, p.y)
}

/// Return a String describing an SVG line from the current point to the given point `p`.
pub fn line_to(p: Point) -> String {
  format!("L {}, {}", p.x, p.y)
}

/// Return the `d` attribute for a path through `points`, optionally closed.
///
/// ```rust
/// use chromatic_core::geometry::{Point, svg::polyline_path};
///
/// let d = polyline_path(&[Point::new(0.0, 0.0), Point::new(1.0, 2.0)], true);
/// assert_eq!(d, "M 0, 0 L 1, 2 Z");
/// ```
pub fn polyline_path(points: &[Point], closed: bool) -> String {
  let mut parts: Vec<String> = Vec::with_capacity(points.len() + 1);
  for (i, p) in points.iter().enumerate() {
    if i == 0 {
      parts.push(move_to(*p));
    } else {
      parts.push(line_to(*p));
    }
  }
  if closed && !parts.is_empty() {
    parts.push("Z".to_string());
  }
  parts.join(" ")
}

/// Rounds coordinates so rendered documents don't carry float noise like `1e-14`.
pub fn round_coord(v: Float) -> Float {
  let r = (v * 1000.0).round() / 1000.0;
  if r == 0.0 {
    0.0
  } else {
    r
  }
}

pub fn round_point(p: Point) -> Point {
  Point {
    x: round_coord(p.x),
    y: round_coord(p.y),
  }
}
