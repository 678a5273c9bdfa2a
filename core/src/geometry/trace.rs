//! Partially drawn lines and paths, for animating connections over time.
//!
//! Nothing here keeps a clock. Callers compute `progress` as elapsed / duration
//! and rebuild the partial geometry each frame.

use super::{Float, Point};

/// A single straight line that can be drawn partway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
  pub from: Point,
  pub to: Point,
}

impl Segment {
  pub fn new(from: Point, to: Point) -> Segment {
    Segment { from, to }
  }

  pub fn length(&self) -> Float {
    self.from.distance_to(self.to)
  }

  /// The end point of the visible part of the segment at `progress`, clamped to 0..=1.
  pub fn point_at(&self, progress: Float) -> Point {
    self.from.lerp(self.to, clamp_progress(progress))
  }
}

fn clamp_progress(progress: Float) -> Float {
  if progress.is_nan() {
    0.0
  } else {
    progress.clamp(0.0, 1.0)
  }
}

/// Returns the visible part of the polyline through `points` at `progress`.
///
/// Each segment takes an equal share of the animation regardless of its length.
/// At progress 0 only the first point is visible; at 1 the whole path is.
///
/// ```rust
/// use chromatic_core::geometry::{Point, trace::trace_path};
///
/// let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
/// assert_eq!(trace_path(&pts, 0.5), vec![Point::new(0.0, 0.0), Point::new(5.0, 0.0)]);
/// ```
pub fn trace_path(points: &[Point], progress: Float) -> Vec<Point> {
  if points.len() < 2 {
    return points.to_vec();
  }

  let segments = (points.len() - 1) as Float;
  let covered = clamp_progress(progress) * segments;
  let whole = covered.floor() as usize;

  let mut visible: Vec<Point> = points[..=whole].to_vec();
  let fraction = covered - whole as Float;
  if fraction > 0.0 && whole + 1 < points.len() {
    let segment = Segment::new(points[whole], points[whole + 1]);
    visible.push(segment.point_at(fraction));
  }
  visible
}
