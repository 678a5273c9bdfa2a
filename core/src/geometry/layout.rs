use std::f64::consts::{FRAC_PI_2, PI};

use super::{polar_to_cartesian, Angle, Float, Point};

/// Number of vertices on the chromatic circle.
pub const VERTEX_COUNT: usize = 12;

/// Pitch-class labels sit this many marker radii outside their vertex.
pub const LABEL_OFFSET_MULTIPLIER: Float = 1.85;

/// Vertex and label positions for one circle, indexed the same way as scale slots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
  pub vertices: Vec<Point>,
  pub labels: Vec<Point>,
}

impl Layout {
  pub fn len(&self) -> usize {
    self.vertices.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  pub fn vertex(&self, index: usize) -> Option<Point> {
    self.vertices.get(index).copied()
  }

  pub fn label(&self, index: usize) -> Option<Point> {
    self.labels.get(index).copied()
  }
}

/// The angle of vertex `index`: the first vertex is at 12 o'clock and the rest
/// follow clockwise at equal steps.
pub fn vertex_angle(index: usize, count: usize) -> Angle {
  let angle_step = 2.0 * PI / count as Float;
  Angle::Radians(FRAC_PI_2 - (index as Float) * angle_step)
}

/// Places `count` vertices evenly around a circle of `radius` centered on the origin,
/// starting at the top and proceeding clockwise.
///
/// Each label position lies on the same ray as its vertex, pushed out by
/// `vertex_radius * LABEL_OFFSET_MULTIPLIER`, so labels sit just outside the markers.
///
/// ```rust
/// use chromatic_core::geometry::layout::positions;
///
/// let layout = positions(100.0, 10.0, 12);
/// let top = layout.vertices[0];
/// assert!(top.x.abs() < 1e-9 && (top.y - 100.0).abs() < 1e-9);
/// ```
pub fn positions(radius: Float, vertex_radius: Float, count: usize) -> Layout {
  let label_offset = vertex_radius * LABEL_OFFSET_MULTIPLIER;
  let mut vertices = Vec::with_capacity(count);
  let mut labels = Vec::with_capacity(count);

  for i in 0..count {
    let angle = vertex_angle(i, count);
    let vertex = polar_to_cartesian(Point::ORIGIN, radius, angle);
    labels.push(polar_to_cartesian(vertex, label_offset, angle));
    vertices.push(vertex);
  }

  Layout { vertices, labels }
}

/// Returns the index of the vertex whose marker contains `point`, if any.
pub fn hit_test(layout: &Layout, vertex_radius: Float, point: Point) -> Option<usize> {
  layout
    .vertices
    .iter()
    .position(|v| v.distance_to(point) <= vertex_radius)
}

#[cfg(test)]
mod tests {
  use super::{hit_test, positions, vertex_angle, LABEL_OFFSET_MULTIPLIER, VERTEX_COUNT};
  use crate::geometry::{assert_close, Point};

  #[test]
  fn first_vertex_is_at_the_top() {
    let layout = positions(100.0, 10.0, VERTEX_COUNT);
    assert_eq!(layout.len(), 12);
    assert_close(layout.vertices[0], Point::new(0.0, 100.0));
  }

  #[test]
  fn vertices_proceed_clockwise() {
    let layout = positions(100.0, 10.0, VERTEX_COUNT);
    assert!(layout.vertices[1].x > 0.0);
    assert!(layout.vertices[1].y > 0.0);
    assert_close(layout.vertices[3], Point::new(100.0, 0.0));
    assert_close(layout.vertices[6], Point::new(0.0, -100.0));
    assert_close(layout.vertices[9], Point::new(-100.0, 0.0));
  }

  #[test]
  fn vertices_are_thirty_degrees_apart() {
    let layout = positions(100.0, 10.0, VERTEX_COUNT);
    for i in 0..VERTEX_COUNT {
      let a = layout.vertices[i];
      let b = layout.vertices[(i + 1) % VERTEX_COUNT];
      let step = a.y.atan2(a.x) - b.y.atan2(b.x);
      let step = step.to_degrees().rem_euclid(360.0);
      assert!((step - 30.0).abs() < 1e-9, "step {i} was {step}");
      assert!((a.distance_to(Point::ORIGIN) - 100.0).abs() < 1e-9);
    }
    assert!((vertex_angle(1, 12).as_degrees() - 60.0).abs() < 1e-9);
  }

  #[test]
  fn labels_sit_outside_their_vertex() {
    let layout = positions(100.0, 10.0, VERTEX_COUNT);
    let offset = 10.0 * LABEL_OFFSET_MULTIPLIER;
    assert_close(layout.labels[0], Point::new(0.0, 100.0 + offset));
    assert_close(layout.labels[3], Point::new(100.0 + offset, 0.0));
    for (v, l) in layout.vertices.iter().zip(layout.labels.iter()) {
      assert!((v.distance_to(*l) - offset).abs() < 1e-9);
    }
  }

  #[test]
  fn recomputing_is_idempotent() {
    assert_eq!(positions(42.5, 3.0, 12), positions(42.5, 3.0, 12));
  }

  #[test]
  fn empty_layout() {
    let layout = positions(100.0, 10.0, 0);
    assert!(layout.is_empty());
    assert!(layout.labels.is_empty());
  }

  #[test]
  fn hit_testing() {
    let layout = positions(100.0, 10.0, VERTEX_COUNT);
    assert_eq!(hit_test(&layout, 10.0, Point::new(2.0, 97.0)), Some(0));
    assert_eq!(hit_test(&layout, 10.0, Point::new(99.0, 1.0)), Some(3));
    assert_eq!(hit_test(&layout, 10.0, Point::ORIGIN), None);
  }
}
