//! Which vertices of the chromatic circle get connected by lines.
//!
//! Everything here works on vertex (slot) indices. Positions come from
//! [`layout`](super::layout), so connectivity can be recomputed independently of
//! the circle's size.

use serde::Serialize;

use crate::harmony::scale::Scale;

/// Step between connected vertices for the default "skip" pattern.
pub const DEFAULT_SKIP_STEP: i32 = 3;

/// A line between two vertices, identified by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
  pub from: usize,
  pub to: usize,
}

impl Edge {
  pub fn new(from: usize, to: usize) -> Edge {
    Edge { from, to }
  }
}

/// Connects each enabled slot to the next enabled slot (in index order), and
/// closes the cycle from the last enabled slot back to the first.
///
/// A scale with no enabled slots has no edges. A scale with a single enabled
/// slot yields one degenerate edge from that slot to itself.
///
/// ```rust
/// use chromatic_core::geometry::connectivity::{enabled_polygon_edges, Edge};
/// use chromatic_core::harmony::{PitchClass, scale::Scale};
///
/// let edges = enabled_polygon_edges(&Scale::major(PitchClass::C));
/// assert_eq!(edges.first(), Some(&Edge::new(0, 2)));
/// assert_eq!(edges.last(), Some(&Edge::new(11, 0)));
/// ```
pub fn enabled_polygon_edges(scale: &Scale) -> Vec<Edge> {
  let enabled = scale.enabled_indices();
  let n = enabled.len();
  (0..n)
    .map(|i| Edge::new(enabled[i], enabled[(i + 1) % n]))
    .collect()
}

/// Turns a path of vertex indices into the edges between consecutive entries.
pub fn edges_from_path(path: &[usize]) -> Vec<Edge> {
  path.windows(2).map(|w| Edge::new(w[0], w[1])).collect()
}

fn gcd(a: usize, b: usize) -> usize {
  if b == 0 {
    a
  } else {
    gcd(b, a % b)
  }
}

fn normalize_step(step: i32, count: usize) -> usize {
  step.rem_euclid(count as i32) as usize
}

/// Number of distinct vertices visited by [`skip_connections`] for `step` on a
/// circle of `count` vertices.
pub fn cycle_length(step: i32, count: usize) -> usize {
  if count == 0 {
    return 0;
  }
  match normalize_step(step, count) {
    0 => 1,
    s => count / gcd(s, count),
  }
}

/// Starting from `start`, repeatedly advances by `step` vertices (modulo `count`)
/// until it lands back on the start, and returns the visited indices with the
/// start appended again to close the path.
///
/// `start` is taken modulo `count`, and negative steps walk counter-clockwise.
/// A step that is a multiple of `count` (including 0) never leaves the start, and
/// returns the degenerate single-point cycle `[start]`.
///
/// ```rust
/// use chromatic_core::geometry::connectivity::skip_connections;
///
/// assert_eq!(skip_connections(0, 3, 12), vec![0, 3, 6, 9, 0]);
/// assert_eq!(skip_connections(2, 0, 12), vec![2]);
/// ```
pub fn skip_connections(start: usize, step: i32, count: usize) -> Vec<usize> {
  if count == 0 {
    return vec![];
  }

  let start = start % count;
  let step = normalize_step(step, count);
  if step == 0 {
    return vec![start];
  }

  let mut path = Vec::with_capacity(cycle_length(step as i32, count) + 1);
  let mut current = start;
  loop {
    path.push(current);
    current = (current + step) % count;
    if current == start {
      break;
    }
  }
  path.push(start);
  path
}

/// Splits all `count` vertices into the disjoint cycles traced by `step`,
/// each closed like the output of [`skip_connections`]. There are
/// `gcd(step, count)` of them, each starting at its lowest index.
pub fn skip_cycles(step: i32, count: usize) -> Vec<Vec<usize>> {
  let mut visited = vec![false; count];
  let mut cycles = vec![];
  for start in 0..count {
    if visited[start] {
      continue;
    }
    let cycle = skip_connections(start, step, count);
    for i in cycle.iter() {
      visited[*i] = true;
    }
    cycles.push(cycle);
  }
  cycles
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::{
    cycle_length, edges_from_path, enabled_polygon_edges, skip_connections, skip_cycles, Edge,
  };
  use crate::harmony::{
    scale::{Scale, ScaleSlot},
    PitchClass,
  };

  fn scale_with(enabled: &[usize]) -> Scale {
    let slots = Scale::chromatic()
      .iter()
      .enumerate()
      .map(|(i, s)| ScaleSlot::new(s.note, enabled.contains(&i)))
      .collect();
    Scale::new(slots).unwrap()
  }

  #[test]
  fn no_enabled_slots_means_no_edges() {
    assert!(enabled_polygon_edges(&scale_with(&[])).is_empty());
  }

  #[test]
  fn single_enabled_slot_is_degenerate() {
    assert_eq!(enabled_polygon_edges(&scale_with(&[5])), vec![Edge::new(5, 5)]);
  }

  #[test]
  fn chromatic_polygon_is_one_closed_cycle() {
    let edges = enabled_polygon_edges(&Scale::chromatic());
    assert_eq!(edges.len(), 12);
    for (i, e) in edges.iter().enumerate() {
      assert_eq!(e.from, i);
      assert_eq!(e.to, (i + 1) % 12);
    }
    let froms: HashSet<usize> = edges.iter().map(|e| e.from).collect();
    assert_eq!(froms.len(), 12);
  }

  #[test]
  fn major_polygon_skips_disabled_slots() {
    let edges = enabled_polygon_edges(&Scale::major(PitchClass::C));
    let expected: Vec<Edge> = [(0, 2), (2, 4), (4, 5), (5, 7), (7, 9), (9, 11), (11, 0)]
      .iter()
      .map(|(a, b)| Edge::new(*a, *b))
      .collect();
    assert_eq!(edges, expected);
  }

  #[test]
  fn edges_are_stable_across_recomputation() {
    let scale = Scale::major(PitchClass::A);
    assert_eq!(enabled_polygon_edges(&scale), enabled_polygon_edges(&scale));
  }

  #[test]
  fn skip_by_three() {
    let path = skip_connections(0, 3, 12);
    assert_eq!(path, vec![0, 3, 6, 9, 0]);
    let unique: HashSet<usize> = path.iter().copied().collect();
    assert_eq!(unique.len(), 4);
  }

  #[test]
  fn skip_by_five_visits_every_vertex() {
    let path = skip_connections(0, 5, 12);
    assert_eq!(path.len(), 13);
    assert_eq!(path.first(), Some(&0));
    assert_eq!(path.last(), Some(&0));
    let unique: HashSet<usize> = path.iter().copied().collect();
    assert_eq!(unique.len(), 12);
    assert_eq!(&path[..4], &[0, 5, 10, 3]);
  }

  #[test]
  fn skip_with_degenerate_steps() {
    assert_eq!(skip_connections(4, 0, 12), vec![4]);
    assert_eq!(skip_connections(4, 12, 12), vec![4]);
    assert_eq!(skip_connections(4, -24, 12), vec![4]);
    assert!(skip_connections(0, 3, 0).is_empty());
  }

  #[test]
  fn negative_steps_walk_backwards() {
    assert_eq!(skip_connections(0, -3, 12), vec![0, 9, 6, 3, 0]);
    assert_eq!(skip_connections(1, -1, 4), vec![1, 0, 3, 2, 1]);
  }

  #[test]
  fn start_is_normalized() {
    assert_eq!(skip_connections(14, 4, 12), vec![2, 6, 10, 2]);
  }

  #[test]
  fn cycle_lengths() {
    assert_eq!(cycle_length(3, 12), 4);
    assert_eq!(cycle_length(4, 12), 3);
    assert_eq!(cycle_length(5, 12), 12);
    assert_eq!(cycle_length(6, 12), 2);
    assert_eq!(cycle_length(0, 12), 1);
    assert_eq!(cycle_length(-3, 12), 4);
    assert_eq!(cycle_length(3, 0), 0);
  }

  #[test]
  fn skip_cycles_partition_the_circle() {
    let cycles = skip_cycles(3, 12);
    assert_eq!(
      cycles,
      vec![vec![0, 3, 6, 9, 0], vec![1, 4, 7, 10, 1], vec![2, 5, 8, 11, 2]]
    );

    assert_eq!(skip_cycles(4, 12).len(), 4);
    assert_eq!(skip_cycles(7, 12).len(), 1);
    assert_eq!(skip_cycles(0, 12).len(), 12);
  }

  #[test]
  fn path_edges() {
    assert_eq!(
      edges_from_path(&[0, 3, 6, 9, 0]),
      vec![
        Edge::new(0, 3),
        Edge::new(3, 6),
        Edge::new(6, 9),
        Edge::new(9, 0)
      ]
    );
    assert!(edges_from_path(&[4]).is_empty());
  }
}
