use serde::Serialize;

use crate::geometry::{
  layout::{positions, Layout, VERTEX_COUNT},
  Float, Point,
};
use crate::harmony::scale::ScaleKind;

/// How big the circle and its markers are relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutConfig {
  /// Circle radius as a fraction of the viewport's smaller side, when wider than tall.
  pub landscape_multiplier: Float,
  /// Circle radius as a fraction of the viewport's smaller side otherwise.
  pub portrait_multiplier: Float,
  /// Marker radius as a fraction of the viewport's smaller side.
  pub vertex_multiplier: Float,
}

impl LayoutConfig {
  pub const CHROMATIC: LayoutConfig = LayoutConfig {
    landscape_multiplier: 0.3,
    portrait_multiplier: 0.4,
    vertex_multiplier: 0.03,
  };

  pub const MAJOR: LayoutConfig = LayoutConfig {
    landscape_multiplier: 0.28,
    portrait_multiplier: 0.375,
    vertex_multiplier: 0.04,
  };

  /// Default sizing for a scene showing `kind`. Scales with fewer enabled notes
  /// get bigger markers.
  pub fn for_kind(kind: &ScaleKind) -> LayoutConfig {
    match kind {
      ScaleKind::Chromatic => LayoutConfig::CHROMATIC,
      ScaleKind::Major(_) | ScaleKind::NaturalMinor(_) => LayoutConfig::MAJOR,
    }
  }
}

impl Default for LayoutConfig {
  fn default() -> Self {
    LayoutConfig::CHROMATIC
  }
}

/// Concrete sizes for drawing one scene into a `width` x `height` viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneMetrics {
  pub width: Float,
  pub height: Float,
  pub radius: Float,
  pub vertex_radius: Float,
}

impl SceneMetrics {
  /// ```rust
  /// use chromatic_core::scene::metrics::{LayoutConfig, SceneMetrics};
  ///
  /// let m = SceneMetrics::for_viewport(1000.0, 500.0, &LayoutConfig::CHROMATIC);
  /// assert!((m.radius - 150.0).abs() < 1e-9);
  /// assert!((m.vertex_radius - 15.0).abs() < 1e-9);
  /// ```
  pub fn for_viewport(width: Float, height: Float, config: &LayoutConfig) -> SceneMetrics {
    let min_dim = width.min(height);
    let multiplier = if width > height {
      config.landscape_multiplier
    } else {
      config.portrait_multiplier
    };
    SceneMetrics {
      width,
      height,
      radius: min_dim * multiplier,
      vertex_radius: min_dim * config.vertex_multiplier,
    }
  }

  /// Middle of the viewport, in y-down canvas coordinates.
  pub fn center(&self) -> Point {
    Point::new(self.width / 2.0, self.height / 2.0)
  }

  pub fn layout(&self) -> Layout {
    positions(self.radius, self.vertex_radius, VERTEX_COUNT)
  }
}
