//! Builds the chromatic circle as a flat list of draw commands.
//!
//! A scene is a pure function of a [Scale], a [SceneMetrics] and a list of
//! [Overlay]s. Rebuilding with the same inputs gives the same commands, so a
//! renderer can simply redraw everything whenever any input changes.
//!
//! All positions are in the y-up coordinate system of [`geometry`](crate::geometry),
//! centered on the circle.

pub mod metrics;
pub mod svg;

use serde::{Serialize, Serializer};

use crate::color::{color_hex, contrasting_color, Color, LIGHT_GRAY, OUTLINE_GRAY, WHITE};
use crate::geometry::{
  connectivity::{enabled_polygon_edges, skip_connections},
  layout::Layout,
  trace::trace_path,
  Float, Point,
};
use crate::harmony::scale::Scale;
pub use metrics::{LayoutConfig, SceneMetrics};

pub const OUTLINE_WIDTH: Float = 2.0;
pub const MARKER_LINE_WIDTH: Float = 1.0;
pub const CONNECTION_WIDTH: Float = 2.0;
pub const NOTE_NUMBER_FONT_SIZE: Float = 9.0;
pub const PITCH_LABEL_FONT_SIZE: Float = 12.0;

fn serialize_color<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(&color_hex(*color))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
  Regular,
  Semibold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelRole {
  /// 1-based position of an enabled note within the scale, drawn on its marker.
  NoteNumber,
  /// Pitch-class name, drawn just outside the marker.
  PitchClass,
}

/// How the polygon through the enabled vertices is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolygonStyle {
  /// Each edge takes the color of the vertex it starts from.
  Colored,
  /// A single closed path in one color.
  Uniform(Color),
}

/// Optional line work drawn on top of the circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
  /// Connects the enabled notes in order.
  ScalePolygon(PolygonStyle),
  /// Connects every `step`-th vertex starting at `start`, until the path closes.
  Skip { start: usize, step: i32, color: Color },
  /// The skip path partially drawn, for animation. `progress` runs from 0 to 1.
  Trace {
    start: usize,
    step: i32,
    progress: Float,
    color: Color,
  },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
  /// The circle the vertices sit on.
  Outline {
    center: Point,
    radius: Float,
    #[serde(serialize_with = "serialize_color")]
    color: Color,
    line_width: Float,
  },

  /// The filled circle marking one vertex.
  Marker {
    index: usize,
    center: Point,
    radius: Float,
    #[serde(serialize_with = "serialize_color")]
    fill: Color,
    #[serde(serialize_with = "serialize_color")]
    stroke: Color,
    line_width: Float,
    enabled: bool,
  },

  /// Centered text.
  Label {
    index: usize,
    role: LabelRole,
    position: Point,
    text: String,
    #[serde(serialize_with = "serialize_color")]
    color: Color,
    font_size: Float,
    weight: FontWeight,
  },

  Line {
    from: Point,
    to: Point,
    #[serde(serialize_with = "serialize_color")]
    color: Color,
    line_width: Float,
  },

  /// An open polyline with round caps and joins.
  Path {
    points: Vec<Point>,
    #[serde(serialize_with = "serialize_color")]
    color: Color,
    line_width: Float,
  },
}

/// Builds the draw commands for `scale` sized by `metrics`, followed by `overlays` in order.
///
/// Commands come back in painting order: the outline, one marker per slot,
/// the note-number labels of enabled slots, the pitch-class labels, then overlays.
/// The outline is white when every slot is enabled, gray otherwise.
///
/// ```rust
/// use chromatic_core::harmony::scale::Scale;
/// use chromatic_core::scene::{build_scene, DrawCommand, LayoutConfig, SceneMetrics};
///
/// let metrics = SceneMetrics::for_viewport(800.0, 600.0, &LayoutConfig::CHROMATIC);
/// let commands = build_scene(&Scale::chromatic(), &metrics, &[]);
/// assert!(matches!(commands[0], DrawCommand::Outline { .. }));
/// ```
pub fn build_scene(scale: &Scale, metrics: &SceneMetrics, overlays: &[Overlay]) -> Vec<DrawCommand> {
  let layout = metrics.layout();
  let mut commands = vec![];

  let all_enabled = scale.enabled_count() == scale.len();
  commands.push(DrawCommand::Outline {
    center: Point::ORIGIN,
    radius: metrics.radius,
    color: if all_enabled { *WHITE } else { *OUTLINE_GRAY },
    line_width: OUTLINE_WIDTH,
  });

  for (index, slot) in scale.iter().enumerate() {
    let (fill, stroke) = if slot.enabled {
      (slot.note.color, *WHITE)
    } else {
      (*LIGHT_GRAY, *LIGHT_GRAY)
    };
    commands.push(DrawCommand::Marker {
      index,
      center: layout.vertices[index],
      radius: metrics.vertex_radius,
      fill,
      stroke,
      line_width: MARKER_LINE_WIDTH,
      enabled: slot.enabled,
    });
  }

  let mut note_number = 0;
  for (index, slot) in scale.iter().enumerate() {
    if !slot.enabled {
      continue;
    }
    note_number += 1;
    commands.push(DrawCommand::Label {
      index,
      role: LabelRole::NoteNumber,
      position: layout.vertices[index],
      text: note_number.to_string(),
      color: contrasting_color(slot.note.color),
      font_size: NOTE_NUMBER_FONT_SIZE,
      weight: FontWeight::Semibold,
    });
  }

  for (index, slot) in scale.iter().enumerate() {
    let (color, weight) = if slot.enabled {
      (*WHITE, FontWeight::Semibold)
    } else {
      (*LIGHT_GRAY, FontWeight::Regular)
    };
    commands.push(DrawCommand::Label {
      index,
      role: LabelRole::PitchClass,
      position: layout.labels[index],
      text: slot.note.pitch.pitch_class.ui_name().to_string(),
      color,
      font_size: PITCH_LABEL_FONT_SIZE,
      weight,
    });
  }

  for overlay in overlays {
    commands.extend(overlay_commands(scale, &layout, overlay));
  }

  commands
}

fn path_points(layout: &Layout, path: &[usize]) -> Vec<Point> {
  path.iter().filter_map(|i| layout.vertex(*i)).collect()
}

fn overlay_commands(scale: &Scale, layout: &Layout, overlay: &Overlay) -> Vec<DrawCommand> {
  match overlay {
    Overlay::ScalePolygon(PolygonStyle::Colored) => enabled_polygon_edges(scale)
      .into_iter()
      .filter_map(|edge| {
        let slot = scale.slot_at(edge.from)?;
        Some(DrawCommand::Line {
          from: layout.vertex(edge.from)?,
          to: layout.vertex(edge.to)?,
          color: slot.note.color,
          line_width: CONNECTION_WIDTH,
        })
      })
      .collect(),

    Overlay::ScalePolygon(PolygonStyle::Uniform(color)) => {
      let mut path = scale.enabled_indices();
      if path.is_empty() {
        return vec![];
      }
      path.push(path[0]);
      vec![DrawCommand::Path {
        points: path_points(layout, &path),
        color: *color,
        line_width: CONNECTION_WIDTH,
      }]
    }

    Overlay::Skip { start, step, color } => {
      let path = skip_connections(*start, *step, layout.len());
      vec![DrawCommand::Path {
        points: path_points(layout, &path),
        color: *color,
        line_width: CONNECTION_WIDTH,
      }]
    }

    Overlay::Trace {
      start,
      step,
      progress,
      color,
    } => {
      let path = skip_connections(*start, *step, layout.len());
      let points = path_points(layout, &path);
      vec![DrawCommand::Path {
        points: trace_path(&points, *progress),
        color: *color,
        line_width: CONNECTION_WIDTH,
      }]
    }
  }
}
