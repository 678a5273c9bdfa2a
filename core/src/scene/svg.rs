//! Renders draw commands as a standalone SVG document.

use crate::color::{color_hex, Color};
use crate::geometry::{
  svg::{polyline_path, round_coord, round_point, to_canvas},
  Point,
};
use crate::scene::{metrics::SceneMetrics, DrawCommand, FontWeight};

const BACKGROUND: &str = "#000000";

fn canvas_point(metrics: &SceneMetrics, p: Point) -> Point {
  round_point(to_canvas(metrics.center(), p))
}

fn font_weight(weight: FontWeight) -> u16 {
  match weight {
    FontWeight::Regular => 400,
    FontWeight::Semibold => 600,
  }
}

fn hex(c: &Color) -> String {
  color_hex(*c)
}

fn element(metrics: &SceneMetrics, command: &DrawCommand) -> String {
  match command {
    DrawCommand::Outline {
      center,
      radius,
      color,
      line_width,
    } => {
      let c = canvas_point(metrics, *center);
      format!(
        r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
        c.x,
        c.y,
        round_coord(*radius),
        hex(color),
        line_width
      )
    }

    DrawCommand::Marker {
      center,
      radius,
      fill,
      stroke,
      line_width,
      ..
    } => {
      let c = canvas_point(metrics, *center);
      format!(
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        c.x,
        c.y,
        round_coord(*radius),
        hex(fill),
        hex(stroke),
        line_width
      )
    }

    DrawCommand::Label {
      position,
      text,
      color,
      font_size,
      weight,
      ..
    } => {
      let p = canvas_point(metrics, *position);
      format!(
        r#"<text x="{}" y="{}" fill="{}" font-size="{}" font-weight="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
        p.x,
        p.y,
        hex(color),
        font_size,
        font_weight(*weight),
        text
      )
    }

    DrawCommand::Line {
      from,
      to,
      color,
      line_width,
    } => {
      let a = canvas_point(metrics, *from);
      let b = canvas_point(metrics, *to);
      format!(
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
        a.x,
        a.y,
        b.x,
        b.y,
        hex(color),
        line_width
      )
    }

    DrawCommand::Path {
      points,
      color,
      line_width,
    } => {
      let pts: Vec<Point> = points.iter().map(|p| canvas_point(metrics, *p)).collect();
      format!(
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
        polyline_path(&pts, false),
        hex(color),
        line_width
      )
    }
  }
}

/// Renders `commands` into an SVG document the size of the viewport in `metrics`,
/// on a black background.
pub fn render_svg(commands: &[DrawCommand], metrics: &SceneMetrics) -> String {
  let mut lines = vec![
    format!(
      r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
      w = metrics.width,
      h = metrics.height
    ),
    format!(r#"<rect width="100%" height="100%" fill="{BACKGROUND}"/>"#),
  ];
  lines.extend(commands.iter().map(|c| format!("  {}", element(metrics, c))));
  lines.push("</svg>".to_string());
  lines.join("\n")
}
