use chromatic_core::{geometry::svg::round_point, scene::metrics::SceneMetrics};
use error_stack::{report, Result};

use super::SceneArgs;
use crate::error::CliError;

pub fn run_layout(args: &SceneArgs, width: f64, height: f64) -> Result<(), CliError> {
  if !(width > 0.0 && height > 0.0) {
    return Err(report!(CliError::InvalidArgument(format!(
      "viewport must be positive, got {width} x {height}"
    ))));
  }

  let config = args.load()?;
  let metrics = SceneMetrics::for_viewport(width, height, &config.layout);
  let layout = metrics.layout();
  let scale = config.scale();

  println!(
    "radius {}  vertex radius {}",
    metrics.radius, metrics.vertex_radius
  );
  for (i, (v, l)) in layout.vertices.iter().zip(layout.labels.iter()).enumerate() {
    let v = round_point(*v);
    let l = round_point(*l);
    let name = scale
      .slot_at(i)
      .map(|s| s.note.pitch.pitch_class.ui_name())
      .unwrap_or("?");
    println!(
      "{i:>2} {name:<2}  vertex ({}, {})  label ({}, {})",
      v.x, v.y, l.x, l.y
    );
  }
  Ok(())
}
