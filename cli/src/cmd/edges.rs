use chromatic_core::geometry::connectivity::enabled_polygon_edges;
use error_stack::Result;
use log::info;

use super::SceneArgs;
use crate::error::CliError;

pub fn run_edges(args: &SceneArgs) -> Result<(), CliError> {
  let config = args.load()?;
  let scale = config.scale();
  let edges = enabled_polygon_edges(&scale);
  info!("{} has {} polygon edges", config.kind, edges.len());

  let name = |i: usize| {
    scale
      .slot_at(i)
      .map(|s| s.note.pitch.name())
      .unwrap_or_default()
  };
  for e in edges.iter() {
    println!("{:>2} -> {:>2}  ({} -> {})", e.from, e.to, name(e.from), name(e.to));
  }
  Ok(())
}
