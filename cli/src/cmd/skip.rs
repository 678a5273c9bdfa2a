use chromatic_core::geometry::{
  connectivity::{cycle_length, skip_connections, skip_cycles},
  layout::VERTEX_COUNT,
};
use error_stack::Result;

use super::SceneArgs;
use crate::error::CliError;

fn format_path(path: &[usize]) -> String {
  path
    .iter()
    .map(|i| i.to_string())
    .collect::<Vec<String>>()
    .join(" -> ")
}

pub fn run_skip(
  args: &SceneArgs,
  start: Option<usize>,
  step: Option<i32>,
  all: bool,
) -> Result<(), CliError> {
  let config = args.load()?;
  let start = start.unwrap_or(config.skip_start);
  let step = step.unwrap_or(config.skip_step);

  println!(
    "step {step}: {} vertices per cycle",
    cycle_length(step, VERTEX_COUNT)
  );
  if all {
    for cycle in skip_cycles(step, VERTEX_COUNT) {
      println!("{}", format_path(&cycle));
    }
  } else {
    println!("{}", format_path(&skip_connections(start, step, VERTEX_COUNT)));
  }
  Ok(())
}
