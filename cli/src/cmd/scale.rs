use chromatic_core::color::color_hex;
use error_stack::Result;

use super::SceneArgs;
use crate::error::CliError;

pub fn run_scale(args: &SceneArgs) -> Result<(), CliError> {
  let config = args.load()?;
  let scale = config.scale();

  println!("{}", config.kind);
  for (i, slot) in scale.iter().enumerate() {
    let pitch = slot.note.pitch;
    println!(
      "{i:>2}  {:<4} midi {:>3}  {}  {}",
      pitch.name(),
      pitch.midi(),
      color_hex(slot.note.color),
      if slot.enabled { "enabled" } else { "-" }
    );
  }
  Ok(())
}
