use error_stack::Context;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChromaticError {
  InvalidSlotCount {
    expected: usize,
    actual: usize,
  },
  MisalignedSlot {
    index: usize,
    pitch_class: u8,
  },
  InvalidPitchClass(u8),
  InvalidOctave(u8),
  UnknownPitchName(String),
  UnknownScaleKind(String),
  InvalidColor(String),

  ConfigParseError,
  ConfigReadError,
  InvalidConfigValue {
    key: String,
    value: String,
  },

  NoteSinkFailed,
}

impl Context for ChromaticError {}

impl Display for ChromaticError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use ChromaticError::*;
    match self {
      InvalidSlotCount { expected, actual } => write!(
        f,
        "scale must contain exactly {expected} slots, but received {actual}"
      ),

      MisalignedSlot { index, pitch_class } => write!(
        f,
        "scale slot {index} holds pitch class {pitch_class}; slot index and pitch class must match"
      ),

      InvalidPitchClass(n) => write!(f, "invalid pitch class {n}. Valid range is 0 ..= 11"),

      InvalidOctave(n) => write!(f, "invalid octave {n}. Valid range is 0 ..= 7"),

      UnknownPitchName(s) => write!(f, "unknown pitch name: '{s}'"),

      UnknownScaleKind(s) => write!(f, "unknown scale kind: '{s}'"),

      InvalidColor(s) => write!(f, "invalid hex color: '{s}'"),

      ConfigParseError => write!(f, "failed to parse scene configuration"),

      ConfigReadError => write!(f, "failed to read scene configuration"),

      InvalidConfigValue { key, value } => {
        write!(f, "invalid value for config key {key}: '{value}'")
      }

      NoteSinkFailed => write!(f, "note sink failed to handle note event"),
    }
  }
}
