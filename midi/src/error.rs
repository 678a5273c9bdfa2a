use error_stack::Context;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ChromaticMidiError {
  MessageTooShort {
    expected: usize,
    actual: usize,
  },
  UnsupportedStatus(u8),
  InvalidDataByte(u8),
  InvalidMidiChannel(u8),

  DeviceConnectionError,
  DeviceSendError,
  NoOutputPorts,
}

impl Context for ChromaticMidiError {}

impl Display for ChromaticMidiError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use ChromaticMidiError::*;
    match self {
      MessageTooShort { expected, actual } => write!(
        f,
        "expected message to have length of at least {expected}, but received {actual}"
      ),

      UnsupportedStatus(status) => write!(f, "unsupported status byte {:x}", status),

      InvalidDataByte(b) => write!(f, "invalid data byte {:x}. Valid range is 0 ..= 7f", b),

      InvalidMidiChannel(n) => write!(f, "invalid midi channel {n}. Valid range is 0 ..= 15"),

      DeviceConnectionError => write!(f, "failed to connect to midi output"),

      DeviceSendError => write!(f, "failed to send message to midi output"),

      NoOutputPorts => write!(f, "no midi output ports available"),
    }
  }
}
