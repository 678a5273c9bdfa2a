use bounded_integer::bounded_integer;
use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Highest value allowed in a MIDI data byte (note number, velocity).
pub const MAX_DATA_BYTE: u8 = 0x7f;

bounded_integer! {
  /// A zero-indexed MIDI channel number, in the range 0 ..= 15.
  ///
  /// Use `MidiChannel::default()` for channel 0.
  ///
  /// When converting from untrusted / arbitrary input, use `MidiChannel::new`, which returns an `Option`.
  pub struct MidiChannel { 0..=15 }
}

/// The high nibble of a channel voice message's status byte.
#[derive(Debug, FromPrimitive, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum StatusKind {
  NoteOff = 0x8,
  NoteOn = 0x9,
}

impl StatusKind {
  /// Combines this kind with a channel into a full status byte, e.g. `0x93` for note on, channel 3.
  pub fn status_byte(&self, channel: MidiChannel) -> u8 {
    ((*self as u8) << 4) | (channel.get() & 0x0f)
  }
}
