use chromatic_core::{error::ChromaticError, harmony::Pitch, interaction::NoteSink};
use error_stack::Result;
use log::debug;

use crate::constants::MidiChannel;
use crate::messages::{to_hex_debug_str, ChannelMessage};

/// A [NoteSink] that encodes every note as a [ChannelMessage] and keeps it,
/// instead of sending it anywhere. Useful for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
  channel: MidiChannel,
  messages: Vec<ChannelMessage>,
}

impl RecordingSink {
  pub fn new(channel: MidiChannel) -> RecordingSink {
    RecordingSink {
      channel,
      messages: vec![],
    }
  }

  pub fn messages(&self) -> &[ChannelMessage] {
    &self.messages
  }

  /// Returns the recorded messages, leaving the recording empty.
  pub fn take(&mut self) -> Vec<ChannelMessage> {
    std::mem::take(&mut self.messages)
  }

  fn record(&mut self, msg: ChannelMessage) {
    debug!("{msg} {}", to_hex_debug_str(&msg.to_bytes()));
    self.messages.push(msg);
  }
}

impl NoteSink for RecordingSink {
  fn note_on(&mut self, note: Pitch, velocity: u8) -> Result<(), ChromaticError> {
    self.record(ChannelMessage::note_on(self.channel, note, velocity));
    Ok(())
  }

  fn note_off(&mut self, note: Pitch) -> Result<(), ChromaticError> {
    self.record(ChannelMessage::note_off(self.channel, note));
    Ok(())
  }
}
