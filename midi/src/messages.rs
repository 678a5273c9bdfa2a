//! Channel voice messages for playing notes.

use std::fmt::Display;

use chromatic_core::harmony::Pitch;
use error_stack::{report, Result};
use num_traits::FromPrimitive;

use crate::constants::{MidiChannel, StatusKind, MAX_DATA_BYTE};
use crate::error::ChromaticMidiError;

/// Encoded size of a note on / note off message.
pub const MESSAGE_LEN: usize = 3;

pub type EncodedMessage = [u8; MESSAGE_LEN];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMessage {
  NoteOn {
    channel: MidiChannel,
    note: u8,
    velocity: u8,
  },
  NoteOff {
    channel: MidiChannel,
    note: u8,
    velocity: u8,
  },
}

fn clamp_data(b: u8) -> u8 {
  b.min(MAX_DATA_BYTE)
}

impl ChannelMessage {
  /// A note on for `pitch`. Velocities above 127 are clamped.
  pub fn note_on(channel: MidiChannel, pitch: Pitch, velocity: u8) -> ChannelMessage {
    ChannelMessage::NoteOn {
      channel,
      note: pitch.midi(),
      velocity: clamp_data(velocity),
    }
  }

  /// A note off for `pitch`, with release velocity 0.
  pub fn note_off(channel: MidiChannel, pitch: Pitch) -> ChannelMessage {
    ChannelMessage::NoteOff {
      channel,
      note: pitch.midi(),
      velocity: 0,
    }
  }

  pub fn channel(&self) -> MidiChannel {
    match self {
      ChannelMessage::NoteOn { channel, .. } | ChannelMessage::NoteOff { channel, .. } => *channel,
    }
  }

  pub fn note(&self) -> u8 {
    match self {
      ChannelMessage::NoteOn { note, .. } | ChannelMessage::NoteOff { note, .. } => *note,
    }
  }

  /// The pitch of this message's note, if it falls within the supported octaves.
  pub fn pitch(&self) -> Option<Pitch> {
    Pitch::from_midi(self.note())
  }

  fn status_kind(&self) -> StatusKind {
    match self {
      ChannelMessage::NoteOn { .. } => StatusKind::NoteOn,
      ChannelMessage::NoteOff { .. } => StatusKind::NoteOff,
    }
  }

  /// Encodes the message as status byte, note number, velocity.
  ///
  /// ```rust
  /// use chromatic_core::harmony::{Octave, Pitch, PitchClass};
  /// use chromatic_midi::{constants::MidiChannel, messages::ChannelMessage};
  ///
  /// let c4 = Pitch::new(Octave::Four, PitchClass::C);
  /// let msg = ChannelMessage::note_on(MidiChannel::default(), c4, 127);
  /// assert_eq!(msg.to_bytes(), [0x90, 0x3c, 0x7f]);
  /// ```
  pub fn to_bytes(&self) -> EncodedMessage {
    let (note, velocity) = match self {
      ChannelMessage::NoteOn { note, velocity, .. } | ChannelMessage::NoteOff { note, velocity, .. } => {
        (*note, *velocity)
      }
    };
    [
      self.status_kind().status_byte(self.channel()),
      clamp_data(note),
      clamp_data(velocity),
    ]
  }

  /// Decodes a note on / note off message.
  ///
  /// A note on with velocity 0 is treated as a note off, as most devices send it that way.
  pub fn from_bytes(msg: &[u8]) -> Result<ChannelMessage, ChromaticMidiError> {
    if msg.len() < MESSAGE_LEN {
      return Err(report!(ChromaticMidiError::MessageTooShort {
        expected: MESSAGE_LEN,
        actual: msg.len(),
      }));
    }

    let status = msg[0];
    let kind: StatusKind = FromPrimitive::from_u8(status >> 4)
      .ok_or_else(|| report!(ChromaticMidiError::UnsupportedStatus(status)))?;
    let channel = MidiChannel::new(status & 0x0f)
      .ok_or_else(|| report!(ChromaticMidiError::InvalidMidiChannel(status & 0x0f)))?;

    let note = msg[1];
    let velocity = msg[2];
    for b in [note, velocity] {
      if b > MAX_DATA_BYTE {
        return Err(
          report!(ChromaticMidiError::InvalidDataByte(b))
            .attach_printable(format!("message: {}", to_hex_debug_str(msg))),
        );
      }
    }

    let decoded = match kind {
      StatusKind::NoteOn if velocity > 0 => ChannelMessage::NoteOn {
        channel,
        note,
        velocity,
      },
      StatusKind::NoteOn | StatusKind::NoteOff => ChannelMessage::NoteOff {
        channel,
        note,
        velocity,
      },
    };
    Ok(decoded)
  }
}

impl Display for ChannelMessage {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self.pitch() {
      Some(p) => p.name(),
      None => format!("#{}", self.note()),
    };
    match self {
      ChannelMessage::NoteOn {
        channel, velocity, ..
      } => write!(f, "NoteOn(ch {}, {name}, vel {velocity})", channel.get()),
      ChannelMessage::NoteOff { channel, .. } => write!(f, "NoteOff(ch {}, {name})", channel.get()),
    }
  }
}

pub fn to_hex_debug_str(msg: &[u8]) -> String {
  let hex_bytes: Vec<String> = msg.iter().map(|b| format!("{:02x}", b)).collect();
  format!("[ {} ]", hex_bytes.join(" "))
}
