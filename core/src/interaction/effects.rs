use std::fmt::Display;

use serde::Serialize;

use super::timeout::TimeoutOperation;
use crate::harmony::Pitch;

/// Higher-level touch gestures reported to whoever owns the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gesture {
  /// The vertex was pressed and released before the long-press timer fired.
  Tap { index: usize, note: Pitch },

  /// The vertex was held down until the long-press timer fired.
  LongPress { index: usize, note: Pitch },

  /// The touch moved while the vertex was held.
  Moved { index: usize, note: Pitch },
}

/// Effects are requests from the state machine to "do something" in the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
  /// Start sounding `note`.
  NoteOn { note: Pitch, velocity: u8 },

  /// Stop sounding `note`.
  NoteOff { note: Pitch },

  /// Start or cancel the long-press timer.
  Timeout(TimeoutOperation),

  /// Draw the vertex marker in its pressed state.
  Highlight(usize),

  /// Return the vertex marker to its resting state.
  Unhighlight(usize),

  Notify(Gesture),
}

impl Effect {
  /// True for effects that a [`NoteSink`](super::NoteSink) handles.
  pub fn is_note(&self) -> bool {
    matches!(self, Effect::NoteOn { .. } | Effect::NoteOff { .. })
  }
}

impl Display for Gesture {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use Gesture::*;
    match self {
      Tap { index, note } => write!(f, "Tap({index}, {note})"),
      LongPress { index, note } => write!(f, "LongPress({index}, {note})"),
      Moved { index, note } => write!(f, "Moved({index}, {note})"),
    }
  }
}

impl Display for Effect {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use Effect::*;
    match self {
      NoteOn { note, velocity } => write!(f, "NoteOn({note}, velocity {velocity})"),
      NoteOff { note } => write!(f, "NoteOff({note})"),
      Timeout(TimeoutOperation::Set { millis, timeout_id }) => {
        write!(f, "Timeout(Set {millis}ms, {timeout_id})")
      }
      Timeout(TimeoutOperation::Cancel(id)) => write!(f, "Timeout(Cancel {id})"),
      Highlight(i) => write!(f, "Highlight({i})"),
      Unhighlight(i) => write!(f, "Unhighlight({i})"),
      Notify(gesture) => write!(f, "Notify({gesture})"),
    }
  }
}
