use std::fmt::Display;

use log::{debug, warn};
use uuid::Uuid;

use super::actions::VertexEvent;
use super::effects::{Effect, Gesture};
use super::timeout::{TimeoutId, TimeoutOperation};
use super::TouchConfig;
use crate::harmony::{scale::Scale, Pitch};

/// One of the possible states of a touch on the chromatic circle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum TouchState {
  /// No vertex is held.
  #[default]
  Idle,

  /// A vertex is held and its note is sounding. `long_press` is the pending
  /// long-press timer, if it hasn't been cancelled by a move.
  Pressed {
    index: usize,
    note: Pitch,
    long_press: Option<TimeoutId>,
  },

  /// A vertex has been held long enough to count as a long press.
  /// The note keeps sounding until the touch ends.
  LongPressed { index: usize, note: Pitch },
}

impl Display for TouchState {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use TouchState::*;
    match self {
      Idle => write!(f, "Idle"),
      Pressed {
        index,
        note,
        long_press,
      } => match long_press {
        Some(_) => write!(f, "Pressed({index}, {note}, long press pending)"),
        None => write!(f, "Pressed({index}, {note})"),
      },
      LongPressed { index, note } => write!(f, "LongPressed({index}, {note})"),
    }
  }
}

impl TouchState {
  /// Index of the held vertex, if any.
  pub fn held_index(&self) -> Option<usize> {
    match self {
      TouchState::Idle => None,
      TouchState::Pressed { index, .. } | TouchState::LongPressed { index, .. } => Some(*index),
    }
  }

  /// Applies a [VertexEvent] to the current state and returns the new state, along with
  /// the effects the transition asks the outside world to perform, in order.
  ///
  /// Events that don't apply to the current state leave it unchanged and produce no effects.
  pub(crate) fn next(
    self,
    event: VertexEvent,
    scale: &Scale,
    config: &TouchConfig,
  ) -> (TouchState, Vec<Effect>) {
    use TouchState::*;
    use VertexEvent::*;

    // touches on disabled (or nonexistent) vertices are swallowed
    if let Begin(i) | Move(i) | End(i) | Cancel(i) = event {
      if !scale.is_enabled(i) {
        debug!("ignoring {event} on disabled vertex. current state: {self}");
        return (self, vec![]);
      }
    }

    match (event, self) {
      // A new touch releases whatever was held before and starts the long-press timer.
      (Begin(i), state) => {
        let mut effects = state.release();
        let note = match scale.slot_at(i) {
          Some(slot) => slot.note.pitch,
          None => return (Idle, effects),
        };
        let timeout_id = Uuid::new_v4();
        effects.push(Effect::Highlight(i));
        effects.push(Effect::NoteOn {
          note,
          velocity: config.velocity,
        });
        effects.push(Effect::Timeout(TimeoutOperation::Set {
          millis: config.long_press_millis,
          timeout_id,
        }));
        (
          Pressed {
            index: i,
            note,
            long_press: Some(timeout_id),
          },
          effects,
        )
      }

      // Moving a held touch drops the long-press, but the note keeps sounding.
      (
        Move(i),
        Pressed {
          index,
          note,
          long_press,
        },
      ) if i == index => {
        let mut effects = vec![];
        if let Some(id) = long_press {
          effects.push(Effect::Timeout(TimeoutOperation::Cancel(id)));
        }
        effects.push(Effect::Unhighlight(index));
        effects.push(Effect::Notify(Gesture::Moved { index, note }));
        (
          Pressed {
            index,
            note,
            long_press: None,
          },
          effects,
        )
      }

      (Move(i), LongPressed { index, note }) if i == index => (
        LongPressed { index, note },
        vec![
          Effect::Unhighlight(index),
          Effect::Notify(Gesture::Moved { index, note }),
        ],
      ),

      // Lifting before the long press fired is a tap.
      (
        End(i),
        Pressed {
          index,
          note,
          long_press,
        },
      ) if i == index => {
        let held = Pressed {
          index,
          note,
          long_press,
        };
        let mut effects = held.release();
        effects.push(Effect::Notify(Gesture::Tap { index, note }));
        (Idle, effects)
      }

      (End(i), state @ LongPressed { .. }) | (Cancel(i), state @ (Pressed { .. } | LongPressed { .. }))
        if state.held_index() == Some(i) =>
      {
        (Idle, state.release())
      }

      (
        LongPressElapsed(id),
        Pressed {
          index,
          note,
          long_press: Some(pending),
        },
      ) if id == pending => (
        LongPressed { index, note },
        vec![Effect::Notify(Gesture::LongPress { index, note })],
      ),

      (LongPressElapsed(id), state) => {
        warn!("ignoring stale long-press timeout {id}. current state: {state}");
        (state, vec![])
      }

      (event, state) => {
        debug!("ignoring {event} for current state {state}");
        (state, vec![])
      }
    }
  }

  /// Effects that let go of whatever is held: unhighlight, cancel a pending
  /// long-press timer, and stop the note.
  fn release(&self) -> Vec<Effect> {
    match self {
      TouchState::Idle => vec![],
      TouchState::Pressed {
        index,
        note,
        long_press,
      } => {
        let mut effects = vec![Effect::Unhighlight(*index)];
        if let Some(id) = long_press {
          effects.push(Effect::Timeout(TimeoutOperation::Cancel(*id)));
        }
        effects.push(Effect::NoteOff { note: *note });
        effects
      }
      TouchState::LongPressed { index, note } => {
        vec![Effect::Unhighlight(*index), Effect::NoteOff { note: *note }]
      }
    }
  }
}
