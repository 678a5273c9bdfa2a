//! Turns touches on circle vertices into notes and gestures.
//!
//! The [TouchController] is a small finite state machine in the style of
//! ["Pretty State Machine Patterns in Rust"](https://hoverbear.org/blog/rust-state-machine-pattern/),
//! with an explicit [Effect] type for side effects. It never talks to a timer or
//! an audio device itself: it returns effects, and the caller (the "shell")
//! performs them. [pump] wires a [VertexEventSource] to a [NoteSink] for the
//! common case.
//!
//! ```text
//!               Begin(i)          LongPressElapsed(id)
//!   ┌──────┐ ─────────────► ┌─────────┐ ─────────────► ┌─────────────┐
//!   │ Idle │                │ Pressed │                │ LongPressed │
//!   └──────┘ ◄───────────── └─────────┘                └──────┬──────┘
//!       ▲       End / Cancel                                  │
//!       └─────────────────────────────────────────────────────┘
//!                            End / Cancel
//! ```

pub mod actions;
pub mod effects;
pub mod state;
pub mod timeout;

use std::collections::VecDeque;

use error_stack::Result;
use log::debug;

use crate::error::ChromaticError;
use crate::harmony::{scale::Scale, Pitch};
use actions::VertexEvent;
use effects::Effect;
use state::TouchState;

/// Velocity used for note-on messages unless configured otherwise.
pub const DEFAULT_VELOCITY: u8 = 127;

/// How long a vertex must be held before it counts as a long press.
pub const DEFAULT_LONG_PRESS_MILLIS: u64 = 1000;

/// Anything that can play notes. Implemented by MIDI outputs, synths and test recorders.
pub trait NoteSink {
  fn note_on(&mut self, note: Pitch, velocity: u8) -> Result<(), ChromaticError>;
  fn note_off(&mut self, note: Pitch) -> Result<(), ChromaticError>;
}

/// A source of touch events, e.g. a UI toolkit adapter or a scripted performance.
pub trait VertexEventSource {
  /// Returns the next event, or `None` once the source is exhausted.
  fn next_event(&mut self) -> Option<VertexEvent>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchConfig {
  pub velocity: u8,
  pub long_press_millis: u64,
}

impl Default for TouchConfig {
  fn default() -> Self {
    TouchConfig {
      velocity: DEFAULT_VELOCITY,
      long_press_millis: DEFAULT_LONG_PRESS_MILLIS,
    }
  }
}

/// Owns the touch state for one scale and turns [VertexEvent]s into [Effect]s.
#[derive(Debug, Clone)]
pub struct TouchController {
  scale: Scale,
  config: TouchConfig,
  state: TouchState,
}

impl TouchController {
  pub fn new(scale: Scale, config: TouchConfig) -> TouchController {
    TouchController {
      scale,
      config,
      state: TouchState::Idle,
    }
  }

  pub fn state(&self) -> &TouchState {
    &self.state
  }

  pub fn scale(&self) -> &Scale {
    &self.scale
  }

  pub fn config(&self) -> &TouchConfig {
    &self.config
  }

  /// Feeds one event into the state machine and returns the effects to perform, in order.
  pub fn handle(&mut self, event: VertexEvent) -> Vec<Effect> {
    let current = std::mem::take(&mut self.state);
    let (next, effects) = current.next(event, &self.scale, &self.config);
    if !effects.is_empty() {
      debug!("{event} -> {next} ({} effects)", effects.len());
    }
    self.state = next;
    effects
  }
}

/// Performs the note effects in `effects` on `sink`, and returns the rest in order.
pub fn apply_note_effects<S: NoteSink + ?Sized>(
  effects: Vec<Effect>,
  sink: &mut S,
) -> Result<Vec<Effect>, ChromaticError> {
  let mut remaining = Vec::with_capacity(effects.len());
  for effect in effects {
    match effect {
      Effect::NoteOn { note, velocity } => sink.note_on(note, velocity)?,
      Effect::NoteOff { note } => sink.note_off(note)?,
      other => remaining.push(other),
    }
  }
  Ok(remaining)
}

/// Drains `source` through `controller`, playing notes on `sink`.
/// Returns every non-note effect, in the order it was produced.
///
/// Timers are not run here: a `LongPressElapsed` event has to come from the source.
pub fn pump<Src, S>(
  controller: &mut TouchController,
  source: &mut Src,
  sink: &mut S,
) -> Result<Vec<Effect>, ChromaticError>
where
  Src: VertexEventSource + ?Sized,
  S: NoteSink + ?Sized,
{
  let mut out = vec![];
  while let Some(event) = source.next_event() {
    let effects = controller.handle(event);
    out.extend(apply_note_effects(effects, sink)?);
  }
  Ok(out)
}

/// A [VertexEventSource] that replays a prepared list of events.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
  events: VecDeque<VertexEvent>,
}

impl ScriptedEvents {
  pub fn new() -> ScriptedEvents {
    ScriptedEvents::default()
  }

  pub fn push(mut self, event: VertexEvent) -> Self {
    self.events.push_back(event);
    self
  }

  /// A quick press and release of vertex `index`.
  pub fn tap(self, index: usize) -> Self {
    self.push(VertexEvent::Begin(index)).push(VertexEvent::End(index))
  }

  pub fn len(&self) -> usize {
    self.events.len()
  }

  pub fn is_empty(&self) -> bool {
    self.events.is_empty()
  }
}

impl From<Vec<VertexEvent>> for ScriptedEvents {
  fn from(events: Vec<VertexEvent>) -> Self {
    ScriptedEvents {
      events: events.into(),
    }
  }
}

impl VertexEventSource for ScriptedEvents {
  fn next_event(&mut self) -> Option<VertexEvent> {
    self.events.pop_front()
  }
}

#[cfg(test)]
mod tests {
  use error_stack::{report, Result};

  use super::{
    actions::VertexEvent::{self, *},
    effects::{Effect, Gesture},
    pump,
    state::TouchState,
    timeout::{TimeoutId, TimeoutOperation},
    NoteSink, ScriptedEvents, TouchConfig, TouchController,
  };
  use crate::error::ChromaticError;
  use crate::harmony::{scale::Scale, Octave, Pitch, PitchClass};

  #[derive(Debug, Default)]
  struct Recorder {
    played: Vec<(u8, Option<u8>)>,
    fail: bool,
  }

  impl NoteSink for Recorder {
    fn note_on(&mut self, note: Pitch, velocity: u8) -> Result<(), ChromaticError> {
      if self.fail {
        return Err(report!(ChromaticError::NoteSinkFailed));
      }
      self.played.push((note.midi(), Some(velocity)));
      Ok(())
    }

    fn note_off(&mut self, note: Pitch) -> Result<(), ChromaticError> {
      self.played.push((note.midi(), None));
      Ok(())
    }
  }

  fn c_major() -> TouchController {
    TouchController::new(Scale::major(PitchClass::C), TouchConfig::default())
  }

  fn pitch(pc: PitchClass) -> Pitch {
    Pitch::new(Octave::Four, pc)
  }

  fn pending_timeout(effects: &[Effect]) -> TimeoutId {
    effects
      .iter()
      .find_map(|e| match e {
        Effect::Timeout(TimeoutOperation::Set { timeout_id, .. }) => Some(*timeout_id),
        _ => None,
      })
      .expect("no timeout was set")
  }

  #[test]
  fn begin_on_enabled_vertex_plays_and_starts_timer() {
    let mut ctl = c_major();
    let effects = ctl.handle(Begin(4));
    let id = pending_timeout(&effects);
    assert_eq!(
      effects,
      vec![
        Effect::Highlight(4),
        Effect::NoteOn {
          note: pitch(PitchClass::E),
          velocity: 127
        },
        Effect::Timeout(TimeoutOperation::Set {
          millis: 1000,
          timeout_id: id
        }),
      ]
    );
    assert_eq!(
      ctl.state(),
      &TouchState::Pressed {
        index: 4,
        note: pitch(PitchClass::E),
        long_press: Some(id)
      }
    );
  }

  #[test]
  fn tap_releases_note_and_notifies() {
    let mut ctl = c_major();
    let id = pending_timeout(&ctl.handle(Begin(0)));
    let effects = ctl.handle(End(0));
    let c4 = pitch(PitchClass::C);
    assert_eq!(
      effects,
      vec![
        Effect::Unhighlight(0),
        Effect::Timeout(TimeoutOperation::Cancel(id)),
        Effect::NoteOff { note: c4 },
        Effect::Notify(Gesture::Tap { index: 0, note: c4 }),
      ]
    );
    assert_eq!(ctl.state(), &TouchState::Idle);
  }

  #[test]
  fn disabled_and_out_of_range_vertices_are_ignored() {
    let mut ctl = c_major();
    for event in [Begin(1), Move(1), End(1), Cancel(1), Begin(12), End(99)] {
      assert!(ctl.handle(event).is_empty(), "{event} produced effects");
    }
    assert_eq!(ctl.state(), &TouchState::Idle);
  }

  #[test]
  fn long_press_suppresses_tap() {
    let mut ctl = c_major();
    let id = pending_timeout(&ctl.handle(Begin(7)));
    let g4 = pitch(PitchClass::G);

    assert_eq!(
      ctl.handle(LongPressElapsed(id)),
      vec![Effect::Notify(Gesture::LongPress { index: 7, note: g4 })]
    );
    assert_eq!(
      ctl.state(),
      &TouchState::LongPressed { index: 7, note: g4 }
    );

    assert_eq!(
      ctl.handle(End(7)),
      vec![Effect::Unhighlight(7), Effect::NoteOff { note: g4 }]
    );
    assert_eq!(ctl.state(), &TouchState::Idle);
  }

  #[test]
  fn stale_timeouts_are_ignored() {
    let mut ctl = c_major();
    let first = pending_timeout(&ctl.handle(Begin(0)));
    ctl.handle(End(0));
    assert!(ctl.handle(LongPressElapsed(first)).is_empty());

    let second = pending_timeout(&ctl.handle(Begin(2)));
    assert_ne!(first, second);
    assert!(ctl.handle(LongPressElapsed(first)).is_empty());
    assert!(matches!(ctl.state(), TouchState::Pressed { index: 2, .. }));
  }

  #[test]
  fn move_cancels_long_press_but_keeps_note() {
    let mut ctl = c_major();
    let id = pending_timeout(&ctl.handle(Begin(9)));
    let a4 = pitch(PitchClass::A);

    assert_eq!(
      ctl.handle(Move(9)),
      vec![
        Effect::Timeout(TimeoutOperation::Cancel(id)),
        Effect::Unhighlight(9),
        Effect::Notify(Gesture::Moved { index: 9, note: a4 }),
      ]
    );
    // the cancelled timer can't turn this into a long press any more
    assert!(ctl.handle(LongPressElapsed(id)).is_empty());

    let effects = ctl.handle(End(9));
    assert!(effects.contains(&Effect::NoteOff { note: a4 }));
    assert!(!effects
      .iter()
      .any(|e| matches!(e, Effect::Timeout(TimeoutOperation::Cancel(_)))));
  }

  #[test]
  fn events_for_other_vertices_do_not_release() {
    let mut ctl = c_major();
    ctl.handle(Begin(0));
    assert!(ctl.handle(End(2)).is_empty());
    assert!(ctl.handle(Move(2)).is_empty());
    assert!(matches!(ctl.state(), TouchState::Pressed { index: 0, .. }));
  }

  #[test]
  fn cancel_releases_without_tap() {
    let mut ctl = c_major();
    let id = pending_timeout(&ctl.handle(Begin(5)));
    let f4 = pitch(PitchClass::F);
    assert_eq!(
      ctl.handle(Cancel(5)),
      vec![
        Effect::Unhighlight(5),
        Effect::Timeout(TimeoutOperation::Cancel(id)),
        Effect::NoteOff { note: f4 },
      ]
    );
    assert_eq!(ctl.state(), &TouchState::Idle);
  }

  #[test]
  fn new_touch_releases_held_note_first() {
    let mut ctl = c_major();
    let id = pending_timeout(&ctl.handle(Begin(0)));
    let effects = ctl.handle(Begin(4));
    assert_eq!(
      &effects[..4],
      &[
        Effect::Unhighlight(0),
        Effect::Timeout(TimeoutOperation::Cancel(id)),
        Effect::NoteOff {
          note: pitch(PitchClass::C)
        },
        Effect::Highlight(4),
      ]
    );
    assert!(matches!(ctl.state(), TouchState::Pressed { index: 4, .. }));
  }

  #[test]
  fn configured_velocity_and_timeout() {
    let config = TouchConfig {
      velocity: 90,
      long_press_millis: 250,
    };
    let mut ctl = TouchController::new(Scale::chromatic(), config);
    let effects = ctl.handle(Begin(1));
    assert!(effects.contains(&Effect::NoteOn {
      note: pitch(PitchClass::Cs),
      velocity: 90
    }));
    assert!(effects
      .iter()
      .any(|e| matches!(e, Effect::Timeout(TimeoutOperation::Set { millis: 250, .. }))));
  }

  #[test]
  fn pump_routes_notes_to_the_sink() {
    let mut ctl = c_major();
    let mut sink = Recorder::default();
    let mut source = ScriptedEvents::new().tap(0).tap(1).tap(4);
    assert_eq!(source.len(), 6);

    let rest = pump(&mut ctl, &mut source, &mut sink).unwrap();
    assert!(source.is_empty());
    assert_eq!(
      sink.played,
      vec![(60, Some(127)), (60, None), (64, Some(127)), (64, None)]
    );
    assert!(rest.iter().all(|e| !e.is_note()));
    let taps: Vec<&Effect> = rest
      .iter()
      .filter(|e| matches!(e, Effect::Notify(Gesture::Tap { .. })))
      .collect();
    assert_eq!(taps.len(), 2);
  }

  #[test]
  fn pump_stops_on_sink_failure() {
    let mut ctl = c_major();
    let mut sink = Recorder {
      fail: true,
      ..Default::default()
    };
    let events: Vec<VertexEvent> = vec![Begin(0), End(0)];
    let mut source = ScriptedEvents::from(events);
    let err = pump(&mut ctl, &mut source, &mut sink).unwrap_err();
    assert_eq!(err.current_context(), &ChromaticError::NoteSinkFailed);
  }
}
