use std::collections::HashMap;
use std::time::Duration;

use chromatic_core::{
  geometry::layout::VERTEX_COUNT,
  harmony::scale::Scale,
  interaction::{
    actions::VertexEvent,
    apply_note_effects,
    effects::{Effect, Gesture},
    timeout::{TimeoutId, TimeoutOperation},
    NoteSink, TouchController,
  },
};
use chromatic_midi::{constants::MidiChannel, messages::to_hex_debug_str, sink::RecordingSink};
use clap::Args;
use error_stack::{report, IntoReport, Result, ResultExt};
use log::{debug, info, warn};
use tokio::{sync::mpsc, task::JoinHandle, time::sleep};

use super::SceneArgs;
use crate::error::CliError;

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
  #[clap(flatten)]
  scene: SceneArgs,

  /// Vertices to press in order, as `INDEX` or `INDEX:HOLD_MS`, e.g. `0 4 7:1500`.
  /// Defaults to every enabled note of the scale.
  #[clap(value_parser)]
  presses: Vec<String>,

  /// How long each press is held, in milliseconds, unless given per press
  #[clap(long, default_value_t = 300)]
  hold: u64,

  /// Pause between presses, in milliseconds
  #[clap(long, default_value_t = 100)]
  gap: u64,

  /// How long a press must be held to count as a long press, in milliseconds
  #[clap(long)]
  long_press: Option<u64>,

  /// MIDI channel (0 ..= 15)
  #[clap(long, default_value_t = 0)]
  channel: u8,

  /// MIDI output port name. Uses the first available port if omitted.
  #[cfg(feature = "device")]
  #[clap(long)]
  port: Option<String>,

  /// Print the available MIDI output ports and exit
  #[cfg(feature = "device")]
  #[clap(long)]
  list_ports: bool,

  /// Record the MIDI messages instead of sending them
  #[cfg(feature = "device")]
  #[clap(long)]
  dry_run: bool,
}

/// One scripted touch: press vertex `index` and hold it for `hold_millis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
  index: usize,
  hold_millis: u64,
}

fn parse_presses(tokens: &[String], default_hold: u64, scale: &Scale) -> Result<Vec<Press>, CliError> {
  if tokens.is_empty() {
    return Ok(
      scale
        .enabled_indices()
        .into_iter()
        .map(|index| Press {
          index,
          hold_millis: default_hold,
        })
        .collect(),
    );
  }

  let invalid = |token: &str| CliError::InvalidArgument(format!("press '{token}'"));
  let mut presses = vec![];
  for token in tokens {
    let (index, hold) = match token.split_once(':') {
      Some((i, h)) => (i, Some(h)),
      None => (token.as_str(), None),
    };
    let index: usize = index
      .trim()
      .parse()
      .into_report()
      .change_context_lazy(|| invalid(token))?;
    if index >= VERTEX_COUNT {
      return Err(
        report!(invalid(token)).attach_printable(format!("vertex index must be below {VERTEX_COUNT}")),
      );
    }
    let hold_millis = match hold {
      Some(h) => h
        .trim()
        .parse()
        .into_report()
        .change_context_lazy(|| invalid(token))?,
      None => default_hold,
    };
    presses.push(Press { index, hold_millis });
  }
  Ok(presses)
}

#[derive(Debug)]
enum PlayEvent {
  Vertex(VertexEvent),
  ScriptDone,
}

/// Feeds the scripted presses through `controller` in real time, playing notes on `sink`.
/// Long-press timers run as tokio tasks that post back into the same channel.
/// Returns the gestures that were recognized, in order.
async fn perform<S: NoteSink + ?Sized>(
  controller: &mut TouchController,
  presses: Vec<Press>,
  gap_millis: u64,
  sink: &mut S,
) -> Result<Vec<Gesture>, CliError> {
  let buf_size = 32;
  let (tx, mut rx) = mpsc::channel::<PlayEvent>(buf_size);

  let script_tx = tx.clone();
  let script = tokio::spawn(async move {
    for press in presses {
      let begin = PlayEvent::Vertex(VertexEvent::Begin(press.index));
      if script_tx.send(begin).await.is_err() {
        return;
      }
      sleep(Duration::from_millis(press.hold_millis)).await;
      let end = PlayEvent::Vertex(VertexEvent::End(press.index));
      if script_tx.send(end).await.is_err() {
        return;
      }
      sleep(Duration::from_millis(gap_millis)).await;
    }
    if let Err(err) = script_tx.send(PlayEvent::ScriptDone).await {
      warn!("error sending script completion: {err}");
    }
  });

  let mut timers: HashMap<TimeoutId, JoinHandle<()>> = HashMap::new();
  let mut script_done = false;
  let mut gestures = vec![];

  while let Some(play_event) = rx.recv().await {
    let event = match play_event {
      PlayEvent::ScriptDone => {
        script_done = true;
        if timers.is_empty() {
          break;
        }
        continue;
      }
      PlayEvent::Vertex(e) => e,
    };

    if let VertexEvent::LongPressElapsed(id) = event {
      timers.remove(&id);
    }

    let effects = apply_note_effects(controller.handle(event), sink)
      .change_context(CliError::PlaybackError)?;
    for effect in effects {
      match effect {
        Effect::Timeout(TimeoutOperation::Set { millis, timeout_id }) => {
          let timer_tx = tx.clone();
          let handle = tokio::spawn(async move {
            sleep(Duration::from_millis(millis)).await;
            let elapsed = PlayEvent::Vertex(VertexEvent::LongPressElapsed(timeout_id));
            if let Err(err) = timer_tx.send(elapsed).await {
              warn!("error sending long press timeout: {err}");
            }
          });
          timers.insert(timeout_id, handle);
        }
        Effect::Timeout(TimeoutOperation::Cancel(id)) => {
          if let Some(handle) = timers.remove(&id) {
            handle.abort();
          }
        }
        Effect::Notify(gesture) => {
          info!("{gesture}");
          gestures.push(gesture);
        }
        other => debug!("{other}"),
      }
    }

    if script_done && timers.is_empty() {
      break;
    }
  }

  for (_, handle) in timers.drain() {
    handle.abort();
  }
  script
    .await
    .into_report()
    .change_context(CliError::PlaybackError)?;
  Ok(gestures)
}

pub async fn run_play(args: &PlayArgs) -> Result<(), CliError> {
  #[cfg(feature = "device")]
  if args.list_ports {
    let names = chromatic_midi::device::output_port_names().change_context(CliError::PlaybackError)?;
    for name in names {
      println!("{name}");
    }
    return Ok(());
  }

  let config = args.scene.load()?;
  let mut touch = config.touch;
  if let Some(ms) = args.long_press {
    touch.long_press_millis = ms;
  }
  let scale = config.scale();
  let presses = parse_presses(&args.presses, args.hold, &scale)?;
  let channel = MidiChannel::new(args.channel)
    .ok_or_else(|| report!(CliError::InvalidArgument(format!("--channel {}", args.channel))))?;

  info!("playing {} presses on {}", presses.len(), config.kind);
  let mut controller = TouchController::new(scale, touch);

  #[cfg(feature = "device")]
  if !args.dry_run {
    let mut sink = chromatic_midi::device::MidiOutputSink::connect(args.port.as_deref(), channel)
      .change_context(CliError::PlaybackError)?;
    perform(&mut controller, presses, args.gap, &mut sink).await?;
    sink.close();
    return Ok(());
  }

  let mut sink = RecordingSink::new(channel);
  perform(&mut controller, presses, args.gap, &mut sink).await?;
  for msg in sink.messages() {
    let line = msg.to_string();
    println!("{line:<32} {}", to_hex_debug_str(&msg.to_bytes()));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use chromatic_core::{
    harmony::{scale::Scale, PitchClass},
    interaction::{effects::Gesture, TouchConfig, TouchController},
  };
  use chromatic_midi::{constants::MidiChannel, sink::RecordingSink};

  use super::{parse_presses, perform, Press};

  #[test]
  fn presses_from_arguments() {
    let scale = Scale::chromatic();
    let tokens: Vec<String> = vec!["0".into(), "7:1500".into(), " 11 ".into()];
    assert_eq!(
      parse_presses(&tokens, 200, &scale).unwrap(),
      vec![
        Press {
          index: 0,
          hold_millis: 200
        },
        Press {
          index: 7,
          hold_millis: 1500
        },
        Press {
          index: 11,
          hold_millis: 200
        },
      ]
    );

    assert!(parse_presses(&["12".to_string()], 200, &scale).is_err());
    assert!(parse_presses(&["x".to_string()], 200, &scale).is_err());
    assert!(parse_presses(&["3:soon".to_string()], 200, &scale).is_err());
  }

  #[test]
  fn presses_default_to_enabled_notes() {
    let presses = parse_presses(&[], 100, &Scale::major(PitchClass::D)).unwrap();
    let indices: Vec<usize> = presses.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![1, 2, 4, 6, 7, 9, 11]);
  }

  #[tokio::test]
  async fn short_and_long_presses() {
    let config = TouchConfig {
      velocity: 100,
      long_press_millis: 200,
    };
    let mut controller = TouchController::new(Scale::major(PitchClass::C), config);
    let mut sink = RecordingSink::new(MidiChannel::default());
    let presses = vec![
      Press {
        index: 0,
        hold_millis: 1,
      },
      Press {
        index: 4,
        hold_millis: 600,
      },
    ];

    let gestures = perform(&mut controller, presses, 1, &mut sink).await.unwrap();
    assert_eq!(gestures.len(), 2);
    assert!(matches!(gestures[0], Gesture::Tap { index: 0, .. }));
    assert!(matches!(gestures[1], Gesture::LongPress { index: 4, .. }));
    assert_eq!(sink.messages().len(), 4);
  }
}
