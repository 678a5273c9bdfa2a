//! Sends notes to a MIDI output port.

use chromatic_core::{error::ChromaticError, harmony::Pitch, interaction::NoteSink};
use error_stack::{report, IntoReport, Result, ResultExt};
use log::{debug, info};
use midir::{MidiIO, MidiOutput, MidiOutputConnection};

use crate::constants::MidiChannel;
use crate::error::ChromaticMidiError;
use crate::messages::{to_hex_debug_str, ChannelMessage};

const CLIENT_NAME: &str = "chromatic";

/// Names of all available MIDI output ports.
pub fn output_port_names() -> Result<Vec<String>, ChromaticMidiError> {
  let output = MidiOutput::new(CLIENT_NAME)
    .into_report()
    .change_context(ChromaticMidiError::DeviceConnectionError)?;
  let mut names = vec![];
  for p in output.ports() {
    let name = output
      .port_name(&p)
      .into_report()
      .change_context(ChromaticMidiError::DeviceConnectionError)?;
    names.push(name);
  }
  Ok(names)
}

/// An open connection to a MIDI output port that plays notes on one channel.
pub struct MidiOutputSink {
  channel: MidiChannel,
  port_name: String,
  conn: MidiOutputConnection,
}

impl MidiOutputSink {
  /// Connects to the output port called `port_name`, or to the first available port if `None`.
  pub fn connect(
    port_name: Option<&str>,
    channel: MidiChannel,
  ) -> Result<MidiOutputSink, ChromaticMidiError> {
    use ChromaticMidiError::DeviceConnectionError;

    let output = MidiOutput::new(CLIENT_NAME)
      .into_report()
      .change_context(DeviceConnectionError)?;

    let port = match port_name {
      Some(name) => get_port_by_name(&output, name)?,
      None => output
        .ports()
        .into_iter()
        .next()
        .ok_or_else(|| report!(ChromaticMidiError::NoOutputPorts))?,
    };
    let name = output
      .port_name(&port)
      .into_report()
      .change_context(DeviceConnectionError)?;

    let conn = output.connect(&port, &name).map_err(|e|
        // The ConnectError<MidiOutput> type is not thread-safe, so we stringify instead of report()-ing directly
        report!(DeviceConnectionError)
          .attach_printable(format!("midi output connection error: {e}")))?;

    info!("connected to midi output '{name}'");
    Ok(MidiOutputSink {
      channel,
      port_name: name,
      conn,
    })
  }

  pub fn port_name(&self) -> &str {
    &self.port_name
  }

  pub fn send(&mut self, msg: ChannelMessage) -> Result<(), ChromaticMidiError> {
    let bytes = msg.to_bytes();
    debug!("sending {msg} {}", to_hex_debug_str(&bytes));
    self
      .conn
      .send(&bytes)
      .into_report()
      .change_context(ChromaticMidiError::DeviceSendError)
  }

  /// Closes the connection and consumes `self`.
  pub fn close(self) {
    self.conn.close();
  }
}

impl NoteSink for MidiOutputSink {
  fn note_on(&mut self, note: Pitch, velocity: u8) -> Result<(), ChromaticError> {
    let msg = ChannelMessage::note_on(self.channel, note, velocity);
    self.send(msg).change_context(ChromaticError::NoteSinkFailed)
  }

  fn note_off(&mut self, note: Pitch) -> Result<(), ChromaticError> {
    let msg = ChannelMessage::note_off(self.channel, note);
    self.send(msg).change_context(ChromaticError::NoteSinkFailed)
  }
}

fn get_port_by_name<IO: MidiIO>(io: &IO, name: &str) -> Result<IO::Port, ChromaticMidiError> {
  for p in io.ports() {
    let port_name = io.port_name(&p).map_err(|e| {
      report!(ChromaticMidiError::DeviceConnectionError)
        .attach_printable(format!("unable to get port with name '{name}': {e}"))
    })?;
    if port_name == name {
      return Ok(p);
    }
  }
  Err(
    report!(ChromaticMidiError::DeviceConnectionError)
      .attach_printable(format!("unable to get port with name: {name}")),
  )
}
