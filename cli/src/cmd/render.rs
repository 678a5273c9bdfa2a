use std::path::PathBuf;

use chromatic_core::{
  color::{parse_color, Color},
  scene::{build_scene, metrics::SceneMetrics, svg::render_svg, Overlay, PolygonStyle},
};
use clap::{Args, ValueEnum};
use error_stack::{report, IntoReport, Result, ResultExt};
use log::info;

use super::SceneArgs;
use crate::error::CliError;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
  Svg,
  Json,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
  #[clap(flatten)]
  scene: SceneArgs,

  #[clap(long, value_enum, default_value = "svg")]
  format: OutputFormat,

  #[clap(long, default_value_t = 800.0)]
  width: f64,

  #[clap(long, default_value_t = 600.0)]
  height: f64,

  /// Connect the enabled notes: `colored`, or a hex color for a single-color outline
  #[clap(long)]
  polygon: Option<String>,

  /// Draw the skip path through every n-th vertex
  #[clap(long)]
  skip: bool,

  #[clap(long)]
  skip_start: Option<usize>,

  #[clap(long, allow_hyphen_values = true)]
  skip_step: Option<i32>,

  #[clap(long, default_value = "#ffffff")]
  skip_color: String,

  /// Draw the skip path only partway, from 0.0 to 1.0. Implies --skip.
  #[clap(long)]
  trace: Option<f64>,

  /// Write to this file instead of stdout
  #[clap(long, short, value_parser)]
  output: Option<PathBuf>,
}

fn arg_color(flag: &str, value: &str) -> Result<Color, CliError> {
  parse_color(value).change_context_lazy(|| CliError::InvalidArgument(format!("{flag} '{value}'")))
}

impl RenderArgs {
  fn overlays(&self, skip_start: usize, skip_step: i32) -> Result<Vec<Overlay>, CliError> {
    let mut overlays = vec![];
    match self.polygon.as_deref() {
      None => {}
      Some("colored") => overlays.push(Overlay::ScalePolygon(PolygonStyle::Colored)),
      Some(c) => overlays.push(Overlay::ScalePolygon(PolygonStyle::Uniform(arg_color(
        "--polygon",
        c,
      )?))),
    }

    let color = arg_color("--skip-color", &self.skip_color)?;
    let start = self.skip_start.unwrap_or(skip_start);
    let step = self.skip_step.unwrap_or(skip_step);
    if let Some(progress) = self.trace {
      overlays.push(Overlay::Trace {
        start,
        step,
        progress,
        color,
      });
    } else if self.skip {
      overlays.push(Overlay::Skip { start, step, color });
    }
    Ok(overlays)
  }
}

pub fn run_render(args: &RenderArgs) -> Result<(), CliError> {
  if !(args.width > 0.0 && args.height > 0.0) {
    return Err(report!(CliError::InvalidArgument(format!(
      "viewport must be positive, got {} x {}",
      args.width, args.height
    ))));
  }

  let config = args.scene.load()?;
  let metrics = SceneMetrics::for_viewport(args.width, args.height, &config.layout);
  let overlays = args.overlays(config.skip_start, config.skip_step)?;
  let commands = build_scene(&config.scale(), &metrics, &overlays);
  info!(
    "rendering {} with {} overlays ({} draw commands)",
    config.kind,
    overlays.len(),
    commands.len()
  );

  let doc = match args.format {
    OutputFormat::Svg => render_svg(&commands, &metrics),
    OutputFormat::Json => serde_json::to_string_pretty(&commands)
      .into_report()
      .change_context(CliError::OutputError)?,
  };

  match &args.output {
    Some(path) => std::fs::write(path, doc)
      .into_report()
      .change_context(CliError::OutputError)
      .attach_printable_lazy(|| format!("output file: {}", path.display())),
    None => {
      println!("{doc}");
      Ok(())
    }
  }
}
