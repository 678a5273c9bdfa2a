mod edges;
mod layout;
mod play;
mod render;
mod scale;
mod skip;

use std::path::PathBuf;

use chromatic_core::{
  config::SceneConfig,
  harmony::{scale::ScaleKind, Octave},
};
use clap::{Args, Subcommand};
use error_stack::{report, Result, ResultExt};

use self::{
  edges::run_edges, layout::run_layout, play::run_play, render::run_render, scale::run_scale,
  skip::run_skip,
};
use crate::error::CliError;

pub use self::{play::PlayArgs, render::RenderArgs};

/// Options shared by every command that works on a scene.
#[derive(Args, Debug, Clone)]
pub struct SceneArgs {
  /// Scale to use, e.g. `chromatic`, `major`, `"F# major"` or `"a minor"`.
  /// Overrides the config file's scale. Layout multipliers the file doesn't set follow this scale.
  #[clap(long, short)]
  scale: Option<String>,

  /// INI file with scene settings. Command line options override it.
  #[clap(long, short, value_parser)]
  config: Option<PathBuf>,

  /// Octave of the scale's pitches (0 ..= 7)
  #[clap(long)]
  octave: Option<u8>,
}

impl SceneArgs {
  pub fn load(&self) -> Result<SceneConfig, CliError> {
    let kind = match &self.scale {
      Some(s) => Some(
        s.parse::<ScaleKind>()
          .change_context_lazy(|| CliError::InvalidArgument(format!("--scale '{s}'")))?,
      ),
      None => None,
    };

    let mut config = match (&self.config, kind) {
      (Some(path), _) => {
        SceneConfig::load_with_kind(path, kind).change_context(CliError::SceneError)?
      }
      (None, Some(kind)) => SceneConfig::for_kind(kind),
      (None, None) => SceneConfig::default(),
    };

    if let Some(n) = self.octave {
      config.octave = Octave::new(n)
        .ok_or_else(|| report!(CliError::InvalidArgument(format!("--octave {n}"))))?;
    }
    Ok(config)
  }
}

#[derive(Subcommand)]
pub enum CliCommand {
  /// Prints the twelve slots of a scale with their pitches and colors
  Scale {
    #[clap(flatten)]
    scene: SceneArgs,
  },

  /// Prints vertex and label positions for a viewport
  Layout {
    #[clap(flatten)]
    scene: SceneArgs,

    #[clap(long, default_value_t = 800.0)]
    width: f64,

    #[clap(long, default_value_t = 600.0)]
    height: f64,
  },

  /// Prints the polygon edges connecting the enabled notes of a scale
  Edges {
    #[clap(flatten)]
    scene: SceneArgs,
  },

  /// Prints the closed path that connects every `step`-th vertex
  Skip {
    #[clap(flatten)]
    scene: SceneArgs,

    /// First vertex (0 is the top of the circle)
    #[clap(long)]
    start: Option<usize>,

    /// Vertices to advance per line; negative values go counter-clockwise
    #[clap(long, allow_hyphen_values = true)]
    step: Option<i32>,

    /// Print every disjoint cycle instead of just the one through `start`
    #[clap(long)]
    all: bool,
  },

  /// Renders a scene as SVG or as JSON draw commands
  Render(RenderArgs),

  /// Plays a scripted sequence of vertex presses
  Play(PlayArgs),
}

impl CliCommand {
  pub async fn run(&self) -> Result<(), CliError> {
    match self {
      Self::Scale { scene } => run_scale(scene),

      Self::Layout {
        scene,
        width,
        height,
      } => run_layout(scene, *width, *height),

      Self::Edges { scene } => run_edges(scene),

      Self::Skip {
        scene,
        start,
        step,
        all,
      } => run_skip(scene, *start, *step, *all),

      Self::Render(args) => run_render(args),

      Self::Play(args) => run_play(args).await,
    }
  }
}
