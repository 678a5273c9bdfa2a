//! Scene settings stored in an INI file.
//!
//! ```ini
//! [Scene]
//! Kind=major
//! Root=C
//! Octave=4
//!
//! [Layout]
//! LandscapeMultiplier=0.28
//! PortraitMultiplier=0.375
//! VertexMultiplier=0.04
//!
//! [Touch]
//! Velocity=127
//! LongPressMillis=1000
//!
//! [Overlay]
//! SkipStart=0
//! SkipStep=3
//! ```
//!
//! Every key is optional. Missing layout multipliers default per scale kind.

use std::path::Path;
use std::str::FromStr;

use error_stack::{report, IntoReport, Result, ResultExt};
use ini::{Ini, Properties};
use log::debug;

use crate::error::ChromaticError;
use crate::geometry::connectivity::DEFAULT_SKIP_STEP;
use crate::harmony::{
  scale::{Scale, ScaleKind},
  Octave, PitchClass,
};
use crate::interaction::TouchConfig;
use crate::scene::metrics::LayoutConfig;

const SCENE_SECTION: &str = "Scene";
const LAYOUT_SECTION: &str = "Layout";
const TOUCH_SECTION: &str = "Touch";
const OVERLAY_SECTION: &str = "Overlay";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
  pub kind: ScaleKind,
  pub octave: Octave,
  pub layout: LayoutConfig,
  pub touch: TouchConfig,
  pub skip_start: usize,
  pub skip_step: i32,
}

impl Default for SceneConfig {
  fn default() -> Self {
    SceneConfig::for_kind(ScaleKind::default())
  }
}

fn invalid_value(section: &str, key: &str, value: &str) -> ChromaticError {
  ChromaticError::InvalidConfigValue {
    key: format!("{section}.{key}"),
    value: value.to_string(),
  }
}

/// Parses `section.key` if present. A present but malformed value is an error.
fn parse_key<T: FromStr>(
  props: Option<&Properties>,
  section: &str,
  key: &str,
) -> Result<Option<T>, ChromaticError> {
  match props.and_then(|p| p.get(key)) {
    None => Ok(None),
    Some(raw) => raw
      .trim()
      .parse::<T>()
      .map(Some)
      .map_err(|_| report!(invalid_value(section, key, raw))),
  }
}

fn parse_multiplier(
  props: Option<&Properties>,
  key: &str,
  default: f64,
) -> Result<f64, ChromaticError> {
  match parse_key::<f64>(props, LAYOUT_SECTION, key)? {
    None => Ok(default),
    Some(m) if m.is_finite() && m > 0.0 => Ok(m),
    Some(m) => Err(
      report!(invalid_value(LAYOUT_SECTION, key, &m.to_string()))
        .attach_printable("multipliers must be positive"),
    ),
  }
}

fn parse_kind(scene: Option<&Properties>) -> Result<ScaleKind, ChromaticError> {
  let root = match scene.and_then(|p| p.get("Root")) {
    None => PitchClass::C,
    Some(raw) => raw
      .parse::<PitchClass>()
      .change_context_lazy(|| invalid_value(SCENE_SECTION, "Root", raw))?,
  };
  match scene.and_then(|p| p.get("Kind")) {
    None => Ok(ScaleKind::default()),
    Some(raw) => ScaleKind::parse_with_root(raw, root)
      .change_context_lazy(|| invalid_value(SCENE_SECTION, "Kind", raw)),
  }
}

impl SceneConfig {
  /// Default settings for a scene showing `kind`.
  pub fn for_kind(kind: ScaleKind) -> SceneConfig {
    SceneConfig {
      kind,
      octave: Octave::REFERENCE,
      layout: LayoutConfig::for_kind(&kind),
      touch: TouchConfig::default(),
      skip_start: 0,
      skip_step: DEFAULT_SKIP_STEP,
    }
  }

  /// Builds the scale this config describes.
  pub fn scale(&self) -> Scale {
    self.kind.build_in(self.octave)
  }

  pub fn from_ini(conf: &Ini) -> Result<SceneConfig, ChromaticError> {
    SceneConfig::from_ini_with_kind(conf, None)
  }

  /// Like [`SceneConfig::from_ini`], but a given `kind` replaces the file's `Kind` and `Root`,
  /// and layout multipliers missing from the file take `kind`'s defaults.
  pub fn from_ini_with_kind(
    conf: &Ini,
    kind: Option<ScaleKind>,
  ) -> Result<SceneConfig, ChromaticError> {
    let scene = conf.section(Some(SCENE_SECTION));
    let kind = match kind {
      Some(k) => k,
      None => parse_kind(scene)?,
    };
    let octave = match parse_key::<u8>(scene, SCENE_SECTION, "Octave")? {
      None => Octave::REFERENCE,
      Some(n) => Octave::new(n).ok_or_else(|| {
        report!(invalid_value(SCENE_SECTION, "Octave", &n.to_string()))
          .attach_printable("octave must be in 0 ..= 7")
      })?,
    };

    let defaults = LayoutConfig::for_kind(&kind);
    let layout_props = conf.section(Some(LAYOUT_SECTION));
    let layout = LayoutConfig {
      landscape_multiplier: parse_multiplier(
        layout_props,
        "LandscapeMultiplier",
        defaults.landscape_multiplier,
      )?,
      portrait_multiplier: parse_multiplier(
        layout_props,
        "PortraitMultiplier",
        defaults.portrait_multiplier,
      )?,
      vertex_multiplier: parse_multiplier(
        layout_props,
        "VertexMultiplier",
        defaults.vertex_multiplier,
      )?,
    };

    let touch_props = conf.section(Some(TOUCH_SECTION));
    let mut touch = TouchConfig::default();
    if let Some(v) = parse_key::<u8>(touch_props, TOUCH_SECTION, "Velocity")? {
      if v > 127 {
        return Err(
          report!(invalid_value(TOUCH_SECTION, "Velocity", &v.to_string()))
            .attach_printable("velocity must be in 0 ..= 127"),
        );
      }
      touch.velocity = v;
    }
    if let Some(ms) = parse_key::<u64>(touch_props, TOUCH_SECTION, "LongPressMillis")? {
      touch.long_press_millis = ms;
    }

    let overlay_props = conf.section(Some(OVERLAY_SECTION));
    let skip_start = parse_key::<usize>(overlay_props, OVERLAY_SECTION, "SkipStart")?.unwrap_or(0);
    let skip_step =
      parse_key::<i32>(overlay_props, OVERLAY_SECTION, "SkipStep")?.unwrap_or(DEFAULT_SKIP_STEP);

    let config = SceneConfig {
      kind,
      octave,
      layout,
      touch,
      skip_start,
      skip_step,
    };
    debug!("loaded scene config: {config:?}");
    Ok(config)
  }

  pub fn from_ini_str(s: &str) -> Result<SceneConfig, ChromaticError> {
    let conf = Ini::load_from_str(s)
      .into_report()
      .change_context(ChromaticError::ConfigParseError)?;
    SceneConfig::from_ini(&conf)
  }

  pub fn load<P: AsRef<Path>>(path: P) -> Result<SceneConfig, ChromaticError> {
    SceneConfig::load_with_kind(path, None)
  }

  /// Reads `path` with [`SceneConfig::from_ini_with_kind`].
  pub fn load_with_kind<P: AsRef<Path>>(
    path: P,
    kind: Option<ScaleKind>,
  ) -> Result<SceneConfig, ChromaticError> {
    let path = path.as_ref();
    debug!("reading scene config from {}", path.display());
    let conf = Ini::load_from_file(path)
      .into_report()
      .change_context(ChromaticError::ConfigReadError)
      .attach_printable_lazy(|| format!("config file: {}", path.display()))?;
    SceneConfig::from_ini_with_kind(&conf, kind)
  }

  pub fn to_ini(&self) -> Ini {
    let mut conf = Ini::new();
    conf
      .with_section(Some(SCENE_SECTION))
      .set("Kind", self.kind.kind_name())
      .set("Root", self.kind.root().ui_name())
      .set("Octave", self.octave.number().to_string());
    conf
      .with_section(Some(LAYOUT_SECTION))
      .set(
        "LandscapeMultiplier",
        self.layout.landscape_multiplier.to_string(),
      )
      .set(
        "PortraitMultiplier",
        self.layout.portrait_multiplier.to_string(),
      )
      .set("VertexMultiplier", self.layout.vertex_multiplier.to_string());
    conf
      .with_section(Some(TOUCH_SECTION))
      .set("Velocity", self.touch.velocity.to_string())
      .set("LongPressMillis", self.touch.long_press_millis.to_string());
    conf
      .with_section(Some(OVERLAY_SECTION))
      .set("SkipStart", self.skip_start.to_string())
      .set("SkipStep", self.skip_step.to_string());
    conf
  }

  /// The INI text for this config.
  pub fn to_ini_string(&self) -> Result<String, ChromaticError> {
    let mut buf: Vec<u8> = vec![];
    self
      .to_ini()
      .write_to(&mut buf)
      .into_report()
      .change_context(ChromaticError::ConfigParseError)?;
    String::from_utf8(buf)
      .into_report()
      .change_context(ChromaticError::ConfigParseError)
  }
}

#[cfg(test)]
mod tests {
  use ini::Ini;

  use super::SceneConfig;
  use crate::error::ChromaticError;
  use crate::harmony::{scale::ScaleKind, Octave, PitchClass};
  use crate::scene::metrics::LayoutConfig;

  #[test]
  fn parse_full_config() {
    let s = r#"
[Scene]
Kind=major
Root=F#
Octave=3

[Layout]
LandscapeMultiplier=0.25
PortraitMultiplier=0.35
VertexMultiplier=0.05

[Touch]
Velocity=100
LongPressMillis=750

[Overlay]
SkipStart=2
SkipStep=5
"#;
    let config = SceneConfig::from_ini_str(s).unwrap();
    assert_eq!(config.kind, ScaleKind::Major(PitchClass::Fs));
    assert_eq!(config.octave, Octave::Three);
    assert_eq!(config.layout.landscape_multiplier, 0.25);
    assert_eq!(config.layout.portrait_multiplier, 0.35);
    assert_eq!(config.layout.vertex_multiplier, 0.05);
    assert_eq!(config.touch.velocity, 100);
    assert_eq!(config.touch.long_press_millis, 750);
    assert_eq!(config.skip_start, 2);
    assert_eq!(config.skip_step, 5);

    let scale = config.scale();
    assert_eq!(scale.slot_at(6).unwrap().note.pitch.midi(), 54);
    assert!(scale.is_enabled(6));
  }

  #[test]
  fn missing_keys_take_defaults() {
    let config = SceneConfig::from_ini_str("").unwrap();
    assert_eq!(config, SceneConfig::default());
    assert_eq!(config.kind, ScaleKind::Chromatic);
    assert_eq!(config.layout, LayoutConfig::CHROMATIC);
    assert_eq!(config.touch.velocity, 127);
    assert_eq!(config.touch.long_press_millis, 1000);
    assert_eq!(config.skip_step, 3);
  }

  #[test]
  fn layout_defaults_follow_kind() {
    let config = SceneConfig::from_ini_str("[Scene]\nKind=minor\nRoot=A\n").unwrap();
    assert_eq!(config.kind, ScaleKind::NaturalMinor(PitchClass::A));
    assert_eq!(config.layout, LayoutConfig::MAJOR);

    let config =
      SceneConfig::from_ini_str("[Scene]\nKind=major\n[Layout]\nVertexMultiplier=0.1\n").unwrap();
    assert_eq!(config.layout.vertex_multiplier, 0.1);
    assert_eq!(config.layout.landscape_multiplier, 0.28);
  }

  #[test]
  fn kind_override_sets_layout_defaults() {
    let conf = Ini::load_from_str("[Scene]\nKind=chromatic\nOctave=5\n").unwrap();
    let c_major = ScaleKind::Major(PitchClass::C);
    let config = SceneConfig::from_ini_with_kind(&conf, Some(c_major)).unwrap();
    assert_eq!(config.kind, c_major);
    assert_eq!(config.octave, Octave::Five);
    assert_eq!(config.layout, LayoutConfig::MAJOR);

    // multipliers written in the file still win
    let conf = Ini::load_from_str("[Layout]\nVertexMultiplier=0.1\n").unwrap();
    let config = SceneConfig::from_ini_with_kind(&conf, Some(c_major)).unwrap();
    assert_eq!(config.layout.vertex_multiplier, 0.1);
    assert_eq!(config.layout.portrait_multiplier, 0.375);
  }

  #[test]
  fn malformed_values_name_the_key() {
    let err = SceneConfig::from_ini_str("[Touch]\nVelocity=loud\n").unwrap_err();
    assert_eq!(
      err.current_context(),
      &ChromaticError::InvalidConfigValue {
        key: "Touch.Velocity".to_string(),
        value: "loud".to_string()
      }
    );

    let err = SceneConfig::from_ini_str("[Touch]\nVelocity=200\n").unwrap_err();
    assert!(matches!(
      err.current_context(),
      ChromaticError::InvalidConfigValue { key, .. } if key == "Touch.Velocity"
    ));

    let err = SceneConfig::from_ini_str("[Scene]\nKind=lydian\n").unwrap_err();
    assert!(matches!(
      err.current_context(),
      ChromaticError::InvalidConfigValue { key, .. } if key == "Scene.Kind"
    ));

    let err = SceneConfig::from_ini_str("[Scene]\nOctave=9\n").unwrap_err();
    assert_eq!(
      err.current_context(),
      &ChromaticError::InvalidConfigValue {
        key: "Scene.Octave".to_string(),
        value: "9".to_string()
      }
    );

    let err = SceneConfig::from_ini_str("[Layout]\nVertexMultiplier=-1\n").unwrap_err();
    assert!(matches!(
      err.current_context(),
      ChromaticError::InvalidConfigValue { key, .. } if key == "Layout.VertexMultiplier"
    ));
  }

  #[test]
  fn round_trip_through_ini() {
    let mut config = SceneConfig::for_kind(ScaleKind::Major(PitchClass::Cs));
    config.touch.velocity = 64;
    config.skip_step = -5;
    let text = config.to_ini_string().unwrap();
    assert!(text.contains("[Scene]"));
    assert!(text.contains("Root=C#"));

    let parsed = SceneConfig::from_ini_str(&text).unwrap();
    assert_eq!(parsed, config);
  }

  #[test]
  fn missing_file_is_a_read_error() {
    let err = SceneConfig::load("/nonexistent/scene.ini").unwrap_err();
    assert_eq!(err.current_context(), &ChromaticError::ConfigReadError);
  }
}
