//! Scales as twelve index-aligned pitch-class slots, each either enabled or disabled.

use std::fmt::Display;
use std::str::FromStr;

use error_stack::{report, Report, Result};

use super::{Octave, Pitch, PitchClass, PITCH_CLASS_COUNT};
use crate::color::{color_for, Color};
use crate::error::ChromaticError;

/// Semitone offsets of the major scale: whole, whole, half, whole, whole, whole, half.
pub const MAJOR_INTERVALS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Semitone offsets of the natural minor scale.
pub const NATURAL_MINOR_INTERVALS: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

/// A pitch paired with its display color.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ScaleNote {
  pub pitch: Pitch,
  pub color: Color,
}

impl ScaleNote {
  /// Creates a ScaleNote whose color is derived from the pitch class.
  pub fn new(pitch: Pitch) -> ScaleNote {
    ScaleNote {
      pitch,
      color: color_for(pitch.pitch_class),
    }
  }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ScaleSlot {
  pub note: ScaleNote,
  pub enabled: bool,
}

impl ScaleSlot {
  pub fn new(note: ScaleNote, enabled: bool) -> ScaleSlot {
    ScaleSlot { note, enabled }
  }
}

/// Twelve slots, one per pitch class. Slot `i` always holds pitch class `i`,
/// so a slot index doubles as a vertex index on the chromatic circle.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Scale {
  slots: Vec<ScaleSlot>,
}

impl Scale {
  /// Builds a scale from exactly twelve slots ordered by pitch class.
  ///
  /// Any other slot count, or a slot whose pitch class doesn't match its
  /// index, is a configuration error.
  pub fn new(slots: Vec<ScaleSlot>) -> Result<Scale, ChromaticError> {
    if slots.len() != PITCH_CLASS_COUNT {
      return Err(report!(ChromaticError::InvalidSlotCount {
        expected: PITCH_CLASS_COUNT,
        actual: slots.len(),
      }));
    }

    for (index, slot) in slots.iter().enumerate() {
      let pitch_class = slot.note.pitch.pitch_class;
      if pitch_class.index() != index {
        return Err(
          report!(ChromaticError::MisalignedSlot {
            index,
            pitch_class: pitch_class as u8,
          })
          .attach_printable(format!("slot note: {}", slot.note.pitch.debug_name())),
        );
      }
    }

    Ok(Scale { slots })
  }

  /// All twelve pitch classes in the reference octave, all enabled.
  pub fn chromatic() -> Scale {
    Scale::from_intervals(Octave::REFERENCE, PitchClass::C, &CHROMATIC_INTERVALS)
  }

  /// The major scale on `root`, in the reference octave.
  ///
  /// ```rust
  /// use chromatic_core::harmony::{PitchClass, scale::Scale};
  ///
  /// let c_major = Scale::major(PitchClass::C);
  /// assert_eq!(c_major.enabled_indices(), vec![0, 2, 4, 5, 7, 9, 11]);
  /// ```
  pub fn major(root: PitchClass) -> Scale {
    Scale::from_intervals(Octave::REFERENCE, root, &MAJOR_INTERVALS)
  }

  pub fn natural_minor(root: PitchClass) -> Scale {
    Scale::from_intervals(Octave::REFERENCE, root, &NATURAL_MINOR_INTERVALS)
  }

  /// Enables the slots at the given semitone offsets from `root` (taken modulo 12),
  /// and disables the rest. Every slot's pitch is in `octave`.
  pub fn from_intervals(octave: Octave, root: PitchClass, intervals: &[u8]) -> Scale {
    let slots = PitchClass::ALL
      .iter()
      .map(|pc| {
        let offset = (pc.index() + PITCH_CLASS_COUNT - root.index()) % PITCH_CLASS_COUNT;
        let enabled = intervals
          .iter()
          .any(|i| (*i as usize) % PITCH_CLASS_COUNT == offset);
        ScaleSlot::new(ScaleNote::new(Pitch::new(octave, *pc)), enabled)
      })
      .collect();

    Scale { slots }
  }

  /// Returns the slot at `index`, or `None` if `index` is not in `0 .. 12`.
  pub fn slot_at(&self, index: usize) -> Option<&ScaleSlot> {
    self.slots.get(index)
  }

  pub fn slots(&self) -> &[ScaleSlot] {
    &self.slots
  }

  pub fn iter(&self) -> impl Iterator<Item = &ScaleSlot> {
    self.slots.iter()
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_enabled(&self, index: usize) -> bool {
    self.slot_at(index).map(|s| s.enabled).unwrap_or(false)
  }

  /// Indices of the enabled slots, in ascending order.
  pub fn enabled_indices(&self) -> Vec<usize> {
    self
      .slots
      .iter()
      .enumerate()
      .filter(|(_, s)| s.enabled)
      .map(|(i, _)| i)
      .collect()
  }

  pub fn enabled_count(&self) -> usize {
    self.slots.iter().filter(|s| s.enabled).count()
  }
}

const CHROMATIC_INTERVALS: [u8; PITCH_CLASS_COUNT] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// The named scales a scene can be built from.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ScaleKind {
  #[default]
  Chromatic,
  Major(PitchClass),
  NaturalMinor(PitchClass),
}

impl ScaleKind {
  pub fn build(&self) -> Scale {
    self.build_in(Octave::REFERENCE)
  }

  pub fn build_in(&self, octave: Octave) -> Scale {
    use ScaleKind::*;
    match *self {
      Chromatic => Scale::from_intervals(octave, PitchClass::C, &CHROMATIC_INTERVALS),
      Major(root) => Scale::from_intervals(octave, root, &MAJOR_INTERVALS),
      NaturalMinor(root) => Scale::from_intervals(octave, root, &NATURAL_MINOR_INTERVALS),
    }
  }

  pub fn root(&self) -> PitchClass {
    use ScaleKind::*;
    match *self {
      Chromatic => PitchClass::C,
      Major(root) | NaturalMinor(root) => root,
    }
  }

  /// Short lowercase name, as accepted by [`ScaleKind::parse_with_root`].
  pub fn kind_name(&self) -> &'static str {
    use ScaleKind::*;
    match self {
      Chromatic => "chromatic",
      Major(_) => "major",
      NaturalMinor(_) => "minor",
    }
  }

  /// Parses a kind name (`chromatic`, `major`, `minor`) and applies `root` where it matters.
  pub fn parse_with_root(kind: &str, root: PitchClass) -> Result<ScaleKind, ChromaticError> {
    match kind.trim().to_ascii_lowercase().as_str() {
      "chromatic" => Ok(ScaleKind::Chromatic),
      "major" => Ok(ScaleKind::Major(root)),
      "minor" | "natural_minor" => Ok(ScaleKind::NaturalMinor(root)),
      _ => Err(report!(ChromaticError::UnknownScaleKind(kind.to_string()))),
    }
  }
}

impl Display for ScaleKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use ScaleKind::*;
    match self {
      Chromatic => write!(f, "chromatic"),
      Major(root) => write!(f, "{root} major"),
      NaturalMinor(root) => write!(f, "{root} minor"),
    }
  }
}

impl FromStr for ScaleKind {
  type Err = Report<ChromaticError>;

  /// Parses `chromatic`, or `<kind>` / `<root> <kind>` such as `major`, `F# major`, `a minor`.
  /// A missing root defaults to C.
  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    match parts.as_slice() {
      [kind] => ScaleKind::parse_with_root(kind, PitchClass::C),
      [root, kind] => {
        let root = root.parse::<PitchClass>()?;
        ScaleKind::parse_with_root(kind, root)
      }
      _ => Err(report!(ChromaticError::UnknownScaleKind(s.to_string()))),
    }
  }
}
