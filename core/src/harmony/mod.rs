//! Pitch classes, octaves and absolute pitches in 12-tone equal temperament.
//!
//! Uses the "C4" convention for middle C, so `Pitch::new(Octave::Four, PitchClass::C).midi() == 60`.

pub mod scale;

use std::fmt::Display;
use std::str::FromStr;

use error_stack::{report, Report};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::Serialize;

use crate::error::ChromaticError;

/// Number of pitch classes in an octave.
pub const PITCH_CLASS_COUNT: usize = 12;

/// One of the twelve pitch classes, numbered from C = 0 to B = 11.
#[derive(Debug, FromPrimitive, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize)]
pub enum PitchClass {
  C = 0,
  Cs,
  D,
  Ds,
  E,
  F,
  Fs,
  G,
  Gs,
  A,
  As,
  B,
}

impl PitchClass {
  pub const ALL: [PitchClass; PITCH_CLASS_COUNT] = [
    PitchClass::C,
    PitchClass::Cs,
    PitchClass::D,
    PitchClass::Ds,
    PitchClass::E,
    PitchClass::F,
    PitchClass::Fs,
    PitchClass::G,
    PitchClass::Gs,
    PitchClass::A,
    PitchClass::As,
    PitchClass::B,
  ];

  /// Returns the pitch class with the given index, or `None` if `n` is not in `0 ..= 11`.
  pub fn new(n: u8) -> Option<PitchClass> {
    PitchClass::from_u8(n)
  }

  pub fn index(&self) -> usize {
    *self as usize
  }

  /// Internal name, with sharps spelled as an `s` suffix (e.g. `Cs`).
  pub fn name(&self) -> &'static str {
    use PitchClass::*;
    match self {
      C => "C",
      Cs => "Cs",
      D => "D",
      Ds => "Ds",
      E => "E",
      F => "F",
      Fs => "Fs",
      G => "G",
      Gs => "Gs",
      A => "A",
      As => "As",
      B => "B",
    }
  }

  /// Name shown to users, with sharps spelled with `#` (e.g. `C#`).
  pub fn ui_name(&self) -> &'static str {
    use PitchClass::*;
    match self {
      C => "C",
      Cs => "C#",
      D => "D",
      Ds => "D#",
      E => "E",
      F => "F",
      Fs => "F#",
      G => "G",
      Gs => "G#",
      A => "A",
      As => "A#",
      B => "B",
    }
  }

  pub fn is_sharp(&self) -> bool {
    self.name().len() > 1
  }

  /// Moves the pitch class up (or down, for negative values) by `semitones`, wrapping around the octave.
  ///
  /// ```rust
  /// use chromatic_core::harmony::PitchClass;
  ///
  /// assert_eq!(PitchClass::A.transpose(3), PitchClass::C);
  /// assert_eq!(PitchClass::C.transpose(-1), PitchClass::B);
  /// ```
  pub fn transpose(&self, semitones: i32) -> PitchClass {
    let n = (*self as i32 + semitones).rem_euclid(PITCH_CLASS_COUNT as i32);
    PitchClass::ALL[n as usize]
  }
}

impl Display for PitchClass {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.ui_name())
  }
}

impl FromStr for PitchClass {
  type Err = Report<ChromaticError>;

  /// Accepts both the UI spelling (`F#`) and the internal spelling (`Fs`), case-insensitively.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    PitchClass::ALL
      .iter()
      .find(|pc| {
        pc.name().eq_ignore_ascii_case(trimmed) || pc.ui_name().eq_ignore_ascii_case(trimmed)
      })
      .copied()
      .ok_or_else(|| report!(ChromaticError::UnknownPitchName(s.to_string())))
  }
}

/// Octave number in the "C4 = middle C" convention.
#[derive(
  Debug, Default, FromPrimitive, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize,
)]
pub enum Octave {
  Zero = 0,
  One,
  Two,
  Three,
  #[default]
  Four,
  Five,
  Six,
  Seven,
}

impl Octave {
  /// The octave every scene is built in.
  pub const REFERENCE: Octave = Octave::Four;

  pub const ALL: [Octave; 8] = [
    Octave::Zero,
    Octave::One,
    Octave::Two,
    Octave::Three,
    Octave::Four,
    Octave::Five,
    Octave::Six,
    Octave::Seven,
  ];

  /// Returns the octave with the given number, or `None` if `n` is not in `0 ..= 7`.
  pub fn new(n: u8) -> Option<Octave> {
    Octave::from_u8(n)
  }

  pub fn number(&self) -> u8 {
    *self as u8
  }
}

/// An absolute pitch: an octave plus a pitch class.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize)]
pub struct Pitch {
  pub octave: Octave,
  pub pitch_class: PitchClass,
}

impl Pitch {
  pub fn new(octave: Octave, pitch_class: PitchClass) -> Pitch {
    Pitch {
      octave,
      pitch_class,
    }
  }

  /// Returns the MIDI note number of this pitch.
  ///
  /// ```rust
  /// use chromatic_core::harmony::{Octave, Pitch, PitchClass};
  ///
  /// assert_eq!(Pitch::new(Octave::Four, PitchClass::C).midi(), 60);
  /// assert_eq!(Pitch::new(Octave::Four, PitchClass::A).midi(), 69);
  /// ```
  pub fn midi(&self) -> u8 {
    (self.octave.number() + 1) * 12 + self.pitch_class as u8
  }

  /// Inverse of [`Pitch::midi`]. Returns `None` for note numbers outside octaves 0 ..= 7.
  pub fn from_midi(note_num: u8) -> Option<Pitch> {
    if note_num < 12 {
      return None;
    }
    let octave = Octave::new(note_num / 12 - 1)?;
    let pitch_class = PitchClass::new(note_num % 12)?;
    Some(Pitch::new(octave, pitch_class))
  }

  /// Name shown to users, e.g. `C#4`.
  pub fn name(&self) -> String {
    format!("{}{}", self.pitch_class.ui_name(), self.octave.number())
  }

  /// Internal name used for node ids and log output, e.g. `Cs4`.
  pub fn debug_name(&self) -> String {
    format!("{}{}", self.pitch_class.name(), self.octave.number())
  }
}

impl Display for Pitch {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::{Octave, Pitch, PitchClass};

  #[test]
  fn default_octave_is_reference() {
    assert_eq!(Octave::default(), Octave::REFERENCE);
    assert_eq!(Octave::default().number(), 4);
  }

  #[test]
  fn midi_number_follows_c4_convention() {
    for octave in Octave::ALL {
      for pc in PitchClass::ALL {
        let expected = (octave as u32 + 1) * 12 + pc as u32;
        assert_eq!(Pitch::new(octave, pc).midi() as u32, expected);
      }
    }
  }

  #[test]
  fn midi_number_is_strictly_increasing() {
    let mut previous: Option<u8> = None;
    for octave in Octave::ALL {
      for pc in PitchClass::ALL {
        let n = Pitch::new(octave, pc).midi();
        if let Some(p) = previous {
          assert!(n > p, "{n} should be greater than {p}");
        }
        previous = Some(n);
      }
    }
  }

  #[test]
  fn from_midi_inverts_midi() {
    for octave in Octave::ALL {
      for pc in PitchClass::ALL {
        let p = Pitch::new(octave, pc);
        assert_eq!(Pitch::from_midi(p.midi()), Some(p));
      }
    }
    assert_eq!(Pitch::from_midi(11), None);
    assert_eq!(Pitch::from_midi(108), None);
  }

  #[test]
  fn pitch_names() {
    let cs4 = Pitch::new(Octave::Four, PitchClass::Cs);
    assert_eq!(cs4.name(), "C#4");
    assert_eq!(cs4.debug_name(), "Cs4");
    assert_eq!(cs4.to_string(), "C#4");

    let b0 = Pitch::new(Octave::Zero, PitchClass::B);
    assert_eq!(b0.name(), "B0");
    assert_eq!(b0.debug_name(), "B0");
  }

  #[test]
  fn pitch_class_from_index() {
    assert_eq!(PitchClass::new(0), Some(PitchClass::C));
    assert_eq!(PitchClass::new(11), Some(PitchClass::B));
    assert_eq!(PitchClass::new(12), None);
    assert_eq!(Octave::new(7), Some(Octave::Seven));
    assert_eq!(Octave::new(8), None);
  }

  #[test]
  fn pitch_class_parses_both_spellings() {
    assert_eq!("F#".parse::<PitchClass>().unwrap(), PitchClass::Fs);
    assert_eq!("fs".parse::<PitchClass>().unwrap(), PitchClass::Fs);
    assert_eq!(" c ".parse::<PitchClass>().unwrap(), PitchClass::C);
    assert!("H".parse::<PitchClass>().is_err());
  }

  #[test]
  fn sharps() {
    let sharps: Vec<PitchClass> = PitchClass::ALL.into_iter().filter(|pc| pc.is_sharp()).collect();
    assert_eq!(
      sharps,
      vec![
        PitchClass::Cs,
        PitchClass::Ds,
        PitchClass::Fs,
        PitchClass::Gs,
        PitchClass::As
      ]
    );
  }
}
