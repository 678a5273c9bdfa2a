use std::str::FromStr;

use error_stack::{IntoReport, Result, ResultExt};

use super::palette::{Color, BLACK, WHITE};
use crate::error::ChromaticError;

/// Returns the color as a CSS-compatible hex string, with `#` prefix.
pub fn color_hex(col: Color) -> String {
  format!("#{col:x}")
}

/// Relative luminance of `col`, weighting the channels as `0.2126 R + 0.7152 G + 0.0722 B`.
///
/// Channels are normalized to `0.0 ..= 1.0` and used as-is; no gamma
/// expansion is applied.
pub fn relative_luminance(col: Color) -> f32 {
  let c: palette::Srgb<f32> = col.into_format();
  0.2126 * c.red + 0.7152 * c.green + 0.0722 * c.blue
}

/// Returns a legible text color for the given background color.
///
/// Returns black for "bright" colors (luminance > 0.5) and white otherwise.
///
/// ```rust
/// use chromatic_core::color::{contrasting_color, Color, BLACK, WHITE};
///
/// assert_eq!(contrasting_color(Color::new(0xff, 0xff, 0xff)), *BLACK);
/// assert_eq!(contrasting_color(Color::new(0, 0, 0)), *WHITE);
/// ```
pub fn contrasting_color(bg: Color) -> Color {
  if relative_luminance(bg) > 0.5 {
    *BLACK
  } else {
    *WHITE
  }
}

/// Parses a hex color such as `#20b2aa`, `20b2aa` or `#fff`.
pub fn parse_color(s: &str) -> Result<Color, ChromaticError> {
  Color::from_str(s.trim())
    .into_report()
    .change_context_lazy(|| ChromaticError::InvalidColor(s.to_string()))
}

pub trait ToHexColorStr {
  fn to_hex_color(&self) -> String;
}

impl ToHexColorStr for Color {
  fn to_hex_color(&self) -> String {
    color_hex(*self)
  }
}

#[cfg(test)]
mod tests {
  use super::{contrasting_color, parse_color, relative_luminance, ToHexColorStr};
  use crate::error::ChromaticError;
  use crate::color::palette::{color_for, Color, BLACK, WHITE};
  use crate::harmony::PitchClass;

  #[test]
  fn luminance_of_primaries() {
    assert!((relative_luminance(Color::new(255, 0, 0)) - 0.2126).abs() < 1e-6);
    assert!((relative_luminance(Color::new(0, 255, 0)) - 0.7152).abs() < 1e-6);
    assert!((relative_luminance(Color::new(0, 0, 255)) - 0.0722).abs() < 1e-6);
    assert!((relative_luminance(Color::new(255, 255, 255)) - 1.0).abs() < 1e-6);
  }

  #[test]
  fn white_and_black_contrast() {
    assert_eq!(contrasting_color(*WHITE), *BLACK);
    assert_eq!(contrasting_color(*BLACK), *WHITE);
  }

  #[test]
  fn mid_gray_threshold() {
    // 0x80 / 255 is just over 0.5
    assert_eq!(contrasting_color(Color::new(0x80, 0x80, 0x80)), *BLACK);
    assert_eq!(contrasting_color(Color::new(0x7f, 0x7f, 0x7f)), *WHITE);
  }

  #[test]
  fn pitch_class_label_colors() {
    use PitchClass::*;
    // yellow, green, cyan, gold and yellow-green markers get black labels
    for pc in [E, Fs, Gs, A, B, D] {
      assert_eq!(contrasting_color(color_for(pc)), *BLACK, "label color for {pc}");
    }
    for pc in [C, Ds, F, G, As] {
      assert_eq!(contrasting_color(color_for(pc)), *WHITE, "label color for {pc}");
    }
  }

  #[test]
  fn hex_strings() {
    assert_eq!(Color::new(0x20, 0xb2, 0xaa).to_hex_color(), "#20b2aa");
    assert_eq!(BLACK.to_hex_color(), "#000000");
  }

  #[test]
  fn parse_hex_colors() {
    assert_eq!(parse_color("#20b2aa").unwrap(), Color::new(0x20, 0xb2, 0xaa));
    assert_eq!(parse_color("ff0000").unwrap(), Color::new(0xff, 0, 0));
    let err = parse_color("not a color").unwrap_err();
    assert_eq!(
      err.current_context(),
      &ChromaticError::InvalidColor("not a color".to_string())
    );
  }
}
