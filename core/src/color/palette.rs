use lazy_static::lazy_static;
use palette::Srgb;

use crate::harmony::{PitchClass, PITCH_CLASS_COUNT};

/// 8-bit sRGB color, as used for markers, labels and lines.
pub type Color = Srgb<u8>;

// one fixed color per pitch class, indexed from C
const PITCH_CLASS_HEX: [u32; PITCH_CLASS_COUNT] = [
  0xFF0000, 0x20B2AA, 0xFFA500, 0x0000FF, 0xFFFF00, 0xFF1493, 0x00FF00, 0xFF4500, 0x00FFFF,
  0xFFD700, 0x8A2BE2, 0xADFF2F,
];

lazy_static! {
  static ref PITCH_CLASS_COLORS: Vec<Color> = PITCH_CLASS_HEX
    .iter()
    .map(|hex| Color::from(*hex))
    .collect();
  pub static ref WHITE: Color = Color::new(0xff, 0xff, 0xff);
  pub static ref BLACK: Color = Color::new(0x00, 0x00, 0x00);

  /// Fill and label color for notes that aren't part of the current scale.
  pub static ref LIGHT_GRAY: Color = Color::new(0xaa, 0xaa, 0xaa);

  /// Stroke color of the outer circle when only part of the chromatic scale is enabled.
  pub static ref OUTLINE_GRAY: Color = Color::new(0xbf, 0xbf, 0xbf);
}

/// Returns the display color for a pitch class.
///
/// Colors depend only on the pitch class, never on the octave or whether the
/// note is enabled in a scale.
///
/// ```rust
/// use chromatic_core::color::{color_for, color_hex};
/// use chromatic_core::harmony::PitchClass;
///
/// assert_eq!(color_hex(color_for(PitchClass::C)), "#ff0000");
/// assert_eq!(color_hex(color_for(PitchClass::As)), "#8a2be2");
/// ```
pub fn color_for(pitch_class: PitchClass) -> Color {
  PITCH_CLASS_COLORS[pitch_class.index()]
}

/// All twelve pitch-class colors, in pitch-class order.
pub fn pitch_class_colors() -> Vec<Color> {
  PITCH_CLASS_COLORS.clone()
}
