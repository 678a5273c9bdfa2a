//! Pitch-class colors and helpers for picking legible label colors.

pub mod palette;
pub mod utils;

pub use self::palette::{color_for, Color, BLACK, LIGHT_GRAY, OUTLINE_GRAY, WHITE};
pub use self::utils::{color_hex, contrasting_color, parse_color, relative_luminance, ToHexColorStr};
