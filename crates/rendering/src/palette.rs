//! Hex palette strings → Bevy colors.

use bevy::prelude::*;

/// Parse a `#rrggbb` (or `rrggbb`, `#rgb`, `#rrggbbaa`) color, falling
/// back to `fallback` with a warning when the string is not valid hex.
pub fn parse_color(hex: &str, fallback: Color) -> Color {
    match Srgba::hex(hex) {
        Ok(c) => Color::Srgba(c),
        Err(e) => {
            warn!("Invalid palette color {hex:?} ({e:?}), using fallback");
            fallback
        }
    }
}
