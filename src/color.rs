use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Colour helpers for the charts
// ---------------------------------------------------------------------------

/// Parse `#RRGGBB` / `#RGB` (leading `#` optional) into an egui colour.
pub fn parse_hex_color(text: &str) -> Option<Color32> {
    let rgb = Srgb::<u8>::from_str(text.trim()).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// A darker shade of `color`, used for bar outlines.
pub fn outline_for(color: Color32) -> Color32 {
    let rgb: Srgb = Srgb::new(color.r(), color.g(), color.b()).into_format();
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness *= 0.65;
    let dark: Srgb = hsl.into_color();
    Color32::from_rgb(
        (dark.red * 255.0) as u8,
        (dark.green * 255.0) as u8,
        (dark.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours_parse() {
        assert_eq!(parse_hex_color("#0083B8"), Some(Color32::from_rgb(0, 0x83, 0xB8)));
        assert_eq!(parse_hex_color("0083b8"), Some(Color32::from_rgb(0, 0x83, 0xB8)));
        assert_eq!(parse_hex_color("#fff"), Some(Color32::WHITE));
        assert_eq!(parse_hex_color("teal"), None);
    }

    #[test]
    fn outline_is_darker() {
        let base = Color32::from_rgb(0, 0x83, 0xB8);
        let outline = outline_for(base);
        assert!(outline.g() < base.g());
        assert!(outline.b() < base.b());
    }
}
