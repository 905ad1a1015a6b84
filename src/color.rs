//! Colour values shared by the simulation and the renderer

use serde::{Deserialize, Serialize};

/// A cosmetic colour, kept in the form it was authored in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Color {
    /// 0xRRGGBB
    Rgb(u32),
    /// Hue in degrees, saturation and lightness in percent
    Hsl { h: f32, s: f32, l: f32 },
}

impl Color {
    /// Shield aura and shield particles
    pub const SHIELD: Color = Color::Rgb(0x4dabf7);
    /// Fallback for anything without a colour of its own
    pub const WHITE: Color = Color::Rgb(0xffffff);

    pub const fn rgb(hex: u32) -> Self {
        Color::Rgb(hex & 0x00ff_ffff)
    }

    pub fn hsl(h: f32, s: f32, l: f32) -> Self {
        Color::Hsl {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    /// CSS colour string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        match *self {
            Color::Rgb(hex) => format!("#{:06x}", hex),
            Color::Hsl { h, s, l } => format!("hsl({:.0}, {:.0}%, {:.0}%)", h, s, l),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_css() {
        assert_eq!(Color::rgb(0xe63946).to_css(), "#e63946");
        assert_eq!(Color::rgb(0x111111).to_css(), "#111111");
    }

    #[test]
    fn test_hsl_wraps_hue() {
        assert_eq!(Color::hsl(370.0, 70.0, 40.0).to_css(), "hsl(10, 70%, 40%)");
    }
}
