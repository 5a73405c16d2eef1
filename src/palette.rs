//! Colors and the fixed palettes bursts draw from.
//!
//! Colors are stored as straight (non-premultiplied) RGB in `0.0..=1.0` and
//! serialize as `#RRGGBB` strings.

use crate::error::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel, 0-1.
    pub r: f32,
    /// Green channel, 0-1.
    pub g: f32,
    /// Blue channel, 0-1.
    pub b: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    /// Color from float channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ConfigError::Invalid(format!("bad hex color {hex:?}")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ConfigError::Invalid(format!("bad hex color {hex:?}")))
        };
        Ok(Self::rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        let [r, g, b, _] = self.to_rgba8(1.0);
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Quantize to 8-bit RGBA with the given alpha.
    pub fn to_rgba8(&self, alpha: f32) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(alpha)]
    }

    /// Channels as an array, for GPU upload.
    #[inline]
    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// An ordered set of colors a burst picks from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<Color>);

impl Palette {
    /// Build a palette. Rejects an empty list.
    pub fn new(colors: Vec<Color>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::Invalid("palette must not be empty".into()));
        }
        Ok(Self(colors))
    }

    /// Build a palette from hex strings.
    pub fn from_hex(colors: &[&str]) -> Result<Self, ConfigError> {
        let parsed = colors
            .iter()
            .map(|c| Color::from_hex(c))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    /// Gold, orange, light gold, coral, teal, mint.
    pub fn fireworks() -> Self {
        Self(vec![
            Color::rgb8(0xFF, 0xD7, 0x00),
            Color::rgb8(0xFF, 0xA5, 0x00),
            Color::rgb8(0xFF, 0xE5, 0x5C),
            Color::rgb8(0xFF, 0x6B, 0x6B),
            Color::rgb8(0x4E, 0xCD, 0xC4),
            Color::rgb8(0x95, 0xE1, 0xD3),
        ])
    }

    /// The fireworks palette without mint.
    pub fn celebration() -> Self {
        let mut colors = Self::fireworks().0;
        colors.truncate(5);
        Self(colors)
    }

    /// The three golds used for greeting and copy-link confetti.
    pub fn golds() -> Self {
        let mut colors = Self::fireworks().0;
        colors.truncate(3);
        Self(colors)
    }

    /// Gold and orange, used for share confetti.
    pub fn share() -> Self {
        let mut colors = Self::fireworks().0;
        colors.truncate(2);
        Self(colors)
    }

    /// Pick one color uniformly at random.
    ///
    /// An empty palette (only reachable by deserializing one without
    /// validation) yields white.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        if self.0.is_empty() {
            return Color::WHITE;
        }
        self.0[rng.gen_range(0..self.0.len())]
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the palette has no colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The colors in order.
    pub fn colors(&self) -> &[Color] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::fireworks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_fireworks_palette_hex() {
        let hex: Vec<String> = Palette::fireworks().colors().iter().map(Color::to_hex).collect();
        assert_eq!(
            hex,
            ["#FFD700", "#FFA500", "#FFE55C", "#FF6B6B", "#4ECDC4", "#95E1D3"]
        );
    }

    #[test]
    fn test_subset_palettes() {
        assert_eq!(Palette::celebration().len(), 5);
        assert_eq!(Palette::golds().len(), 3);
        assert_eq!(Palette::share().colors(), &Palette::fireworks().colors()[..2]);
    }

    #[test]
    fn test_from_hex_accepts_missing_hash() {
        let c = Color::from_hex("4ecdc4").unwrap();
        assert_eq!(c.to_hex(), "#4ECDC4");
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Color::from_hex("#FFD7").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#FFD7é").is_err());
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(Palette::new(Vec::new()).is_err());
    }

    #[test]
    fn test_choose_covers_every_color() {
        let palette = Palette::fireworks();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = [false; 6];
        for _ in 0..500 {
            let c = palette.choose(&mut rng);
            let i = palette.colors().iter().position(|p| *p == c).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_palette_serde_as_hex_strings() {
        let palette = Palette::share();
        let json = serde_json::to_string(&palette).unwrap();
        assert_eq!(json, r##"["#FFD700","#FFA500"]"##);
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, palette);
    }
}
