/// Color mapping utilities
///
/// This module handles the diverging palette used for the scatter points:
/// - Parsing the hex palette into iced colors
/// - Mapping a vote share onto the palette (linear, 11 bins over [0, 1])

use iced::Color;

/// ColorBrewer RdBu, 11 classes, ordered red → blue.
///
/// Low Democratic share lands on the red end, high share on the blue end.
pub const RD_BU_11: [&str; 11] = [
    "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7",
    "#d1e5f0", "#92c5de", "#4393c3", "#2166ac", "#053061",
];

/// Color used for values the mapper cannot place (NaN)
pub const NAN_COLOR: Color = Color {
    r: 0.5,
    g: 0.5,
    b: 0.5,
    a: 1.0,
};

/// Parse "#rrggbb" into an opaque color
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
}

/// Linear value → palette mapping over a fixed `[low, high]` range.
///
/// The range is split into equal bins, one per palette entry. Values at or
/// beyond the ends clamp to the first or last color.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearColorMapper {
    palette: Vec<Color>,
    low: f64,
    high: f64,
}

impl LinearColorMapper {
    pub fn new(palette: Vec<Color>, low: f64, high: f64) -> Self {
        Self { palette, low, high }
    }

    /// The vote-share mapper: RdBu11 (red → blue) over [0, 1]
    pub fn vote_share() -> Self {
        let palette = RD_BU_11.iter().filter_map(|h| hex_to_color(h)).collect();
        Self::new(palette, 0.0, 1.0)
    }

    pub fn map(&self, value: f64) -> Color {
        if !value.is_finite() || self.palette.is_empty() || self.high <= self.low {
            return NAN_COLOR;
        }
        let n = self.palette.len();
        let t = (value - self.low) / (self.high - self.low);
        let idx = (t * n as f64).floor().clamp(0.0, (n - 1) as f64) as usize;
        self.palette[idx]
    }
}
