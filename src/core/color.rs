//! RGB triples as stored in palettes.
//!
//! Channels are kept as `f32` so interpolation can move smoothly between
//! integer endpoints. Anything leaving the engine (CSS strings, hex inputs)
//! goes through the integer conversions here.

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Errors produced while parsing or validating colors.
#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("invalid hex color {0:?}, expected #rrggbb")]
    InvalidHex(String),

    #[error("channel value {0} outside 0..=255")]
    OutOfRange(f32),
}

/// A single color with channels in the 0..=255 range.
///
/// Serializes as a bare `[r, g, b]` array of rounded integers, which is the
/// persisted format. Fractional arrays are still accepted when reading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Rgb(pub [f32; 3]);

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rounded().serialize(serializer)
    }
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }
        let n = u32::from_str_radix(digits, 16).map_err(|_| ColorError::InvalidHex(hex.to_string()))?;
        Ok(Self::new(
            ((n >> 16) & 0xff) as f32,
            ((n >> 8) & 0xff) as f32,
            (n & 0xff) as f32,
        ))
    }

    /// Format as `#rrggbb`, rounding fractional channels.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.rounded();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Channels truncated toward zero, as drawn on screen.
    pub fn floored(&self) -> [u8; 3] {
        self.0.map(|c| c.clamp(0.0, 255.0).floor() as u8)
    }

    fn rounded(&self) -> [u8; 3] {
        self.0.map(|c| c.clamp(0.0, 255.0).round() as u8)
    }

    /// `rgb(r,g,b)` with floored channels.
    pub fn css(&self) -> String {
        let [r, g, b] = self.floored();
        format!("rgb({},{},{})", r, g, b)
    }

    /// `rgba(r,g,b,a)` with floored channels.
    pub fn css_alpha(&self, alpha: f32) -> String {
        let [r, g, b] = self.floored();
        format!("rgba({},{},{},{})", r, g, b, alpha)
    }

    /// Move each channel a fraction `t` of the way toward `target`.
    #[inline]
    pub fn lerp_toward(&mut self, target: &Rgb, t: f32) {
        for (c, goal) in self.0.iter_mut().zip(target.0.iter()) {
            *c += (goal - *c) * t;
        }
    }

    /// Largest per-channel distance to `other`.
    pub fn max_channel_delta(&self, other: &Rgb) -> f32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }

    /// Reject NaN or values outside 0..=255.
    pub fn validate(&self) -> Result<(), ColorError> {
        match self.0.iter().find(|c| !(0.0..=255.0).contains(*c)) {
            Some(bad) => Err(ColorError::OutOfRange(*bad)),
            None => Ok(()),
        }
    }
}
