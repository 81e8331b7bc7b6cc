//! RGBA color stored per square and written to the render texture.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 4-byte color, `#[repr(C)]` so a row of colors can be copied straight into an RGBA texture.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Opaque color from 8-bit channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Opaque color from channels in `[0, 1]`. Out-of-range values saturate.
    #[must_use]
    pub fn from_floats(r: f32, g: f32, b: f32) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(channel(r), channel(g), channel(b))
    }

    #[must_use]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_is_4_bytes() {
        assert_eq!(std::mem::size_of::<Color>(), 4);
    }

    #[test]
    fn from_floats_saturates() {
        assert_eq!(Color::from_floats(0.0, 0.0, 1.0), Color::new(0, 0, 255));
        assert_eq!(Color::from_floats(-3.0, 2.0, 0.5), Color::new(0, 255, 128));
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(format!("{}", Color::new(204, 171, 114)), "#ccab72ff");
    }
}
