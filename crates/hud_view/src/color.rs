use serde::{Deserialize, Serialize};

use crate::HudError;

/// RGB colour with channels in `[0, 1]`. Serialized as packed `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "u32")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Builds a colour from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    pub fn to_hex(self) -> u32 {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<u32> for Rgb {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl From<Rgb> for u32 {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// Interpolates each channel as `a * (1 - t) + b * t`.
///
/// `t = 0` yields `a` and `t = 1` yields `b` exactly.
pub fn interpolate_color(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let mix = |x: f32, y: f32| x * (1.0 - t) + y * t;
    Rgb {
        r: mix(a.r, b.r),
        g: mix(a.g, b.g),
        b: mix(a.b, b.b),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Packed(u32),
    Text(String),
}

impl TryFrom<ColorRepr> for Rgb {
    type Error = HudError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Packed(hex) => Ok(Rgb::from_hex(hex)),
            ColorRepr::Text(text) => {
                let digits = text
                    .trim()
                    .trim_start_matches('#')
                    .trim_start_matches("0x");
                if digits.len() != 6 {
                    return Err(HudError::InvalidConfig(format!(
                        "colour {text:?} must have six hex digits"
                    )));
                }
                u32::from_str_radix(digits, 16)
                    .map(Rgb::from_hex)
                    .map_err(|_| HudError::InvalidConfig(format!("colour {text:?} is not hex")))
            }
        }
    }
}
