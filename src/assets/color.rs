use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{AdcraftError, AdcraftResult};

/// Euclidean RGB distance below which two colors count as "similar".
pub const SIMILARITY_THRESHOLD: f64 = 30.0;

/// A CSS color as accepted by the templates: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()` or `rgba()`.
///
/// Channels are stored as straight-alpha RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CssColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (straight).
    pub a: u8,
}

impl CssColor {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a CSS color string.
    pub fn parse(s: &str) -> AdcraftResult<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_fn(body);
        }
        Err(AdcraftError::validation(format!(
            "unsupported color \"{s}\" (expected #hex, rgb() or rgba())"
        )))
    }

    /// Perceived brightness in `[0, 255]` using the ITU-R BT.601 weights.
    pub fn brightness(self) -> f64 {
        (f64::from(self.r) * 299.0 + f64::from(self.g) * 587.0 + f64::from(self.b) * 114.0)
            / 1000.0
    }

    /// `true` when the color reads closer to white than to black.
    pub fn is_light(self) -> bool {
        self.brightness() > 128.0
    }

    /// Black on light colors, white on dark ones.
    pub fn contrasting(self) -> Self {
        if self.is_light() {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }

    /// Euclidean distance between the RGB channels of two colors.
    pub fn distance(self, other: Self) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// `true` when the two colors are closer than [`SIMILARITY_THRESHOLD`].
    pub fn similar(self, other: Self) -> bool {
        self.distance(other) < SIMILARITY_THRESHOLD
    }

    /// Same color with alpha scaled by `opacity`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (f32::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Premultiplied form used by the rasterizer.
    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl FromStr for CssColor {
    type Err = AdcraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CssColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CssColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn parse_hex(s: &str) -> AdcraftResult<CssColor> {
    fn hex_byte(pair: &str) -> AdcraftResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| AdcraftError::validation(format!("invalid hex byte \"{pair}\"")))
    }
    if !s.is_ascii() {
        return Err(AdcraftError::validation("hex color must be ascii"));
    }

    match s.len() {
        3 => {
            let mut ch = [0u8; 3];
            for (i, c) in s.chars().enumerate() {
                let pair = format!("{c}{c}");
                ch[i] = hex_byte(&pair)?;
            }
            Ok(CssColor::rgb(ch[0], ch[1], ch[2]))
        }
        6 => Ok(CssColor::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(CssColor {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err(AdcraftError::validation(
            "hex color must be #RGB, #RRGGBB or #RRGGBBAA",
        )),
    }
}

fn parse_rgb_fn(body: &str) -> AdcraftResult<CssColor> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(AdcraftError::validation(
            "rgb()/rgba() takes 3 or 4 components",
        ));
    }
    let channel = |v: &str| -> AdcraftResult<u8> {
        let n: f64 = v
            .parse()
            .map_err(|_| AdcraftError::validation(format!("invalid color channel \"{v}\"")))?;
        Ok(n.round().clamp(0.0, 255.0) as u8)
    };
    let a = match parts.get(3) {
        Some(v) => {
            let f: f64 = v
                .parse()
                .map_err(|_| AdcraftError::validation(format!("invalid alpha \"{v}\"")))?;
            (f.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };
    Ok(CssColor {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a,
    })
}

/// Text and CTA colors derived from a creative's background and the app's brand color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    /// Creative background.
    pub bg_color: CssColor,
    /// Caption color.
    pub text_color: CssColor,
    /// CTA button fill.
    pub cta_color: CssColor,
    /// CTA label color.
    pub cta_text_color: CssColor,
}

impl Palette {
    /// Derive readable text and CTA colors for `bg`, preferring `brand` for the CTA fill.
    ///
    /// Text takes the contrasting color of the background. The CTA keeps the brand color unless
    /// it blends into the background, and its label is flipped when it blends into the CTA.
    pub fn derive(bg: CssColor, brand: CssColor) -> Self {
        let text = bg.contrasting();

        let mut cta = brand;
        if bg.similar(cta) {
            cta = bg.contrasting();
        }

        let mut cta_text = text;
        if cta.similar(cta_text) {
            cta_text = cta.contrasting();
        }

        Self {
            bg_color: bg,
            text_color: text,
            cta_color: cta,
            cta_text_color: cta_text,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
