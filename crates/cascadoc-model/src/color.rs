//! sRGB colors with the shade/tint transforms used by OOXML themes.
//!
//! Word applies two distinct families of transforms: `themeShade` and
//! `themeTint` on colors work in HSL space (lightness scaled), while
//! the run-level shade/tint attributes blend each RGB channel toward
//! black or white. Both take their amount as a 2-digit hex string.

use std::fmt;

use serde::Serialize;

use crate::error::ModelError;

/// An sRGB color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CssColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl CssColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        CssColor { red, green, blue }
    }

    /// Parse a 6-digit hex string, with or without a leading `#`
    pub fn from_hex(value: &str) -> Result<Self, ModelError> {
        let hex = value.strip_prefix('#').unwrap_or(value);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ModelError::InvalidColor(value.to_string()));
        }
        let channel = |range| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ModelError::InvalidColor(value.to_string()))
        };
        Ok(CssColor {
            red: channel(0..2)?,
            green: channel(2..4)?,
            blue: channel(4..6)?,
        })
    }

    /// Uppercase hex form without `#`
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// CSS form `#RRGGBB`
    pub fn css(&self) -> String {
        format!("#{}", self.hex())
    }

    /// Darken in HSL space: lightness is scaled by the amount
    pub fn apply_hsl_shade(&mut self, amount: &str) -> Result<(), ModelError> {
        let amount = parse_amount(amount)?;
        let (h, l, s) = self.to_hls();
        self.set_from_hls(h, l * amount, s);
        Ok(())
    }

    /// Lighten in HSL space: lightness moves toward 1 by the amount
    pub fn apply_hsl_tint(&mut self, amount: &str) -> Result<(), ModelError> {
        let amount = parse_amount(amount)?;
        let (h, l, s) = self.to_hls();
        self.set_from_hls(h, l * amount + (1.0 - amount), s);
        Ok(())
    }

    /// Darken per channel: each channel is scaled by the amount
    pub fn apply_rgb_shade(&mut self, amount: &str) -> Result<(), ModelError> {
        let amount = parse_amount(amount)?;
        let shade = |c: u8| (c as f64 * amount).round() as u8;
        self.red = shade(self.red);
        self.green = shade(self.green);
        self.blue = shade(self.blue);
        Ok(())
    }

    /// Lighten per channel: each channel is blended toward 255
    pub fn apply_rgb_tint(&mut self, amount: &str) -> Result<(), ModelError> {
        let amount = parse_amount(amount)?;
        let tint = |c: u8| ((1.0 - amount) * (255 - c) as f64 + c as f64).round() as u8;
        self.red = tint(self.red);
        self.green = tint(self.green);
        self.blue = tint(self.blue);
        Ok(())
    }

    /// Hue, lightness, saturation in 0.0..=1.0
    pub fn to_hls(&self) -> (f64, f64, f64) {
        rgb_to_hls(
            self.red as f64 / 255.0,
            self.green as f64 / 255.0,
            self.blue as f64 / 255.0,
        )
    }

    fn set_from_hls(&mut self, h: f64, l: f64, s: f64) {
        let (r, g, b) = hls_to_rgb(h, l.clamp(0.0, 1.0), s);
        self.red = (r * 255.0).round() as u8;
        self.green = (g * 255.0).round() as u8;
        self.blue = (b * 255.0).round() as u8;
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css())
    }
}

/// A 2-digit hex amount mapped to 0.0..=1.0
fn parse_amount(hex: &str) -> Result<f64, ModelError> {
    u8::from_str_radix(hex, 16)
        .map(|v| v as f64 / 255.0)
        .map_err(|_| ModelError::InvalidColor(hex.to_string()))
}

fn rgb_to_hls(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let l = (minc + maxc) / 2.0;
    if (maxc - minc).abs() < f64::EPSILON {
        return (0.0, l, 0.0);
    }
    let delta = maxc - minc;
    let s = if l <= 0.5 {
        delta / (maxc + minc)
    } else {
        delta / (2.0 - maxc - minc)
    };
    let rc = (maxc - r) / delta;
    let gc = (maxc - g) / delta;
    let bc = (maxc - b) / delta;
    let h = if (r - maxc).abs() < f64::EPSILON {
        bc - gc
    } else if (g - maxc).abs() < f64::EPSILON {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), l, s)
}

fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hue_value(m1, m2, h + 1.0 / 3.0),
        hue_value(m1, m2, h),
        hue_value(m1, m2, h - 1.0 / 3.0),
    )
}

fn hue_value(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}
