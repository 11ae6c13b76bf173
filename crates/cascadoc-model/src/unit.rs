//! Length and measure primitives.
//!
//! Absolute lengths are stored as an integer count of EMU (English
//! Metric Units, 914 400 per inch). Every unit that appears in OOXML
//! files or CSS output divides 914 400 evenly, so conversions between
//! them stay exact.

use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use serde::Serialize;

use crate::error::ModelError;

/// EMU per inch
pub const EMU_PER_INCH: i64 = 914_400;
/// EMU per centimeter
pub const EMU_PER_CM: i64 = 360_000;
/// EMU per millimeter
pub const EMU_PER_MM: i64 = 36_000;
/// EMU per point
pub const EMU_PER_PT: i64 = 12_700;
/// EMU per pica (12pt)
pub const EMU_PER_PC: i64 = 152_400;
/// EMU per twip (twentieth of a point)
pub const EMU_PER_TWIP: i64 = 635;
/// EMU per CSS reference pixel (96 per inch)
pub const EMU_PER_PX: i64 = 9_525;

/// A unit name accepted by [`CssUnit::new`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    Inch,
    Cm,
    Mm,
    Pt,
    Pc,
    Px,
    Twip,
    Emu,
}

impl Unit {
    fn emu_factor(self) -> i64 {
        match self {
            Unit::Inch => EMU_PER_INCH,
            Unit::Cm => EMU_PER_CM,
            Unit::Mm => EMU_PER_MM,
            Unit::Pt => EMU_PER_PT,
            Unit::Pc => EMU_PER_PC,
            Unit::Px => EMU_PER_PX,
            Unit::Twip => EMU_PER_TWIP,
            Unit::Emu => 1,
        }
    }
}

impl FromStr for Unit {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Unit::Inch),
            "cm" => Ok(Unit::Cm),
            "mm" => Ok(Unit::Mm),
            "pt" => Ok(Unit::Pt),
            "pc" => Ok(Unit::Pc),
            "px" => Ok(Unit::Px),
            "twip" => Ok(Unit::Twip),
            "emu" => Ok(Unit::Emu),
            other => Err(ModelError::UnknownUnit(other.to_string())),
        }
    }
}

/// An absolute length, stored as EMU
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CssUnit(i64);

impl CssUnit {
    /// Zero length
    pub const ZERO: CssUnit = CssUnit(0);

    /// Build a length from a value and a unit name.
    ///
    /// Unknown unit names are an error, never silently treated as EMU.
    pub fn new(value: f64, unit: &str) -> Result<Self, ModelError> {
        let unit: Unit = unit.parse()?;
        Ok(Self::with_unit(value, unit))
    }

    /// Build a length from a value and a parsed [`Unit`]
    pub fn with_unit(value: f64, unit: Unit) -> Self {
        CssUnit((value * unit.emu_factor() as f64).round() as i64)
    }

    /// Build a length from a raw EMU count
    pub const fn from_emu(emu: i64) -> Self {
        CssUnit(emu)
    }

    /// Build a length from a twip count (the usual OOXML unit)
    pub fn from_twips(twips: i64) -> Self {
        CssUnit(twips * EMU_PER_TWIP)
    }

    /// Raw EMU count
    pub fn emu(&self) -> i64 {
        self.0
    }

    pub fn inches(&self) -> f64 {
        self.0 as f64 / EMU_PER_INCH as f64
    }

    pub fn cm(&self) -> f64 {
        self.0 as f64 / EMU_PER_CM as f64
    }

    pub fn mm(&self) -> f64 {
        self.0 as f64 / EMU_PER_MM as f64
    }

    pub fn pt(&self) -> f64 {
        self.0 as f64 / EMU_PER_PT as f64
    }

    pub fn pc(&self) -> f64 {
        self.0 as f64 / EMU_PER_PC as f64
    }

    pub fn px(&self) -> f64 {
        self.0 as f64 / EMU_PER_PX as f64
    }

    pub fn twips(&self) -> f64 {
        self.0 as f64 / EMU_PER_TWIP as f64
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Absolute value
    pub fn abs(&self) -> CssUnit {
        CssUnit(self.0.abs())
    }

    /// CSS text in points, decimals trimmed (`12pt`, `1.5pt`)
    pub fn css_pt(&self) -> String {
        format!("{}pt", fmt_number(self.pt()))
    }

    /// CSS text in inches, decimals trimmed
    pub fn css_in(&self) -> String {
        format!("{}in", fmt_number(self.inches()))
    }
}

impl Add for CssUnit {
    type Output = CssUnit;

    fn add(self, rhs: CssUnit) -> CssUnit {
        CssUnit(self.0 + rhs.0)
    }
}

impl Sub for CssUnit {
    type Output = CssUnit;

    fn sub(self, rhs: CssUnit) -> CssUnit {
        CssUnit(self.0 - rhs.0)
    }
}

impl Neg for CssUnit {
    type Output = CssUnit;

    fn neg(self) -> CssUnit {
        CssUnit(-self.0)
    }
}

impl fmt::Display for CssUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css_pt())
    }
}

/// A percentage, stored in hundredths of a percent so OOXML
/// fiftieths-of-a-percent values convert exactly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Percentage(i64);

impl Percentage {
    /// From a plain percentage value (`250.0` for 250%)
    pub fn new(percent: f64) -> Self {
        Percentage((percent * 100.0).round() as i64)
    }

    /// From hundredths of a percent
    pub fn from_hundredths(hundredths: i64) -> Self {
        Percentage(hundredths)
    }

    /// From the OOXML fiftieths-of-a-percent encoding
    pub fn from_fiftieths(fiftieths: i64) -> Self {
        Percentage(fiftieths * 2)
    }

    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.percent())
    }
}

/// A table/cell measure: automatic, an absolute length, or a percentage
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Measure {
    /// Renders as `auto`
    Auto,
    Length(CssUnit),
    Percentage(Percentage),
}

impl Measure {
    /// CSS text: `auto`, `{:.2}%` or `{:.2}in`
    pub fn css(&self) -> String {
        match self {
            Measure::Auto => "auto".to_string(),
            Measure::Length(u) => format!("{:.2}in", u.inches()),
            Measure::Percentage(p) => format!("{:.2}%", p.percent()),
        }
    }
}

/// Format a number with trailing zeros trimmed
pub fn fmt_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let s = format!("{:.4}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
