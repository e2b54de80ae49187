//! Unit conversion utilities.
//!
//! WordprocessingML stores page geometry and indents in twips (1/20 pt)
//! and font sizes in half-points. Lengths are carried around as English
//! Metric Units and converted at the XML boundary.

use serde::{Deserialize, Serialize};

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_PT: i64 = 12_700;
pub const EMUS_PER_TWIP: i64 = 635;

#[inline]
pub fn emu_to_twip_i64(emu: i64) -> i64 {
    (emu as f64 / EMUS_PER_TWIP as f64).round() as i64
}

/// Length in English Metric Units (EMUs).
///
/// 1 EMU = 1/914,400 of an inch = 1/360,000 of a centimeter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Emu(pub i64);

impl Emu {
    pub const ZERO: Emu = Emu(0);

    /// Create from inches.
    #[inline]
    pub const fn from_inches(inches: f64) -> Self {
        Self((inches * EMUS_PER_INCH as f64) as i64)
    }

    /// Create from centimeters.
    #[inline]
    pub const fn from_cm(cm: f64) -> Self {
        Self((cm * EMUS_PER_CM as f64) as i64)
    }

    /// Create from points (1/72 of an inch).
    #[inline]
    pub const fn from_pt(pt: f64) -> Self {
        Self((pt * EMUS_PER_PT as f64) as i64)
    }

    /// Create from twips (1/20 of a point, 1/1440 of an inch).
    #[inline]
    pub const fn from_twips(twips: i64) -> Self {
        Self(twips.saturating_mul(EMUS_PER_TWIP))
    }

    /// Create from half-points, the unit of `w:sz`.
    #[inline]
    pub const fn from_half_points(half_points: i64) -> Self {
        Self(half_points.saturating_mul(EMUS_PER_PT) / 2)
    }

    /// Convert to twips, rounding to the nearest twip.
    #[inline]
    pub fn to_twips(self) -> i64 {
        emu_to_twip_i64(self.0)
    }

    /// Convert to half-points, rounding to the nearest half-point.
    #[inline]
    pub fn to_half_points(self) -> i64 {
        (self.0 as f64 * 2.0 / EMUS_PER_PT as f64).round() as i64
    }

    /// Parse a twips attribute value such as `w:w="11906"`.
    ///
    /// Accepts the universal-measure form (`"2cm"`, `"14pt"`, `"1in"`)
    /// that strict documents may use as well.
    pub fn parse_twips(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(twips) = value.parse::<i64>() {
            return Some(Self::from_twips(twips));
        }
        let split = value.len().checked_sub(2)?;
        if !value.is_char_boundary(split) {
            return None;
        }
        let (number, unit) = value.split_at(split);
        let number: f64 = number.parse().ok()?;
        match unit {
            "cm" => Some(Self::from_cm(number)),
            "mm" => Some(Self::from_cm(number / 10.0)),
            "in" => Some(Self::from_inches(number)),
            "pt" => Some(Self::from_pt(number)),
            "pc" => Some(Self::from_pt(number * 12.0)),
            _ => None,
        }
    }
}

impl From<i64> for Emu {
    #[inline]
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emu_conversions() {
        let emu = Emu::from_inches(1.0);
        assert_eq!(emu.0, 914_400);

        let emu = Emu::from_twips(1440);
        assert_eq!(emu.0, 914_400);
        assert_eq!(emu.to_twips(), 1440);
    }

    #[test]
    fn test_a4_geometry_in_twips() {
        assert_eq!(Emu::from_cm(21.0).to_twips(), 11906);
        assert_eq!(Emu::from_cm(29.7).to_twips(), 16838);
        assert_eq!(Emu::from_cm(2.0).to_twips(), 1134);
        assert_eq!(Emu::from_cm(3.0).to_twips(), 1701);
        assert_eq!(Emu::from_cm(1.27).to_twips(), 720);
    }

    #[test]
    fn test_half_points() {
        assert_eq!(Emu::from_pt(14.0).to_half_points(), 28);
        assert_eq!(Emu::from_pt(13.0).to_half_points(), 26);
        assert_eq!(Emu::from_half_points(21), Emu::from_pt(10.5));
    }

    #[test]
    fn test_huge_values_saturate() {
        assert_eq!(Emu::from_twips(i64::MAX), Emu(i64::MAX));
        assert_eq!(Emu::from_twips(i64::MIN), Emu(i64::MIN));
        assert_eq!(Emu::from_half_points(i64::MAX), Emu(i64::MAX / 2));
        assert!(Emu::parse_twips("99999999999999999").is_some());
    }

    #[test]
    fn test_parse_twips() {
        assert_eq!(Emu::parse_twips("720"), Some(Emu::from_twips(720)));
        assert_eq!(Emu::parse_twips("2cm"), Some(Emu::from_cm(2.0)));
        assert_eq!(Emu::parse_twips("abc"), None);
        assert_eq!(Emu::parse_twips(""), None);
    }
}
