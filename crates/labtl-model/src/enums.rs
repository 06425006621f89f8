//! Type-safe enumerations for lab observations.
//!
//! Upstream result payloads carry the interpretation flag as a string
//! (`"CRITICALLY_HIGH"`, `"LOW"`, ...). The enum keeps that wire form while
//! giving the grid renderer something it can match on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Clinical flag classifying an observation value against its reference range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Interpretation {
    /// Above the measurable range of the instrument.
    OffScaleHigh,
    /// Above the critical (panic) limit.
    CriticallyHigh,
    /// Above the reference range.
    High,
    /// Within the reference range.
    #[default]
    Normal,
    /// Below the reference range.
    Low,
    /// Below the critical (panic) limit.
    CriticallyLow,
    /// Below the measurable range of the instrument.
    OffScaleLow,
}

impl Interpretation {
    /// Returns the upstream wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interpretation::OffScaleHigh => "OFF_SCALE_HIGH",
            Interpretation::CriticallyHigh => "CRITICALLY_HIGH",
            Interpretation::High => "HIGH",
            Interpretation::Normal => "NORMAL",
            Interpretation::Low => "LOW",
            Interpretation::CriticallyLow => "CRITICALLY_LOW",
            Interpretation::OffScaleLow => "OFF_SCALE_LOW",
        }
    }

    /// Style class applied to a grid cell, `None` for normal values.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Interpretation::OffScaleHigh => Some("offScaleHigh"),
            Interpretation::CriticallyHigh => Some("criticallyHigh"),
            Interpretation::High => Some("high"),
            Interpretation::Normal => None,
            Interpretation::Low => Some("low"),
            Interpretation::CriticallyLow => Some("criticallyLow"),
            Interpretation::OffScaleLow => Some("offScaleLow"),
        }
    }

    /// Returns true for anything outside the reference range.
    pub fn is_abnormal(&self) -> bool {
        !matches!(self, Interpretation::Normal)
    }

    /// Returns true for critical and off-scale flags.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Interpretation::OffScaleHigh
                | Interpretation::CriticallyHigh
                | Interpretation::CriticallyLow
                | Interpretation::OffScaleLow
        )
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interpretation {
    type Err = String;

    /// Parse an interpretation flag (case-insensitive, `-` or space accepted for `_`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");

        match normalized.as_str() {
            "OFF_SCALE_HIGH" => Ok(Interpretation::OffScaleHigh),
            "CRITICALLY_HIGH" => Ok(Interpretation::CriticallyHigh),
            "HIGH" => Ok(Interpretation::High),
            "NORMAL" | "" => Ok(Interpretation::Normal),
            "LOW" => Ok(Interpretation::Low),
            "CRITICALLY_LOW" => Ok(Interpretation::CriticallyLow),
            "OFF_SCALE_LOW" => Ok(Interpretation::OffScaleLow),
            _ => Err(format!("Unknown interpretation: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpretation_from_str() {
        assert_eq!(
            "critically_high".parse::<Interpretation>().unwrap(),
            Interpretation::CriticallyHigh
        );
        assert_eq!(
            "Off Scale Low".parse::<Interpretation>().unwrap(),
            Interpretation::OffScaleLow
        );
        assert_eq!("".parse::<Interpretation>().unwrap(), Interpretation::Normal);
        assert!("ELEVATED".parse::<Interpretation>().is_err());
    }

    #[test]
    fn test_interpretation_css_class() {
        assert_eq!(Interpretation::Normal.css_class(), None);
        assert_eq!(Interpretation::High.css_class(), Some("high"));
        assert_eq!(
            Interpretation::OffScaleHigh.css_class(),
            Some("offScaleHigh")
        );
    }

    #[test]
    fn test_interpretation_flags() {
        assert!(!Interpretation::Normal.is_abnormal());
        assert!(Interpretation::Low.is_abnormal());
        assert!(!Interpretation::Low.is_critical());
        assert!(Interpretation::CriticallyLow.is_critical());
    }
}
