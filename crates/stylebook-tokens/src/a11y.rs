//! Accessibility rules with numeric thresholds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rule id for the normal-text contrast requirement.
pub const TEXT_CONTRAST: &str = "text-contrast";

/// Rule id for the large-text contrast requirement.
pub const LARGE_TEXT_CONTRAST: &str = "large-text-contrast";

/// A numeric threshold, displayed literally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    /// Contrast ratio, shown as `4.5:1`
    Ratio(f64),
    /// A length, shown as `16px`
    Pixels(u32),
    /// A target area, shown as `44×44px`
    Area(u32, u32),
    /// A plain multiplier, shown as `1.5`
    Factor(f64),
}

impl Threshold {
    pub fn as_ratio(&self) -> Option<f64> {
        match self {
            Threshold::Ratio(r) => Some(*r),
            _ => None,
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Ratio(r) => write!(f, "{r}:1"),
            Threshold::Pixels(px) => write!(f, "{px}px"),
            Threshold::Area(w, h) => write!(f, "{w}×{h}px"),
            Threshold::Factor(x) => write!(f, "{x}"),
        }
    }
}

/// One accessibility requirement: `contrast ≥ 4.5:1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessibilityRule {
    /// Stable identifier, e.g. `text-contrast`
    pub id: String,
    /// Human-readable concern, e.g. `Color contrast`
    pub concern: String,
    pub threshold: Threshold,
    /// Where the rule applies
    #[serde(default)]
    pub applies_to: String,
}

impl AccessibilityRule {
    pub fn new(id: &str, concern: &str, threshold: Threshold, applies_to: &str) -> Self {
        Self {
            id: id.to_string(),
            concern: concern.to_string(),
            threshold,
            applies_to: applies_to.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_thresholds_literally() {
        assert_eq!(Threshold::Ratio(4.5).to_string(), "4.5:1");
        assert_eq!(Threshold::Ratio(3.0).to_string(), "3:1");
        assert_eq!(Threshold::Area(44, 44).to_string(), "44×44px");
        assert_eq!(Threshold::Pixels(16).to_string(), "16px");
        assert_eq!(Threshold::Factor(1.5).to_string(), "1.5");
    }

    #[test]
    fn only_ratios_convert_to_ratio() {
        assert_eq!(Threshold::Ratio(4.5).as_ratio(), Some(4.5));
        assert_eq!(Threshold::Pixels(16).as_ratio(), None);
    }

    #[test]
    fn deserializes_tagged_threshold_from_toml() {
        let rule: AccessibilityRule = toml::from_str(
            r#"
id = "touch-target"
concern = "Touch targets"
threshold = { area = [44, 44] }
"#,
        )
        .unwrap();

        assert_eq!(rule.threshold, Threshold::Area(44, 44));
        assert_eq!(rule.applies_to, "");
    }
}
