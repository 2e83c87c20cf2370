//! Motion timing tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scale::Span;

/// Easing curve for a timing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    EaseOut,
    EaseIn,
    EaseInOut,
    Spring,
}

impl Easing {
    /// CSS timing function for this curve.
    pub fn css(self) -> &'static str {
        match self {
            Easing::EaseOut => "cubic-bezier(0, 0, 0.2, 1)",
            Easing::EaseIn => "cubic-bezier(0.4, 0, 1, 1)",
            Easing::EaseInOut => "cubic-bezier(0.4, 0, 0.2, 1)",
            Easing::Spring => "cubic-bezier(0.34, 1.56, 0.64, 1)",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Easing::EaseOut => "ease-out",
            Easing::EaseIn => "ease-in",
            Easing::EaseInOut => "ease-in-out",
            Easing::Spring => "spring",
        };
        f.write_str(name)
    }
}

/// A timing category: `entrance -> 400–600ms, ease-out`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionTiming {
    pub category: String,
    /// Duration in milliseconds
    pub duration: Span,
    pub easing: Easing,
    /// What the category is used for
    #[serde(default)]
    pub usage: String,
}

impl MotionTiming {
    pub fn new(category: &str, duration: Span, easing: Easing, usage: &str) -> Self {
        Self {
            category: category.to_string(),
            duration,
            easing,
            usage: usage.to_string(),
        }
    }

    /// Duration label, e.g. `250–350ms`.
    pub fn duration_label(&self) -> String {
        self.duration.with_unit("ms")
    }

    /// Duration used when a single value is needed (the lower bound).
    pub fn css_duration(&self) -> String {
        format!("{}ms", self.duration.min)
    }
}

/// The motion system: timing table plus gesture amplitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Scale applied while pressed
    pub active_scale: f64,
    /// Entrance translate distance in pixels
    pub entrance_translate: Span,
    /// Reveal-on-scroll translate distance in pixels
    pub reveal_translate: Span,
    /// Hover scale increase in percent
    pub hover_scale: Span,
    pub timings: Vec<MotionTiming>,
}

impl Motion {
    /// Look up a timing category by name (case-insensitive).
    pub fn timing(&self, category: &str) -> Option<&MotionTiming> {
        self.timings
            .iter()
            .find(|t| t.category.eq_ignore_ascii_case(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_round_trips_kebab_case() {
        let easing: Easing = serde_json::from_str("\"ease-out\"").unwrap();

        assert_eq!(easing, Easing::EaseOut);
        assert_eq!(easing.to_string(), "ease-out");
    }

    #[test]
    fn duration_label_uses_range() {
        let timing = MotionTiming::new("entrance", Span::new(400, 600), Easing::EaseOut, "");

        assert_eq!(timing.duration_label(), "400–600ms");
        assert_eq!(timing.css_duration(), "400ms");
    }
}
