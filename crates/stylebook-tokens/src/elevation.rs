//! Elevation tiers: corner radius plus shadow depth.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Corner radius tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Radius {
    Md,
    Lg,
    Xl,
}

impl Radius {
    pub fn css(self) -> &'static str {
        match self {
            Radius::Md => "6px",
            Radius::Lg => "8px",
            Radius::Xl => "12px",
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Radius::Md => "md",
            Radius::Lg => "lg",
            Radius::Xl => "xl",
        }
    }
}

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rounded-{}", self.suffix())
    }
}

/// Shadow depth tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shadow {
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

impl Shadow {
    pub fn css(self) -> &'static str {
        match self {
            Shadow::Sm => "0 1px 2px 0 rgb(0 0 0 / 0.05)",
            Shadow::Md => "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)",
            Shadow::Lg => "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)",
            Shadow::Xl => "0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1)",
            Shadow::Xxl => "0 25px 50px -12px rgb(0 0 0 / 0.25)",
        }
    }

    /// The next tier up, used for the inner preview of an elevation card.
    pub fn deeper(self) -> Shadow {
        match self {
            Shadow::Sm => Shadow::Md,
            Shadow::Md => Shadow::Lg,
            Shadow::Lg => Shadow::Xl,
            Shadow::Xl | Shadow::Xxl => Shadow::Xxl,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Shadow::Sm => "sm",
            Shadow::Md => "md",
            Shadow::Lg => "lg",
            Shadow::Xl => "xl",
            Shadow::Xxl => "2xl",
        }
    }
}

impl fmt::Display for Shadow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shadow-{}", self.suffix())
    }
}

/// A named elevation tier, e.g. `Mid -> rounded-lg, shadow-md`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationTier {
    pub name: String,
    pub radius: Radius,
    pub shadow: Shadow,
}

impl ElevationTier {
    pub fn new(name: &str, radius: Radius, shadow: Shadow) -> Self {
        Self {
            name: name.to_string(),
            radius,
            shadow,
        }
    }
}
