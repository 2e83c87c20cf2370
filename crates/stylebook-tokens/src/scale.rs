//! Ordered pixel scales and min/max spans.

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// An ordered sequence of pixel sizes (spacing steps, font sizes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scale {
    steps: Vec<u32>,
}

/// A rendered size indicator for one scale step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicator {
    /// The declared step value in pixels
    pub value: u32,
    /// Height of the visual bar in pixels
    pub height: u32,
}

impl Scale {
    /// Build a scale, rejecting empty or non-increasing sequences.
    pub fn new(name: &str, steps: Vec<u32>) -> Result<Self, TokenError> {
        let scale = Self { steps };
        scale.check(name)?;
        Ok(scale)
    }

    /// Check that the scale is non-empty and strictly increasing.
    pub fn check(&self, name: &str) -> Result<(), TokenError> {
        if self.steps.is_empty() {
            return Err(TokenError::EmptyScale(name.to_string()));
        }

        for (index, pair) in self.steps.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(TokenError::NonIncreasing {
                    name: name.to_string(),
                    index: index + 1,
                    previous: pair[0],
                    value: pair[1],
                });
            }
        }

        Ok(())
    }

    pub fn steps(&self) -> &[u32] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Size indicators, one per step. Heights equal the step value so that
    /// the bars keep the exact ratios of the scale.
    pub fn indicators(&self) -> Vec<Indicator> {
        self.steps
            .iter()
            .map(|&value| Indicator {
                value,
                height: value,
            })
            .collect()
    }

    /// Comma separated listing, e.g. `4, 8, 12`.
    pub fn listing(&self) -> String {
        self.steps
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// An inclusive `min..=max` span of a unit-less quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub min: u32,
    pub max: u32,
}

impl Span {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn exactly(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn check(&self, name: &str) -> Result<(), TokenError> {
        if self.min > self.max {
            return Err(TokenError::InvalidRange {
                name: name.to_string(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Render with a unit suffix: `150ms` or `250–350ms`.
    pub fn with_unit(&self, unit: &str) -> String {
        if self.min == self.max {
            format!("{}{}", self.min, unit)
        } else {
            format!("{}–{}{}", self.min, self.max, unit)
        }
    }
}
