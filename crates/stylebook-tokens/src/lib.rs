//! Design token catalogue for the style guide.
//!
//! The catalogue is a set of immutable value tables (colors, neutrals, scales,
//! elevation tiers, motion timings, accessibility rules) plus the guideline
//! prose shown next to them. A built-in "Vibe Coder" catalogue is provided via
//! [`Catalogue::default`]; any table can be overridden from TOML.

pub mod a11y;
pub mod audit;
pub mod catalogue;
pub mod color;
mod defaults;
pub mod elevation;
pub mod error;
pub mod motion;
pub mod scale;

pub use a11y::{AccessibilityRule, Threshold, LARGE_TEXT_CONTRAST, TEXT_CONTRAST};
pub use audit::{audit, ratio_label, ContrastAudit, ContrastEntry, ContrastGrade};
pub use catalogue::{slug, Brand, Catalogue, Guidelines, Layout, Radii, Typography};
pub use color::{ColorToken, HexColor, NeutralStep};
pub use elevation::{ElevationTier, Radius, Shadow};
pub use error::TokenError;
pub use motion::{Easing, Motion, MotionTiming};
pub use scale::{Indicator, Scale, Span};
