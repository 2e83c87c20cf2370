//! The token catalogue and its loading and validation.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::a11y::{AccessibilityRule, LARGE_TEXT_CONTRAST, TEXT_CONTRAST};
use crate::color::{ColorToken, HexColor, NeutralStep};
use crate::elevation::ElevationTier;
use crate::error::TokenError;
use crate::motion::Motion;
use crate::scale::{Scale, Span};

/// Fallback when the catalogue declares no text contrast rule.
const DEFAULT_TEXT_CONTRAST: f64 = 4.5;

/// Fallback when the catalogue declares no large-text contrast rule.
const DEFAULT_LARGE_TEXT_CONTRAST: f64 = 3.0;

/// Every table the style guide renders.
///
/// Missing tables in a TOML override fall back to the built-in values, so a
/// file containing only `[[colors]]` entries replaces just the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalogue {
    /// Spacing scale in pixels (4px base grid)
    pub spacing: Scale,
    pub brand: Brand,
    pub colors: Vec<ColorToken>,
    pub neutrals: Vec<NeutralStep>,
    pub typography: Typography,
    pub layout: Layout,
    pub elevation: Vec<ElevationTier>,
    pub motion: Motion,
    pub accessibility: Vec<AccessibilityRule>,
    pub guidelines: Guidelines,
}

/// Naming and hero copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    /// Short brand name, e.g. `Vibe Coder`
    pub name: String,
    /// Full system name shown in the hero badge
    pub system_name: String,
    pub headline: String,
    pub tagline: String,
}

/// Font families, sizes and reading metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub heading_font: String,
    pub body_font: String,
    pub mono_font: String,
    pub weights: Vec<u16>,
    pub scale: Scale,
    /// Body line height, `[min, max]`
    pub body_line_height: [f64; 2],
    /// Comfortable line length in characters
    pub line_length: Span,
}

impl Typography {
    /// Display label for the body line height, e.g. `1.6–1.8`.
    pub fn line_height_label(&self) -> String {
        let [min, max] = self.body_line_height;
        if min == max {
            format!("{min}")
        } else {
            format!("{min}–{max}")
        }
    }

    pub fn weights_listing(&self) -> String {
        self.weights
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Grid and container metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub columns: u32,
    /// Container breakpoints in pixels
    pub containers: Scale,
    pub gutter: Span,
    pub section_padding: Span,
    pub radii: Radii,
}

/// Corner radius guidance in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Radii {
    pub compact: u32,
    pub default: u32,
    pub prominent: u32,
}

/// Guideline prose, written in Markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Guidelines {
    pub color_strategy: String,
    pub iconography: String,
    pub elevation: String,
    pub buttons: String,
    pub button_states: String,
    pub forms: String,
    pub modals: String,
    pub containers: String,
    pub theme: String,
    pub motifs: String,
    pub voice: String,
    pub logo_usage: String,
    pub brand_do: String,
    pub brand_dont: String,
    pub motion: String,
    pub accessibility: String,
    pub documentation: String,
}

impl Catalogue {
    /// Parse a TOML override and validate the result.
    pub fn from_toml_str(source: &str) -> Result<Self, TokenError> {
        let catalogue: Catalogue =
            toml::from_str(source).map_err(|e| TokenError::Parse(e.to_string()))?;
        catalogue.validate()?;
        Ok(catalogue)
    }

    /// Load and validate a catalogue file.
    pub fn load(path: &Path) -> Result<Self, TokenError> {
        let source = fs::read_to_string(path).map_err(|e| TokenError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Serialize to TOML, e.g. for `init`.
    pub fn to_toml_string(&self) -> Result<String, TokenError> {
        toml::to_string_pretty(self).map_err(|e| TokenError::Serialize(e.to_string()))
    }

    /// Export as JSON for downstream consumers.
    pub fn to_json(&self) -> Result<String, TokenError> {
        serde_json::to_string_pretty(self).map_err(|e| TokenError::Serialize(e.to_string()))
    }

    /// Check every table and report all problems together.
    pub fn validate(&self) -> Result<(), TokenError> {
        let mut problems = Vec::new();

        collect_slug_clashes(
            &mut problems,
            "color",
            self.colors.iter().map(|c| c.name.as_str()),
        );
        collect_duplicates(
            &mut problems,
            "neutral step",
            self.neutrals.iter().map(|n| n.step.to_string()),
        );
        collect_slug_clashes(
            &mut problems,
            "elevation tier",
            self.elevation.iter().map(|e| e.name.as_str()),
        );
        collect_slug_clashes(
            &mut problems,
            "motion category",
            self.motion.timings.iter().map(|t| t.category.as_str()),
        );
        collect_duplicates(
            &mut problems,
            "accessibility rule",
            self.accessibility.iter().map(|r| r.id.clone()),
        );

        let scales = [
            ("spacing", &self.spacing),
            ("typography.scale", &self.typography.scale),
            ("layout.containers", &self.layout.containers),
        ];
        for (name, scale) in scales {
            if let Err(e) = scale.check(name) {
                problems.push(e);
            }
        }

        let mut spans = vec![
            ("typography.line_length".to_string(), self.typography.line_length),
            ("layout.gutter".to_string(), self.layout.gutter),
            ("layout.section_padding".to_string(), self.layout.section_padding),
            ("motion.entrance_translate".to_string(), self.motion.entrance_translate),
            ("motion.reveal_translate".to_string(), self.motion.reveal_translate),
            ("motion.hover_scale".to_string(), self.motion.hover_scale),
        ];
        spans.extend(
            self.motion
                .timings
                .iter()
                .map(|t| (format!("motion.{}", t.category), t.duration)),
        );
        for (name, span) in spans {
            if let Err(e) = span.check(&name) {
                problems.push(e);
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(TokenError::Invalid(problems))
        }
    }

    /// Look up a brand color by name (case-insensitive).
    pub fn color(&self, name: &str) -> Option<&ColorToken> {
        self.colors
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn neutral(&self, step: u16) -> Option<&NeutralStep> {
        self.neutrals.iter().find(|n| n.step == step)
    }

    pub fn rule(&self, id: &str) -> Option<&AccessibilityRule> {
        self.accessibility.iter().find(|r| r.id == id)
    }

    /// Minimum contrast for body text.
    pub fn text_contrast(&self) -> f64 {
        self.rule(TEXT_CONTRAST)
            .and_then(|r| r.threshold.as_ratio())
            .unwrap_or(DEFAULT_TEXT_CONTRAST)
    }

    /// Minimum contrast for large text.
    pub fn large_text_contrast(&self) -> f64 {
        self.rule(LARGE_TEXT_CONTRAST)
            .and_then(|r| r.threshold.as_ratio())
            .unwrap_or(DEFAULT_LARGE_TEXT_CONTRAST)
    }

    /// The lowest-luminance neutral, used as the dark surface. Black when no
    /// neutrals are declared.
    pub fn darkest_neutral(&self) -> HexColor {
        self.neutrals
            .iter()
            .map(|n| &n.hex)
            .min_by(|a, b| a.relative_luminance().total_cmp(&b.relative_luminance()))
            .cloned()
            .unwrap_or_else(HexColor::black)
    }
}

/// Token names become CSS custom property segments, so two names that slug
/// alike would shadow each other.
fn collect_slug_clashes<'a>(
    problems: &mut Vec<TokenError>,
    kind: &'static str,
    names: impl Iterator<Item = &'a str>,
) {
    let mut slugs = Vec::new();
    for name in names {
        let slugged = slug(name);
        if slugged.is_empty() {
            problems.push(TokenError::UnnamedToken {
                kind,
                name: name.to_string(),
            });
        } else {
            slugs.push(slugged);
        }
    }
    collect_duplicates(problems, kind, slugs.into_iter());
}

/// Lowercase a token name into a CSS custom property segment:
/// `Brand Blue` and `brand-blue` both become `brand-blue`.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

fn collect_duplicates(
    problems: &mut Vec<TokenError>,
    kind: &'static str,
    names: impl Iterator<Item = String>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.clone()) {
            problems.push(TokenError::Duplicate { kind, name });
        }
    }
}
