//! Contrast audit of the palette against light and dark surfaces.

use std::fmt;

use serde::Serialize;

use crate::catalogue::Catalogue;
use crate::color::HexColor;

/// WCAG grade for one foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContrastGrade {
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AA Large")]
    AaLarge,
    #[serde(rename = "Fail")]
    Fail,
}

impl ContrastGrade {
    fn grade(ratio: f64, text: f64, large: f64) -> Self {
        if ratio >= text {
            ContrastGrade::Aa
        } else if ratio >= large {
            ContrastGrade::AaLarge
        } else {
            ContrastGrade::Fail
        }
    }
}

impl fmt::Display for ContrastGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContrastGrade::Aa => "AA",
            ContrastGrade::AaLarge => "AA Large",
            ContrastGrade::Fail => "Fail",
        };
        f.write_str(label)
    }
}

/// Audit row for one color.
#[derive(Debug, Clone, Serialize)]
pub struct ContrastEntry {
    pub name: String,
    pub hex: HexColor,
    pub on_light: f64,
    pub on_dark: f64,
    pub light_grade: ContrastGrade,
    pub dark_grade: ContrastGrade,
}

/// Contrast of every color and neutral against white and the darkest neutral.
#[derive(Debug, Clone, Serialize)]
pub struct ContrastAudit {
    pub light: HexColor,
    pub dark: HexColor,
    pub text_ratio: f64,
    pub large_text_ratio: f64,
    pub entries: Vec<ContrastEntry>,
}

impl ContrastAudit {
    /// Entries that fail even the large-text threshold on both surfaces.
    pub fn unusable(&self) -> impl Iterator<Item = &ContrastEntry> {
        self.entries.iter().filter(|e| {
            e.light_grade == ContrastGrade::Fail && e.dark_grade == ContrastGrade::Fail
        })
    }
}

/// Format a ratio for display, e.g. `5.17:1`.
pub fn ratio_label(ratio: f64) -> String {
    format!("{ratio:.2}:1")
}

/// Grade the palette against the catalogue's contrast rules.
pub fn audit(catalogue: &Catalogue) -> ContrastAudit {
    let light = HexColor::white();
    let dark = catalogue.darkest_neutral();
    let text = catalogue.text_contrast();
    let large = catalogue.large_text_contrast();

    let colors = catalogue
        .colors
        .iter()
        .map(|c| (c.name.clone(), &c.hex))
        .chain(catalogue.neutrals.iter().map(|n| (n.label(), &n.hex)));

    let entries = colors
        .map(|(name, hex)| {
            let on_light = hex.contrast_ratio(&light);
            let on_dark = hex.contrast_ratio(&dark);
            ContrastEntry {
                name,
                hex: hex.clone(),
                on_light,
                on_dark,
                light_grade: ContrastGrade::grade(on_light, text, large),
                dark_grade: ContrastGrade::grade(on_dark, text, large),
            }
        })
        .collect();

    ContrastAudit {
        light,
        dark,
        text_ratio: text,
        large_text_ratio: large,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorToken;

    #[test]
    fn covers_colors_then_neutrals() {
        let catalogue = Catalogue::default();

        let report = audit(&catalogue);

        assert_eq!(
            report.entries.len(),
            catalogue.colors.len() + catalogue.neutrals.len()
        );
        assert_eq!(report.entries[0].name, "Primary");
        assert_eq!(report.entries[6].name, "Neutral 900");
        assert_eq!(report.dark.as_str(), "#0F172A");
    }

    #[test]
    fn grades_against_catalogue_thresholds() {
        let report = audit(&Catalogue::default());
        let grade = |name: &str| {
            report
                .entries
                .iter()
                .find(|e| e.name == name)
                .map(|e| e.light_grade)
                .unwrap()
        };

        assert_eq!(grade("Primary"), ContrastGrade::Aa);
        assert_eq!(grade("Neutral 900"), ContrastGrade::Aa);
        assert_eq!(grade("Neutral 100"), ContrastGrade::Fail);
    }

    #[test]
    fn flags_colors_unusable_on_both_surfaces() {
        let catalogue = Catalogue {
            colors: vec![ColorToken::new("Mid Grey", "#777777").unwrap()],
            neutrals: vec![],
            ..Catalogue::default()
        };

        let report = audit(&catalogue);

        // #777777 is ~4.48:1 on white and ~4.69:1 on black
        assert_eq!(report.entries[0].light_grade, ContrastGrade::AaLarge);
        assert_eq!(report.entries[0].dark_grade, ContrastGrade::Aa);
        assert_eq!(report.unusable().count(), 0);
    }

    #[test]
    fn formats_ratio_label() {
        assert_eq!(ratio_label(21.0), "21.00:1");
        assert_eq!(ratio_label(4.5), "4.50:1");
    }
}
