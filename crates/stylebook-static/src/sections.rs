//! Fixed section order and in-page anchor navigation.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Anchor of the page root, targeted by the footer link.
pub const TOP_ANCHOR: &str = "top";

/// One catalogue section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionInfo {
    /// Anchor id, e.g. `a11y`
    pub id: &'static str,
    /// Heading shown above the panel
    pub title: &'static str,
    /// Short label used by navigation links
    pub label: &'static str,
    /// Template rendering the panel body
    pub template: &'static str,
    /// Whether the hero links to this section
    #[serde(skip)]
    pub in_hero: bool,
}

/// Sections in render order, between the hero and the footer.
pub const SECTIONS: &[SectionInfo] = &[
    SectionInfo {
        id: "foundations",
        title: "1. Core Foundations",
        label: "Foundations",
        template: "foundations.html",
        in_hero: true,
    },
    SectionInfo {
        id: "components",
        title: "2. Component Library Guidelines",
        label: "Components",
        template: "components.html",
        in_hero: true,
    },
    SectionInfo {
        id: "branding",
        title: "3. Branding & Aesthetic Identity",
        label: "Brand",
        template: "branding.html",
        in_hero: true,
    },
    SectionInfo {
        id: "motion",
        title: "4. Motion & Interaction System",
        label: "Motion",
        template: "motion.html",
        in_hero: true,
    },
    SectionInfo {
        id: "a11y",
        title: "5. Accessibility Requirements",
        label: "Accessibility",
        template: "a11y.html",
        in_hero: true,
    },
    SectionInfo {
        id: "docs",
        title: "6. Documentation Format",
        label: "Docs",
        template: "docs.html",
        in_hero: false,
    },
];

/// A link to an in-page anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub id: &'static str,
    pub label: &'static str,
}

/// Links shown as buttons in the hero.
pub fn hero_links() -> Vec<NavLink> {
    SECTIONS
        .iter()
        .filter(|s| s.in_hero)
        .map(|s| NavLink {
            id: s.id,
            label: s.label,
        })
        .collect()
}

/// Links shown in the navigation bar example.
pub fn demo_nav_links() -> Vec<NavLink> {
    hero_links()
        .into_iter()
        .map(|link| NavLink {
            label: if link.id == "a11y" { "A11y" } else { link.label },
            ..link
        })
        .collect()
}

/// Problems found in a rendered page's anchors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorReport {
    /// Ids declared more than once
    pub duplicate_ids: Vec<String>,
    /// Link targets with no matching id
    pub dangling_links: Vec<String>,
}

impl AnchorReport {
    pub fn is_clean(&self) -> bool {
        self.duplicate_ids.is_empty() && self.dangling_links.is_empty()
    }
}

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"\sid="([^"]+)""#).expect("id pattern is valid"))
}

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r##"\shref="#([^"]+)""##).expect("link pattern is valid"))
}

/// Check that ids are unique and every `href="#..."` hits exactly one id.
pub fn check_anchors(html: &str) -> AnchorReport {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for cap in id_pattern().captures_iter(html) {
        if let Some(id) = cap.get(1) {
            *counts.entry(id.as_str()).or_default() += 1;
        }
    }

    let mut duplicate_ids: Vec<String> = counts
        .iter()
        .filter(|(_, &n)| n > 1)
        .map(|(id, _)| id.to_string())
        .collect();
    duplicate_ids.sort();

    let mut seen = HashSet::new();
    let dangling_links = link_pattern()
        .captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .filter(|target| !counts.contains_key(target))
        .filter(|target| seen.insert(*target))
        .map(str::to_string)
        .collect();

    AnchorReport {
        duplicate_ids,
        dangling_links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_ids_are_unique() {
        let ids: HashSet<_> = SECTIONS.iter().map(|s| s.id).collect();

        assert_eq!(ids.len(), SECTIONS.len());
        assert!(!ids.contains(TOP_ANCHOR));
    }

    #[test]
    fn sections_follow_catalogue_order() {
        let ids: Vec<_> = SECTIONS.iter().map(|s| s.id).collect();

        assert_eq!(
            ids,
            vec!["foundations", "components", "branding", "motion", "a11y", "docs"]
        );
    }

    #[test]
    fn every_nav_link_targets_one_section() {
        for link in hero_links().iter().chain(demo_nav_links().iter()) {
            let matches = SECTIONS.iter().filter(|s| s.id == link.id).count();
            assert_eq!(matches, 1, "link {} has {} targets", link.id, matches);
        }
    }

    #[test]
    fn demo_nav_uses_short_labels() {
        let labels: Vec<_> = demo_nav_links().iter().map(|l| l.label).collect();

        assert_eq!(
            labels,
            vec!["Foundations", "Components", "Brand", "Motion", "A11y"]
        );
    }

    #[test]
    fn reports_duplicate_and_dangling_anchors() {
        let html = r##"<div id="a"></div><div id="a"></div><a href="#a">x</a><a href="#missing">y</a><a href="#missing">z</a>"##;

        let report = check_anchors(html);

        assert_eq!(report.duplicate_ids, vec!["a".to_string()]);
        assert_eq!(report.dangling_links, vec!["missing".to_string()]);
        assert!(!report.is_clean());
    }

    #[test]
    fn ignores_data_attributes() {
        let html = r##"<div data-id="x" id="top"></div><a href="#top">up</a>"##;

        assert!(check_anchors(html).is_clean());
    }
}
