//! Style catalogue renderer.
//!
//! Maps the token tables to view models and renders them through the page
//! templates in one synchronous pass. Rendering is a pure function of the
//! catalogue, the site options and the footer year.

use chrono::Datelike;
use serde::Serialize;

use stylebook_tokens::{
    audit, ratio_label, Brand, Catalogue, ContrastGrade, Guidelines, Indicator, Radii, Threshold,
};

use crate::hero::{HeroMarkup, HeroVisual};
use crate::sections::{check_anchors, demo_nav_links, hero_links, AnchorReport, NavLink, SECTIONS};
use crate::templates::TemplateEngine;

/// Site-level options that are not part of the catalogue.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    /// Page title; the brand's system name when empty
    pub title: String,
    /// Base URL the page is served from
    pub base_url: String,
    /// Extra scripts appended to the body (e.g. the live-reload client)
    pub scripts: Vec<String>,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            base_url: "/".to_string(),
            scripts: vec![],
        }
    }
}

/// Errors that can occur while rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to render template: {0}")]
    Template(String),

    #[error("Broken anchors: {0:?}")]
    Anchors(AnchorReport),
}

/// Renders a catalogue into the single style guide page.
pub struct CatalogueRenderer {
    site: SiteOptions,
    hero: Box<dyn HeroVisual>,
    templates: TemplateEngine,
}

impl CatalogueRenderer {
    pub fn new(site: SiteOptions, hero: Box<dyn HeroVisual>) -> Self {
        Self {
            site,
            hero,
            templates: TemplateEngine::new(),
        }
    }

    /// Render the page. The footer shows `year`.
    pub fn render(&self, catalogue: &Catalogue, year: i32) -> Result<String, RenderError> {
        let hero = self.hero.render();
        tracing::debug!("Rendering catalogue with {} hero", hero.kind);

        let context = PageContext::new(catalogue, &self.site, hero, year);

        let html = self
            .templates
            .render("page.html", &context)
            .map_err(|e| RenderError::Template(e.to_string()))?;

        let report = check_anchors(&html);
        if !report.is_clean() {
            return Err(RenderError::Anchors(report));
        }

        Ok(html)
    }

    /// Render a standalone page reporting a catalogue problem.
    pub fn render_error(&self, message: &str) -> Result<String, RenderError> {
        let site_title = if self.site.title.is_empty() {
            "Stylebook"
        } else {
            self.site.title.as_str()
        };

        self.templates
            .render(
                "error.html",
                &ErrorContext {
                    site_title,
                    base_url: &self.site.base_url,
                    scripts: &self.site.scripts,
                    message,
                },
            )
            .map_err(|e| RenderError::Template(e.to_string()))
    }

    /// Render with the current calendar year in the footer.
    pub fn render_now(&self, catalogue: &Catalogue) -> Result<String, RenderError> {
        self.render(catalogue, current_year())
    }
}

/// The current local calendar year.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[derive(Debug, Serialize)]
struct ErrorContext<'a> {
    site_title: &'a str,
    base_url: &'a str,
    scripts: &'a [String],
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct ButtonDemo {
    label: &'static str,
    variant: &'static str,
    disabled: bool,
}

const BUTTONS: &[ButtonDemo] = &[
    ButtonDemo {
        label: "Primary",
        variant: "primary",
        disabled: false,
    },
    ButtonDemo {
        label: "Secondary",
        variant: "secondary",
        disabled: false,
    },
    ButtonDemo {
        label: "Tertiary",
        variant: "tertiary",
        disabled: false,
    },
    ButtonDemo {
        label: "Ghost",
        variant: "ghost",
        disabled: false,
    },
    ButtonDemo {
        label: "Disabled",
        variant: "disabled",
        disabled: true,
    },
];

const CARDS: &[&str] = &["Project", "Skill", "Content"];

/// (text, target size, target weight) for the typography samples.
const TYPE_SAMPLES: &[(&str, u32, u32)] = &[
    ("Heading XL", 36, 800),
    ("Heading L", 30, 700),
    ("Heading M", 24, 600),
    ("Body text default – comfortable reading width and contrast.", 16, 400),
    ("Caption – supportive details and helper text.", 14, 400),
];

#[derive(Debug, Serialize)]
struct PageContext<'a> {
    site_title: &'a str,
    base_url: &'a str,
    scripts: &'a [String],
    year: i32,
    brand: &'a Brand,
    guidelines: &'a Guidelines,
    hero: HeroMarkup,
    hero_links: Vec<NavLink>,
    demo_nav: Vec<NavLink>,
    sections: &'static [crate::sections::SectionInfo],
    colors: Vec<SwatchView<'a>>,
    neutrals: Vec<SwatchView<'a>>,
    typography: TypographyView<'a>,
    spacing: SpacingView,
    layout: LayoutView,
    elevation: Vec<ElevationView<'a>>,
    buttons: &'static [ButtonDemo],
    cards: &'static [&'static str],
    touch_target: Option<String>,
    motion: MotionView<'a>,
    rules: Vec<RuleView<'a>>,
    audit: AuditView,
}

#[derive(Debug, Serialize)]
struct SwatchView<'a> {
    name: String,
    hex: &'a str,
}

#[derive(Debug, Serialize)]
struct TypeSample {
    text: &'static str,
    size: u32,
    weight: u32,
}

#[derive(Debug, Serialize)]
struct TypographyView<'a> {
    heading_font: &'a str,
    body_font: &'a str,
    mono_font: &'a str,
    line_height: String,
    line_length: String,
    scale: String,
    sizes: &'a [u32],
    stack: String,
    weights: String,
    samples: Vec<TypeSample>,
}

#[derive(Debug, Serialize)]
struct SpacingView {
    base: u32,
    listing: String,
    indicators: Vec<Indicator>,
}

#[derive(Debug, Serialize)]
struct LayoutView {
    columns: u32,
    containers: String,
    gutter: String,
    section_padding: String,
    radii: Radii,
}

#[derive(Debug, Serialize)]
struct ElevationView<'a> {
    name: &'a str,
    radius: String,
    radius_css: &'static str,
    shadow: String,
    shadow_css: &'static str,
    preview_shadow_css: &'static str,
}

#[derive(Debug, Serialize)]
struct TimingView<'a> {
    category: &'a str,
    duration: String,
    easing: String,
    css: &'static str,
    usage: &'a str,
}

#[derive(Debug, Serialize)]
struct MotionView<'a> {
    timings: Vec<TimingView<'a>>,
    entrance_translate: String,
    reveal_translate: String,
    hover_scale: String,
    active_scale: f64,
}

#[derive(Debug, Serialize)]
struct RuleView<'a> {
    id: &'a str,
    concern: &'a str,
    threshold: String,
    applies_to: &'a str,
}

#[derive(Debug, Serialize)]
struct AuditRow {
    name: String,
    hex: String,
    on_light: String,
    on_dark: String,
    light_grade: String,
    light_class: &'static str,
    dark_grade: String,
    dark_class: &'static str,
}

#[derive(Debug, Serialize)]
struct AuditView {
    light: String,
    dark: String,
    text_ratio: String,
    large_text_ratio: String,
    entries: Vec<AuditRow>,
}

impl<'a> PageContext<'a> {
    fn new(catalogue: &'a Catalogue, site: &'a SiteOptions, hero: HeroMarkup, year: i32) -> Self {
        let site_title = if site.title.is_empty() {
            catalogue.brand.system_name.as_str()
        } else {
            site.title.as_str()
        };

        Self {
            site_title,
            base_url: &site.base_url,
            scripts: &site.scripts,
            year,
            brand: &catalogue.brand,
            guidelines: &catalogue.guidelines,
            hero,
            hero_links: hero_links(),
            demo_nav: demo_nav_links(),
            sections: SECTIONS,
            colors: catalogue
                .colors
                .iter()
                .map(|c| SwatchView {
                    name: c.name.clone(),
                    hex: c.hex.as_str(),
                })
                .collect(),
            neutrals: catalogue
                .neutrals
                .iter()
                .map(|n| SwatchView {
                    name: n.label(),
                    hex: n.hex.as_str(),
                })
                .collect(),
            typography: typography_view(catalogue),
            spacing: SpacingView {
                base: catalogue.spacing.steps().first().copied().unwrap_or(4),
                listing: catalogue.spacing.listing(),
                indicators: catalogue.spacing.indicators(),
            },
            layout: LayoutView {
                columns: catalogue.layout.columns,
                containers: catalogue.layout.containers.listing(),
                gutter: catalogue.layout.gutter.with_unit("px"),
                section_padding: catalogue.layout.section_padding.with_unit("px"),
                radii: catalogue.layout.radii,
            },
            elevation: catalogue
                .elevation
                .iter()
                .map(|tier| ElevationView {
                    name: &tier.name,
                    radius: tier.radius.to_string(),
                    radius_css: tier.radius.css(),
                    shadow: tier.shadow.to_string(),
                    shadow_css: tier.shadow.css(),
                    preview_shadow_css: tier.shadow.deeper().css(),
                })
                .collect(),
            buttons: BUTTONS,
            cards: CARDS,
            touch_target: catalogue
                .rule("touch-target")
                .map(|r| r.threshold.to_string()),
            motion: MotionView {
                timings: catalogue
                    .motion
                    .timings
                    .iter()
                    .map(|t| TimingView {
                        category: &t.category,
                        duration: t.duration_label(),
                        easing: t.easing.to_string(),
                        css: t.easing.css(),
                        usage: &t.usage,
                    })
                    .collect(),
                entrance_translate: catalogue.motion.entrance_translate.with_unit("px"),
                reveal_translate: catalogue.motion.reveal_translate.with_unit("px"),
                hover_scale: catalogue.motion.hover_scale.with_unit("%"),
                active_scale: catalogue.motion.active_scale,
            },
            rules: catalogue
                .accessibility
                .iter()
                .map(|r| RuleView {
                    id: &r.id,
                    concern: &r.concern,
                    threshold: r.threshold.to_string(),
                    applies_to: &r.applies_to,
                })
                .collect(),
            audit: audit_view(catalogue),
        }
    }
}

fn typography_view(catalogue: &Catalogue) -> TypographyView<'_> {
    let typography = &catalogue.typography;
    let sizes = typography.scale.steps();
    let weights: Vec<u32> = typography.weights.iter().map(|&w| u32::from(w)).collect();

    let mut stack: Vec<&str> = Vec::new();
    for family in [
        &typography.heading_font,
        &typography.body_font,
        &typography.mono_font,
    ] {
        for name in family.split('/').map(str::trim) {
            if !name.is_empty() && !stack.contains(&name) {
                stack.push(name);
            }
        }
    }

    TypographyView {
        heading_font: &typography.heading_font,
        body_font: &typography.body_font,
        mono_font: &typography.mono_font,
        line_height: typography.line_height_label(),
        line_length: typography.line_length.with_unit(""),
        scale: typography.scale.listing(),
        sizes,
        stack: stack.join(", "),
        weights: typography.weights_listing(),
        samples: TYPE_SAMPLES
            .iter()
            .map(|&(text, size, weight)| TypeSample {
                text,
                size: nearest(sizes, size),
                weight: nearest(&weights, weight),
            })
            .collect(),
    }
}

/// The declared value closest to `target`; `target` itself when none are declared.
fn nearest(values: &[u32], target: u32) -> u32 {
    values
        .iter()
        .copied()
        .min_by_key(|v| v.abs_diff(target))
        .unwrap_or(target)
}

fn grade_class(grade: ContrastGrade) -> &'static str {
    match grade {
        ContrastGrade::Aa => "aa",
        ContrastGrade::AaLarge => "aa-large",
        ContrastGrade::Fail => "fail",
    }
}

fn audit_view(catalogue: &Catalogue) -> AuditView {
    let report = audit(catalogue);

    AuditView {
        light: report.light.to_string(),
        dark: report.dark.to_string(),
        text_ratio: Threshold::Ratio(report.text_ratio).to_string(),
        large_text_ratio: Threshold::Ratio(report.large_text_ratio).to_string(),
        entries: report
            .entries
            .iter()
            .map(|e| AuditRow {
                name: e.name.clone(),
                hex: e.hex.to_string(),
                on_light: ratio_label(e.on_light),
                on_dark: ratio_label(e.on_dark),
                light_grade: e.light_grade.to_string(),
                light_class: grade_class(e.light_grade),
                dark_grade: e.dark_grade.to_string(),
                dark_class: grade_class(e.dark_grade),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hero::{EmptyHero, HeroConfig};
    use pretty_assertions::assert_eq;
    use regex::Regex;
    use stylebook_tokens::{ColorToken, Scale};

    fn renderer() -> CatalogueRenderer {
        CatalogueRenderer::new(SiteOptions::default(), HeroConfig::default().visual())
    }

    /// Chip backgrounds of every swatch of `kind` (`color` or `neutral`), in order.
    fn swatches(html: &str, kind: &str) -> Vec<String> {
        let re = Regex::new(&format!(
            r#"data-swatch="{kind}">\s*<div class="swatch-chip[^"]*" style="background-color: ([^"]+)""#
        ))
        .unwrap();
        re.captures_iter(html).map(|c| c[1].to_string()).collect()
    }

    fn brand_swatches(html: &str) -> Vec<String> {
        swatches(html, "color")
    }

    fn spacing_heights(html: &str) -> Vec<u32> {
        let re = Regex::new(r#"class="spacing-bar" style="height: (\d+)px""#).unwrap();
        re.captures_iter(html)
            .map(|c| c[1].parse().unwrap())
            .collect()
    }

    fn section<'h>(html: &'h str, id: &str) -> &'h str {
        let start = html.find(&format!("<section id=\"{id}\"")).unwrap();
        let end = start + html[start..].find("</section>").unwrap();
        &html[start..end]
    }

    #[test]
    fn every_color_swatch_shows_its_literal() {
        let catalogue = Catalogue::default();

        let html = renderer().render(&catalogue, 2025).unwrap();

        let expected: Vec<String> = catalogue
            .colors
            .iter()
            .map(|c| c.hex.to_string())
            .collect();
        assert_eq!(brand_swatches(&html), expected);

        let neutrals: Vec<String> = catalogue
            .neutrals
            .iter()
            .map(|n| n.hex.to_string())
            .collect();
        assert_eq!(swatches(&html, "neutral"), neutrals);
        for neutral in &catalogue.neutrals {
            assert!(html.contains(&format!("<code>{}</code>", neutral.hex)));
        }
    }

    #[test]
    fn elevation_prose_is_rendered_as_markdown() {
        let mut catalogue = Catalogue::default();
        catalogue.guidelines.elevation = "Keep **depth** meaningful.".to_string();

        let html = renderer().render(&catalogue, 2025).unwrap();

        assert!(section(&html, "foundations").contains("<strong>depth</strong>"));
        assert!(!html.contains("**depth**"));
    }

    #[test]
    fn two_color_palette_renders_two_swatches_in_order() {
        let catalogue = Catalogue {
            colors: vec![
                ColorToken::new("Primary", "#2563EB").unwrap(),
                ColorToken::new("Secondary", "#7C3AED").unwrap(),
            ],
            ..Catalogue::default()
        };

        let html = renderer().render(&catalogue, 2025).unwrap();

        assert_eq!(html.matches("data-swatch=\"color\"").count(), 2);
        assert_eq!(brand_swatches(&html), vec!["#2563EB", "#7C3AED"]);
    }

    #[test]
    fn spacing_indicators_match_scale() {
        let catalogue = Catalogue {
            spacing: Scale::new("spacing", vec![4, 8, 12]).unwrap(),
            ..Catalogue::default()
        };

        let html = renderer().render(&catalogue, 2025).unwrap();

        let heights = spacing_heights(&html);
        assert_eq!(heights, vec![4, 8, 12]);
        assert!(heights.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn default_spacing_renders_every_step() {
        let catalogue = Catalogue::default();

        let html = renderer().render(&catalogue, 2025).unwrap();

        assert_eq!(spacing_heights(&html), catalogue.spacing.steps().to_vec());
    }

    #[test]
    fn accessibility_section_shows_contrast_literal() {
        let html = renderer().render(&Catalogue::default(), 2025).unwrap();

        let a11y = section(&html, "a11y");
        assert!(a11y.contains("4.5:1"));
        assert!(a11y.contains("44×44px"));
        assert!(a11y.contains("5. Accessibility Requirements"));
    }

    #[test]
    fn sections_render_in_fixed_order() {
        let html = renderer().render(&Catalogue::default(), 2025).unwrap();

        let positions: Vec<usize> = ["class=\"hero\""]
            .iter()
            .map(|m| html.find(m).unwrap())
            .chain(
                SECTIONS
                    .iter()
                    .map(|s| html.find(&format!("<section id=\"{}\"", s.id)).unwrap()),
            )
            .chain(std::iter::once(html.find("class=\"footer\"").unwrap()))
            .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn anchors_are_unique_and_resolve() {
        let html = renderer().render(&Catalogue::default(), 2025).unwrap();

        let report = check_anchors(&html);

        assert!(report.is_clean(), "{report:?}");
        assert!(html.contains("href=\"#branding\""));
        assert!(!html.contains("href=\"#brand\""));
    }

    #[test]
    fn rendering_is_idempotent() {
        let catalogue = Catalogue::default();
        let renderer = renderer();

        let first = renderer.render(&catalogue, 2025).unwrap();
        let second = renderer.render(&catalogue, 2025).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn footer_shows_current_year() {
        let html = renderer().render_now(&Catalogue::default()).unwrap();

        assert!(html.contains(&format!("© {} Vibe Coder — Design System", current_year())));
    }

    #[test]
    fn hero_slot_is_pluggable() {
        let renderer = CatalogueRenderer::new(SiteOptions::default(), Box::new(EmptyHero));

        let html = renderer.render(&Catalogue::default(), 2025).unwrap();

        assert!(html.contains("data-hero=\"none\""));
        assert!(!html.contains("spline-viewer"));
    }

    #[test]
    fn spline_hero_loads_viewer_script() {
        let html = renderer().render(&Catalogue::default(), 2025).unwrap();

        assert!(html.contains("<spline-viewer"));
        assert!(html.contains("type=\"module\""));
    }

    #[test]
    fn error_page_reports_message() {
        let renderer = CatalogueRenderer::new(
            SiteOptions {
                scripts: vec!["/__hmr.js".to_string()],
                ..SiteOptions::default()
            },
            Box::new(EmptyHero),
        );

        let html = renderer.render_error("Invalid hex color: cyan").unwrap();

        assert!(html.contains("Invalid hex color: cyan"));
        assert!(html.contains("__hmr.js"));
    }

    #[test]
    fn title_defaults_to_system_name() {
        let html = renderer().render(&Catalogue::default(), 2025).unwrap();

        assert!(html.contains("<title>Vibe Coder Design System</title>"));
    }

    #[test]
    fn motion_table_lists_timings() {
        let html = renderer().render(&Catalogue::default(), 2025).unwrap();

        let motion = section(&html, "motion");
        assert!(motion.contains("400–600ms"));
        assert!(motion.contains("ease-out"));
        assert!(motion.contains("Active: scale 0.98"));
    }

    #[test]
    fn typography_samples_snap_to_scale() {
        let catalogue = Catalogue::default();

        let view = typography_view(&catalogue);

        let sizes: Vec<u32> = view.samples.iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![36, 30, 24, 16, 14]);
        assert_eq!(view.stack, "Inter, Geist, Geist Mono");
    }

    #[test]
    fn nearest_picks_closest_value() {
        assert_eq!(nearest(&[12, 14, 16], 15), 14);
        assert_eq!(nearest(&[12, 14, 16], 40), 16);
        assert_eq!(nearest(&[], 40), 40);
    }
}
