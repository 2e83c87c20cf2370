//! Asset pipeline for the page stylesheet.

use std::fmt::Write;

use stylebook_tokens::{slug, Catalogue, Threshold};

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file: token custom properties followed by the
    /// component rules that consume them.
    pub fn generate_css(catalogue: &Catalogue) -> String {
        let mut css = Self::token_properties(catalogue);
        css.push('\n');
        css.push_str(COMPONENT_CSS);
        css
    }

    /// The `:root` block exposing every token as a CSS custom property.
    pub fn token_properties(catalogue: &Catalogue) -> String {
        let mut vars: Vec<(String, String)> = Vec::new();

        for color in &catalogue.colors {
            vars.push((format!("color-{}", slug(&color.name)), color.hex.to_string()));
        }
        for neutral in &catalogue.neutrals {
            vars.push((format!("neutral-{}", neutral.step), neutral.hex.to_string()));
        }
        vars.push(("neutral-darkest".into(), catalogue.darkest_neutral().to_string()));

        for (i, step) in catalogue.spacing.steps().iter().enumerate() {
            vars.push((format!("space-{}", i + 1), format!("{step}px")));
        }

        let typography = &catalogue.typography;
        vars.push(("font-heading".into(), font_stack(&typography.heading_font, "sans-serif")));
        vars.push(("font-body".into(), font_stack(&typography.body_font, "sans-serif")));
        vars.push(("font-mono".into(), font_stack(&typography.mono_font, "monospace")));
        for size in typography.scale.steps() {
            vars.push((format!("text-{size}"), format!("{size}px")));
        }
        vars.push(("line-height".into(), typography.body_line_height[0].to_string()));
        vars.push(("line-length".into(), format!("{}ch", typography.line_length.max)));

        let layout = &catalogue.layout;
        vars.push(("columns".into(), layout.columns.to_string()));
        for (i, width) in layout.containers.steps().iter().enumerate() {
            vars.push((format!("container-{}", i + 1), format!("{width}px")));
        }
        if let Some(widest) = layout.containers.steps().last() {
            vars.push(("container-max".into(), format!("{widest}px")));
        }
        vars.push(("gutter-min".into(), format!("{}px", layout.gutter.min)));
        vars.push(("gutter-max".into(), format!("{}px", layout.gutter.max)));
        vars.push(("section-padding-min".into(), format!("{}px", layout.section_padding.min)));
        vars.push(("section-padding-max".into(), format!("{}px", layout.section_padding.max)));
        vars.push(("radius-compact".into(), format!("{}px", layout.radii.compact)));
        vars.push(("radius-default".into(), format!("{}px", layout.radii.default)));
        vars.push(("radius-prominent".into(), format!("{}px", layout.radii.prominent)));

        for tier in &catalogue.elevation {
            let name = slug(&tier.name);
            vars.push((format!("elevation-{name}-radius"), tier.radius.css().to_string()));
            vars.push((format!("elevation-{name}-shadow"), tier.shadow.css().to_string()));
        }

        let motion = &catalogue.motion;
        for timing in &motion.timings {
            let name = slug(&timing.category);
            vars.push((format!("motion-{name}-duration"), timing.css_duration()));
            vars.push((format!("motion-{name}-easing"), timing.easing.css().to_string()));
        }
        vars.push(("entrance-translate".into(), format!("{}px", motion.entrance_translate.min)));
        vars.push(("reveal-translate".into(), format!("{}px", motion.reveal_translate.min)));
        vars.push((
            "hover-scale".into(),
            format!("{}", 1.0 + f64::from(motion.hover_scale.max) / 100.0),
        ));
        vars.push(("active-scale".into(), motion.active_scale.to_string()));

        if let Some(Threshold::Area(w, h)) = catalogue.rule("touch-target").map(|r| r.threshold) {
            vars.push(("touch-target".into(), format!("{}px", w.max(h))));
        }

        let mut css = String::from(":root {\n");
        for (name, value) in vars {
            let _ = writeln!(css, "  --{name}: {value};");
        }
        css.push_str("}\n");
        css
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

/// `Inter/Geist` becomes `Inter, Geist, sans-serif`; multi-word names are quoted.
fn font_stack(family: &str, generic: &str) -> String {
    family
        .split('/')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            if name.contains(' ') {
                format!("\"{name}\"")
            } else {
                name.to_string()
            }
        })
        .chain(std::iter::once(generic.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

// Component rules. Every value comes from a token property, with the built-in
// catalogue value as fallback.
const COMPONENT_CSS: &str = r#"* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html {
  scroll-behavior: smooth;
}

body {
  font-family: var(--font-body, Inter, sans-serif);
  line-height: var(--line-height, 1.6);
  color: var(--neutral-darkest, #0F172A);
  background: #ffffff;
}

h1, h2, h3, h4 {
  font-family: var(--font-heading, Inter, Geist, sans-serif);
  letter-spacing: -0.02em;
}

code {
  font-family: var(--font-mono, "Geist Mono", monospace);
  font-size: 0.875em;
}

.page {
  min-height: 100vh;
  background: linear-gradient(to bottom, #ffffff, var(--neutral-100, #F1F5F9));
}

.container {
  width: 100%;
  max-width: var(--container-max, 1536px);
  margin: 0 auto;
  padding: 0 var(--gutter-max, 24px);
}

/* Hero */
.hero {
  position: relative;
  height: 90vh;
  overflow: hidden;
}

.hero-visual {
  position: absolute;
  inset: 0;
}

.hero-fallback,
.hero-image,
.hero-scene {
  position: absolute;
  inset: 0;
  width: 100%;
  height: 100%;
  object-fit: cover;
}

.hero-overlay {
  position: absolute;
  inset: 0;
  pointer-events: none;
  background: linear-gradient(to bottom, rgba(255, 255, 255, 0.1), rgba(255, 255, 255, 0.3), #ffffff);
}

.hero-content {
  position: relative;
  z-index: 1;
  height: 100%;
  display: flex;
  flex-direction: column;
  justify-content: center;
  pointer-events: none;
}

.hero-content a {
  pointer-events: auto;
}

.badge {
  display: inline-flex;
  align-items: center;
  gap: var(--space-2, 8px);
  width: fit-content;
  padding: 4px 12px;
  border-radius: 9999px;
  font-size: 14px;
  background: rgba(255, 255, 255, 0.7);
  box-shadow: var(--elevation-subtle-shadow, 0 1px 2px 0 rgb(0 0 0 / 0.05));
  backdrop-filter: blur(8px);
}

.badge-dot {
  width: 8px;
  height: 8px;
  border-radius: 9999px;
  background: linear-gradient(to right, var(--color-primary, #2563EB), var(--color-secondary, #7C3AED), var(--color-accent, #06B6D4));
}

.hero-title {
  margin-top: var(--space-6, 24px);
  max-width: 48rem;
  font-size: var(--text-60, 60px);
  font-weight: 800;
  line-height: 1.05;
}

.hero-tagline {
  margin-top: var(--space-4, 16px);
  max-width: 36rem;
  font-size: var(--text-18, 18px);
  color: var(--neutral-700, #334155);
}

.hero-links {
  margin-top: var(--space-7, 32px);
  display: flex;
  flex-wrap: wrap;
  gap: var(--space-3, 12px);
}

/* Sections */
.section {
  padding: var(--section-padding-min, 64px) 0;
}

.section-title {
  font-size: var(--text-30, 30px);
  font-weight: 700;
}

.panel {
  margin-top: var(--space-6, 24px);
  padding: var(--space-7, 32px);
  border-radius: var(--radius-default, 12px);
  background: #ffffff;
  box-shadow: var(--elevation-subtle-shadow, 0 1px 2px 0 rgb(0 0 0 / 0.05));
  outline: 1px solid var(--neutral-300, #CBD5E1);
}

.stack > * + * {
  margin-top: var(--space-4, 16px);
}

.stack-lg > * + * {
  margin-top: var(--space-9, 48px);
}

.subheading {
  font-size: var(--text-20, 20px);
  font-weight: 600;
  margin-bottom: var(--space-3, 12px);
}

.minor-heading {
  font-weight: 600;
}

.lead,
.prose {
  max-width: var(--line-length, 75ch);
  color: var(--neutral-700, #334155);
}

.prose ul,
.bullets {
  padding-left: 1.25rem;
}

.prose code {
  background: var(--neutral-100, #F1F5F9);
  padding: 0.125rem 0.375rem;
  border-radius: 4px;
}

.small {
  font-size: var(--text-14, 14px);
}

.grid {
  display: grid;
  gap: var(--space-4, 16px);
  margin-top: var(--space-4, 16px);
}

.gap-lg {
  gap: var(--space-7, 32px);
}

@media (min-width: 640px) {
  .grid-2 { grid-template-columns: repeat(2, minmax(0, 1fr)); }
  .grid-3 { grid-template-columns: repeat(3, minmax(0, 1fr)); }
  .grid-5 { grid-template-columns: repeat(5, minmax(0, 1fr)); }
  .grid-6 { grid-template-columns: repeat(3, minmax(0, 1fr)); }
}

@media (min-width: 1024px) {
  .grid-6 { grid-template-columns: repeat(6, minmax(0, 1fr)); }
}

/* Swatches */
.swatch {
  border-radius: var(--radius-default, 12px);
  outline: 1px solid var(--neutral-300, #CBD5E1);
  overflow: hidden;
}

.swatch-chip {
  height: 80px;
}

.swatch-chip-sm {
  height: 56px;
}

.swatch-label {
  display: flex;
  justify-content: space-between;
  padding: var(--space-2, 8px) var(--space-3, 12px);
  font-size: var(--text-14, 14px);
}

.swatch-name {
  font-weight: 500;
}

/* Typography */
.type-samples > * + * {
  margin-top: var(--space-3, 12px);
}

.mono-panel {
  font-family: var(--font-mono, "Geist Mono", monospace);
  font-size: var(--text-14, 14px);
  padding: var(--space-4, 16px);
  border-radius: var(--radius-compact, 8px);
  background: var(--neutral-100, #F1F5F9);
}

.type-ramp {
  display: flex;
  flex-wrap: wrap;
  align-items: baseline;
  gap: var(--space-4, 16px);
  margin-top: var(--space-4, 16px);
}

/* Spacing */
.spacing-row {
  display: flex;
  align-items: flex-end;
  gap: var(--space-3, 12px);
  margin-top: var(--space-4, 16px);
}

.spacing-step {
  display: flex;
  flex-direction: column;
  align-items: center;
  font-size: 12px;
  color: var(--neutral-500, #64748B);
}

.spacing-bar {
  width: var(--space-4, 16px);
  border-radius: 4px;
  background: linear-gradient(to top, var(--color-primary, #2563EB), var(--color-secondary, #7C3AED));
}

/* Elevation */
.elevation-card {
  padding: var(--space-5, 20px);
  background: #ffffff;
}

.elevation-name {
  font-weight: 600;
}

.elevation-preview {
  height: 64px;
  margin-top: var(--space-3, 12px);
  background: var(--neutral-100, #F1F5F9);
}

.elevation-meta {
  margin-top: var(--space-2, 8px);
  font-size: 12px;
  color: var(--neutral-500, #64748B);
}

/* Buttons */
.button-row {
  display: flex;
  flex-wrap: wrap;
  gap: var(--space-3, 12px);
}

.btn {
  display: inline-flex;
  align-items: center;
  justify-content: center;
  min-height: var(--touch-target, 44px);
  padding: 0 var(--space-5, 20px);
  border: none;
  border-radius: var(--radius-default, 12px);
  font: inherit;
  font-weight: 500;
  text-decoration: none;
  cursor: pointer;
  transition: transform var(--motion-micro-duration, 150ms) var(--motion-micro-easing, cubic-bezier(0.34, 1.56, 0.64, 1)),
    filter var(--motion-ui-duration, 250ms) var(--motion-ui-easing, ease-in-out);
}

.btn:hover {
  filter: brightness(1.08);
}

.btn:focus-visible {
  outline: 2px solid var(--color-primary, #2563EB);
  outline-offset: 2px;
}

.btn:active {
  transform: scale(var(--active-scale, 0.98));
}

.btn-dark,
.btn-secondary {
  background: var(--neutral-900, #0F172A);
  color: #ffffff;
}

.btn-light {
  background: rgba(255, 255, 255, 0.8);
  color: var(--neutral-900, #0F172A);
  outline: 1px solid var(--neutral-300, #CBD5E1);
}

.btn-primary {
  background: var(--color-primary, #2563EB);
  color: #ffffff;
}

.btn-tertiary {
  background: var(--neutral-100, #F1F5F9);
  color: var(--neutral-900, #0F172A);
}

.btn-ghost {
  background: transparent;
  color: var(--color-primary, #2563EB);
}

.btn-disabled,
.btn:disabled {
  background: var(--neutral-300, #CBD5E1);
  color: var(--neutral-500, #64748B);
  cursor: not-allowed;
  opacity: 0.5;
}

.link-btn {
  border: none;
  background: none;
  font: inherit;
  color: var(--color-primary, #2563EB);
  cursor: pointer;
}

/* Forms */
.field {
  display: block;
}

.field-label {
  display: block;
  font-size: var(--text-14, 14px);
  font-weight: 500;
  margin-bottom: var(--space-1, 4px);
}

.input {
  width: 100%;
  min-height: var(--touch-target, 44px);
  padding: var(--space-2, 8px) var(--space-3, 12px);
  border: 1px solid var(--neutral-300, #CBD5E1);
  border-radius: var(--radius-compact, 8px);
  font: inherit;
}

.input:focus {
  outline: 2px solid var(--color-primary, #2563EB);
  outline-offset: 1px;
}

.checkbox-row {
  display: flex;
  align-items: center;
  gap: var(--space-2, 8px);
}

.checkbox {
  width: 16px;
  height: 16px;
}

/* Navigation */
.navbar {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: var(--space-3, 12px) var(--space-4, 16px);
  border-radius: var(--radius-default, 12px);
  background: rgba(255, 255, 255, 0.8);
  outline: 1px solid var(--neutral-300, #CBD5E1);
}

.navbar-brand {
  display: flex;
  align-items: center;
  gap: var(--space-2, 8px);
  font-weight: 600;
}

.logo-mark {
  width: 24px;
  height: 24px;
  border-radius: 6px;
  background: linear-gradient(to bottom right, var(--color-primary, #2563EB), var(--color-secondary, #7C3AED), var(--color-accent, #06B6D4));
}

.navbar-links {
  display: flex;
  gap: var(--space-6, 24px);
  font-size: var(--text-14, 14px);
}

.navbar-links a {
  color: var(--neutral-700, #334155);
  text-decoration: none;
}

/* Cards */
.card {
  overflow: hidden;
  border-radius: var(--radius-default, 12px);
  background: #ffffff;
  outline: 1px solid var(--neutral-300, #CBD5E1);
  box-shadow: var(--elevation-subtle-shadow, 0 1px 2px 0 rgb(0 0 0 / 0.05));
  transition: transform var(--motion-ui-duration, 250ms) var(--motion-ui-easing, ease-in-out),
    box-shadow var(--motion-ui-duration, 250ms) var(--motion-ui-easing, ease-in-out);
}

.card:hover {
  transform: translateY(-2px);
  box-shadow: var(--elevation-mid-shadow, 0 4px 6px -1px rgb(0 0 0 / 0.1));
}

.card-media {
  height: 112px;
  background: linear-gradient(to bottom right, #dbeafe, #ede9fe, #cffafe);
}

.card-body {
  padding: var(--space-4, 16px);
}

.card-kicker {
  font-size: 12px;
  color: var(--neutral-500, #64748B);
}

.card-title {
  margin-top: var(--space-1, 4px);
  font-weight: 600;
}

/* Modal */
.modal-stage {
  position: relative;
  margin-top: var(--space-4, 16px);
  padding: var(--space-6, 24px);
  border-radius: var(--radius-default, 12px);
  outline: 1px solid var(--neutral-300, #CBD5E1);
  overflow: hidden;
}

.modal-scrim {
  position: absolute;
  inset: 0;
  background: rgba(15, 23, 42, 0.3);
}

.modal {
  position: relative;
  max-width: 28rem;
  margin: 0 auto;
  padding: var(--space-6, 24px);
  border-radius: var(--radius-default, 12px);
  background: #ffffff;
  box-shadow: var(--elevation-high-shadow, 0 20px 25px -5px rgb(0 0 0 / 0.1));
}

.modal-title {
  font-weight: 600;
}

.modal-actions {
  display: flex;
  justify-content: flex-end;
  gap: var(--space-2, 8px);
  margin-top: var(--space-4, 16px);
}

/* Branding */
.callout {
  padding: var(--space-3, 12px);
  border-radius: var(--radius-compact, 8px);
}

.callout-do {
  background: #ecfdf5;
  color: #065f46;
}

.callout-dont {
  background: #fef2f2;
  color: #991b1b;
}

/* Tables */
.token-table {
  width: 100%;
  border-collapse: collapse;
  font-size: var(--text-14, 14px);
}

.token-table th,
.token-table td {
  padding: var(--space-2, 8px) var(--space-3, 12px);
  text-align: left;
  border-bottom: 1px solid var(--neutral-300, #CBD5E1);
}

.token-table th {
  font-weight: 600;
  color: var(--neutral-700, #334155);
}

.threshold {
  font-family: var(--font-mono, "Geist Mono", monospace);
}

.dot {
  display: inline-block;
  width: 12px;
  height: 12px;
  margin-right: var(--space-2, 8px);
  border-radius: 9999px;
  vertical-align: middle;
}

.grade {
  margin-left: var(--space-1, 4px);
  padding: 0 6px;
  border-radius: 4px;
  font-size: 12px;
  font-weight: 600;
}

.grade-aa {
  background: #ecfdf5;
  color: #065f46;
}

.grade-aa-large {
  background: #fffbeb;
  color: #92400e;
}

.grade-fail {
  background: #fef2f2;
  color: #991b1b;
}

.note {
  padding: var(--space-3, 12px);
  border-radius: var(--radius-compact, 8px);
  background: var(--neutral-100, #F1F5F9);
}

/* Motion demos */
.demo {
  display: flex;
  align-items: center;
  justify-content: center;
  height: 96px;
  border: none;
  border-radius: var(--radius-default, 12px);
  background: #ffffff;
  font: inherit;
  outline: 1px solid var(--neutral-300, #CBD5E1);
}

.demo-hover {
  transition: transform var(--motion-ui-duration, 250ms) var(--motion-ui-easing, ease-in-out),
    box-shadow var(--motion-ui-duration, 250ms) var(--motion-ui-easing, ease-in-out);
}

.demo-hover:hover {
  transform: scale(var(--hover-scale, 1.02));
  box-shadow: var(--elevation-mid-shadow, 0 4px 6px -1px rgb(0 0 0 / 0.1));
}

.demo-press {
  cursor: pointer;
  transition: transform var(--motion-micro-duration, 150ms) var(--motion-micro-easing, cubic-bezier(0.34, 1.56, 0.64, 1));
}

.demo-press:active {
  transform: scale(var(--active-scale, 0.98));
}

.demo-emphasis {
  color: #ffffff;
  background: linear-gradient(to right, var(--color-primary, #2563EB), var(--color-secondary, #7C3AED), var(--color-accent, #06B6D4));
  animation: emphasis-in var(--motion-entrance-duration, 400ms) var(--motion-entrance-easing, ease-out) both;
}

@keyframes emphasis-in {
  from {
    opacity: 0;
    transform: translateY(var(--entrance-translate, 8px));
  }
  to {
    opacity: 1;
    transform: none;
  }
}

@media (prefers-reduced-motion: reduce) {
  * {
    animation: none !important;
    transition: none !important;
  }
}

/* Footer */
.footer {
  padding: var(--space-8, 40px) 0;
  border-top: 1px solid var(--neutral-300, #CBD5E1);
  font-size: var(--text-14, 14px);
  color: var(--neutral-500, #64748B);
}

.footer-row {
  display: flex;
  justify-content: space-between;
  align-items: center;
}

.footer-row a {
  color: var(--neutral-700, #334155);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use stylebook_tokens::{ColorToken, Scale};

    #[test]
    fn exposes_palette_as_custom_properties() {
        let css = AssetPipeline::generate_css(&Catalogue::default());

        assert!(css.contains(":root"));
        assert!(css.contains("--color-primary: #2563EB;"));
        assert!(css.contains("--color-danger: #EF4444;"));
        assert!(css.contains("--neutral-900: #0F172A;"));
        assert!(css.contains("--neutral-darkest: #0F172A;"));
    }

    #[test]
    fn exposes_scales_and_motion() {
        let css = AssetPipeline::token_properties(&Catalogue::default());

        assert!(css.contains("--space-1: 4px;"));
        assert!(css.contains("--space-10: 64px;"));
        assert!(css.contains("--text-36: 36px;"));
        assert!(css.contains("--container-max: 1536px;"));
        assert!(css.contains("--motion-entrance-duration: 400ms;"));
        assert!(css.contains("--motion-entrance-easing: cubic-bezier"));
        assert!(css.contains("--active-scale: 0.98;"));
        assert!(css.contains("--hover-scale: 1.02;"));
        assert!(css.contains("--touch-target: 44px;"));
        assert!(css.contains("--font-mono: \"Geist Mono\", monospace;"));
    }

    #[test]
    fn follows_overridden_tokens() {
        let catalogue = Catalogue {
            colors: vec![ColorToken::new("Brand Blue", "#1D4ED8").unwrap()],
            spacing: Scale::new("spacing", vec![2, 6]).unwrap(),
            ..Catalogue::default()
        };

        let css = AssetPipeline::token_properties(&catalogue);

        assert!(css.contains("--color-brand-blue: #1D4ED8;"));
        assert!(!css.contains("--color-primary"));
        assert!(css.contains("--space-2: 6px;"));
        assert!(!css.contains("--space-3:"));
    }

    #[test]
    fn builds_font_stacks() {
        assert_eq!(font_stack("Inter/Geist", "sans-serif"), "Inter, Geist, sans-serif");
        assert_eq!(font_stack("Geist Mono", "monospace"), "\"Geist Mono\", monospace");
    }

    #[test]
    fn every_custom_property_is_declared_once() {
        let css = AssetPipeline::token_properties(&Catalogue::default());

        let names: Vec<&str> = css
            .lines()
            .filter_map(|line| line.trim().strip_prefix("--"))
            .filter_map(|decl| decl.split(':').next())
            .collect();
        let unique: std::collections::HashSet<&str> = names.iter().copied().collect();

        assert!(names.contains(&"color-primary"));
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn minifies_generated_css() {
        let css = AssetPipeline::generate_css(&Catalogue::default());

        let minified = AssetPipeline::minify_css(&css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".spacing-bar"));
        assert!(minified.len() < css.len());
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.button {
    background-color: blue;
    padding: 10px;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".button"));
    }
}
