//! Template engine for rendering the style guide page.

use minijinja::{Environment, Value};
use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in page templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .expect("Failed to add built-in template");
        }

        env.add_filter("markdown", markdown_filter);

        Self { env }
    }

    /// Render a template with any serializable context.
    pub fn render<S: Serialize>(
        &self,
        template: &str,
        context: &S,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;
        tmpl.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Render guideline Markdown to HTML.
pub fn render_markdown(content: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

fn markdown_filter(value: &str) -> Value {
    Value::from_safe_string(render_markdown(value))
}

const TEMPLATES: [(&str, &str); 10] = [
    ("page.html", PAGE_TEMPLATE),
    ("error.html", ERROR_TEMPLATE),
    ("hero.html", HERO_TEMPLATE),
    ("foundations.html", FOUNDATIONS_TEMPLATE),
    ("components.html", COMPONENTS_TEMPLATE),
    ("branding.html", BRANDING_TEMPLATE),
    ("motion.html", MOTION_TEMPLATE),
    ("a11y.html", A11Y_TEMPLATE),
    ("docs.html", DOCS_TEMPLATE),
    ("footer.html", FOOTER_TEMPLATE),
];

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ site_title }}</title>
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
  {% for src in hero.module_scripts %}<script type="module" src="{{ src }}"></script>
  {% endfor %}
</head>
<body>
  <div class="page" id="top">
    {% include "hero.html" %}
    {% for section in sections %}
    <section id="{{ section.id }}" class="section">
      <div class="container">
        <h2 class="section-title">{{ section.title }}</h2>
        <div class="panel">
          {% include section.template %}
        </div>
      </div>
    </section>
    {% endfor %}
    {% include "footer.html" %}
  </div>
  {% for src in scripts %}<script src="{{ src }}"></script>
  {% endfor %}
</body>
</html>"##;

const ERROR_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{{ site_title }}: catalogue error</title>
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  <main class="container section" id="top">
    <h1 class="section-title">Catalogue error</h1>
    <pre class="panel error-message">{{ message }}</pre>
  </main>
  {% for src in scripts %}<script src="{{ src }}"></script>
  {% endfor %}
</body>
</html>"##;

const HERO_TEMPLATE: &str = r##"<header class="hero">
  <div class="hero-visual" data-hero="{{ hero.kind }}">{{ hero.html | safe }}</div>
  <div class="hero-overlay"></div>
  <div class="container hero-content">
    <span class="badge"><span class="badge-dot"></span>{{ brand.system_name }}</span>
    <h1 class="hero-title">{{ brand.headline }}</h1>
    <p class="hero-tagline">{{ brand.tagline }}</p>
    <nav class="hero-links">
      {% for link in hero_links %}<a href="#{{ link.id }}" class="btn {% if loop.first %}btn-dark{% else %}btn-light{% endif %}">{{ link.label }}</a>
      {% endfor %}
    </nav>
  </div>
</header>"##;

const FOUNDATIONS_TEMPLATE: &str = r##"<div class="stack-lg">
  <div>
    <h3 class="subheading">Color Strategy</h3>
    <div class="prose lead">{{ guidelines.color_strategy | markdown }}</div>
    <div class="grid grid-6">
      {% for color in colors %}
      <div class="swatch" data-swatch="color">
        <div class="swatch-chip" style="background-color: {{ color.hex }}"></div>
        <div class="swatch-label"><span class="swatch-name">{{ color.name }}</span><code>{{ color.hex }}</code></div>
      </div>
      {% endfor %}
    </div>
    <div class="grid grid-5">
      {% for neutral in neutrals %}
      <div class="swatch swatch-compact" data-swatch="neutral">
        <div class="swatch-chip swatch-chip-sm" style="background-color: {{ neutral.hex }}"></div>
        <div class="swatch-label"><span class="swatch-name">{{ neutral.name }}</span><code>{{ neutral.hex }}</code></div>
      </div>
      {% endfor %}
    </div>
  </div>

  <div>
    <h3 class="subheading">Typography</h3>
    <ul class="bullets">
      <li>Headings: {{ typography.heading_font }}, tight tracking, bold weights</li>
      <li>Body: {{ typography.body_font }} regular, line-height {{ typography.line_height }} for readability</li>
      <li>Mono: {{ typography.mono_font }} for code and metrics</li>
      <li>Scale: {{ typography.scale }}</li>
    </ul>
    <div class="grid grid-2">
      <div class="type-samples">
        {% for sample in typography.samples %}
        <p class="type-sample" style="font-size: {{ sample.size }}px; font-weight: {{ sample.weight }}">{{ sample.text }}</p>
        {% endfor %}
      </div>
      <div class="mono-panel">
        <p>Font stack: {{ typography.stack }}</p>
        <p>Line lengths: {{ typography.line_length }} characters</p>
        <p>Weights: {{ typography.weights }}</p>
      </div>
    </div>
    <div class="type-ramp">
      {% for size in typography.sizes %}<span data-type-size="{{ size }}" style="font-size: {{ size }}px">{{ size }}</span>
      {% endfor %}
    </div>
  </div>

  <div>
    <h3 class="subheading">Spacing &amp; Sizing</h3>
    <p class="lead">Use a {{ spacing.base }}px base grid. Key sizes: {{ spacing.listing }}.</p>
    <div class="spacing-row">
      {% for step in spacing.indicators %}
      <div class="spacing-step" data-spacing="{{ step.value }}">
        <div class="spacing-bar" style="height: {{ step.height }}px"></div>
        <span>{{ step.value }}px</span>
      </div>
      {% endfor %}
    </div>
  </div>

  <div>
    <h3 class="subheading">Grid &amp; Layout</h3>
    <ul class="bullets">
      <li>{{ layout.columns }}-column responsive grid</li>
      <li>Container widths: {{ layout.containers }}</li>
      <li>Gutters: {{ layout.gutter }}; Sections: {{ layout.section_padding }} vertical</li>
      <li>Use max-width for readable content blocks</li>
    </ul>
  </div>

  <div>
    <h3 class="subheading">Radius, Shadows &amp; Elevation</h3>
    <div class="grid grid-3">
      {% for tier in elevation %}
      <div class="elevation-card" data-elevation="{{ tier.name }}" style="border-radius: {{ tier.radius_css }}; box-shadow: {{ tier.shadow_css }}">
        <p class="elevation-name">{{ tier.name }}</p>
        <div class="elevation-preview" style="border-radius: {{ tier.radius_css }}; box-shadow: {{ tier.preview_shadow_css }}"></div>
        <p class="elevation-meta"><code>{{ tier.radius }}</code> <code>{{ tier.shadow }}</code></p>
      </div>
      {% endfor %}
    </div>
    <p class="lead">Default radius: {{ layout.radii.default }}px. Use {{ layout.radii.compact }}px for compact, {{ layout.radii.prominent }}px for prominent components.</p>
    <div class="prose lead">{{ guidelines.elevation | markdown }}</div>
  </div>

  <div>
    <h3 class="subheading">Iconography &amp; Imagery</h3>
    <div class="prose">{{ guidelines.iconography | markdown }}</div>
  </div>
</div>"##;

const COMPONENTS_TEMPLATE: &str = r##"<div class="stack-lg">
  <div>
    <h3 class="subheading">Buttons</h3>
    <div class="prose lead">{{ guidelines.buttons | markdown }}</div>
    <div class="button-row">
      {% for button in buttons %}<button type="button" class="btn btn-{{ button.variant }}"{% if button.disabled %} disabled{% endif %}>{{ button.label }}</button>
      {% endfor %}
    </div>
    <div class="prose">{{ guidelines.button_states | markdown }}</div>
    {% if touch_target %}<p class="lead">Min target: {{ touch_target }}</p>{% endif %}
  </div>

  <div>
    <h3 class="subheading">Inputs &amp; Forms</h3>
    <div class="grid grid-2">
      <div class="stack">
        <label class="field">
          <span class="field-label">Email</span>
          <input type="email" class="input" placeholder="you@vibecoder.dev">
        </label>
        <label class="field">
          <span class="field-label">Password</span>
          <input type="password" class="input">
        </label>
        <div class="prose small">{{ guidelines.forms | markdown }}</div>
      </div>
      <div class="stack">
        <textarea rows="4" class="input" placeholder="Message..."></textarea>
        <div class="checkbox-row">
          <input type="checkbox" id="agree" class="checkbox">
          <label for="agree">I agree to the terms</label>
        </div>
        <button type="button" class="btn btn-primary">Submit</button>
      </div>
    </div>
  </div>

  <div>
    <h3 class="subheading">Navigation Bar</h3>
    <nav class="navbar">
      <div class="navbar-brand">
        <div class="logo-mark"></div>
        <span>{{ brand.name }}</span>
      </div>
      <div class="navbar-links">
        {% for link in demo_nav %}<a href="#{{ link.id }}">{{ link.label }}</a>
        {% endfor %}
      </div>
      <button type="button" class="btn btn-secondary">Get Started</button>
    </nav>
  </div>

  <div>
    <h3 class="subheading">Cards</h3>
    <div class="grid grid-3">
      {% for card in cards %}
      <div class="card">
        <div class="card-media"></div>
        <div class="card-body">
          <p class="card-kicker">{{ card }} Card</p>
          <h4 class="card-title">Card title {{ loop.index }}</h4>
          <p class="small">Short description of the card content. Hover adds subtle lift.</p>
          <button type="button" class="link-btn">Learn more →</button>
        </div>
      </div>
      {% endfor %}
    </div>
  </div>

  <div>
    <h3 class="subheading">Modals &amp; Dialogs</h3>
    <div class="prose lead">{{ guidelines.modals | markdown }}</div>
    <div class="modal-stage">
      <div class="modal-scrim"></div>
      <div class="modal" role="dialog" aria-labelledby="example-modal-title">
        <h4 id="example-modal-title" class="modal-title">Example Modal</h4>
        <p class="small">This is a preview of modal styling and spacing.</p>
        <div class="modal-actions">
          <button type="button" class="btn btn-ghost">Cancel</button>
          <button type="button" class="btn btn-primary">Confirm</button>
        </div>
      </div>
    </div>
  </div>

  <div>
    <h3 class="subheading">Section Containers &amp; Wrappers</h3>
    <div class="prose">{{ guidelines.containers | markdown }}</div>
  </div>
</div>"##;

const BRANDING_TEMPLATE: &str = r##"<div class="grid grid-2 gap-lg">
  <div class="stack">
    <h4 class="minor-heading">Theme</h4>
    <div class="prose">{{ guidelines.theme | markdown }}</div>
    <h4 class="minor-heading">Motifs</h4>
    <div class="prose">{{ guidelines.motifs | markdown }}</div>
    <h4 class="minor-heading">Brand Voice</h4>
    <div class="prose">{{ guidelines.voice | markdown }}</div>
  </div>
  <div class="stack">
    <h4 class="minor-heading">Logo Usage</h4>
    <div class="prose">{{ guidelines.logo_usage | markdown }}</div>
    <h4 class="minor-heading">Do / Don’t</h4>
    <div class="grid grid-2 small">
      <div class="callout callout-do">Do: {{ guidelines.brand_do }}</div>
      <div class="callout callout-dont">Don’t: {{ guidelines.brand_dont }}</div>
    </div>
  </div>
</div>"##;

const MOTION_TEMPLATE: &str = r##"<div class="stack">
  <table class="token-table" data-table="motion">
    <thead>
      <tr><th>Category</th><th>Duration</th><th>Easing</th><th>Timing function</th><th>Use for</th></tr>
    </thead>
    <tbody>
      {% for timing in motion.timings %}
      <tr data-motion="{{ timing.category }}">
        <td>{{ timing.category }}</td>
        <td>{{ timing.duration }}</td>
        <td>{{ timing.easing }}</td>
        <td><code>{{ timing.css }}</code></td>
        <td>{{ timing.usage }}</td>
      </tr>
      {% endfor %}
    </tbody>
  </table>
  <ul class="bullets">
    <li>Entrance: fade+translate {{ motion.entrance_translate }}; Exit: fade+translate</li>
    <li>Hover: {{ motion.hover_scale }} scale, shadow lift; Active: scale {{ motion.active_scale }}</li>
    <li>Scroll: smooth, reveal-on-scroll with {{ motion.reveal_translate }} translate</li>
  </ul>
  <div class="prose">{{ guidelines.motion | markdown }}</div>
  <div class="grid grid-3">
    <div class="demo demo-hover">Hover card</div>
    <button type="button" class="demo demo-press">Active press</button>
    <div class="demo demo-emphasis">Emphasis</div>
  </div>
</div>"##;

const A11Y_TEMPLATE: &str = r##"<div class="stack">
  <table class="token-table" data-table="a11y">
    <thead>
      <tr><th>Concern</th><th>Requirement</th><th>Applies to</th></tr>
    </thead>
    <tbody>
      {% for rule in rules %}
      <tr data-rule="{{ rule.id }}">
        <td>{{ rule.concern }}</td>
        <td class="threshold">≥ {{ rule.threshold }}</td>
        <td>{{ rule.applies_to }}</td>
      </tr>
      {% endfor %}
    </tbody>
  </table>
  <div class="prose">{{ guidelines.accessibility | markdown }}</div>
  <div class="grid grid-2 small">
    <div class="note">Example focus style: <code>focus:ring-2 focus:ring-blue-500</code></div>
    <div class="note">Forms: associate labels with inputs and include helper/error text</div>
  </div>

  <h3 class="subheading">Palette Contrast</h3>
  <p class="lead">Ratios against {{ audit.light }} and {{ audit.dark }}. Text needs {{ audit.text_ratio }}; large text needs {{ audit.large_text_ratio }}.</p>
  <table class="token-table" data-table="contrast">
    <thead>
      <tr><th>Token</th><th>Value</th><th>On {{ audit.light }}</th><th>On {{ audit.dark }}</th></tr>
    </thead>
    <tbody>
      {% for entry in audit.entries %}
      <tr>
        <td><span class="dot" style="background-color: {{ entry.hex }}"></span>{{ entry.name }}</td>
        <td><code>{{ entry.hex }}</code></td>
        <td>{{ entry.on_light }} <span class="grade grade-{{ entry.light_class }}">{{ entry.light_grade }}</span></td>
        <td>{{ entry.on_dark }} <span class="grade grade-{{ entry.dark_class }}">{{ entry.dark_grade }}</span></td>
      </tr>
      {% endfor %}
    </tbody>
  </table>
</div>"##;

const DOCS_TEMPLATE: &str = r##"<div class="prose stack">{{ guidelines.documentation | markdown }}</div>"##;

const FOOTER_TEMPLATE: &str = r##"<footer class="footer">
  <div class="container footer-row">
    <p>© {{ year }} {{ brand.name }} — Design System</p>
    <a href="#top">Back to top ↑</a>
  </div>
</footer>"##;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registers_every_template() {
        let engine = TemplateEngine::new();

        for (name, _) in TEMPLATES {
            assert!(engine.env.get_template(name).is_ok(), "missing {name}");
        }
    }

    #[test]
    fn renders_footer_with_year() {
        let engine = TemplateEngine::new();

        let html = engine
            .render(
                "footer.html",
                &json!({ "year": 2031, "brand": { "name": "Vibe Coder" } }),
            )
            .unwrap();

        assert!(html.contains("© 2031 Vibe Coder — Design System"));
        assert!(html.contains("href=\"#top\""));
    }

    #[test]
    fn escapes_token_names() {
        let engine = TemplateEngine::new();

        let html = engine
            .render(
                "branding.html",
                &json!({ "guidelines": {
                    "theme": "", "motifs": "", "voice": "", "logo_usage": "",
                    "brand_do": "<b>bold</b>", "brand_dont": "",
                } }),
            )
            .unwrap();

        assert!(html.contains("&lt;b&gt;bold&lt;&#x2f;b&gt;"));
    }

    #[test]
    fn error_page_escapes_message() {
        let engine = TemplateEngine::new();

        let html = engine
            .render(
                "error.html",
                &json!({ "site_title": "Stylebook", "base_url": "/", "scripts": [], "message": "bad <hex>" }),
            )
            .unwrap();

        assert!(html.contains("bad &lt;hex&gt;"));
    }

    #[test]
    fn renders_markdown_lists() {
        let html = render_markdown("- one\n- two\n");

        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn markdown_filter_is_not_escaped() {
        let engine = TemplateEngine::new();

        let html = engine
            .render("docs.html", &json!({ "guidelines": { "documentation": "**bold**" } }))
            .unwrap();

        assert!(html.contains("<strong>bold</strong>"));
    }
}
