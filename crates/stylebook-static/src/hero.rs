//! Pluggable hero visual slot.
//!
//! The hero banner hosts an opaque, externally authored scene. The renderer
//! only needs markup to drop into a bounded region, so any visual can be
//! swapped in by implementing [`HeroVisual`].

use minijinja::HtmlEscape;
use serde::{Deserialize, Serialize};

/// Scene shown on the Vibe Coder style guide.
pub const DEFAULT_SCENE_URL: &str =
    "https://prod.spline.design/qQUip0dJPqrrPryE/scene.splinecode";

/// Module script that defines the `<spline-viewer>` element.
pub const SPLINE_VIEWER_SCRIPT: &str =
    "https://unpkg.com/@splinetool/viewer@1.9.48/build/spline-viewer.js";

/// Markup produced by a hero visual.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeroMarkup {
    /// Identifier of the visual that produced the markup
    pub kind: &'static str,
    /// HTML placed inside the hero region
    pub html: String,
    /// Module scripts to load in the page head
    pub module_scripts: Vec<String>,
}

/// A visual that fills the hero region.
pub trait HeroVisual: Send + Sync {
    /// Visual identifier (e.g., "spline", "image")
    fn name(&self) -> &'static str;

    /// Produce the markup for the hero region.
    fn render(&self) -> HeroMarkup;
}

/// An interactive Spline scene, referenced by URL.
#[derive(Debug, Clone)]
pub struct SplineScene {
    pub url: String,
    /// Image shown beneath the viewer; stays visible if the scene fails to load
    pub fallback_image: Option<String>,
}

impl HeroVisual for SplineScene {
    fn name(&self) -> &'static str {
        "spline"
    }

    fn render(&self) -> HeroMarkup {
        let mut html = String::new();

        if let Some(src) = &self.fallback_image {
            html.push_str(&format!(
                r#"<img class="hero-fallback" src="{}" alt="" aria-hidden="true">"#,
                HtmlEscape(src)
            ));
        }

        html.push_str(&format!(
            r#"<spline-viewer class="hero-scene" url="{}"></spline-viewer>"#,
            HtmlEscape(&self.url)
        ));

        HeroMarkup {
            kind: self.name(),
            html,
            module_scripts: vec![SPLINE_VIEWER_SCRIPT.to_string()],
        }
    }
}

/// A static image.
#[derive(Debug, Clone)]
pub struct StaticImage {
    pub src: String,
    pub alt: String,
}

impl HeroVisual for StaticImage {
    fn name(&self) -> &'static str {
        "image"
    }

    fn render(&self) -> HeroMarkup {
        HeroMarkup {
            kind: self.name(),
            html: format!(
                r#"<img class="hero-image" src="{}" alt="{}">"#,
                HtmlEscape(&self.src),
                HtmlEscape(&self.alt)
            ),
            module_scripts: vec![],
        }
    }
}

/// An empty hero region.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyHero;

impl HeroVisual for EmptyHero {
    fn name(&self) -> &'static str {
        "none"
    }

    fn render(&self) -> HeroMarkup {
        HeroMarkup {
            kind: self.name(),
            ..HeroMarkup::default()
        }
    }
}

/// Hero selection as written in `stylebook.toml`.
///
/// `kind` defaults to `spline` when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", try_from = "HeroTable")]
pub enum HeroConfig {
    Spline {
        url: String,
        fallback: Option<String>,
    },
    Image {
        src: String,
        alt: String,
    },
    None,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum HeroKind {
    #[default]
    Spline,
    Image,
    None,
}

/// Flat `[hero]` table, checked against its `kind` on conversion.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HeroTable {
    #[serde(default)]
    kind: HeroKind,
    url: Option<String>,
    fallback: Option<String>,
    src: Option<String>,
    #[serde(default)]
    alt: String,
}

impl TryFrom<HeroTable> for HeroConfig {
    type Error = String;

    fn try_from(table: HeroTable) -> Result<Self, Self::Error> {
        match table.kind {
            HeroKind::Spline => Ok(HeroConfig::Spline {
                url: table.url.unwrap_or_else(default_scene_url),
                fallback: table.fallback,
            }),
            HeroKind::Image => {
                let src = table.src.ok_or("hero kind \"image\" requires `src`")?;
                Ok(HeroConfig::Image {
                    src,
                    alt: table.alt,
                })
            }
            HeroKind::None => Ok(HeroConfig::None),
        }
    }
}

fn default_scene_url() -> String {
    DEFAULT_SCENE_URL.to_string()
}

impl Default for HeroConfig {
    fn default() -> Self {
        HeroConfig::Spline {
            url: default_scene_url(),
            fallback: None,
        }
    }
}

impl HeroConfig {
    /// Build the configured visual.
    pub fn visual(&self) -> Box<dyn HeroVisual> {
        match self {
            HeroConfig::Spline { url, fallback } => Box::new(SplineScene {
                url: url.clone(),
                fallback_image: fallback.clone(),
            }),
            HeroConfig::Image { src, alt } => Box::new(StaticImage {
                src: src.clone(),
                alt: alt.clone(),
            }),
            HeroConfig::None => Box::new(EmptyHero),
        }
    }
}
