//! Static renderer for the design system style guide.
//!
//! Renders a token catalogue into a single page with in-page navigation,
//! generates the token stylesheet, and writes the site to disk.

pub mod assets;
pub mod builder;
pub mod hero;
pub mod render;
pub mod sections;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use hero::{EmptyHero, HeroConfig, HeroMarkup, HeroVisual, SplineScene, StaticImage};
pub use render::{current_year, CatalogueRenderer, RenderError, SiteOptions};
pub use sections::{check_anchors, AnchorReport, SectionInfo, SECTIONS};
