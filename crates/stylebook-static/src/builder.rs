//! Static style guide builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use stylebook_tokens::{Catalogue, TokenError};

use crate::assets::AssetPipeline;
use crate::hero::HeroConfig;
use crate::render::{current_year, CatalogueRenderer, RenderError, SiteOptions};
use crate::sections::SECTIONS;

/// Configuration for building the style guide.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Minify the generated CSS
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title; the brand's system name when empty
    pub title: String,

    /// Catalogue override file; the built-in catalogue when unset
    pub tokens: Option<PathBuf>,

    /// Static files copied verbatim into the output
    pub public_dir: Option<PathBuf>,

    /// Visual placed in the hero slot
    pub hero: HeroConfig,

    /// Extra scripts appended to the page body
    pub scripts: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: String::new(),
            tokens: None,
            public_dir: None,
            hero: HeroConfig::default(),
            scripts: vec![],
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of color and neutral swatches rendered
    pub swatches: usize,

    /// Number of page sections rendered
    pub sections: usize,

    /// Number of files copied from the public directory
    pub public_files: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Catalogue(#[from] TokenError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static style guide builder.
pub struct StaticBuilder {
    config: BuildConfig,
    renderer: CatalogueRenderer,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let site = SiteOptions {
            title: config.title.clone(),
            base_url: config.base_url.clone(),
            scripts: config.scripts.clone(),
        };
        let renderer = CatalogueRenderer::new(site, config.hero.visual());

        Self { config, renderer }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Load the configured catalogue, or the built-in one, and validate it.
    pub fn load_catalogue(&self) -> Result<Catalogue, BuildError> {
        let catalogue = match &self.config.tokens {
            Some(path) => {
                let catalogue = Catalogue::load(path)?;
                tracing::debug!("Loaded catalogue from {}", path.display());
                catalogue
            }
            None => {
                let catalogue = Catalogue::default();
                catalogue.validate()?;
                catalogue
            }
        };

        Ok(catalogue)
    }

    /// Render `index.html` for a catalogue, with the current year in the footer.
    pub fn render_page(&self, catalogue: &Catalogue) -> Result<String, BuildError> {
        Ok(self.renderer.render(catalogue, current_year())?)
    }

    /// Render the page shown in place of the style guide when the catalogue is invalid.
    pub fn render_error_page(&self, message: &str) -> Result<String, BuildError> {
        Ok(self.renderer.render_error(message)?)
    }

    /// Generate `main.css` for a catalogue, minified when configured.
    pub fn stylesheet(&self, catalogue: &Catalogue) -> String {
        let css = AssetPipeline::generate_css(catalogue);
        if !self.config.minify {
            return css;
        }

        match AssetPipeline::minify_css(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("Serving unminified CSS: {}", e);
                css
            }
        }
    }

    /// Build the style guide.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        // Ensure output directory exists
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let catalogue = self.load_catalogue()?;

        let html = self.render_page(&catalogue)?;
        fs::write(self.config.output_dir.join("index.html"), html)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        self.generate_assets(&catalogue)?;
        self.export_tokens(&catalogue)?;
        let public_files = self.copy_public()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            swatches: catalogue.colors.len() + catalogue.neutrals.len(),
            sections: SECTIONS.len(),
            public_files,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Generate static assets.
    fn generate_assets(&self, catalogue: &Catalogue) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("main.css"), self.stylesheet(catalogue))
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Export the catalogue for downstream consumers.
    fn export_tokens(&self, catalogue: &Catalogue) -> Result<(), BuildError> {
        let json = catalogue.to_json()?;

        fs::write(self.config.output_dir.join("tokens.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Copy the public directory verbatim. Returns the number of files copied.
    fn copy_public(&self) -> Result<usize, BuildError> {
        let Some(public_dir) = &self.config.public_dir else {
            return Ok(0);
        };

        if !public_dir.exists() {
            tracing::warn!("Public directory not found: {}", public_dir.display());
            return Ok(0);
        }

        let mut copied = 0;

        for entry in WalkDir::new(public_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(public_dir).unwrap_or(path);
            if GENERATED_OUTPUTS.iter().any(|out| relative == Path::new(out)) {
                tracing::warn!(
                    "Skipping {}: {} is generated from the catalogue",
                    path.display(),
                    relative.display()
                );
                continue;
            }

            let target = self.config.output_dir.join(relative);

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
            }

            fs::copy(path, &target).map_err(|e| read_error(path, e))?;
            copied += 1;
        }

        tracing::debug!("Copied {} public files from {}", copied, public_dir.display());

        Ok(copied)
    }
}

/// Files the build writes itself; `public/` may not replace them.
const GENERATED_OUTPUTS: [&str; 3] = ["index.html", "assets/main.css", "tokens.json"];

fn read_error(path: &Path, e: std::io::Error) -> BuildError {
    BuildError::ReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn config_for(out: &Path) -> BuildConfig {
        BuildConfig {
            output_dir: out.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn builds_page_assets_and_tokens() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let result = StaticBuilder::new(config_for(&out)).build().unwrap();

        assert_eq!(result.swatches, 11);
        assert_eq!(result.sections, 6);
        assert!(out.join("index.html").exists());
        assert!(out.join("assets/main.css").exists());
        assert!(out.join("tokens.json").exists());
    }

    #[test]
    fn exported_tokens_match_catalogue() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        StaticBuilder::new(config_for(&out)).build().unwrap();

        let json = fs::read_to_string(out.join("tokens.json")).unwrap();
        let exported: Catalogue = serde_json::from_str(&json).unwrap();
        assert_eq!(exported, Catalogue::default());
    }

    #[test]
    fn minifies_css_unless_disabled() {
        let temp = tempdir().unwrap();
        let minified = temp.path().join("min");
        let plain = temp.path().join("plain");

        StaticBuilder::new(config_for(&minified)).build().unwrap();
        StaticBuilder::new(BuildConfig {
            minify: false,
            ..config_for(&plain)
        })
        .build()
        .unwrap();

        let minified = fs::read_to_string(minified.join("assets/main.css")).unwrap();
        let plain = fs::read_to_string(plain.join("assets/main.css")).unwrap();
        assert!(!minified.contains('\n'));
        assert!(plain.contains("--color-primary: #2563EB;"));
    }

    #[test]
    fn page_footer_uses_build_year() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        StaticBuilder::new(config_for(&out)).build().unwrap();

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(html.contains(&format!("© {} ", current_year())));
    }

    #[test]
    fn reads_catalogue_override() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let tokens = temp.path().join("tokens.toml");
        fs::write(
            &tokens,
            r##"
spacing = [4, 8, 12]

[[colors]]
name = "Primary"
hex = "#2563EB"

[[colors]]
name = "Secondary"
hex = "#7C3AED"
"##,
        )
        .unwrap();

        let result = StaticBuilder::new(BuildConfig {
            tokens: Some(tokens),
            ..config_for(&out)
        })
        .build()
        .unwrap();

        let html = fs::read_to_string(out.join("index.html")).unwrap();
        assert_eq!(result.swatches, 7);
        assert_eq!(html.matches("data-swatch=\"color\"").count(), 2);
        assert_eq!(html.matches("class=\"spacing-bar\"").count(), 3);
    }

    #[test]
    fn rejects_invalid_catalogue() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let tokens = temp.path().join("tokens.toml");
        fs::write(&tokens, "spacing = [8, 4]\n").unwrap();

        let err = StaticBuilder::new(BuildConfig {
            tokens: Some(tokens),
            ..config_for(&out)
        })
        .build()
        .unwrap_err();

        assert!(matches!(err, BuildError::Catalogue(_)));
        assert!(!out.join("index.html").exists());
    }

    #[test]
    fn reports_missing_catalogue_file() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let err = StaticBuilder::new(BuildConfig {
            tokens: Some(temp.path().join("missing.toml")),
            ..config_for(&out)
        })
        .build()
        .unwrap_err();

        assert!(matches!(err, BuildError::Catalogue(TokenError::Read { .. })));
    }

    #[test]
    fn copies_public_directory() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let public = temp.path().join("public");
        fs::create_dir_all(public.join("img")).unwrap();
        fs::write(public.join("img/hero.png"), b"png").unwrap();
        fs::write(public.join("favicon.ico"), b"ico").unwrap();

        let result = StaticBuilder::new(BuildConfig {
            public_dir: Some(public),
            ..config_for(&out)
        })
        .build()
        .unwrap();

        assert_eq!(result.public_files, 2);
        assert_eq!(fs::read(out.join("img/hero.png")).unwrap(), b"png");
        assert!(out.join("favicon.ico").exists());
    }

    #[test]
    fn public_files_never_replace_generated_outputs() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        let public = temp.path().join("public");
        fs::create_dir_all(public.join("assets")).unwrap();
        fs::write(public.join("index.html"), "stale").unwrap();
        fs::write(public.join("tokens.json"), "{}").unwrap();
        fs::write(public.join("assets/main.css"), "body{}").unwrap();
        fs::write(public.join("assets/logo.svg"), "<svg/>").unwrap();

        let result = StaticBuilder::new(BuildConfig {
            public_dir: Some(public),
            ..config_for(&out)
        })
        .build()
        .unwrap();

        assert_eq!(result.public_files, 1);
        assert!(fs::read_to_string(out.join("index.html"))
            .unwrap()
            .contains("id=\"foundations\""));
        assert!(fs::read_to_string(out.join("tokens.json"))
            .unwrap()
            .contains("\"colors\""));
        assert!(fs::read_to_string(out.join("assets/main.css"))
            .unwrap()
            .contains("--color-primary"));
        assert!(out.join("assets/logo.svg").exists());
    }

    #[test]
    fn skips_missing_public_directory() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let result = StaticBuilder::new(BuildConfig {
            public_dir: Some(temp.path().join("public")),
            ..config_for(&out)
        })
        .build()
        .unwrap();

        assert_eq!(result.public_files, 0);
    }

    #[test]
    fn appends_configured_scripts() {
        let temp = tempdir().unwrap();
        let builder = StaticBuilder::new(BuildConfig {
            scripts: vec!["/__hmr.js".to_string()],
            hero: HeroConfig::None,
            ..config_for(temp.path())
        });

        let catalogue = builder.load_catalogue().unwrap();
        let html = builder.render_page(&catalogue).unwrap();

        assert!(html.contains("<script src=\"&#x2f;__hmr.js\"></script>"));
    }
}
