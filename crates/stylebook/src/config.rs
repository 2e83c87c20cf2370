//! Site configuration (`stylebook.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use stylebook_static::{BuildConfig, HeroConfig};

/// Configuration file structure. Every key is optional.
#[derive(Debug, Deserialize, Default)]
pub struct StylebookConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub hero: HeroConfig,
    #[serde(default)]
    pub build: BuildSettings,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub root: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Catalogue override; the built-in catalogue when unset
    pub tokens: Option<PathBuf>,
    /// Static files copied verbatim into the output
    pub public: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            output: default_output(),
            base_url: default_base_url(),
            tokens: None,
            public: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_minify() -> bool {
    true
}

impl StylebookConfig {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self {
                root,
                ..Self::default()
            });
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: StylebookConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.root = root;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Builder settings, with paths resolved against the config directory.
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            output_dir: self.resolve(&self.site.output),
            minify: self.build.minify,
            base_url: self.site.base_url.clone(),
            title: self.site.title.clone(),
            tokens: self.site.tokens.as_deref().map(|p| self.resolve(p)),
            public_dir: self.site.public.as_deref().map(|p| self.resolve(p)),
            hero: self.hero.clone(),
            scripts: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = StylebookConfig::load(&temp.path().join("stylebook.toml")).unwrap();
        let build = config.build_config();

        assert_eq!(build.output_dir, temp.path().join("dist"));
        assert!(build.minify);
        assert_eq!(build.tokens, None);
        assert_eq!(build.hero, HeroConfig::default());
    }

    #[test]
    fn resolves_paths_against_config_directory() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("stylebook.toml");
        fs::write(
            &path,
            r#"
[site]
title = "Acme Design System"
output = "site"
tokens = "tokens.toml"
public = "public"

[hero]
kind = "image"
src = "hero.png"
alt = "Hero"

[build]
minify = false
"#,
        )
        .unwrap();

        let build = StylebookConfig::load(&path).unwrap().build_config();

        assert_eq!(build.title, "Acme Design System");
        assert_eq!(build.output_dir, temp.path().join("site"));
        assert_eq!(build.tokens, Some(temp.path().join("tokens.toml")));
        assert_eq!(build.public_dir, Some(temp.path().join("public")));
        assert!(!build.minify);
        assert_eq!(
            build.hero,
            HeroConfig::Image {
                src: "hero.png".to_string(),
                alt: "Hero".to_string(),
            }
        );
    }

    #[test]
    fn bare_file_name_resolves_to_current_directory() {
        let config = StylebookConfig::load(Path::new("does-not-exist.toml")).unwrap();

        assert_eq!(config.build_config().output_dir, PathBuf::from("./dist"));
    }

    #[test]
    fn rejects_malformed_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("stylebook.toml");
        fs::write(&path, "[hero]\nkind = \"video\"\n").unwrap();

        assert!(StylebookConfig::load(&path).is_err());
    }
}
