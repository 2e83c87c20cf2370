//! Initialize a style guide in the current project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use stylebook_tokens::Catalogue;

/// Run the init command. Files are written next to `config_path`.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing stylebook...");

    let root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(root).context("Failed to create project directory")?;

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
    } else {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    }

    let tokens_path = root.join("tokens.toml");
    if tokens_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            tokens_path.display()
        );
    } else {
        let tokens = Catalogue::default()
            .to_toml_string()
            .context("Failed to serialize the built-in catalogue")?;
        fs::write(&tokens_path, format!("{TOKENS_HEADER}{tokens}"))
            .with_context(|| format!("Failed to write {}", tokens_path.display()))?;
        tracing::info!("Created {}", tokens_path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'stylebook dev' to start the development server.");

    Ok(())
}

const TOKENS_HEADER: &str = "# Design tokens. Remove any table to fall back to the built-in value.\n\n";

const DEFAULT_CONFIG: &str = r#"# Stylebook Configuration

[site]
# Page title (defaults to the brand's system name)
title = "Vibe Coder Design System"

# Output directory for the built page
output = "dist"

# Base URL (for deployment)
base_url = "/"

# Design token catalogue
tokens = "tokens.toml"

# Static files copied verbatim into the output
# public = "public"

[hero]
# spline (default) | image | none
kind = "spline"
url = "https://prod.spline.design/qQUip0dJPqrrPryE/scene.splinecode"
# fallback = "hero.png"

[build]
# Minify the generated CSS
minify = true
"#;
