//! Static build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use stylebook_static::StaticBuilder;

use crate::config::StylebookConfig;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building style guide...");

    let file_config = StylebookConfig::load(config_path)?;

    let mut config = file_config.build_config();
    if let Some(output) = output {
        config.output_dir = output;
    }
    if let Some(minify) = minify {
        config.minify = minify;
    }

    let result = StaticBuilder::new(config).build()?;

    tracing::info!(
        "Built {} sections with {} swatches in {}ms",
        result.sections,
        result.swatches,
        result.duration_ms
    );
    if result.public_files > 0 {
        tracing::info!("Copied {} public files", result.public_files);
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
