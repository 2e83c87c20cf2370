//! Catalogue validation and contrast audit.

use std::fmt::Write;
use std::path::Path;

use anyhow::Result;
use stylebook_static::StaticBuilder;
use stylebook_tokens::{audit, ratio_label, ContrastAudit};

use crate::config::StylebookConfig;

/// Run the check command.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = StylebookConfig::load(config_path)?;
    let builder = StaticBuilder::new(config.build_config());

    let catalogue = builder.load_catalogue()?;
    tracing::info!(
        "Catalogue is valid: {} colors, {} neutrals, {} spacing steps",
        catalogue.colors.len(),
        catalogue.neutrals.len(),
        catalogue.spacing.len()
    );

    // Rendering checks that every in-page link resolves
    builder.render_page(&catalogue)?;
    tracing::info!("All navigation anchors resolve");

    let report = audit(&catalogue);
    print!("{}", format_audit(&report));

    for entry in report.unusable() {
        tracing::warn!(
            "{} ({}) is below {} on both {} and {}",
            entry.name,
            entry.hex,
            ratio_label(report.large_text_ratio),
            report.light,
            report.dark
        );
    }

    Ok(())
}

/// Plain-text contrast table.
pub fn format_audit(report: &ContrastAudit) -> String {
    let width = report
        .entries
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0)
        .max("Token".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:<7}  {:<18}  {:<18}",
        "Token",
        "Value",
        format!("On {}", report.light),
        format!("On {}", report.dark),
    );

    for entry in &report.entries {
        let _ = writeln!(
            out,
            "{:<width$}  {:<7}  {:<18}  {:<18}",
            entry.name,
            entry.hex.to_string(),
            format!("{} {}", ratio_label(entry.on_light), entry.light_grade),
            format!("{} {}", ratio_label(entry.on_dark), entry.dark_grade),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use stylebook_tokens::Catalogue;
    use tempfile::tempdir;

    #[test]
    fn lists_every_swatch() {
        let catalogue = Catalogue::default();

        let table = format_audit(&audit(&catalogue));

        assert_eq!(
            table.lines().count(),
            1 + catalogue.colors.len() + catalogue.neutrals.len()
        );
        assert!(table.starts_with("Token"));
        assert!(table.contains("On #FFFFFF"));
        assert!(table.contains("Neutral 900"));
        assert!(table.contains("On #0F172A"));
    }

    #[tokio::test]
    async fn passes_builtin_catalogue() {
        let temp = tempdir().unwrap();

        run(&temp.path().join("stylebook.toml")).await.unwrap();
    }

    #[tokio::test]
    async fn fails_on_invalid_catalogue() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("stylebook.toml");
        fs::write(&config_path, "[site]\ntokens = \"tokens.toml\"\n").unwrap();
        fs::write(
            temp.path().join("tokens.toml"),
            "[[colors]]\nname = \"Primary\"\nhex = \"#2563EB\"\n\n[[colors]]\nname = \"primary\"\nhex = \"#7C3AED\"\n",
        )
        .unwrap();

        let err = run(&config_path).await.unwrap_err();

        assert!(err.to_string().contains("Duplicate color"));
    }
}
