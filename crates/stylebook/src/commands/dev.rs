//! Development server command.

use std::path::Path;

use anyhow::Result;
use stylebook_server::{ConfigSource, DevServer, DevServerConfig};

use crate::config::StylebookConfig;

/// Run the dev server.
pub async fn run(config_path: &Path, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let config = server_config(config_path, port, open)?;

    DevServer::new(config).start().await?;

    Ok(())
}

/// Server settings from the site config, reloaded whenever it changes.
fn server_config(config_path: &Path, port: u16, open: bool) -> Result<DevServerConfig> {
    let file_config = StylebookConfig::load(config_path)?;

    let reload_path = config_path.to_path_buf();
    let source = ConfigSource::new(config_path, move || {
        StylebookConfig::load(&reload_path)
            .map(|config| config.build_config())
            .map_err(|e| format!("{:#}", e))
    });

    Ok(DevServerConfig {
        build: file_config.build_config(),
        config: Some(source),
        port,
        open,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use stylebook_static::HeroConfig;
    use tempfile::tempdir;

    #[test]
    fn reloads_edited_site_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("stylebook.toml");
        fs::write(&path, "[site]\ntitle = \"Vibe Coder\"\n").unwrap();

        let config = server_config(&path, 7777, false).unwrap();
        assert_eq!(config.build.title, "Vibe Coder");
        assert!(config.watch_paths().contains(&path));

        fs::write(
            &path,
            "[site]\ntitle = \"Acme\"\ntokens = \"tokens.toml\"\n\n[hero]\nkind = \"none\"\n",
        )
        .unwrap();
        let source = config.config.unwrap();
        let reloaded = (source.load)().unwrap();

        assert_eq!(reloaded.title, "Acme");
        assert_eq!(reloaded.hero, HeroConfig::None);
        assert_eq!(reloaded.tokens, Some(temp.path().join("tokens.toml")));
    }

    #[test]
    fn malformed_edit_reports_parse_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("stylebook.toml");

        let config = server_config(&path, 7777, false).unwrap();
        fs::write(&path, "[hero]\nkind = \"video\"\n").unwrap();

        let err = (config.config.unwrap().load)().unwrap_err();
        assert!(err.contains("Failed to parse"));
    }
}
