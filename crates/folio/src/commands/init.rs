//! Initialize a documentation project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::config_root;

/// Run the init command, creating the config and a starter data file.
///
/// The data directory is created next to the config file.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing folio...");

    let docs_dir = config_root(config_path).join("docs");

    if docs_dir.exists() {
        if !yes {
            tracing::warn!(
                "{} directory already exists. Use --yes to overwrite.",
                docs_dir.display()
            );
            return Ok(());
        }
    } else {
        fs::create_dir_all(&docs_dir)
            .with_context(|| format!("Failed to create {}", docs_dir.display()))?;
    }

    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    }

    let index_path = docs_dir.join("index.json");
    if !index_path.exists() || yes {
        fs::write(&index_path, DEFAULT_INDEX)
            .with_context(|| format!("Failed to write {}", index_path.display()))?;
        tracing::info!("Created {}", index_path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'folio build' to generate the site.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# folio configuration

[site]
# Directory holding the JSON data files, one page per file
data_dir = "docs"

# Output directory for the built site
output = "dist"

# Site title
title = "My Documentation"

# Base URL (for deployment)
base_url = "/"

[mount]
# Selector of the content container and id of the sidebar container
main = "main"
sidebar = "sidebar-nav"

[render]
# "trusted" inserts topic names and output samples as markup, "escape" as text
markup = "trusted"

[build]
# Minify the stylesheet
minify = true
"#;

const DEFAULT_INDEX: &str = r#"[
    {
        "id": "basics",
        "name": "Основы",
        "sections": [
            {
                "id": "hello",
                "title": "Hello, world",
                "explanation": "Print a greeting.",
                "parameters": [
                    {"name": "value", "description": "what to print"}
                ],
                "code": [
                    {"language": "python", "content": "print(\"Hello, world\")"},
                    {"language": "output", "content": "Hello, world"}
                ]
            }
        ]
    }
]
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;

    #[test]
    fn starter_files_are_valid() {
        let doc = folio_data::parse_document(DEFAULT_INDEX).unwrap();
        assert!(folio_data::validate_document(&doc).is_empty());
        assert_eq!(doc.articles().count(), 1);

        let config: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.site.title, "My Documentation");
    }

    #[tokio::test]
    async fn writes_data_next_to_config() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("sub").join("folio.toml");
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();

        run(&config_path, false).await.unwrap();

        let index = temp.path().join("sub/docs/index.json");
        assert!(config_path.exists());
        assert!(index.exists());

        let build = ConfigFile::load(&config_path)
            .unwrap()
            .into_build_config(None, None);
        assert_eq!(build.data_dir, temp.path().join("sub/docs"));
        assert_eq!(build.output_dir, temp.path().join("sub/dist"));
    }
}
