//! Configuration file (folio.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_static::{BuildConfig, MarkupPolicy, Mounts, RenderOptions};
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub mount: MountConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub build: BuildSettings,

    /// Directory relative paths resolve against: the config file's directory
    #[serde(skip)]
    pub root: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory holding the JSON data files
    pub data_dir: String,
    pub output: String,
    pub title: String,
    pub base_url: String,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_dir: "docs".to_string(),
            output: "dist".to_string(),
            title: "Documentation".to_string(),
            base_url: "/".to_string(),
            styles: vec![],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MountConfig {
    /// Selector of the content container
    pub main: String,
    /// Id of the sidebar container
    pub sidebar: String,
}

impl Default for MountConfig {
    fn default() -> Self {
        let mounts = Mounts::default();
        Self {
            main: mounts.main,
            sidebar: mounts.sidebar,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub markup: MarkupPolicy,
    pub parameters_title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let options = RenderOptions::default();
        Self {
            markup: options.markup,
            parameters_title: options.parameters_title,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self { minify: true }
    }
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    ///
    /// Relative paths in the file resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let root = config_root(path);

        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self {
                root,
                ..Self::default()
            });
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.root = root;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Data directory, resolved against the config directory.
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(&self.site.data_dir)
    }

    /// Builder configuration, with command-line overrides applied.
    pub fn into_build_config(self, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
        BuildConfig {
            data_dir: self.data_dir(),
            output_dir: output.unwrap_or_else(|| self.root.join(&self.site.output)),
            minify: minify.unwrap_or(self.build.minify),
            styles: self
                .site
                .styles
                .iter()
                .map(|style| self.root.join(style).to_string_lossy().into_owned())
                .collect(),
            base_url: self.site.base_url,
            title: self.site.title,
            mounts: Mounts {
                main: self.mount.main,
                sidebar: self.mount.sidebar,
            },
            render: RenderOptions {
                markup: self.render.markup,
                parameters_title: self.render.parameters_title,
            },
        }
    }
}

/// Directory holding the config file; empty for a bare file name.
pub fn config_root(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let temp = tempfile::tempdir().unwrap();
        let config = ConfigFile::load(&temp.path().join("folio.toml")).unwrap();

        let build = config.into_build_config(None, None);
        assert_eq!(build.data_dir, temp.path().join("docs"));
        assert_eq!(build.output_dir, temp.path().join("dist"));
        assert!(build.minify);
        assert_eq!(build.mounts, Mounts::default());
        assert_eq!(build.render, RenderOptions::default());
    }

    #[test]
    fn reads_partial_sections() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("folio.toml");
        fs::write(
            &path,
            r#"
[site]
title = "Python notes"

[mount]
sidebar = "side"

[render]
markup = "escape"
"#,
        )
        .unwrap();

        let build = ConfigFile::load(&path)
            .unwrap()
            .into_build_config(Some(PathBuf::from("out")), Some(false));

        assert_eq!(build.title, "Python notes");
        assert_eq!(build.base_url, "/");
        assert_eq!(build.output_dir, PathBuf::from("out"));
        assert!(!build.minify);
        assert_eq!(build.mounts.main, "main");
        assert_eq!(build.mounts.sidebar, "side");
        assert_eq!(build.render.markup, MarkupPolicy::Escape);
        assert_eq!(build.render.parameters_title, "Параметры:");
    }

    #[test]
    fn bare_file_name_resolves_in_working_directory() {
        assert_eq!(config_root(Path::new("folio.toml")), PathBuf::new());
        assert_eq!(config_root(Path::new("sub/folio.toml")), PathBuf::from("sub"));

        let config = ConfigFile {
            root: config_root(Path::new("folio.toml")),
            ..ConfigFile::default()
        };
        assert_eq!(config.data_dir(), PathBuf::from("docs"));
    }

    #[test]
    fn rejects_malformed_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("folio.toml");
        fs::write(&path, "[render]\nmarkup = \"sometimes\"\n").unwrap();

        assert!(ConfigFile::load(&path).is_err());
    }
}
