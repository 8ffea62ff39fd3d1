//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use folio_static::StaticBuilder;

use crate::config::ConfigFile;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let config = ConfigFile::load(config_path)?.into_build_config(output, minify);

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} pages with {} articles in {}ms",
        result.pages,
        result.articles,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
