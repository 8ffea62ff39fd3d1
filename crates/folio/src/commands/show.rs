//! Print a framed preview of one article.

use std::path::Path;

use anyhow::{Context, Result};
use folio_data::{load_document, preview_article};

/// Run the show command.
pub async fn run(file: &Path, article_id: &str) -> Result<()> {
    let doc = load_document(file).with_context(|| format!("Failed to load {}", file.display()))?;

    let article = doc
        .find_article(article_id)
        .with_context(|| format!("No article with id {:?} in {}", article_id, file.display()))?;

    println!("{}", preview_article(article));

    Ok(())
}
