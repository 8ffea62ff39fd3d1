//! Data model for folio documentation files.
//!
//! A data file is a JSON array of topics, each holding articles with optional
//! parameter lists and code samples. This crate loads those files, checks
//! their ids and renders a terminal preview of a single article.

pub mod codeblock;
pub mod loader;
pub mod model;
pub mod preview;
pub mod validate;

pub use codeblock::{CodeBlock, CodeKind, OUTPUT_LANGUAGE};
pub use loader::{load_document, parse_document, LoadError};
pub use model::{Article, Document, Parameter, Topic, DEFAULT_PARAMETERS_TITLE};
pub use preview::preview_article;
pub use validate::{validate_document, validate_id, IdError, IdScope, ValidationIssue};
