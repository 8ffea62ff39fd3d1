//! Static page generator for folio documentation.
//!
//! Renders each JSON data file into an HTML page with a content area and a
//! collapsible sidebar, plus the shared stylesheet, runtime script and
//! search index.

pub mod assets;
pub mod builder;
pub mod render;
pub mod templates;

pub use builder::{host_page, BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use render::{
    wire_accordions, AccordionState, DocumentRenderer, MarkupPolicy, Mounts, RenderOptions,
};
