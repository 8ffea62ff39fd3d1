//! In-memory element tree for folio.
//!
//! Provides an arena-backed document with a declarative element factory,
//! simple selector lookup, synchronous click dispatch and HTML serialization.

pub mod events;
pub mod factory;
pub mod query;
pub mod serialize;
pub mod tree;

pub use events::{Event, EventKind, Listener};
pub use factory::ElementOptions;
pub use query::Selector;
pub use serialize::{escape_attribute, escape_text};
pub use tree::{Dom, DomError, Element, NameKind, NodeData, NodeId};
