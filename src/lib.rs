//! semdoc - enhancement for server-rendered semantic documents.
//!
//! A semantic document is HTML carrying review and reference markup:
//! comment boundaries, suggested insertions and deletions, footnote
//! references and bodies, numbered list paragraphs and `bid` anchors.
//! [`enhance::enhance`] decorates such a document in place; [`api`] queries
//! it; [`runtime::Session`] drives click and navigation behaviour on a
//! virtual clock.
//!
//! ```ignore
//! let mut doc = Document::parse(html)?;
//! enhance(&mut doc, EnhanceOptions::default());
//!
//! let mut session = Session::recording(doc);
//! session.navigate_to_bid("note3");
//! session.advance(Duration::from_millis(2000));
//! ```

#[macro_use]
pub mod logger;

pub mod api;
pub mod cli;
pub mod config;
pub mod dom;
pub mod enhance;
pub mod registry;
pub mod runtime;
pub mod utils;

pub use dom::{Document, NodeId, Selector};
pub use enhance::{EnhanceOptions, EnhanceReport, Enhancer, enhance};
pub use runtime::{RecordingViewport, Session, Viewport};
