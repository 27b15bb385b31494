#![forbid(unsafe_code)]

//! `cellgraph` builds, mutates and reads draw.io (mxGraph) diagrams without a browser.
//!
//! Declarative specs go through a catalog-driven style resolver into an uncompressed
//! `.drawio` document; existing documents can be patched with batched operations and read back
//! into a structured view.
//!
//! # Features
//!
//! - `emit`: Mermaid and draw.io CSV text emitters (`cellgraph::emit`)

pub use cellgraph_core::*;

#[cfg(feature = "emit")]
pub mod emit {
    pub use cellgraph_emit::csv::{self, CsvSpec};
    pub use cellgraph_emit::mermaid::{self, MermaidKind};
    pub use cellgraph_emit::{Error, Result};
}
