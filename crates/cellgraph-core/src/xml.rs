//! `.drawio` (uncompressed mxfile) serialization.

mod parse;
mod write;

pub use parse::parse_document;
pub use write::write_document;
