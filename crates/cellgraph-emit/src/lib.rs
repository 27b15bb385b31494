#![forbid(unsafe_code)]

//! Text emitters for diagram formats that draw.io can import.
//!
//! Both emitters are stateless translators from a JSON description to text: [`mermaid`] writes
//! the Mermaid mini-language and [`csv`] writes draw.io's CSV import format. Output lines are
//! joined with `\n` and end with a trailing newline.

pub mod csv;
pub mod mermaid;

pub use csv::CsvSpec;
pub use mermaid::MermaidKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown mermaid type `{name}` (available: {available})")]
    UnknownKind { name: String, available: String },

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] ::csv::Error),
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
