//! draw.io CSV import emitter.
//!
//! The output is a block of `# key: value` directives, a blank line, a column header and one
//! line per record. Header and records go through [`csv::Writer`], so cells holding the
//! delimiter, quotes or line breaks are quoted.

use crate::{Result, join_lines};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_LABEL: &str = "%name%";
pub const DEFAULT_STYLE: &str = "rounded=1;whiteSpace=wrap;html=1;";
pub const DEFAULT_LAYOUT: &str = "auto";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CsvSpec {
    /// Label template, e.g. `%name%<br>%role%`.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    /// Connection rules, written as JSON.
    #[serde(default)]
    pub connect: Option<Value>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub width: Option<Value>,
    #[serde(default)]
    pub height: Option<Value>,
    #[serde(default)]
    pub padding: Option<Value>,
    #[serde(default)]
    pub ignore: Option<Value>,
    /// Column order; the first record's keys when empty.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Records as objects keyed by column, or as arrays in column order.
    #[serde(default)]
    pub data: Vec<Value>,
}

impl CsvSpec {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    fn columns(&self) -> Vec<String> {
        if !self.columns.is_empty() {
            return self.columns.clone();
        }
        match self.data.first() {
            Some(Value::Object(first)) => first.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    pub fn render(&self) -> Result<String> {
        let mut lines = vec![
            format!("# label: {}", self.label.as_deref().unwrap_or(DEFAULT_LABEL)),
            format!("# style: {}", self.style.as_deref().unwrap_or(DEFAULT_STYLE)),
        ];
        if let Some(connect) = &self.connect {
            lines.push(format!("# connect: {connect}"));
        }
        lines.push(format!(
            "# layout: {}",
            self.layout.as_deref().unwrap_or(DEFAULT_LAYOUT)
        ));
        for (key, value) in [
            ("width", &self.width),
            ("height", &self.height),
            ("padding", &self.padding),
            ("ignore", &self.ignore),
        ] {
            if let Some(value) = value {
                lines.push(format!("# {key}: {}", directive_value(value)));
            }
        }
        lines.push(String::new());

        let mut out = join_lines(lines);
        out.push_str(&self.records()?);
        Ok(out)
    }

    fn records(&self) -> Result<String> {
        // Array records may be shorter or longer than the header.
        let mut wtr = WriterBuilder::new()
            .flexible(true)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        let columns = self.columns();
        if !columns.is_empty() {
            wtr.write_record(&columns)?;
        }
        for record in &self.data {
            let cells: Vec<String> = match record {
                Value::Object(map) => columns
                    .iter()
                    .map(|c| map.get(c).map(cell_text).unwrap_or_default())
                    .collect(),
                Value::Array(items) => items.iter().map(cell_text).collect(),
                other => vec![cell_text(other)],
            };
            wtr.write_record(&cells)?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))?;
        // Every field came from a `String`.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

pub fn emit(spec: Value) -> Result<String> {
    serde_json::from_value::<CsvSpec>(spec)?.render()
}

pub fn emit_str(spec_json: &str) -> Result<String> {
    CsvSpec::from_json_str(spec_json)?.render()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Scalars as written; a list of names (`ignore`) comma-separated.
fn directive_value(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(","),
        other => cell_text(other),
    }
}

