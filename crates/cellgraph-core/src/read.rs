//! Structured view of a document: nodes, containers and edges per page.
//!
//! The reader is a projection, not a validator. Dangling edges, orphaned children and
//! duplicate-looking styles are reported as they are.

use crate::style::Style;
use crate::utils::decode_line_breaks;
use cellgraph_model::{Cell, Document, Geometry, Page};
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredDocument {
    pub pages: Vec<StructuredPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredPage {
    pub name: String,
    pub nodes: Vec<NodeEntry>,
    pub edges: Vec<EdgeEntry>,
    pub containers: Vec<NodeEntry>,
    pub page_width: Option<f64>,
    pub page_height: Option<f64>,
    /// `pageWidth` and `pageHeight` exactly as written, used by [`summarize`].
    #[serde(skip)]
    pub size_text: (String, String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeEntry {
    pub id: String,
    pub label: String,
    pub parent: String,
    pub style: String,
    /// Value of the last `shape=` token, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(flatten)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeEntry {
    pub id: String,
    pub label: String,
    pub source: Option<String>,
    pub target: Option<String>,
    pub style: String,
    pub parent: String,
}

impl StructuredPage {
    pub fn node(&self, id: &str) -> Option<&NodeEntry> {
        self.nodes
            .iter()
            .chain(self.containers.iter())
            .find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&EdgeEntry> {
        self.edges.iter().find(|e| e.id == id)
    }
}

fn node_entry(cell: &Cell) -> NodeEntry {
    NodeEntry {
        id: cell.id.clone(),
        label: decode_line_breaks(&cell.value).into_owned(),
        parent: cell.parent.clone(),
        style: cell.style.clone(),
        shape: Style::parse(&cell.style).get("shape").map(str::to_string),
        geometry: cell.geometry().copied(),
    }
}

fn edge_entry(cell: &Cell) -> EdgeEntry {
    EdgeEntry {
        id: cell.id.clone(),
        label: cell.value.clone(),
        source: cell.source().map(str::to_string),
        target: cell.target().map(str::to_string),
        style: cell.style.clone(),
        parent: cell.parent.clone(),
    }
}

pub fn read_page(page: &Page) -> StructuredPage {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut containers = Vec::new();
    for cell in page.cells() {
        if cell.is_edge() {
            edges.push(edge_entry(cell));
        } else if cell.is_container() {
            containers.push(node_entry(cell));
        } else if cell.is_vertex() {
            nodes.push(node_entry(cell));
        }
    }
    StructuredPage {
        name: page.name().to_string(),
        nodes,
        edges,
        containers,
        page_width: page.page_width(),
        page_height: page.page_height(),
        size_text: (
            page.model_attr("pageWidth").unwrap_or_default().to_string(),
            page.model_attr("pageHeight").unwrap_or_default().to_string(),
        ),
    }
}

pub fn read(doc: &Document) -> StructuredDocument {
    StructuredDocument {
        pages: doc.pages.iter().map(read_page).collect(),
    }
}

pub fn read_str(xml: &str) -> crate::Result<StructuredDocument> {
    let doc = crate::xml::parse_document(xml)?;
    Ok(read(&doc))
}

/// Human-readable outline of every page.
pub fn summarize(doc: &StructuredDocument) -> String {
    let mut out = String::new();
    for page in &doc.pages {
        let (width, height) = &page.size_text;
        let _ = writeln!(out, "Page: {} ({width}x{height})", page.name);
        let _ = writeln!(out, "  Containers: {}", page.containers.len());
        for c in &page.containers {
            let _ = writeln!(out, "    - {}: {}", c.id, c.label);
        }
        let _ = writeln!(out, "  Nodes: {}", page.nodes.len());
        for n in &page.nodes {
            let shape = n
                .shape
                .as_deref()
                .map(|s| format!(" [{s}]"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "    - {}: {}{} (parent={})",
                n.id, n.label, shape, n.parent
            );
        }
        let _ = writeln!(out, "  Edges: {}", page.edges.len());
        for e in &page.edges {
            let label = if e.label.is_empty() {
                String::new()
            } else {
                format!(" '{}'", e.label)
            };
            let _ = writeln!(
                out,
                "    - {}: {} -> {}{}",
                e.id,
                e.source.as_deref().unwrap_or(""),
                e.target.as_deref().unwrap_or(""),
                label
            );
        }
    }
    if out.ends_with('\n') {
        out.pop();
    }
    out
}
