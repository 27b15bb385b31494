//! Spec → page construction.
//!
//! Nodes are inserted in spec order, then edges. Parent references may point forward (a
//! child listed before its container); existence and acyclicity are checked once every cell
//! is in place.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::resolve::{resolve_edge_style, resolve_node_style};
use crate::spec::{DiagramSpec, EdgeDescriptor, NodeDescriptor, NodeKind};
use crate::utils::{scalar_to_string, short_uid};
use crate::{Error, Result};
use cellgraph_model::{Attrs, Cell, Document, Geometry, LAYER_ID, Page};

pub const DEFAULT_PAGE_NAME: &str = "Page-1";
pub const DEFAULT_PAGE_WIDTH: f64 = 1600.0;
pub const DEFAULT_PAGE_HEIGHT: f64 = 900.0;
pub const DEFAULT_NODE_WIDTH: f64 = 120.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 60.0;

/// Size given to nodes whose descriptor leaves it out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellDefaults {
    pub width: f64,
    pub height: f64,
}

impl Default for CellDefaults {
    fn default() -> Self {
        Self {
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
        }
    }
}

impl CellDefaults {
    pub fn from_config(config: &Config) -> Self {
        Self {
            width: config.get_f64("node.width").unwrap_or(DEFAULT_NODE_WIDTH),
            height: config.get_f64("node.height").unwrap_or(DEFAULT_NODE_HEIGHT),
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Turns descriptors into cells and inserts them; shared by the builder and the mutator.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CellFactory<'a> {
    catalog: &'a Catalog,
    defaults: CellDefaults,
}

impl<'a> CellFactory<'a> {
    pub(crate) fn new(catalog: &'a Catalog, defaults: CellDefaults) -> Self {
        Self { catalog, defaults }
    }

    fn node_id(&self, node: &NodeDescriptor, page: &Page) -> Result<String> {
        if let Some(id) = non_empty(node.id.as_deref()) {
            return Ok(id.to_string());
        }
        if node.kind != NodeKind::Text {
            return Err(Error::MissingId { kind: "node" });
        }
        // Anonymous decorative text; ids are random so retry on the off chance of a clash.
        loop {
            let id = short_uid();
            if !page.has_cell(&id) {
                return Ok(id);
            }
        }
    }

    pub(crate) fn insert_node(&self, page: &mut Page, node: &NodeDescriptor) -> Result<String> {
        let id = self.node_id(node, page)?;
        let geometry = Geometry::new(
            node.x.unwrap_or(0.0),
            node.y.unwrap_or(0.0),
            node.width.unwrap_or(self.defaults.width),
            node.height.unwrap_or(self.defaults.height),
        );
        let cell = Cell::vertex(
            id.clone(),
            node.label.clone().unwrap_or_default(),
            resolve_node_style(node, self.catalog),
            non_empty(node.parent.as_deref()).unwrap_or(LAYER_ID),
            geometry,
        );
        page.insert(cell)?;
        tracing::trace!(id = %id, kind = ?node.kind, "inserted node");
        Ok(id)
    }

    pub(crate) fn insert_edge(&self, page: &mut Page, edge: &EdgeDescriptor) -> Result<String> {
        let Some(id) = non_empty(edge.id.as_deref()) else {
            return Err(Error::MissingId { kind: "edge" });
        };
        let cell = Cell::edge(
            id,
            edge.label.clone().unwrap_or_default(),
            resolve_edge_style(edge),
            non_empty(edge.parent.as_deref()).unwrap_or(LAYER_ID),
            non_empty(edge.source.as_deref()).map(str::to_string),
            non_empty(edge.target.as_deref()).map(str::to_string),
        );
        page.insert(cell)?;
        tracing::trace!(id, "inserted edge");
        Ok(id.to_string())
    }
}

/// `<mxGraphModel>` attributes from config, with the page size placed right after
/// `pageScale` where draw.io writes it.
fn graph_model_attrs(config: &Config, width: f64, height: f64) -> Attrs {
    let width = crate::utils::fmt_num(width);
    let height = crate::utils::fmt_num(height);
    let mut attrs = Attrs::new();
    if let Some(map) = config.get("graphModel").and_then(|v| v.as_object()) {
        for (key, value) in map {
            if key == "pageWidth" || key == "pageHeight" {
                continue;
            }
            let Some(value) = scalar_to_string(value) else {
                continue;
            };
            attrs.insert(key.clone(), value);
            if key == "pageScale" {
                attrs.insert("pageWidth".to_string(), width.clone());
                attrs.insert("pageHeight".to_string(), height.clone());
            }
        }
    }
    attrs.entry("pageWidth".to_string()).or_insert(width);
    attrs.entry("pageHeight".to_string()).or_insert(height);
    attrs
}

pub fn build_page(spec: &DiagramSpec, config: &Config, catalog: &Catalog) -> Result<Page> {
    let name = spec
        .diagram_name
        .as_deref()
        .or_else(|| config.get_str("page.name"))
        .unwrap_or(DEFAULT_PAGE_NAME);
    let width = spec
        .page_width
        .or_else(|| config.get_f64("page.width"))
        .unwrap_or(DEFAULT_PAGE_WIDTH);
    let height = spec
        .page_height
        .or_else(|| config.get_f64("page.height"))
        .unwrap_or(DEFAULT_PAGE_HEIGHT);

    let mut page = Page::new(name, short_uid());
    for (key, value) in graph_model_attrs(config, width, height) {
        page.set_model_attr(key, value);
    }

    let factory = CellFactory::new(catalog, CellDefaults::from_config(config));
    for node in &spec.nodes {
        factory.insert_node(&mut page, node)?;
    }
    for edge in &spec.edges {
        factory.insert_edge(&mut page, edge)?;
    }
    page.validate()?;

    tracing::debug!(
        page = name,
        nodes = spec.nodes.len(),
        edges = spec.edges.len(),
        "built page"
    );
    Ok(page)
}

pub fn build_document(spec: &DiagramSpec, config: &Config, catalog: &Catalog) -> Result<Document> {
    let host = config.get_str("host").unwrap_or(crate::DEFAULT_HOST);
    Ok(Document::new(host).with_page(build_page(spec, config, catalog)?))
}
