use crate::{Error, Result};
use cellgraph_model::{
    Attrs, Cell, CellKind, Document, Geometry, LAYER_ID, ModelError, Page, is_reserved_id,
};
use roxmltree::Node;

const CELL_ATTRS: &[&str] = &[
    "id", "value", "style", "parent", "vertex", "edge", "source", "target",
];
const VERTEX_GEOMETRY_ATTRS: &[&str] = &["x", "y", "width", "height", "as"];
const EDGE_GEOMETRY_ATTRS: &[&str] = &["relative", "as"];
const PLAIN_GEOMETRY_ATTRS: &[&str] = &["as"];

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

fn extra_attrs(node: Node<'_, '_>, known: &[&str]) -> Attrs {
    node.attributes()
        .filter(|a| !known.contains(&a.name()))
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect()
}

fn num_attr(node: Node<'_, '_>, name: &str) -> f64 {
    node.attribute(name)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0.0)
}

fn parse_cell(node: Node<'_, '_>, id: &str) -> Cell {
    let value = node.attribute("value").unwrap_or_default();
    let style = node.attribute("style").unwrap_or_default();
    let parent = node.attribute("parent").unwrap_or(LAYER_ID);
    let geometry = child(node, "mxGeometry");

    let (mut cell, known_geometry) = if node.attribute("edge") == Some("1") {
        let endpoint = |name: &str| node.attribute(name).map(str::to_string);
        (
            Cell::edge(id, value, style, parent, endpoint("source"), endpoint("target")),
            EDGE_GEOMETRY_ATTRS,
        )
    } else if node.attribute("vertex") == Some("1") {
        let mut cell = Cell::vertex(id, value, style, parent, Geometry::default());
        cell.kind = CellKind::Vertex {
            geometry: geometry.map(|g| {
                Geometry::new(
                    num_attr(g, "x"),
                    num_attr(g, "y"),
                    num_attr(g, "width"),
                    num_attr(g, "height"),
                )
            }),
        };
        (cell, VERTEX_GEOMETRY_ATTRS)
    } else {
        let mut cell = Cell::plain(id, value, parent);
        cell.style = style.to_string();
        (cell, PLAIN_GEOMETRY_ATTRS)
    };

    cell.attrs = extra_attrs(node, CELL_ATTRS);
    if let Some(g) = geometry {
        cell.geometry_attrs = extra_attrs(g, known_geometry);
    }
    cell
}

fn parse_page(diagram: Node<'_, '_>) -> Result<Option<Page>> {
    let name = diagram.attribute("name").unwrap_or_default();
    let Some(model) = child(diagram, "mxGraphModel") else {
        tracing::warn!(page = name, "diagram has no mxGraphModel (compressed?); skipped");
        return Ok(None);
    };
    let Some(root) = child(model, "root") else {
        tracing::warn!(page = name, "mxGraphModel has no root; skipped");
        return Ok(None);
    };

    let mut page = Page::new(name, diagram.attribute("id").unwrap_or_default());
    for a in model.attributes() {
        page.set_model_attr(a.name(), a.value());
    }

    for node in root.children().filter(|n| n.has_tag_name("mxCell")) {
        let id = node.attribute("id").unwrap_or_default();
        if is_reserved_id(id) {
            continue;
        }
        match page.insert(parse_cell(node, id)) {
            Ok(_) => {}
            Err(ModelError::DuplicateId { id }) => {
                tracing::warn!(page = name, id = %id, "duplicate cell id; keeping the first");
            }
            Err(err) => return Err(err.into()),
        }
    }

    tracing::debug!(page = name, cells = page.cell_count(), "parsed page");
    Ok(Some(page))
}

/// Parses an uncompressed mxfile document.
///
/// Only direct `<mxCell>` children of each page's `<root>` become cells. Diagrams without an
/// inline `<mxGraphModel>` are skipped.
pub fn parse_document(xml: &str) -> Result<Document> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();
    if !root.has_tag_name("mxfile") {
        return Err(Error::Xml {
            message: format!(
                "expected <mxfile> root element, found <{}>",
                root.tag_name().name()
            ),
        });
    }

    let mut out = Document::new(root.attribute("host").unwrap_or_default());
    out.attrs = extra_attrs(root, &["host"]);
    for diagram in root.children().filter(|n| n.has_tag_name("diagram")) {
        if let Some(page) = parse_page(diagram)? {
            out.pages.push(page);
        }
    }
    Ok(out)
}
