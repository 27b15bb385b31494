use crate::utils::{escape_attr_into, fmt_num};
use cellgraph_model::{Attrs, Cell, CellKind, Document, LAYER_ID, Page, ROOT_ID};

const INDENT: &str = "    ";

struct XmlWriter {
    out: String,
    depth: usize,
}

impl XmlWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        escape_attr_into(&mut self.out, value);
        self.out.push('"');
    }

    fn attrs(&mut self, attrs: &Attrs) {
        for (k, v) in attrs {
            self.attr(k, v);
        }
    }

    fn start(&mut self, tag: &str) {
        self.indent();
        self.out.push('<');
        self.out.push_str(tag);
    }

    /// Closes a start tag that will have children.
    fn open(&mut self) {
        self.out.push_str(">\n");
        self.depth += 1;
    }

    fn close_empty(&mut self) {
        self.out.push_str("/>\n");
    }

    fn end(&mut self, tag: &str) {
        self.depth -= 1;
        self.indent();
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    fn finish(self) -> String {
        self.out
    }
}

fn write_geometry(w: &mut XmlWriter, cell: &Cell) {
    match &cell.kind {
        CellKind::Vertex { geometry: Some(g) } => {
            w.start("mxGeometry");
            w.attr("x", &fmt_num(g.x));
            w.attr("y", &fmt_num(g.y));
            w.attr("width", &fmt_num(g.width));
            w.attr("height", &fmt_num(g.height));
        }
        CellKind::Edge { .. } => {
            w.start("mxGeometry");
            w.attr("relative", "1");
        }
        _ => {
            if cell.geometry_attrs.is_empty() {
                return;
            }
            w.start("mxGeometry");
        }
    }
    w.attrs(&cell.geometry_attrs);
    w.attr("as", "geometry");
    w.close_empty();
}

fn has_geometry(cell: &Cell) -> bool {
    match &cell.kind {
        CellKind::Vertex { geometry } => geometry.is_some(),
        CellKind::Edge { .. } => true,
        CellKind::Plain => !cell.geometry_attrs.is_empty(),
    }
}

fn write_cell(w: &mut XmlWriter, cell: &Cell) {
    w.start("mxCell");
    w.attr("id", &cell.id);
    match &cell.kind {
        CellKind::Vertex { .. } => {
            w.attr("value", &cell.value);
            w.attr("style", &cell.style);
            w.attr("parent", &cell.parent);
            w.attr("vertex", "1");
        }
        CellKind::Edge { source, target } => {
            w.attr("style", &cell.style);
            w.attr("parent", &cell.parent);
            w.attr("edge", "1");
            if let Some(source) = source {
                w.attr("source", source);
            }
            if let Some(target) = target {
                w.attr("target", target);
            }
            if !cell.value.is_empty() {
                w.attr("value", &cell.value);
            }
        }
        CellKind::Plain => {
            if !cell.value.is_empty() {
                w.attr("value", &cell.value);
            }
            if !cell.style.is_empty() {
                w.attr("style", &cell.style);
            }
            w.attr("parent", &cell.parent);
        }
    }
    w.attrs(&cell.attrs);

    if !has_geometry(cell) {
        w.close_empty();
        return;
    }
    w.open();
    write_geometry(w, cell);
    w.end("mxCell");
}

fn write_page(w: &mut XmlWriter, page: &Page) {
    w.start("diagram");
    w.attr("name", page.name());
    w.attr("id", page.diagram_id());
    w.open();

    w.start("mxGraphModel");
    w.attrs(page.model_attrs());
    w.open();

    w.start("root");
    w.open();
    w.start("mxCell");
    w.attr("id", ROOT_ID);
    w.close_empty();
    w.start("mxCell");
    w.attr("id", LAYER_ID);
    w.attr("parent", ROOT_ID);
    w.close_empty();
    for cell in page.cells() {
        write_cell(w, cell);
    }
    w.end("root");

    w.end("mxGraphModel");
    w.end("diagram");
}

/// Serializes `doc` as indented mxfile XML without an XML declaration.
pub fn write_document(doc: &Document) -> String {
    let mut w = XmlWriter::new();
    w.start("mxfile");
    w.attr("host", &doc.host);
    w.attrs(&doc.attrs);
    w.open();
    for page in &doc.pages {
        write_page(&mut w, page);
    }
    w.end("mxfile");
    w.finish()
}
