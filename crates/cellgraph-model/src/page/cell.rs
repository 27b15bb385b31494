//! Cell entries stored by [`Page`](super::Page).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Unmodelled XML attributes, kept in document order.
pub type Attrs = IndexMap<String, String>;

/// Style substring that marks a vertex as a nesting region.
///
/// This is a plain substring test on the style string: any style containing it is treated as a
/// container, whether or not other cells use it as a parent.
pub const CONTAINER_MARKER: &str = "swimlane";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellKind {
    /// A vertex. Geometry is `None` only for vertices read from documents that omit it.
    Vertex { geometry: Option<Geometry> },
    /// An edge. Either endpoint may be absent (floating) or reference a missing cell.
    Edge {
        source: Option<String>,
        target: Option<String>,
    },
    /// Neither vertex nor edge, e.g. an additional layer under the root cell.
    Plain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub id: String,
    pub value: String,
    pub style: String,
    pub parent: String,
    pub kind: CellKind,
    /// Extra `<mxCell>` attributes carried through a read/write cycle.
    pub attrs: Attrs,
    /// Extra `<mxGeometry>` attributes carried through a read/write cycle.
    pub geometry_attrs: Attrs,
}

impl Cell {
    pub fn vertex(
        id: impl Into<String>,
        value: impl Into<String>,
        style: impl Into<String>,
        parent: impl Into<String>,
        geometry: Geometry,
    ) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            style: style.into(),
            parent: parent.into(),
            kind: CellKind::Vertex {
                geometry: Some(geometry),
            },
            attrs: Attrs::new(),
            geometry_attrs: Attrs::new(),
        }
    }

    pub fn edge(
        id: impl Into<String>,
        value: impl Into<String>,
        style: impl Into<String>,
        parent: impl Into<String>,
        source: Option<String>,
        target: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            style: style.into(),
            parent: parent.into(),
            kind: CellKind::Edge { source, target },
            attrs: Attrs::new(),
            geometry_attrs: Attrs::new(),
        }
    }

    pub fn plain(id: impl Into<String>, value: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            style: String::new(),
            parent: parent.into(),
            kind: CellKind::Plain,
            attrs: Attrs::new(),
            geometry_attrs: Attrs::new(),
        }
    }

    pub fn is_vertex(&self) -> bool {
        matches!(self.kind, CellKind::Vertex { .. })
    }

    pub fn is_edge(&self) -> bool {
        matches!(self.kind, CellKind::Edge { .. })
    }

    pub fn is_container(&self) -> bool {
        self.is_vertex() && self.style.contains(CONTAINER_MARKER)
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        match &self.kind {
            CellKind::Vertex { geometry } => geometry.as_ref(),
            _ => None,
        }
    }

    pub fn geometry_mut(&mut self) -> Option<&mut Geometry> {
        match &mut self.kind {
            CellKind::Vertex { geometry } => geometry.as_mut(),
            _ => None,
        }
    }

    pub fn source(&self) -> Option<&str> {
        match &self.kind {
            CellKind::Edge { source, .. } => source.as_deref(),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            CellKind::Edge { target, .. } => target.as_deref(),
            _ => None,
        }
    }

    /// True for an edge with `id` as its source or target.
    pub fn is_incident_to(&self, id: &str) -> bool {
        self.source() == Some(id) || self.target() == Some(id)
    }
}
