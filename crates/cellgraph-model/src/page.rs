//! The `Page` container.
//!
//! Cells are stored in insertion order (which is also document order) with an id index kept in
//! sync on every insert and removal. Removal shifts later cells down, so indices handed out by
//! the container are never retained across mutations.

mod alg;
mod cell;

pub use cell::{Attrs, CONTAINER_MARKER, Cell, CellKind, Geometry};

use crate::{ModelError, Result, is_reserved_id};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Cells dropped by [`Page::remove_cascading`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Removal {
    pub cell: Option<Cell>,
    pub edges: Vec<Cell>,
}

impl Removal {
    pub fn is_empty(&self) -> bool {
        self.cell.is_none() && self.edges.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    name: String,
    diagram_id: String,
    model_attrs: Attrs,
    cells: Vec<Cell>,
    index: HashMap<String, usize>,
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.diagram_id == other.diagram_id
            && self.model_attrs == other.model_attrs
            && self.cells == other.cells
    }
}

impl Page {
    pub fn new(name: impl Into<String>, diagram_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diagram_id: diagram_id.into(),
            model_attrs: Attrs::new(),
            cells: Vec::new(),
            index: HashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn diagram_id(&self) -> &str {
        &self.diagram_id
    }

    /// Attributes of the `<mxGraphModel>` element, in document order.
    pub fn model_attrs(&self) -> &Attrs {
        &self.model_attrs
    }

    pub fn model_attr(&self, key: &str) -> Option<&str> {
        self.model_attrs.get(key).map(String::as_str)
    }

    pub fn set_model_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.model_attrs.insert(key.into(), value.into());
        self
    }

    pub fn page_width(&self) -> Option<f64> {
        self.model_attr("pageWidth")?.trim().parse().ok()
    }

    pub fn page_height(&self) -> Option<f64> {
        self.model_attr("pageHeight")?.trim().parse().ok()
    }

    pub fn has_cell(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn cell(&self, id: &str) -> Option<&Cell> {
        self.index.get(id).map(|&idx| &self.cells[idx])
    }

    pub fn cell_mut(&mut self, id: &str) -> Option<&mut Cell> {
        self.index
            .get(id)
            .copied()
            .map(move |idx| &mut self.cells[idx])
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|c| c.id.as_str())
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_vertex())
    }

    pub fn edges(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_edge())
    }

    pub fn containers(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_container())
    }

    /// Ids of the cells whose parent is `id`, in document order.
    pub fn children(&self, id: &str) -> Vec<&str> {
        self.cells
            .iter()
            .filter(|c| c.parent == id)
            .map(|c| c.id.as_str())
            .collect()
    }

    /// Appends a cell. Fails on a reserved or already used id; parent references are not
    /// checked here (see [`Page::check_parent`]).
    pub fn insert(&mut self, cell: Cell) -> Result<&mut Cell> {
        if is_reserved_id(&cell.id) {
            return Err(ModelError::ReservedId { id: cell.id });
        }
        if self.index.contains_key(&cell.id) {
            return Err(ModelError::DuplicateId { id: cell.id });
        }
        let idx = self.cells.len();
        self.index.insert(cell.id.clone(), idx);
        self.cells.push(cell);
        Ok(&mut self.cells[idx])
    }

    /// Removes a single cell, leaving edges and children that reference it in place.
    pub fn remove(&mut self, id: &str) -> Option<Cell> {
        let idx = self.index.remove(id)?;
        let cell = self.cells.remove(idx);
        for i in idx..self.cells.len() {
            if let Some(v) = self.index.get_mut(self.cells[i].id.as_str()) {
                *v = i;
            }
        }
        Some(cell)
    }

    /// Removes every edge with `id` as source or target and returns them in document order.
    pub fn remove_incident_edges(&mut self, id: &str) -> Vec<Cell> {
        if !self.cells.iter().any(|c| c.is_incident_to(id)) {
            return Vec::new();
        }
        let (removed, kept): (Vec<Cell>, Vec<Cell>) = std::mem::take(&mut self.cells)
            .into_iter()
            .partition(|c| c.is_incident_to(id));
        self.cells = kept;
        self.reindex();
        removed
    }

    /// Removes `id` and then every edge incident to it.
    ///
    /// This is a single pass: children of a removed container stay on the page (with a parent
    /// that no longer exists) and edges attached to those children are untouched. Edges
    /// referencing `id` are removed even when `id` itself was not present.
    pub fn remove_cascading(&mut self, id: &str) -> Removal {
        let cell = self.remove(id);
        let edges = self.remove_incident_edges(id);
        Removal { cell, edges }
    }

    /// Checks that `id`'s parent exists (or is a reserved id) and that walking up from `id`
    /// never revisits a cell.
    pub fn check_parent(&self, id: &str) -> Result<()> {
        alg::check_parent_chain(self, id)
    }

    /// Runs [`Page::check_parent`] for every cell.
    pub fn validate(&self) -> Result<()> {
        for cell in &self.cells {
            alg::check_parent_chain(self, &cell.id)?;
        }
        Ok(())
    }

    /// Ids of `id`'s ancestors, nearest first, stopping at the first reserved or missing id.
    pub fn ancestors(&self, id: &str) -> Vec<&str> {
        alg::ancestors(self, id)
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (i, c) in self.cells.iter().enumerate() {
            self.index.insert(c.id.clone(), i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LAYER_ID;

    fn node(id: &str) -> Cell {
        Cell::vertex(id, id, "rounded=1;", LAYER_ID, Geometry::default())
    }

    #[test]
    fn index_follows_removals() {
        let mut page = Page::new("p", "d");
        for id in ["a", "b", "c", "d"] {
            page.insert(node(id)).unwrap();
        }
        assert!(page.remove("b").is_some());
        assert_eq!(page.ids().collect::<Vec<_>>(), vec!["a", "c", "d"]);
        assert_eq!(page.cell("d").map(|c| c.id.as_str()), Some("d"));
        page.cell_mut("c").unwrap().value = "changed".into();
        assert_eq!(page.cell("c").unwrap().value, "changed");
        assert!(page.remove("b").is_none());
    }

    #[test]
    fn insert_rejects_reserved_and_duplicate_ids() {
        let mut page = Page::new("p", "d");
        page.insert(node("a")).unwrap();
        assert_eq!(
            page.insert(node("a")).unwrap_err(),
            ModelError::DuplicateId { id: "a".into() }
        );
        assert_eq!(
            page.insert(node("0")).unwrap_err(),
            ModelError::ReservedId { id: "0".into() }
        );
        assert_eq!(
            page.insert(node("1")).unwrap_err(),
            ModelError::ReservedId { id: "1".into() }
        );
        assert_eq!(page.cell_count(), 1);
    }

    #[test]
    fn page_size_parses_model_attrs() {
        let mut page = Page::new("p", "d");
        assert_eq!(page.page_width(), None);
        page.set_model_attr("pageWidth", "1600")
            .set_model_attr("pageHeight", "900.5");
        assert_eq!(page.page_width(), Some(1600.0));
        assert_eq!(page.page_height(), Some(900.5));
    }
}
