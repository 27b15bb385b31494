//! Batch mutation of an existing page.
//!
//! Operations run in order against a working copy, so each one sees the effects of those
//! before it and a failing batch leaves the caller's page untouched.

use crate::build::{CellDefaults, CellFactory};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::spec::{CellUpdate, Operation};
use crate::{Error, Result};
use cellgraph_model::{Cell, Page};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Fail on `update`/`remove` of an id that is not on the page.
    pub strict: bool,
}

impl ApplyOptions {
    /// Unknown ids fail the batch with [`Error::UnknownCell`].
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Unknown ids in `update`/`remove` are ignored.
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            strict: config.get_bool("mutate.strict").unwrap_or(false),
        }
    }
}

fn required_id<'a>(id: Option<&'a str>, kind: &'static str) -> Result<&'a str> {
    id.filter(|id| !id.is_empty())
        .ok_or(Error::MissingId { kind })
}

fn apply_update(cell: &mut Cell, update: &CellUpdate) {
    if let Some(label) = &update.label {
        cell.value = label.clone();
    }
    if let Some(style) = &update.style {
        cell.style = style.clone();
    }
    if !update.touches_geometry() {
        return;
    }
    let Some(geometry) = cell.geometry_mut() else {
        tracing::trace!(id = %cell.id, "cell has no geometry; geometry fields ignored");
        return;
    };
    if let Some(x) = update.x {
        geometry.x = x;
    }
    if let Some(y) = update.y {
        geometry.y = y;
    }
    if let Some(width) = update.width {
        geometry.width = width;
    }
    if let Some(height) = update.height {
        geometry.height = height;
    }
}

pub fn apply(
    page: &Page,
    operations: &[Operation],
    options: ApplyOptions,
    config: &Config,
    catalog: &Catalog,
) -> Result<Page> {
    let factory = CellFactory::new(catalog, CellDefaults::from_config(config));
    let mut page = page.clone();
    let mut added: Vec<String> = Vec::new();

    for op in operations {
        match op {
            Operation::AddNode(node) => added.push(factory.insert_node(&mut page, node)?),
            Operation::AddEdge(edge) => added.push(factory.insert_edge(&mut page, edge)?),
            Operation::Update(update) => {
                let id = required_id(update.id.as_deref(), "update operation")?;
                match page.cell_mut(id) {
                    Some(cell) => apply_update(cell, update),
                    None if options.strict => {
                        return Err(Error::UnknownCell {
                            action: "update",
                            id: id.to_string(),
                        });
                    }
                    None => tracing::debug!(id, "update of unknown cell ignored"),
                }
            }
            Operation::Remove(target) => {
                let id = required_id(target.id.as_deref(), "remove operation")?;
                let orphans = page.children(id).len();
                if orphans > 0 {
                    tracing::debug!(id, orphans, "children keep their parent reference");
                }
                let removal = page.remove_cascading(id);
                if removal.cell.is_none() {
                    if options.strict {
                        return Err(Error::UnknownCell {
                            action: "remove",
                            id: id.to_string(),
                        });
                    }
                    tracing::debug!(id, "remove of unknown cell");
                }
                tracing::trace!(id, edges = removal.edges.len(), "removed");
            }
        }
    }

    // Parents of added cells are checked once the whole batch is in, so an `add_node` may
    // name a container added later in the same batch.
    for id in &added {
        page.check_parent(id)?;
    }

    tracing::debug!(operations = operations.len(), cells = page.cell_count(), "applied");
    Ok(page)
}
