//! Cell graph container for draw.io (mxGraph) pages.
//!
//! A [`Page`] owns an ordered list of [`Cell`]s indexed by id. Cells are vertices (plain nodes
//! or swimlane containers) and edges. Nesting is expressed through each cell's `parent` id; the
//! two reserved ids [`ROOT_ID`] and [`LAYER_ID`] stand for the implicit root and the default
//! layer and are never stored as cells.
//!
//! The container enforces id uniqueness on insert and offers the structural checks (parent
//! existence, parent acyclicity) that builders run once their input is fully inserted. Style
//! strings are carried opaquely.

mod error;
mod page;

pub use error::ModelError;
pub use page::{Attrs, CONTAINER_MARKER, Cell, CellKind, Geometry, Page, Removal};

pub type Result<T> = std::result::Result<T, ModelError>;

/// Id of the implicit root cell of every page.
pub const ROOT_ID: &str = "0";

/// Id of the default layer; cells without an explicit parent live here.
pub const LAYER_ID: &str = "1";

pub fn is_reserved_id(id: &str) -> bool {
    id == ROOT_ID || id == LAYER_ID
}

/// A diagram document: an ordered sequence of pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub host: String,
    /// Other `<mxfile>` attributes (`modified`, `agent`, `version`, ...), in document order.
    pub attrs: Attrs,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            attrs: Attrs::new(),
            pages: Vec::new(),
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    pub fn first_page_mut(&mut self) -> Option<&mut Page> {
        self.pages.first_mut()
    }
}
