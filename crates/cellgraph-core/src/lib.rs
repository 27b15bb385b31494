#![forbid(unsafe_code)]

//! draw.io (mxGraph) diagram builder, mutator and reader (headless).
//!
//! Design goals:
//! - declarative specs in, uncompressed `.drawio` XML out
//! - deterministic style resolution driven by a built-in catalog
//! - all-or-nothing batch mutation that keeps edges consistent with the node set

pub mod build;
pub mod catalog;
pub mod config;
pub mod error;
pub mod mutate;
pub mod read;
pub mod resolve;
pub mod spec;
pub mod style;
pub mod templates;
pub mod utils;
pub mod xml;

pub use catalog::{Catalog, CatalogEntry, ContainerPreset, EdgeRoute};
pub use cellgraph_model::{
    Attrs, Cell, CellKind, Document, Geometry, LAYER_ID, ModelError, Page, ROOT_ID, Removal,
};
pub use config::Config;
pub use error::{Error, Result};
pub use mutate::ApplyOptions;
pub use read::{EdgeEntry, NodeEntry, StructuredDocument, StructuredPage, summarize};
pub use resolve::{resolve_edge_style, resolve_node_style};
pub use spec::{
    CellRef, CellUpdate, DiagramSpec, EdgeDescriptor, NodeDescriptor, NodeKind, Operation,
    OperationList,
};
pub use style::{Style, StyleToken};
pub use templates::TemplateVars;

/// `host` attribute written on `<mxfile>` when the config names none.
pub const DEFAULT_HOST: &str = "drawio-skill";

#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    catalog: &'static Catalog,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            config: config::default_config(),
            catalog: Catalog::builtin(),
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: Config) -> Self {
        // Merge overrides onto the defaults so unspecified keys keep working.
        self.config.deep_merge(config.as_value());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    /// Apply options from the `mutate.strict` config key.
    pub fn apply_options(&self) -> ApplyOptions {
        ApplyOptions::from_config(&self.config)
    }

    pub fn resolve_node_style(&self, node: &NodeDescriptor) -> String {
        resolve::resolve_node_style(node, self.catalog)
    }

    pub fn resolve_edge_style(&self, edge: &EdgeDescriptor) -> String {
        resolve::resolve_edge_style(edge)
    }

    pub fn build_page(&self, spec: &DiagramSpec) -> Result<Page> {
        build::build_page(spec, &self.config, self.catalog)
    }

    /// Builds a one-page document from `spec`.
    pub fn build(&self, spec: &DiagramSpec) -> Result<Document> {
        build::build_document(spec, &self.config, self.catalog)
    }

    pub fn build_json(&self, spec_json: &str) -> Result<Document> {
        self.build(&DiagramSpec::from_json_str(spec_json)?)
    }

    /// Builds one of the built-in templates.
    pub fn create_template(&self, name: &str, vars: &TemplateVars) -> Result<Document> {
        self.build(&templates::spec_for(name, vars)?)
    }

    /// Applies `operations` to a copy of `page`; `page` itself is never modified.
    pub fn apply(
        &self,
        page: &Page,
        operations: &[Operation],
        options: ApplyOptions,
    ) -> Result<Page> {
        mutate::apply(page, operations, options, &self.config, self.catalog)
    }

    /// Applies `operations` to the first page of `doc`, returning the updated document.
    pub fn apply_to_document(
        &self,
        doc: &Document,
        operations: &[Operation],
        options: ApplyOptions,
    ) -> Result<Document> {
        let Some(first) = doc.first_page() else {
            return Err(Error::EmptyDocument);
        };
        let page = self.apply(first, operations, options)?;
        let mut out = doc.clone();
        if let Some(slot) = out.first_page_mut() {
            *slot = page;
        }
        Ok(out)
    }

    /// `read → apply → write` on serialized documents.
    pub fn modify_xml(
        &self,
        xml: &str,
        operations: &[Operation],
        options: ApplyOptions,
    ) -> Result<String> {
        let doc = xml::parse_document(xml)?;
        let doc = self.apply_to_document(&doc, operations, options)?;
        Ok(xml::write_document(&doc))
    }

    pub fn parse_document(&self, xml: &str) -> Result<Document> {
        xml::parse_document(xml)
    }

    pub fn write_document(&self, doc: &Document) -> String {
        xml::write_document(doc)
    }

    pub fn read(&self, doc: &Document) -> StructuredDocument {
        read::read(doc)
    }

    pub fn read_xml(&self, xml: &str) -> Result<StructuredDocument> {
        read::read_str(xml)
    }
}

#[cfg(test)]
mod tests;
