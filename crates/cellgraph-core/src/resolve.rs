//! Descriptor → style string resolution.
//!
//! Resolution is pure: the same descriptor and catalog always produce the same string, and
//! unknown shape, preset or route names degrade to documented defaults instead of failing.

use crate::catalog::{
    Catalog, ContainerPreset, DEFAULT_AWS_COLOR, DEFAULT_CONTAINER, DEFAULT_GCP_COLOR,
    DEFAULT_GENERAL_SHAPE, EdgeRoute,
};
use crate::spec::{EdgeDescriptor, NodeDescriptor, NodeKind};
use crate::style::Style;
use crate::utils::{fmt_num, scalar_to_string};

pub const DEFAULT_FILL: &str = "#FFFFFF";
pub const DEFAULT_STROKE: &str = "#000000";
pub const DEFAULT_FONT_COLOR: &str = "#000000";
pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_TEXT_FONT_SIZE: f64 = 13.0;
pub const DEFAULT_TEXT_FONT_STYLE: i64 = 1;
pub const DEFAULT_EDGE_COLOR: &str = "#232F3E";
pub const DEFAULT_EDGE_WIDTH: f64 = 2.0;
pub const DEFAULT_DASH_PATTERN: &str = "8 8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vendor {
    Aws,
    Gcp,
}

impl Vendor {
    fn key_prefix(self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Gcp => "gcp",
        }
    }

    fn primitive_prefix(self) -> &'static str {
        match self {
            Self::Aws => "mxgraph.aws4.",
            Self::Gcp => "mxgraph.gcp2.",
        }
    }

    fn default_color(self) -> &'static str {
        match self {
            Self::Aws => DEFAULT_AWS_COLOR,
            Self::Gcp => DEFAULT_GCP_COLOR,
        }
    }
}

fn explicit(style: Option<&str>) -> Option<&str> {
    style.filter(|s| Style::is_explicit(s))
}

pub fn resolve_node_style(node: &NodeDescriptor, catalog: &Catalog) -> String {
    if let Some(style) = explicit(node.style.as_deref()) {
        return style.to_string();
    }
    let style = match node.kind {
        NodeKind::Container => container_node_style(node, catalog),
        NodeKind::Aws => vendor_icon(Vendor::Aws, node, catalog),
        NodeKind::Gcp => vendor_icon(Vendor::Gcp, node, catalog),
        NodeKind::Azure => azure_style(shape_name(node)),
        NodeKind::Text => text_style(
            node.font_size.unwrap_or(DEFAULT_TEXT_FONT_SIZE),
            node.font_style.unwrap_or(DEFAULT_TEXT_FONT_STYLE),
            node.font_color.as_deref().unwrap_or(DEFAULT_FONT_COLOR),
        ),
        NodeKind::Basic => {
            let mut style = basic_style(
                catalog,
                shape_name(node),
                node.fill.as_deref().unwrap_or(DEFAULT_FILL),
                node.stroke.as_deref().unwrap_or(DEFAULT_STROKE),
                node.font_size.unwrap_or(DEFAULT_FONT_SIZE),
                node.font_color.as_deref().unwrap_or(DEFAULT_FONT_COLOR),
            );
            for (key, value) in &node.style_overrides {
                if value.is_null() {
                    style.remove(key);
                } else if let Some(v) = scalar_to_string(value) {
                    style.set(key.as_str(), v);
                }
            }
            style
        }
    };
    style.to_string()
}

pub fn resolve_edge_style(edge: &EdgeDescriptor) -> String {
    if let Some(style) = explicit(edge.style.as_deref()) {
        return style.to_string();
    }
    let route = edge
        .style
        .as_deref()
        .and_then(EdgeRoute::from_name)
        .unwrap_or_default();
    let dash = edge
        .dashed
        .unwrap_or(false)
        .then(|| edge.dash_pattern.as_deref().unwrap_or(DEFAULT_DASH_PATTERN));
    edge_style(
        route,
        edge.color.as_deref().unwrap_or(DEFAULT_EDGE_COLOR),
        edge.width.unwrap_or(DEFAULT_EDGE_WIDTH),
        dash,
    )
    .to_string()
}

fn container_node_style(node: &NodeDescriptor, catalog: &Catalog) -> Style {
    if let Some(preset) = node
        .style_preset
        .as_deref()
        .and_then(|p| catalog.container_preset(p))
    {
        return preset_style(&preset);
    }
    container_style(
        node.fill.as_deref().unwrap_or(DEFAULT_CONTAINER.fill),
        node.stroke.as_deref().unwrap_or(DEFAULT_CONTAINER.stroke),
        node.start_size.unwrap_or(f64::from(DEFAULT_CONTAINER.header_size)),
        node.dashed.unwrap_or(DEFAULT_CONTAINER.dashed),
    )
}

fn shape_name(node: &NodeDescriptor) -> &str {
    node.shape.as_deref().unwrap_or(DEFAULT_GENERAL_SHAPE)
}

fn vendor_icon(vendor: Vendor, node: &NodeDescriptor, catalog: &Catalog) -> Style {
    let shape = shape_name(node);
    let fill = node.fill.as_deref();
    let found = node
        .style_preset
        .as_deref()
        .and_then(|key| catalog.entry(key))
        .or_else(|| catalog.entry(&format!("{}-{shape}", vendor.key_prefix())));

    match found {
        Some(entry) => {
            let color = fill
                .or_else(|| catalog.category_color(entry.category))
                .unwrap_or(vendor.default_color());
            icon_style(entry.primitive, color)
        }
        None => {
            let primitive = format!("{}{shape}", vendor.primitive_prefix());
            let color = fill
                .or_else(|| catalog.primitive_color(&primitive))
                .unwrap_or(vendor.default_color());
            icon_style(&primitive, color)
        }
    }
}

/// Vendor icon grammar shared by the aws and gcp stencils.
pub fn icon_style(primitive: &str, fill: &str) -> Style {
    let mut s = Style::new();
    s.set("outlineConnect", "0")
        .set("fontColor", DEFAULT_AWS_COLOR)
        .set("gradientColor", "none")
        .set("fillColor", fill)
        .set("strokeColor", "none")
        .set("dashed", "0")
        .set("verticalLabelPosition", "bottom")
        .set("verticalAlign", "top")
        .set("align", "center")
        .set("html", "1")
        .set("fontSize", "10")
        .set("fontStyle", "0")
        .set("aspect", "fixed")
        .set("pointerEvents", "1")
        .set("shape", primitive);
    s
}

pub fn preset_style(preset: &ContainerPreset) -> Style {
    container_style(
        preset.fill,
        preset.stroke,
        f64::from(preset.header_size),
        preset.dashed,
    )
}

/// Swimlane grammar used for every container.
pub fn container_style(fill: &str, stroke: &str, header_size: f64, dashed: bool) -> Style {
    let mut s = Style::new();
    s.flag("swimlane")
        .set("startSize", fmt_num(header_size))
        .set("fillColor", fill)
        .set("strokeColor", stroke)
        .set("fontStyle", "1")
        .set("fontSize", "14")
        .set("rounded", "1")
        .set("arcSize", "8")
        .set("swimlaneLine", "0");
    if dashed {
        s.set("strokeDashArray", DEFAULT_DASH_PATTERN);
    }
    s
}

pub fn azure_style(shape: &str) -> Style {
    let mut s = Style::new();
    s.set("shape", "image")
        .set("aspect", "fixed")
        .set("image", format!("img/lib/mscae/{shape}.svg"))
        .set("fillColor", "none")
        .set("strokeColor", "none");
    s
}

pub fn text_style(font_size: f64, font_style: i64, font_color: &str) -> Style {
    let mut s = Style::new();
    s.flag("text")
        .set("html", "1")
        .set("align", "center")
        .set("verticalAlign", "middle")
        .set("fontSize", fmt_num(font_size))
        .set("fontStyle", font_style.to_string())
        .set("fontColor", font_color)
        .set("fillColor", "none")
        .set("strokeColor", "none");
    s
}

/// General shape template (unknown names fall back to `box`) followed by the color and font
/// keys. Keys the template already carries are shadowed, not rewritten.
pub fn basic_style(
    catalog: &Catalog,
    shape: &str,
    fill: &str,
    stroke: &str,
    font_size: f64,
    font_color: &str,
) -> Style {
    let template = catalog
        .general_shape(shape)
        .or_else(|| catalog.general_shape(DEFAULT_GENERAL_SHAPE))
        .unwrap_or_default();
    let mut s = Style::parse(template);
    s.push("fillColor", fill)
        .push("strokeColor", stroke)
        .push("fontSize", fmt_num(font_size))
        .push("fontColor", font_color);
    s
}

pub fn edge_style(route: EdgeRoute, color: &str, width: f64, dash: Option<&str>) -> Style {
    let mut s = Style::parse(route.template());
    s.set("strokeColor", color).set("strokeWidth", fmt_num(width));
    if let Some(pattern) = dash {
        s.set("dashed", "1").set("dashPattern", pattern);
    }
    s
}
