use crate::*;
use serde_json::Value;

fn node_style(node: NodeDescriptor) -> String {
    resolve_node_style(&node, Catalog::builtin())
}

fn aws_icon(fill: &str, primitive: &str) -> String {
    format!(
        "outlineConnect=0;fontColor=#232F3E;gradientColor=none;fillColor={fill};strokeColor=none;dashed=0;verticalLabelPosition=bottom;verticalAlign=top;align=center;html=1;fontSize=10;fontStyle=0;aspect=fixed;pointerEvents=1;shape={primitive};"
    )
}

#[test]
fn explicit_style_is_returned_verbatim() {
    let style = "shape=hexagon;fillColor=red";
    for kind in [NodeKind::Basic, NodeKind::Container, NodeKind::Aws, NodeKind::Text] {
        let node = NodeDescriptor::new("n").kind(kind).fill("#000").style(style);
        assert_eq!(node_style(node), style);
    }
    let edge = EdgeDescriptor::new("e", "a", "b").style("endArrow=none").dashed();
    assert_eq!(resolve_edge_style(&edge), "endArrow=none");
}

#[test]
fn non_explicit_style_falls_through() {
    let node = NodeDescriptor::new("n").style("rounded");
    assert_eq!(
        node_style(node),
        "rounded=1;whiteSpace=wrap;html=1;fillColor=#FFFFFF;strokeColor=#000000;fontSize=12;fontColor=#000000;"
    );
}

#[test]
fn container_presets() {
    let az = NodeDescriptor::new("az")
        .kind(NodeKind::Container)
        .preset("aws-az")
        .fill("#ignored");
    assert_eq!(
        node_style(az),
        "swimlane;startSize=25;fillColor=#E3F2FD;strokeColor=#1565C0;fontStyle=1;fontSize=14;rounded=1;arcSize=8;swimlaneLine=0;strokeDashArray=8 8;"
    );

    let unknown = NodeDescriptor::new("c")
        .kind(NodeKind::Container)
        .preset("on-prem-rack");
    assert_eq!(
        node_style(unknown),
        "swimlane;startSize=30;fillColor=#E8F5E9;strokeColor=#388E3C;fontStyle=1;fontSize=14;rounded=1;arcSize=8;swimlaneLine=0;"
    );
}

#[test]
fn container_synthesized_from_fields() {
    let mut node = NodeDescriptor::new("c")
        .kind(NodeKind::Container)
        .fill("#FFFFFF")
        .stroke("#333333");
    node.start_size = Some(40.0);
    node.dashed = Some(true);
    assert_eq!(
        node_style(node),
        "swimlane;startSize=40;fillColor=#FFFFFF;strokeColor=#333333;fontStyle=1;fontSize=14;rounded=1;arcSize=8;swimlaneLine=0;strokeDashArray=8 8;"
    );
}

#[test]
fn aws_preset_uses_category_color_unless_filled() {
    let lambda = NodeDescriptor::new("fn").kind(NodeKind::Aws).preset("aws-lambda");
    assert_eq!(
        node_style(lambda.clone()),
        aws_icon("#ED7100", "mxgraph.aws4.lambda_function")
    );
    assert_eq!(
        node_style(lambda.fill("#3F8624")),
        aws_icon("#3F8624", "mxgraph.aws4.lambda_function")
    );
}

#[test]
fn aws_shape_retries_as_catalog_key() {
    let node = NodeDescriptor::new("db").kind(NodeKind::Aws).shape("dynamodb");
    assert_eq!(node_style(node), aws_icon("#C925D1", "mxgraph.aws4.dynamodb"));

    // Unknown preset, known shape.
    let node = NodeDescriptor::new("db")
        .kind(NodeKind::Aws)
        .preset("aws-nope")
        .shape("sqs");
    assert_eq!(node_style(node), aws_icon("#E7157B", "mxgraph.aws4.sqs"));
}

#[test]
fn aws_unknown_shape_builds_generic_icon() {
    let node = NodeDescriptor::new("q").kind(NodeKind::Aws).shape("quantum_ledger");
    assert_eq!(
        node_style(node),
        aws_icon("#232F3E", "mxgraph.aws4.quantum_ledger")
    );

    // A raw primitive name that the catalog knows still gets its category color.
    let node = NodeDescriptor::new("i").kind(NodeKind::Aws).shape("instance2");
    assert_eq!(node_style(node), aws_icon("#ED7100", "mxgraph.aws4.instance2"));
}

#[test]
fn gcp_icons() {
    let bq = NodeDescriptor::new("bq").kind(NodeKind::Gcp).preset("gcp-bigquery");
    assert_eq!(node_style(bq), aws_icon("#4285F4", "mxgraph.gcp2.bigquery"));

    let run = NodeDescriptor::new("run").kind(NodeKind::Gcp).shape("cloud-run");
    assert_eq!(node_style(run), aws_icon("#4285F4", "mxgraph.gcp2.cloud_run"));

    let other = NodeDescriptor::new("x")
        .kind(NodeKind::Gcp)
        .shape("dataflow")
        .fill("#000000");
    assert_eq!(node_style(other), aws_icon("#000000", "mxgraph.gcp2.dataflow"));
}

#[test]
fn azure_icons_are_images() {
    let vm = NodeDescriptor::new("vm").kind(NodeKind::Azure).shape("Virtual_Machine");
    assert_eq!(
        node_style(vm),
        "shape=image;aspect=fixed;image=img/lib/mscae/Virtual_Machine.svg;fillColor=none;strokeColor=none;"
    );
}

#[test]
fn text_defaults_and_overrides() {
    assert_eq!(
        node_style(NodeDescriptor::anonymous_text()),
        "text;html=1;align=center;verticalAlign=middle;fontSize=13;fontStyle=1;fontColor=#000000;fillColor=none;strokeColor=none;"
    );
    let mut node = NodeDescriptor::anonymous_text().font_color("#E65100");
    node.font_size = Some(10.5);
    node.font_style = Some(0);
    assert_eq!(
        node_style(node),
        "text;html=1;align=center;verticalAlign=middle;fontSize=10.5;fontStyle=0;fontColor=#E65100;fillColor=none;strokeColor=none;"
    );
}

#[test]
fn basic_shapes_and_unknown_fallback() {
    let diamond = NodeDescriptor::new("d")
        .shape("diamond")
        .fill("#fff2cc")
        .stroke("#d6b656");
    assert_eq!(
        node_style(diamond),
        "rhombus;whiteSpace=wrap;html=1;fillColor=#fff2cc;strokeColor=#d6b656;fontSize=12;fontColor=#000000;"
    );

    let unknown = NodeDescriptor::new("u").shape("dodecahedron");
    let boxed = NodeDescriptor::new("u").shape("box");
    assert_eq!(node_style(unknown), node_style(boxed));
}

#[test]
fn template_colors_are_shadowed_by_appended_keys() {
    let table = node_style(NodeDescriptor::new("t").shape("table"));
    let style = Style::parse(&table);
    assert!(table.starts_with(
        "shape=table;startSize=30;container=1;collapsible=0;childLayout=tableLayout;fixedRows=1;rowLines=1;fontStyle=1;strokeColor=#6c8ebf;fillColor=#dae8fc;"
    ));
    assert!(table.ends_with("fillColor=#FFFFFF;strokeColor=#000000;fontSize=12;fontColor=#000000;"));
    assert_eq!(table.matches("fillColor=").count(), 2);
    assert_eq!(style.get("fillColor"), Some("#FFFFFF"));
    assert_eq!(style.get("strokeColor"), Some("#000000"));
    assert_eq!(style.get("childLayout"), Some("tableLayout"));
}

#[test]
fn style_overrides_apply_in_order() {
    let node = NodeDescriptor::new("n")
        .style_override("fillColor", "#123456")
        .style_override("shadow", 1)
        .style_override("rounded", Value::Null)
        .style_override("opacity", 50.5);
    assert_eq!(
        node_style(node),
        "whiteSpace=wrap;html=1;fillColor=#123456;strokeColor=#000000;fontSize=12;fontColor=#000000;shadow=1;opacity=50.5;"
    );
}

#[test]
fn resolution_is_deterministic() {
    let node = NodeDescriptor::new("n").kind(NodeKind::Aws).preset("aws-s3");
    assert_eq!(node_style(node.clone()), node_style(node));
    let edge = EdgeDescriptor::new("e", "a", "b").style("curved").dashed();
    assert_eq!(resolve_edge_style(&edge), resolve_edge_style(&edge));
}

#[test]
fn edge_routes() {
    let edge = |style: Option<&str>| {
        let mut e = EdgeDescriptor::new("e", "a", "b");
        e.style = style.map(str::to_string);
        resolve_edge_style(&e)
    };
    assert_eq!(
        edge(None),
        "edgeStyle=orthogonalEdgeStyle;strokeColor=#232F3E;strokeWidth=2;"
    );
    assert_eq!(edge(Some("straight")), "strokeColor=#232F3E;strokeWidth=2;");
    assert_eq!(
        edge(Some("curved")),
        "curved=1;strokeColor=#232F3E;strokeWidth=2;"
    );
    assert_eq!(
        edge(Some("elbow")),
        "edgeStyle=elbowEdgeStyle;strokeColor=#232F3E;strokeWidth=2;"
    );
    assert_eq!(edge(Some("zigzag")), edge(None));
}

#[test]
fn dashed_edges_carry_a_pattern() {
    let mut edge = EdgeDescriptor::new("e", "a", "b")
        .style("entity-relation")
        .color("#6c8ebf")
        .dashed();
    edge.width = Some(1.5);
    edge.dash_pattern = Some("4 4".into());
    assert_eq!(
        resolve_edge_style(&edge),
        "edgeStyle=entityRelationEdgeStyle;strokeColor=#6c8ebf;strokeWidth=1.5;dashed=1;dashPattern=4 4;"
    );

    let edge = EdgeDescriptor::new("e", "a", "b").dashed();
    assert!(resolve_edge_style(&edge).ends_with("dashed=1;dashPattern=8 8;"));
}
