use crate::templates::{TEMPLATES, find, parse_vars, spec_for};
use crate::*;

#[test]
fn every_template_builds_and_validates() {
    let engine = Engine::new();
    for template in TEMPLATES {
        let doc = engine
            .create_template(template.name, &TemplateVars::new())
            .unwrap_or_else(|err| panic!("{}: {err}", template.name));
        let page = doc.first_page().unwrap();
        assert!(!page.is_empty(), "{} is empty", template.name);
        for edge in page.edges() {
            for end in [edge.source(), edge.target()].into_iter().flatten() {
                assert!(page.has_cell(end), "{}: dangling {end}", template.name);
            }
        }
    }
}

#[test]
fn aws_3tier_layout() {
    let doc = Engine::new()
        .create_template("aws-3tier", &TemplateVars::new())
        .unwrap();
    let read = Engine::new().read(&doc);
    let page = &read.pages[0];
    assert_eq!(page.name, "AWS 3-Tier Architecture");
    assert_eq!(page.containers.len(), 9);
    assert_eq!(page.edges.len(), 16);
    assert_eq!(
        page.node("az2").unwrap().label,
        "Availability Zone 2 (us-east-1b)"
    );
    assert_eq!(page.node("ec2_2b").unwrap().parent, "privsub_app2");
    assert_eq!(page.node("cf").unwrap().label, "CloudFront\nDistribution");
    assert!(page.edge("e14").unwrap().style.contains("dashed=1"));

    // Tier labels are anonymous text nodes.
    let tiers: Vec<_> = page
        .nodes
        .iter()
        .filter(|n| n.style.starts_with("text;html=1;align=center"))
        .collect();
    assert_eq!(tiers.len(), 3);
    assert!(tiers.iter().all(|n| n.id.len() == 12));
}

#[test]
fn template_vars_are_applied() {
    let vars = parse_vars(["region=eu-west-2", "app_name=Shop", "ignored"]);
    assert_eq!(vars.len(), 2);

    let spec = spec_for("aws-3tier", &vars).unwrap();
    assert_eq!(
        spec.diagram_name.as_deref(),
        Some("Shop - AWS 3-Tier Architecture")
    );
    assert!(
        spec.nodes
            .iter()
            .any(|n| n.label.as_deref() == Some("Availability Zone 1 (eu-west-2a)"))
    );

    let vpc = spec_for("aws-vpc", &vars).unwrap();
    assert!(
        vpc.nodes
            .iter()
            .any(|n| n.label.as_deref() == Some("AZ eu-west-2b"))
    );

    let flow = spec_for("flowchart", &parse_vars(["title=Checkout"])).unwrap();
    assert_eq!(flow.diagram_name.as_deref(), Some("Checkout"));
}

#[test]
fn flowchart_shapes() {
    let page = Engine::new()
        .create_template("flowchart", &TemplateVars::new())
        .unwrap()
        .pages
        .remove(0);
    assert_eq!(page.name(), "Flowchart");
    assert_eq!(page.page_width(), Some(800.0));
    assert!(page.cell("decision").unwrap().style.starts_with("rhombus;"));
    assert_eq!(page.cell("e3").unwrap().value, "Yes");
    assert_eq!(page.cell("e1").unwrap().value, "");
}

#[test]
fn erd_rows_live_in_their_tables() {
    let page = Engine::new()
        .create_template("erd", &TemplateVars::new())
        .unwrap()
        .pages
        .remove(0);
    assert_eq!(page.children("orders_tbl").len(), 5);
    let table = Style::parse(&page.cell("users_tbl").unwrap().style);
    assert_eq!(table.get("fillColor"), Some("#dae8fc"));
    assert_eq!(table.get("shape"), Some("table"));
    assert!(
        page.cell("rel1")
            .unwrap()
            .style
            .starts_with("edgeStyle=entityRelationEdgeStyle;strokeColor=#6c8ebf;")
    );
}

#[test]
fn unknown_template_lists_the_available_ones() {
    assert!(find("aws-serverless").is_some());
    let err = spec_for("kubernetes", &TemplateVars::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown template `kubernetes` (available: aws-3tier, aws-serverless, aws-vpc, flowchart, erd)"
    );
}

#[test]
fn engine_creates_templates_with_its_config() {
    let doc = Engine::new()
        .create_template("aws-serverless", &TemplateVars::new())
        .unwrap();
    assert_eq!(doc.host, "drawio-skill");
    let page = doc.first_page().unwrap();
    assert_eq!(page.name(), "AWS Serverless");
    assert_eq!(page.vertices().count(), 8);
    assert_eq!(page.edges().count(), 8);
}
