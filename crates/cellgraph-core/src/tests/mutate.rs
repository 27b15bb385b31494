use crate::*;

fn base() -> Page {
    let spec = DiagramSpec::new("Base", 800.0, 600.0)
        .node(NodeDescriptor::new("a").label("A"))
        .node(NodeDescriptor::new("b").label("B").at(200.0, 0.0))
        .node(NodeDescriptor::new("c").label("C").at(400.0, 0.0))
        .edge(EdgeDescriptor::new("e1", "a", "b"))
        .edge(EdgeDescriptor::new("e2", "b", "c"));
    Engine::new().build_page(&spec).unwrap()
}

fn apply(page: &Page, ops: &[Operation], options: ApplyOptions) -> Result<Page> {
    Engine::new().apply(page, ops, options)
}

fn ids(page: &Page) -> Vec<&str> {
    page.ids().collect()
}

#[test]
fn remove_takes_incident_edges() {
    let page = base();
    let out = apply(
        &page,
        &[
            Operation::remove("b"),
            Operation::AddNode(NodeDescriptor::new("d").label("D")),
            Operation::AddEdge(EdgeDescriptor::new("e3", "a", "d")),
        ],
        ApplyOptions::lenient(),
    )
    .unwrap();
    assert_eq!(ids(&out), ["a", "c", "d", "e3"]);
    // The input page is untouched.
    assert_eq!(ids(&page), ["a", "b", "c", "e1", "e2"]);
}

#[test]
fn update_touches_only_given_fields() {
    let page = base();
    let mut update = CellUpdate::new("b");
    update.label = Some("Bee".into());
    let out = apply(&page, &[Operation::Update(update)], ApplyOptions::strict()).unwrap();
    let before = page.cell("b").unwrap();
    let after = out.cell("b").unwrap();
    assert_eq!(after.value, "Bee");
    assert_eq!(after.style, before.style);
    assert_eq!(after.geometry(), before.geometry());

    let mut update = CellUpdate::new("c");
    update.x = Some(10.0);
    update.style = Some("ellipse;".into());
    let out = apply(&out, &[Operation::Update(update)], ApplyOptions::strict()).unwrap();
    let c = out.cell("c").unwrap();
    assert_eq!(c.geometry(), Some(&Geometry::new(10.0, 0.0, 120.0, 60.0)));
    assert_eq!(c.style, "ellipse;");
    assert_eq!(c.value, "C");
}

#[test]
fn geometry_update_on_edge_is_ignored() {
    let mut update = CellUpdate::new("e1");
    update.width = Some(300.0);
    update.label = Some("calls".into());
    let out = apply(&base(), &[Operation::Update(update)], ApplyOptions::strict()).unwrap();
    let e1 = out.cell("e1").unwrap();
    assert_eq!(e1.value, "calls");
    assert!(e1.geometry().is_none());
}

#[test]
fn unknown_ids_lenient_and_strict() {
    let page = base();
    let ops = [
        Operation::Update(CellUpdate::new("ghost")),
        Operation::remove("phantom"),
    ];
    let out = apply(&page, &ops, ApplyOptions::lenient()).unwrap();
    assert_eq!(out, page);

    let err = apply(&page, &ops, ApplyOptions::strict()).unwrap_err();
    assert!(matches!(err, Error::UnknownCell { action: "update", ref id } if id == "ghost"));

    let err = apply(&page, &ops[1..], ApplyOptions::strict()).unwrap_err();
    assert_eq!(err.to_string(), "Unknown cell id `phantom` in remove operation");
}

#[test]
fn failing_batch_is_all_or_nothing() {
    let page = base();
    let ops = [
        Operation::remove("a"),
        Operation::AddNode(NodeDescriptor::new("b")),
    ];
    let err = apply(&page, &ops, ApplyOptions::lenient()).unwrap_err();
    assert!(matches!(err, Error::Model(ModelError::DuplicateId { .. })));
    assert_eq!(ids(&page), ["a", "b", "c", "e1", "e2"]);
}

#[test]
fn operations_see_earlier_effects() {
    let page = base();
    let ops = [
        Operation::AddNode(NodeDescriptor::new("tmp")),
        Operation::remove("tmp"),
        Operation::AddNode(NodeDescriptor::new("tmp").label("again")),
    ];
    let out = apply(&page, &ops, ApplyOptions::strict()).unwrap();
    assert_eq!(out.cell("tmp").unwrap().value, "again");
    assert_eq!(out.cell_count(), 6);
}

#[test]
fn added_node_may_name_a_later_container() {
    let ops = [
        Operation::AddNode(NodeDescriptor::new("web").parent("zone")),
        Operation::AddNode(NodeDescriptor::new("zone").kind(NodeKind::Container)),
    ];
    let out = apply(&base(), &ops, ApplyOptions::strict()).unwrap();
    assert_eq!(out.cell("web").unwrap().parent, "zone");

    let ops = [Operation::AddNode(NodeDescriptor::new("web").parent("zone"))];
    let err = apply(&base(), &ops, ApplyOptions::strict()).unwrap_err();
    assert!(matches!(err, Error::Model(ModelError::UnknownParent { .. })));
}

#[test]
fn removing_a_container_leaves_children() {
    let spec = DiagramSpec::default()
        .node(NodeDescriptor::new("vpc").kind(NodeKind::Container))
        .node(NodeDescriptor::new("web").parent("vpc"))
        .edge(EdgeDescriptor::new("e", "vpc", "web"));
    let page = Engine::new().build_page(&spec).unwrap();
    let out = apply(&page, &[Operation::remove("vpc")], ApplyOptions::strict()).unwrap();
    assert_eq!(ids(&out), ["web"]);
    assert_eq!(out.cell("web").unwrap().parent, "vpc");
}

#[test]
fn nodes_can_be_added_under_an_orphaned_container() {
    let spec = DiagramSpec::default()
        .node(NodeDescriptor::new("vpc").kind(NodeKind::Container))
        .node(NodeDescriptor::new("subnet").kind(NodeKind::Container).parent("vpc"));
    let page = Engine::new().build_page(&spec).unwrap();
    let page = apply(&page, &[Operation::remove("vpc")], ApplyOptions::strict()).unwrap();
    assert_eq!(ids(&page), ["subnet"]);

    let ops = [Operation::AddNode(NodeDescriptor::new("x").parent("subnet"))];
    let out = apply(&page, &ops, ApplyOptions::strict()).unwrap();
    assert_eq!(out.cell("x").unwrap().parent, "subnet");
    assert_eq!(ids(&out), ["subnet", "x"]);
}

#[test]
fn missing_ids_in_operations() {
    let ops = [Operation::Update(CellUpdate::default())];
    let err = apply(&base(), &ops, ApplyOptions::lenient()).unwrap_err();
    assert!(matches!(err, Error::MissingId { kind: "update operation" }));
}

#[test]
fn operation_lists_from_json() {
    let list = OperationList::from_json_str(
        r#"{"operations": [
            {"action": "update", "id": "a", "label": "Alpha", "width": 200},
            {"action": "add_edge", "id": "e9", "source": "a", "target": "c", "style": "straight"},
            {"action": "remove", "id": "e1"}
        ]}"#,
    )
    .unwrap();
    let actions: Vec<&str> = list.operations.iter().map(Operation::action).collect();
    assert_eq!(actions, ["update", "add_edge", "remove"]);

    let out = apply(&base(), &list.operations, ApplyOptions::strict()).unwrap();
    assert_eq!(ids(&out), ["a", "b", "c", "e2", "e9"]);
    assert_eq!(out.cell("a").unwrap().geometry().unwrap().width, 200.0);
    assert_eq!(out.cell("e9").unwrap().style, "strokeColor=#232F3E;strokeWidth=2;");
}

#[test]
fn unknown_action_is_rejected() {
    let err = OperationList::from_json_str(r#"{"operations": [{"action": "rotate", "id": "a"}]}"#)
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn mutate_strict_from_config() {
    let engine = Engine::new().with_config(Config::from_value(serde_json::json!({
        "mutate": { "strict": true }
    })));
    assert!(engine.apply_options().strict);
    assert!(!Engine::new().apply_options().strict);
}

#[test]
fn modify_xml_round_trips_through_the_writer() {
    let engine = Engine::new();
    let doc = Document::new("drawio-skill").with_page(base());
    let xml = engine.write_document(&doc);
    let out = engine
        .modify_xml(&xml, &[Operation::remove("c")], ApplyOptions::strict())
        .unwrap();
    let reread = engine.parse_document(&out).unwrap();
    assert_eq!(ids(reread.first_page().unwrap()), ["a", "b", "e1"]);
    assert_eq!(reread.first_page().unwrap().name(), "Base");

    let empty = engine.write_document(&Document::new("drawio-skill"));
    let err = engine
        .modify_xml(&empty, &[], ApplyOptions::lenient())
        .unwrap_err();
    assert!(matches!(err, Error::EmptyDocument));
}
