use cellgraph_emit::csv::{CsvSpec, emit, emit_str};
use serde_json::json;

#[test]
fn defaults_with_object_records() {
    let out = emit(json!({
        "data": [
            {"name": "Alice", "role": "CEO", "refs": ""},
            {"name": "Bob", "role": "CTO, acting", "refs": "Alice"}
        ]
    }))
    .unwrap();
    assert_eq!(
        out,
        "# label: %name%
# style: rounded=1;whiteSpace=wrap;html=1;
# layout: auto

name,role,refs
Alice,CEO,
Bob,\"CTO, acting\",Alice
"
    );
}

#[test]
fn directives_and_explicit_columns() {
    let out = emit(json!({
        "label": "%name%<br><i>%role%</i>",
        "style": "shape=%shape%;",
        "connect": {"from": "refs", "to": "name", "invert": true},
        "layout": "horizontaltree",
        "width": 120,
        "height": "auto",
        "padding": 10,
        "ignore": ["refs", "shape"],
        "columns": ["name", "refs", "shape"],
        "data": [
            {"shape": "ellipse", "name": "Root", "extra": 1},
            ["Leaf", "Root", "rect"],
            {"name": "Quote \"me\"", "refs": null}
        ]
    }))
    .unwrap();
    assert_eq!(
        out,
        r#"# label: %name%<br><i>%role%</i>
# style: shape=%shape%;
# connect: {"from":"refs","to":"name","invert":true}
# layout: horizontaltree
# width: 120
# height: auto
# padding: 10
# ignore: refs,shape

name,refs,shape
Root,,ellipse
Leaf,Root,rect
"Quote ""me""",,
"#
    );
}

#[test]
fn empty_spec_has_only_directives() {
    let spec = CsvSpec::default();
    assert_eq!(
        spec.render().unwrap(),
        "# label: %name%\n# style: rounded=1;whiteSpace=wrap;html=1;\n# layout: auto\n\n"
    );
    assert!(emit_str("{\"data\": 3}").is_err());
}

#[test]
fn line_breaks_stay_inside_one_record() {
    let out = emit(json!({
        "columns": ["name", "role"],
        "data": [
            {"name": "Alice\nSmith", "role": "CEO"},
            {"name": "Bob", "role": "CTO\r\nacting"}
        ]
    }))
    .unwrap();
    let body = out.split_once("\n\n").unwrap().1;
    assert_eq!(body, "name,role\n\"Alice\nSmith\",CEO\nBob,\"CTO\r\nacting\"\n");
}
