//! Mermaid emitter.
//!
//! Each diagram kind has its own input shape. Optional fields fall back to Mermaid's usual
//! defaults and unknown shape or arrow names degrade to the plainest form.

use crate::{Error, Result, join_lines};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MermaidKind {
    Flowchart,
    Sequence,
    Erd,
    Gantt,
    State,
    Class,
}

impl MermaidKind {
    pub const ALL: [MermaidKind; 6] = [
        Self::Flowchart,
        Self::Sequence,
        Self::Erd,
        Self::Gantt,
        Self::State,
        Self::Class,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Flowchart => "flowchart",
            Self::Sequence => "sequence",
            Self::Erd => "erd",
            Self::Gantt => "gantt",
            Self::State => "state",
            Self::Class => "class",
        }
    }
}

impl FromStr for MermaidKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| Error::UnknownKind {
                name: s.to_string(),
                available: Self::ALL.map(Self::name).join(", "),
            })
    }
}

/// Renders `spec` as a Mermaid diagram of the given kind.
pub fn emit(kind: MermaidKind, spec: Value) -> Result<String> {
    Ok(match kind {
        MermaidKind::Flowchart => serde_json::from_value::<Flowchart>(spec)?.render(),
        MermaidKind::Sequence => serde_json::from_value::<Sequence>(spec)?.render(),
        MermaidKind::Erd => serde_json::from_value::<Erd>(spec)?.render(),
        MermaidKind::Gantt => serde_json::from_value::<Gantt>(spec)?.render(),
        MermaidKind::State => serde_json::from_value::<StateDiagram>(spec)?.render(),
        MermaidKind::Class => serde_json::from_value::<ClassDiagram>(spec)?.render(),
    })
}

pub fn emit_str(kind: MermaidKind, spec_json: &str) -> Result<String> {
    emit(kind, serde_json::from_str(spec_json)?)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Flowchart {
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowNode {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub shape: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: Option<String>,
    /// `arrow` (default), `dotted`, `thick` or `none`.
    #[serde(default)]
    pub style: Option<String>,
}

fn node_text(shape: &str, label: &str) -> String {
    match shape {
        "round" => format!("({label})"),
        "diamond" => format!("{{{label}}}"),
        "circle" => format!("(({label}))"),
        "stadium" => format!("([{label}])"),
        "hexagon" => format!("{{{{{label}}}}}"),
        "parallelogram" => format!("[/{label}/]"),
        "cylinder" => format!("[({label})]"),
        _ => format!("[{label}]"),
    }
}

fn flow_arrow(style: &str) -> &'static str {
    match style {
        "dotted" => "-.->",
        "thick" => "==>",
        "none" => "---",
        _ => "-->",
    }
}

impl Flowchart {
    pub fn render(&self) -> String {
        let mut lines = vec![format!(
            "graph {}",
            self.direction.as_deref().unwrap_or("TD")
        )];
        for node in &self.nodes {
            let label = node.label.as_deref().unwrap_or(&node.id);
            let shape = node.shape.as_deref().unwrap_or("box");
            lines.push(format!("    {}{}", node.id, node_text(shape, label)));
        }
        for edge in &self.edges {
            let arrow = flow_arrow(edge.style.as_deref().unwrap_or("arrow"));
            lines.push(match non_empty(&edge.label) {
                Some(label) => format!("    {} {arrow}|{label}| {}", edge.source, edge.target),
                None => format!("    {} {arrow} {}", edge.source, edge.target),
            });
        }
        join_lines(lines)
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sequence {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub text: String,
    /// `solid` (default), `dotted`, `solid_open` or `dotted_open`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub activate: bool,
    /// Participant to deactivate after this message.
    #[serde(default)]
    pub deactivate: Option<String>,
}

fn message_arrow(kind: &str) -> &'static str {
    match kind {
        "dotted" => "-->>",
        "solid_open" => "->",
        "dotted_open" => "-->",
        _ => "->>",
    }
}

impl Sequence {
    pub fn render(&self) -> String {
        let mut lines = vec!["sequenceDiagram".to_string()];
        for p in &self.participants {
            let id = p.id.as_deref().or(p.name.as_deref()).unwrap_or_default();
            let label = p.label.as_deref().unwrap_or(id);
            lines.push(format!("    participant {id} as {label}"));
        }
        for m in &self.messages {
            let arrow = message_arrow(m.kind.as_deref().unwrap_or("solid"));
            lines.push(format!("    {}{arrow}{}: {}", m.from, m.to, m.text));
            if m.activate {
                lines.push(format!("    activate {}", m.to));
            }
            if let Some(who) = non_empty(&m.deactivate) {
                lines.push(format!("    deactivate {who}"));
            }
        }
        join_lines(lines)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Erd {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub relationships: Vec<EntityRelation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    pub id: String,
    #[serde(default)]
    pub attributes: Vec<EntityAttribute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityAttribute {
    #[serde(default = "default_attribute_type", rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub constraint: Option<String>,
}

fn default_attribute_type() -> String {
    "string".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityRelation {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub cardinality: Option<String>,
}

impl Erd {
    pub fn render(&self) -> String {
        let mut lines = vec!["erDiagram".to_string()];
        for entity in &self.entities {
            for attr in &entity.attributes {
                lines.push(match non_empty(&attr.constraint) {
                    Some(c) => format!("    {} {{{} {} {c}}}", entity.id, attr.ty, attr.name),
                    None => format!("    {} {{{} {}}}", entity.id, attr.ty, attr.name),
                });
            }
        }
        for rel in &self.relationships {
            let card = rel.cardinality.as_deref().unwrap_or("||--o{");
            lines.push(format!(
                "    {} {card} {} : \"{}\"",
                rel.from, rel.to, rel.label
            ));
        }
        join_lines(lines)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Gantt {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "dateFormat")]
    pub date_format: Option<String>,
    #[serde(default)]
    pub sections: Vec<GanttSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GanttSection {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<GanttTask>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GanttTask {
    pub name: String,
    #[serde(default)]
    pub id: String,
    /// `done`, `active`, `crit`, ...
    #[serde(default)]
    pub status: Option<String>,
    /// Id of the task this one follows; takes precedence over `start`.
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub duration: String,
}

impl GanttTask {
    fn line(&self) -> String {
        let mut line = format!("    {}  :", self.name);
        if let Some(status) = non_empty(&self.status) {
            line.push_str(status);
            line.push(',');
        }
        line.push_str(&self.id);
        line.push(',');
        if let Some(after) = non_empty(&self.after) {
            line.push_str("after ");
            line.push_str(after);
            line.push(',');
        } else if let Some(start) = non_empty(&self.start) {
            line.push_str(start);
            line.push(',');
        }
        line.push_str(&self.duration);
        line
    }
}

impl Gantt {
    pub fn render(&self) -> String {
        let mut lines = vec![
            "gantt".to_string(),
            format!(
                "    title {}",
                self.title.as_deref().unwrap_or("Project Schedule")
            ),
            format!(
                "    dateFormat {}",
                self.date_format.as_deref().unwrap_or("YYYY-MM-DD")
            ),
        ];
        for section in &self.sections {
            lines.push(format!("    section {}", section.name));
            lines.extend(section.tasks.iter().map(GanttTask::line));
        }
        join_lines(lines)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateDiagram {
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct State {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// A missing endpoint is the start/end pseudo-state `[*]`.
#[derive(Debug, Clone, Deserialize)]
pub struct Transition {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl StateDiagram {
    pub fn render(&self) -> String {
        let mut lines = vec!["stateDiagram-v2".to_string()];
        for state in &self.states {
            // Only states whose label differs from the id need a declaration.
            if let Some(label) = state.label.as_deref().filter(|l| *l != state.id) {
                lines.push(format!("    {} : {label}", state.id));
            }
        }
        for t in &self.transitions {
            let from = t.from.as_deref().unwrap_or("[*]");
            let to = t.to.as_deref().unwrap_or("[*]");
            lines.push(match non_empty(&t.label) {
                Some(label) => format!("    {from} --> {to} : {label}"),
                None => format!("    {from} --> {to}"),
            });
        }
        join_lines(lines)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassDiagram {
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub relationships: Vec<ClassRelation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Class {
    pub id: String,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassRelation {
    pub from: String,
    pub to: String,
    /// Mermaid relation arrow, `-->` by default.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl ClassDiagram {
    pub fn render(&self) -> String {
        let mut lines = vec!["classDiagram".to_string()];
        for class in &self.classes {
            for member in class.attributes.iter().chain(&class.methods) {
                lines.push(format!("    {} : {member}", class.id));
            }
        }
        for rel in &self.relationships {
            let kind = rel.kind.as_deref().unwrap_or("-->");
            lines.push(match non_empty(&rel.label) {
                Some(label) => format!("    {} {kind} {} : {label}", rel.from, rel.to),
                None => format!("    {} {kind} {}", rel.from, rel.to),
            });
        }
        join_lines(lines)
    }
}
