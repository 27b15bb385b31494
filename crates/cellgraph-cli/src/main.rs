use cellgraph::emit::{self, MermaidKind};
use cellgraph::templates::{self, TEMPLATES};
use cellgraph::{Catalog, Config, Engine, OperationList, summarize};
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Missing(&'static str),
    Io { path: String, err: std::io::Error },
    Diagram(cellgraph::Error),
    Emit(emit::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Missing(what) => write!(f, "missing required argument: {what}"),
            CliError::Io { path, err } => write!(f, "I/O error on {path}: {err}"),
            CliError::Diagram(err) => write!(f, "{err}"),
            CliError::Emit(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<cellgraph::Error> for CliError {
    fn from(value: cellgraph::Error) -> Self {
        Self::Diagram(value)
    }
}

impl From<emit::Error> for CliError {
    fn from(value: emit::Error) -> Self {
        Self::Emit(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Help,
    Create,
    Read,
    Modify,
    Mermaid,
    Csv,
    ListTemplates,
    ListShapes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum ReadFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    output: Option<String>,
    template: Option<String>,
    vars: Vec<String>,
    operations: Option<String>,
    format: ReadFormat,
    category: Option<String>,
    config: Option<String>,
    strict: bool,
}

fn usage() -> &'static str {
    "cellgraph\n\
\n\
USAGE:\n\
  cellgraph create (-i <spec.json> | -t <template> [--vars k=v ...]) -o <out.drawio>\n\
  cellgraph read -i <file.drawio> [-f text|json]\n\
  cellgraph modify -i <file.drawio> --operations <ops.json> -o <out.drawio>\n\
  cellgraph mermaid -t flowchart|sequence|erd|gantt|state|class -i <spec.json> [-o <out.mmd>]\n\
  cellgraph csv -i <spec.json> [-o <out.csv>]\n\
  cellgraph list-templates\n\
  cellgraph list-shapes -c <aws|gcp|general|category>\n\
\n\
OPTIONS:\n\
  --config <file.json>  merge a JSON config over the built-in defaults\n\
  --strict              fail `modify` on update/remove of an unknown cell id\n\
\n\
NOTES:\n\
  - Set CELLGRAPH_LOG (e.g. `debug`) to see log output on stderr.\n\
"
}

fn value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<String, CliError> {
    it.next().cloned().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" | "help" => return Err(CliError::Usage(usage())),
            "create" => args.command = Command::Create,
            "read" => args.command = Command::Read,
            "modify" => args.command = Command::Modify,
            "mermaid" => args.command = Command::Mermaid,
            "csv" => args.command = Command::Csv,
            "list-templates" => args.command = Command::ListTemplates,
            "list-shapes" => args.command = Command::ListShapes,
            "--input" | "-i" => args.input = Some(value(&mut it)?),
            "--output" | "-o" => args.output = Some(value(&mut it)?),
            "--template" | "-t" | "--type" => args.template = Some(value(&mut it)?),
            "--operations" => args.operations = Some(value(&mut it)?),
            "--category" | "-c" => args.category = Some(value(&mut it)?),
            "--config" => args.config = Some(value(&mut it)?),
            "--strict" => args.strict = true,
            "--format" | "-f" => {
                args.format = match value(&mut it)?.as_str() {
                    "text" => ReadFormat::Text,
                    "json" => ReadFormat::Json,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--vars" => {
                // Takes every following `key=value` item.
                while let Some(var) = it.next_if(|v| !v.starts_with('-') && v.contains('=')) {
                    args.vars.push(var.clone());
                }
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|err| CliError::Io {
        path: path.to_string(),
        err,
    })
}

fn write_file(path: &str, text: &str) -> Result<(), CliError> {
    std::fs::write(path, text).map_err(|err| CliError::Io {
        path: path.to_string(),
        err,
    })
}

fn required<'a>(value: &'a Option<String>, what: &'static str) -> Result<&'a str, CliError> {
    value.as_deref().ok_or(CliError::Missing(what))
}

fn json_file(path: &str) -> Result<serde_json::Value, CliError> {
    Ok(serde_json::from_str(&read_file(path)?)?)
}

/// Writes `text` to `out`, or to stdout when no output path is given.
fn emit_text(text: &str, out: Option<&str>, what: &str) -> Result<(), CliError> {
    match out {
        Some(path) => {
            write_file(path, text)?;
            println!("{what} saved to {path}");
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Built-in defaults, then `--config`, then `--strict`.
fn engine(args: &Args) -> Result<Engine, CliError> {
    let mut overrides = match args.config.as_deref() {
        Some(path) => {
            let config = Config::from_json_str(&read_file(path)?)?;
            tracing::debug!(path, "loaded config");
            config
        }
        None => Config::default(),
    };
    if args.strict {
        overrides.set("mutate.strict", serde_json::Value::Bool(true));
    }
    Ok(Engine::new().with_config(overrides))
}

fn cmd_create(args: &Args) -> Result<(), CliError> {
    let engine = engine(args)?;
    let out = required(&args.output, "--output")?;
    if let Some(name) = args.template.as_deref() {
        let vars = templates::parse_vars(&args.vars);
        let doc = engine.create_template(name, &vars)?;
        write_file(out, &engine.write_document(&doc))?;
        println!("Created {out} from template '{name}'");
        return Ok(());
    }
    let input = required(&args.input, "--input or --template")?;
    let doc = engine.build_json(&read_file(input)?)?;
    write_file(out, &engine.write_document(&doc))?;
    println!("Created {out}");
    Ok(())
}

fn cmd_read(args: &Args) -> Result<(), CliError> {
    let engine = engine(args)?;
    let input = required(&args.input, "--input")?;
    let read = engine.read_xml(&read_file(input)?)?;
    match args.format {
        ReadFormat::Text => println!("{}", summarize(&read)),
        ReadFormat::Json => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &read)?;
            let _ = writeln!(stdout);
        }
    }
    Ok(())
}

fn cmd_modify(args: &Args) -> Result<(), CliError> {
    let engine = engine(args)?;
    let input = required(&args.input, "--input")?;
    let ops_path = required(&args.operations, "--operations")?;
    let out = required(&args.output, "--output")?;

    let ops = OperationList::from_json_str(&read_file(ops_path)?)?;
    let xml = engine.modify_xml(&read_file(input)?, &ops.operations, engine.apply_options())?;
    write_file(out, &xml)?;
    println!("Modified diagram saved to {out}");
    Ok(())
}

fn cmd_mermaid(args: &Args) -> Result<(), CliError> {
    let kind: MermaidKind = required(&args.template, "--type")?.parse()?;
    let spec = json_file(required(&args.input, "--input")?)?;
    let text = emit::mermaid::emit(kind, spec)?;
    emit_text(&text, args.output.as_deref(), "Mermaid diagram")
}

fn cmd_csv(args: &Args) -> Result<(), CliError> {
    let spec = json_file(required(&args.input, "--input")?)?;
    let text = emit::csv::emit(spec)?;
    emit_text(&text, args.output.as_deref(), "CSV diagram")
}

fn cmd_list_templates() {
    println!("Available templates:");
    for t in TEMPLATES {
        println!("  {:20} {}", t.name, t.description);
    }
}

fn cmd_list_shapes(args: &Args) -> Result<(), CliError> {
    let category = required(&args.category, "--category")?;
    let catalog = Catalog::builtin();
    if category == "general" {
        println!("General / Flowchart shapes:");
        let mut shapes: Vec<_> = catalog.general_shapes().collect();
        shapes.sort_by_key(|(name, _)| *name);
        for (name, style) in shapes {
            println!("  {name:20} style=\"{style}\"");
        }
        return Ok(());
    }

    let entries = catalog.entries_matching(category);
    if entries.is_empty() {
        println!("No shapes found for category: {category}");
        println!("Available prefixes: aws, azure, gcp, general");
        return Ok(());
    }
    println!("Shapes for '{category}':");
    for e in entries {
        let color = catalog.category_color(e.category).unwrap_or_default();
        println!("  {:30} shape={}  color={color}", e.key, e.primitive);
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Help => Err(CliError::Usage(usage())),
        Command::Create => cmd_create(&args),
        Command::Read => cmd_read(&args),
        Command::Modify => cmd_modify(&args),
        Command::Mermaid => cmd_mermaid(&args),
        Command::Csv => cmd_csv(&args),
        Command::ListTemplates => {
            cmd_list_templates();
            Ok(())
        }
        Command::ListShapes => cmd_list_shapes(&args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CELLGRAPH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
