use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};

use geoflow::snapshot::{parse_snapshot_value, sanitize_snapshot};
use geoflow::{
    get_ordered_source_layer_pairs, parse_snapshot, to_json, validate_graph, EditorConfig,
    FileSnapshotStore, Graph, GraphMutation, RealIdGenerator, RuntimeContext, SnapshotFormat,
    WorkflowEditor,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Input format; guessed from the file extension when omitted.
    #[arg(long, value_enum, global = true)]
    format: Option<FormatArg>,

    /// Drop malformed nodes and edges instead of failing.
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the ordered (dataUrl, layer) pairs as JSON.
    Pairs { snapshot: PathBuf },
    /// Report invariant violations. Exits non-zero if any error is found.
    Check { snapshot: PathBuf },
    /// Apply a JSON list of edits and print the resulting snapshot.
    Apply {
        snapshot: PathBuf,
        #[arg(long)]
        ops: PathBuf,
    },
    /// Apply edits through an editor session persisted in `dir`, then print
    /// the published pairs.
    Session {
        dir: PathBuf,
        #[arg(long)]
        ops: PathBuf,
        /// TOML file with editor settings.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Yaml,
    Toml,
}

impl From<FormatArg> for SnapshotFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => SnapshotFormat::Json,
            FormatArg::Yaml => SnapshotFormat::Yaml,
            FormatArg::Toml => SnapshotFormat::Toml,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match &args.command {
        Command::Pairs { snapshot } => {
            let graph = read_graph(snapshot, &args)?;
            let pairs = get_ordered_source_layer_pairs(&graph);
            println!("{}", serde_json::to_string_pretty(&pairs)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { snapshot } => {
            let graph = read_graph(snapshot, &args)?;
            let report = validate_graph(&graph);
            for diag in report.errors() {
                println!("[ERROR] {}: {}", diag.code, diag.message);
            }
            for diag in report.warnings() {
                println!("[WARN] {}: {}", diag.code, diag.message);
            }
            if report.is_valid {
                println!(
                    "[OK] {} nodes, {} edges",
                    graph.nodes.len(),
                    graph.edges.len()
                );
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Apply { snapshot, ops } => {
            let mut graph = read_graph(snapshot, &args)?;
            let ids = RealIdGenerator;
            for mutation in &read_mutations(ops)? {
                graph = graph.apply(mutation, &ids);
            }
            println!("{}", to_json(&graph)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Session { dir, ops, config } => {
            let config = match config {
                Some(path) => {
                    let content = std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    EditorConfig::from_toml_str(&content)?
                }
                None => EditorConfig::default(),
            };
            let mutations = read_mutations(ops)?;
            let store = FileSnapshotStore::new(dir)?;
            let mut editor = WorkflowEditor::open(store, config, RuntimeContext::default());
            let applied = mutations
                .into_iter()
                .filter(|mutation| editor.apply(mutation.clone()))
                .count();
            tracing::info!(applied, "session edits applied");
            println!("{}", serde_json::to_string_pretty(editor.pairs())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read_mutations(path: &Path) -> anyhow::Result<Vec<GraphMutation>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid edit list in {}", path.display()))
}

fn read_graph(path: &Path, args: &Args) -> anyhow::Result<Graph> {
    let format = match args.format {
        Some(format) => format.into(),
        None => match SnapshotFormat::from_path(path) {
            Some(format) => format,
            None => bail!(
                "cannot tell the format of {}; pass --format",
                path.display()
            ),
        },
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let graph = if args.lenient {
        sanitize_snapshot(&parse_snapshot_value(&content, format)?)
    } else {
        parse_snapshot(&content, format)?
    };
    Ok(graph)
}
