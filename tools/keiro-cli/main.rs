use clap::Parser;
use keiro::prelude::*;
use std::fs;
use std::time::Instant;

/// A static workflow control-flow analyzer that renders exhaustive
/// execution-path diagrams from scanner-produced stream files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Paths to scanner-produced workflow stream JSON files
    stream_paths: Vec<String>,

    /// Maximum number of branch points before enumeration is rejected
    #[arg(long, default_value_t = 10)]
    max_branch_points: usize,

    /// Maximum number of total paths before enumeration is rejected
    #[arg(long, default_value_t = 1024)]
    max_paths: u64,

    /// Split identifier-style names into words in diagram labels
    #[arg(long)]
    humanize: bool,

    /// Label of the synthetic start node
    #[arg(long, default_value = "Start")]
    start_label: String,

    /// Label of the synthetic end node
    #[arg(long, default_value = "End")]
    end_label: String,

    /// Render the cross-workflow signal graph instead of per-workflow paths
    #[arg(long, requires = "entry")]
    signal_graph: bool,

    /// Name of the entry workflow for the signal graph
    #[arg(long)]
    entry: Option<String>,

    /// Maximum signal chain length in hops from the entry workflow
    #[arg(long, default_value_t = 8)]
    max_depth: usize,

    /// Write the diagram to a file instead of stdout
    #[arg(short, long)]
    output: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    if cli.stream_paths.is_empty() {
        exit_with_error("At least one workflow stream file is required.");
    }

    let load_start = Instant::now();
    let streams: Vec<WorkflowStream> = cli
        .stream_paths
        .iter()
        .map(|path| load_stream(path))
        .collect();
    let load_duration = load_start.elapsed();
    eprintln!(
        "Loaded {} workflow stream(s) in {:?}",
        streams.len(),
        load_duration
    );

    let options = RenderOptions {
        start_label: cli.start_label.clone(),
        end_label: cli.end_label.clone(),
        humanize_names: cli.humanize,
    };
    let renderer = MermaidRenderer::new(options);

    let diagram = if cli.signal_graph {
        render_signal_graph(&cli, &streams, &renderer)
    } else {
        render_paths(&cli, &streams, &renderer)
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &diagram) {
                exit_with_error(&format!("Failed to write diagram to '{}': {}", path, e));
            }
            eprintln!("Wrote diagram to '{}'", path);
        }
        None => print!("{}", diagram),
    }
}

/// Renders the path diagram of every supplied workflow, separated by blank
/// lines so the output stays valid when piped into a Mermaid live editor one
/// block at a time.
fn render_paths(cli: &Cli, streams: &[WorkflowStream], renderer: &MermaidRenderer) -> String {
    let limits = EnumerationLimits {
        max_branch_points: cli.max_branch_points,
        max_paths: cli.max_paths,
    };
    let enumerator = PathEnumerator::new(limits);
    let mut blocks = Vec::new();

    for stream in streams {
        let analysis_start = Instant::now();

        let tree = ControlFlowTree::from_stream(stream).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Malformed scope in workflow '{}': {}",
                stream.workflow, e
            ))
        });
        let paths = enumerator.enumerate(&tree).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Path explosion in workflow '{}': {}",
                stream.workflow, e
            ))
        });

        eprintln!(
            "Workflow '{}': {} branch point(s), {} path(s), analyzed in {:?}",
            stream.workflow,
            tree.branch_point_count(),
            paths.len(),
            analysis_start.elapsed()
        );
        blocks.push(renderer.render(&paths));
    }

    blocks.join("\n")
}

fn render_signal_graph(
    cli: &Cli,
    streams: &[WorkflowStream],
    renderer: &MermaidRenderer,
) -> String {
    // `requires = "entry"` on the flag guarantees the entry name is present.
    let entry_name = cli.entry.as_deref().unwrap_or_default();
    let entry = streams
        .iter()
        .find(|s| s.workflow == entry_name)
        .unwrap_or_else(|| {
            exit_with_error(&format!(
                "Entry workflow '{}' not found in the supplied streams",
                entry_name
            ))
        });

    let resolution = SignalResolver::new(cli.max_depth).resolve(entry, streams);
    eprintln!(
        "Resolved {} connection(s), {} unresolved, {} cycle(s)",
        resolution.connections.len(),
        resolution.unresolved.len(),
        resolution.cycles.len()
    );
    for cycle in &resolution.cycles {
        eprintln!(
            "Warning: signal cycle {} -> {} via \"{}\"",
            cycle.from_workflow, cycle.to_workflow, cycle.signal
        );
    }

    renderer.render_signal_graph(&resolution)
}

fn load_stream(path: &str) -> WorkflowStream {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    WorkflowStream::from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to decode '{}': {}", path, e)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
