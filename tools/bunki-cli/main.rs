use ahash::AHashMap;
use bunki::prelude::*;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Inspect, lay out and walk branching form graphs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional path to an engine configuration JSON file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a graph and report cycles, orphans and unreachable blocks
    Check {
        /// Path to the graph snapshot JSON file
        graph_path: String,
    },
    /// Compute canvas positions for every block
    Layout {
        /// Path to the graph snapshot JSON file
        graph_path: String,
        /// Write the laid-out snapshot here instead of printing positions
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Walk the form as a respondent would
    Walk {
        /// Path to the graph snapshot JSON file
        graph_path: String,
        /// JSON object mapping block ids to answers
        answers_path: Option<String>,
        /// Prompt for each answer on stdin
        #[arg(short = 'i', long)]
        interactive: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bunki=info,warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load config from '{}': {}", path, e))
        }),
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Check { graph_path } => run_check(&graph_path, config),
        Command::Layout { graph_path, output } => run_layout(&graph_path, output, config),
        Command::Walk {
            graph_path,
            answers_path,
            interactive,
        } => run_walk(&graph_path, answers_path, interactive, config),
    }
}

fn load_snapshot(path: &str) -> GraphSnapshot {
    GraphSnapshot::from_file(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load graph '{}': {}", path, e)))
}

fn run_check(graph_path: &str, config: EngineConfig) {
    let start = Instant::now();
    let snapshot = load_snapshot(graph_path);
    let stored = snapshot.connections.len();
    let service = WorkflowGraphService::with_config(snapshot, config);
    let pruned = stored - service.connections().len();

    let cycles = service.detect_cycles();
    let orphans = service.orphans();
    let unreachable = service.unreachable();

    println!("\n--- Graph Summary ---");
    println!("Blocks:               {}", service.blocks().len());
    println!("Connections:          {}", service.connections().len());
    println!("Pruned on load:       {}", pruned);

    if cycles.has_cycles {
        println!("\nCycles through: {}", cycles.connection_ids().join(", "));
    } else {
        println!("\nNo cycles found.");
    }
    if !orphans.is_empty() {
        println!("Orphaned blocks: {}", orphans.join(", "));
    }
    if !unreachable.is_empty() {
        println!("Unreachable blocks: {}", unreachable.join(", "));
    }

    info!(elapsed = ?start.elapsed(), "check finished");
    if pruned > 0 || !orphans.is_empty() || !unreachable.is_empty() {
        std::process::exit(2);
    }
}

fn run_layout(graph_path: &str, output: Option<String>, config: EngineConfig) {
    let snapshot = load_snapshot(graph_path);
    let mut service = WorkflowGraphService::with_config(snapshot, config);
    service.relayout();

    match output {
        Some(path) => {
            service
                .snapshot()
                .save(&path)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e)));
            println!("Saved laid-out graph to '{}'", path);
        }
        None => {
            let mut positions: Vec<_> = service.positions().iter().collect();
            positions.sort_by(|a, b| a.0.cmp(b.0));
            for (block_id, position) in positions {
                println!("{:<24} x={:<8} y={}", block_id, position.x, position.y);
            }
        }
    }
}

fn run_walk(
    graph_path: &str,
    answers_path: Option<String>,
    interactive: bool,
    config: EngineConfig,
) {
    let snapshot = load_snapshot(graph_path);
    let service = WorkflowGraphService::with_config(snapshot, config);

    let answers: AHashMap<String, Answer> = match (&answers_path, interactive) {
        (Some(path), _) => {
            let json = std::fs::read_to_string(path)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
            serde_json::from_str(&json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse answers: {}", e)))
        }
        (None, true) => AHashMap::new(),
        (None, false) => exit_with_error("An answers file is required unless --interactive is set."),
    };

    let mut session = service
        .session()
        .unwrap_or_else(|e| exit_with_error(&format!("Cannot start session: {}", e)));

    // A recorded answer that keeps satisfying a looping rule would never finish.
    let step_limit = service.blocks().len() * 4;
    while !session.is_complete() {
        if !interactive && session.navigation_path().len() > step_limit {
            exit_with_error("Walk did not terminate; the recorded answers keep the form in a cycle");
        }
        let block = session.current_block();
        let answer = match answers.get(&block.id) {
            Some(answer) => answer.clone(),
            None if interactive => prompt_for_answer(block),
            None => exit_with_error(&format!("No answer recorded for block '{}'", block.id)),
        };
        session
            .submit_answer(answer)
            .unwrap_or_else(|e| exit_with_error(&format!("Navigation failed: {}", e)));
    }

    println!("\nForm complete!");
    println!("{}", PathFormatter::format_path(session.navigation_path()));
    println!("\n--- Route ---");
    println!("{}", PathFormatter::format_route(session.navigation_path()));
    println!("{}", PathFormatter::summarize(session.navigation_path()));
}

/// Prompts for an answer to `block`. JSON input (lists, numbers, booleans) is
/// taken as-is; anything else is plain text.
fn prompt_for_answer(block: &Block) -> Answer {
    println!("\n[{}] ({:?})", block.id, block.subtype);
    for option in &block.settings.options {
        println!("  {}: {}", option.id, option.label);
    }
    let line = prompt_for_input("Answer");
    serde_json::from_str(&line).unwrap_or(Answer::Text(line))
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str) -> String {
    let mut line = String::new();

    print!("> {}: ", prompt_text);
    if let Err(e) = io::stdout().flush() {
        exit_with_error(&format!("Failed to flush stdout: {}", e));
    }
    if let Err(e) = io::stdin().read_line(&mut line) {
        exit_with_error(&format!("Failed to read line: {}", e));
    }
    line.trim().to_string()
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
