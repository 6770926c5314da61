use bunki::prelude::*;
use clap::Parser;
use rand::{Rng, rngs::ThreadRng};

/// A CLI tool to generate random branching form graphs for bunki
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated graph snapshot to
    #[arg(short, long, default_value = "generated_graph.json")]
    output: String,

    /// Number of blocks in the form
    #[arg(short, long, default_value_t = 12)]
    blocks: usize,

    /// Probability that a choice block branches with rules
    #[arg(long, default_value_t = 0.5)]
    branch_chance: f64,

    /// Allow rules that jump back to earlier blocks
    #[arg(long)]
    allow_loops: bool,
}

const TEXT_SUBTYPES: [BlockSubtype; 5] = [
    BlockSubtype::ShortText,
    BlockSubtype::LongText,
    BlockSubtype::Email,
    BlockSubtype::Number,
    BlockSubtype::Rating,
];

const CHOICE_SUBTYPES: [BlockSubtype; 3] = [
    BlockSubtype::MultipleChoice,
    BlockSubtype::Dropdown,
    BlockSubtype::CheckboxGroup,
];

const LABELS: [&str; 8] = [
    "Yes", "No", "Maybe", "Rust", "Go", "Python", "Daily", "Never",
];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.blocks < 2 {
        eprintln!("Error: --blocks ({}) must be at least 2", cli.blocks);
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.branch_chance) {
        eprintln!(
            "Error: --branch-chance ({}) must be between 0 and 1",
            cli.branch_chance
        );
        std::process::exit(1);
    }

    println!("Generating a form with {} blocks...", cli.blocks);

    let blocks = generate_blocks(&mut rng, cli.blocks);
    let connections = generate_connections(&mut rng, &blocks, cli.branch_chance, cli.allow_loops);

    let service = WorkflowGraphService::new(GraphSnapshot::new(blocks, connections));
    let cycles = service.detect_cycles();
    println!(
        "-> {} connections, {} in cycles, {} unreachable block(s).",
        service.connections().len(),
        cycles.connection_ids().len(),
        service.unreachable().len()
    );

    service.snapshot().save(&cli.output)?;
    println!("Successfully generated and saved graph to '{}'", cli.output);

    Ok(())
}

fn generate_blocks(rng: &mut ThreadRng, count: usize) -> Vec<Block> {
    let last = count - 1;
    (0..count)
        .map(|i| {
            let id = format!("q{}", i + 1);
            if i == last {
                return Block::new(id, BlockSubtype::Statement, i as i64);
            }
            if rng.random_bool(0.4) {
                let subtype = CHOICE_SUBTYPES[rng.random_range(0..CHOICE_SUBTYPES.len())];
                Block::new(&id, subtype, i as i64).with_options(generate_options(rng, &id))
            } else {
                let subtype = TEXT_SUBTYPES[rng.random_range(0..TEXT_SUBTYPES.len())];
                Block::new(id, subtype, i as i64)
            }
        })
        .collect()
}

fn generate_options(rng: &mut ThreadRng, block_id: &str) -> Vec<BlockOption> {
    let count = rng.random_range(2..=4);
    let start = rng.random_range(0..LABELS.len());
    (0..count)
        .map(|n| {
            let label = LABELS[(start + n) % LABELS.len()];
            BlockOption::new(format!("{}_o{}", block_id, n + 1), label)
        })
        .collect()
}

/// Chains the blocks in order, then lets some choice blocks branch ahead (or
/// back, with `allow_loops`) on one of their own option labels.
fn generate_connections(
    rng: &mut ThreadRng,
    blocks: &[Block],
    branch_chance: f64,
    allow_loops: bool,
) -> Vec<Connection> {
    let mut connections = Vec::new();
    for (i, pair) in blocks.windows(2).enumerate() {
        let (source, next) = (&pair[0], &pair[1]);
        if !source.subtype.has_options() || !rng.random_bool(branch_chance) {
            connections.push(Connection::sequential(&source.id, &next.id, i as i64));
            continue;
        }

        let mut connection = Connection::explicit(format!("c_{}", source.id), &source.id, Some(next.id.as_str()))
            .with_order(i as i64);
        for (n, option) in source.settings.options.iter().enumerate() {
            if !rng.random_bool(0.5) {
                continue;
            }
            let target = if allow_loops && rng.random_bool(0.2) {
                &blocks[rng.random_range(0..=i)]
            } else {
                &blocks[rng.random_range(i + 1..blocks.len())]
            };
            let condition = ConditionRule::new(
                ConditionField::from(source.id.as_str()),
                ConditionOperator::Equals,
                option.label.as_str(),
            );
            connection = connection.with_rule(
                Rule::new(format!("r_{}_{}", source.id, n + 1), &target.id)
                    .when(ConditionGroup::all(vec![condition])),
            );
        }
        connections.push(connection);
    }
    connections
}
