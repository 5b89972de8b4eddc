use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use spargraph::{
    coloring::{max_distance2_degree, ColoringConfig, Distance2Algorithm},
    color_distance2,
    graph::generators,
    reverse_cuthill_mckee, verify_distance2, CsrGraph, RcmConfig,
};
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "kernel_report")]
#[command(about = "Run the coloring and RCM kernels on a synthetic graph and print a JSON report", long_about = None)]
struct Cli {
    /// Graph family to generate
    #[arg(long, value_enum, default_value_t = Shape::Grid)]
    shape: Shape,

    /// Size parameter: vertices (banded, random), leaves (star),
    /// side length (grid) or clique count (cliques)
    #[arg(long, default_value_t = 64)]
    size: usize,

    /// Band width, clique size or average degree, depending on the shape
    #[arg(long, default_value_t = 4)]
    width: usize,

    /// Randomly relabel the vertices before running the kernels
    #[arg(long, default_value_t = false)]
    shuffle: bool,

    /// Seed for random shapes and shuffling
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Coloring algorithms to run (all if omitted)
    #[arg(long, value_delimiter = ',')]
    algorithms: Vec<String>,

    /// Coloring configuration as JSON; `algorithm` is overridden per run
    #[arg(long)]
    coloring_config: Option<String>,

    /// RCM team size
    #[arg(long)]
    team_size: Option<usize>,

    /// Record per-phase timings and print kernel `debug` events to stderr
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
enum Shape {
    Banded,
    Star,
    Grid,
    Cliques,
    Random,
}

#[derive(Serialize)]
struct GraphSummary {
    shape: Shape,
    vertices: usize,
    entries: usize,
    max_degree: usize,
    max_distance2_degree: usize,
}

#[derive(Serialize)]
struct ColoringRun {
    algorithm: Distance2Algorithm,
    num_colors: usize,
    num_phases: usize,
    serially_resolved: usize,
    valid: bool,
    elapsed_ms: f64,
}

#[derive(Serialize)]
struct RcmRun {
    team_size: usize,
    start_vertex: Option<usize>,
    num_levels: usize,
    bandwidth_before: usize,
    bandwidth_after: usize,
    elapsed_ms: f64,
}

#[derive(Serialize)]
struct Report {
    graph: GraphSummary,
    coloring: Vec<ColoringRun>,
    rcm: RcmRun,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the JSON report, so events go to stderr.
    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install log subscriber")?;

    tracing::info!(shape = ?cli.shape, size = cli.size, width = cli.width, "generating graph");
    let graph = build_graph(&cli);
    let transpose = graph.transpose();

    let base = match &cli.coloring_config {
        Some(json) => ColoringConfig::from_json(json).context("Invalid --coloring-config")?,
        None => ColoringConfig::default(),
    }
    .with_verbose(cli.verbose);

    let algorithms = if cli.algorithms.is_empty() {
        Distance2Algorithm::ALL.to_vec()
    } else {
        cli.algorithms
            .iter()
            .map(|name| name.parse())
            .collect::<spargraph::Result<Vec<_>>>()
            .context("Invalid --algorithms")?
    };

    let mut coloring = Vec::with_capacity(algorithms.len());
    for algorithm in algorithms {
        let config = base.clone().with_algorithm(algorithm);
        let start = Instant::now();
        let result = color_distance2(&graph, &transpose, &config)
            .with_context(|| format!("Coloring with {algorithm} failed"))?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
        coloring.push(ColoringRun {
            algorithm,
            num_colors: result.num_colors,
            num_phases: result.num_phases,
            serially_resolved: result.serially_resolved,
            valid: verify_distance2(&graph, &transpose, &result.colors).is_valid(),
            elapsed_ms,
        });
    }

    let rcm_config = RcmConfig {
        team_size: cli.team_size,
        verbose: cli.verbose,
    };
    let start = Instant::now();
    let ordering = reverse_cuthill_mckee(&graph, &rcm_config).context("RCM ordering failed")?;
    let rcm = RcmRun {
        team_size: rcm_config.resolved_team_size(),
        start_vertex: ordering.start_vertex(),
        num_levels: ordering.num_levels(),
        bandwidth_before: graph.bandwidth(None),
        bandwidth_after: graph.bandwidth(Some(ordering.order())),
        elapsed_ms: start.elapsed().as_secs_f64() * 1e3,
    };

    let report = Report {
        graph: GraphSummary {
            shape: cli.shape,
            vertices: graph.num_rows(),
            entries: graph.num_edges(),
            max_degree: graph.max_degree(),
            max_distance2_degree: max_distance2_degree(&graph, &transpose),
        },
        coloring,
        rcm,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn build_graph(cli: &Cli) -> CsrGraph {
    let graph = match cli.shape {
        Shape::Banded => generators::banded(cli.size, cli.width),
        Shape::Star => generators::star(cli.size),
        Shape::Grid => generators::grid(cli.size, cli.size),
        Shape::Cliques => generators::disjoint_cliques(cli.size, cli.width),
        Shape::Random => generators::random(cli.size, cli.width, cli.seed),
    };
    if cli.shuffle {
        generators::shuffled(&graph, cli.seed)
    } else {
        graph
    }
}
