use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use wgraph_core::{
    breadth_first_layers, depth_first, shortest_paths, shortest_paths_dense, Distance, Graph,
    VertexId,
};

mod demo;
mod generators;

use generators::Generator;

#[derive(Debug, Parser)]
#[command(
    name = "wgraph-bench",
    version,
    about = "Driver and benchmark for the wgraph directed weighted graph engine"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Shortest paths and traversals on the seven-vertex weighted fixture
    Demo(DemoArgs),
    /// Run the string and counting utilities on sample inputs
    Exercises,
    /// Time traversals and shortest paths on synthetic graphs
    Bench(BenchArgs),
}

#[derive(Debug, Args)]
struct DemoArgs {
    /// Source vertex for the shortest-path run
    #[arg(long, default_value_t = 11)]
    source: VertexId,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct BenchArgs {
    /// Topology to generate (all of them when omitted)
    #[arg(short, long, value_enum, env = "WGRAPH_BENCH_GENERATOR")]
    generator: Option<Generator>,

    /// Target vertex count per generated graph
    #[arg(
        short,
        long,
        env = "WGRAPH_BENCH_NODES",
        default_value_t = 100_000,
        value_parser = clap::value_parser!(u64).range(1..=50_000_000)
    )]
    nodes: u64,

    /// Edge weights are drawn uniformly from 1..=max_weight
    #[arg(
        long,
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..=1_000_000)
    )]
    max_weight: u64,

    /// Skip the O(V²) linear-scan Dijkstra above this many vertices
    #[arg(
        long,
        default_value_t = 20_000,
        value_parser = clap::value_parser!(u64).range(0..=1_000_000)
    )]
    dense_limit: u64,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Demo(args) => demo::run_demo(args.source, args.json),
        Command::Exercises => demo::run_exercises(),
        Command::Bench(args) => run_benchmarks(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Timing for one bounded BFS.
#[derive(Debug, Serialize)]
struct LayerTiming {
    depth: u32,
    found: usize,
    millis: f64,
}

/// Everything measured on one generated graph.
#[derive(Debug, Serialize)]
struct BenchReport {
    generator: &'static str,
    vertices: usize,
    edges: usize,
    generate_secs: f64,
    bfs: Vec<LayerTiming>,
    dfs_visited: usize,
    dfs_millis: f64,
    dijkstra_reachable: usize,
    dijkstra_millis: f64,
    dense_millis: Option<f64>,
    farthest: Option<VertexId>,
    farthest_distance: Option<Distance>,
    farthest_hops: Option<usize>,
    path_millis: Option<f64>,
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn run_benchmarks(args: &BenchArgs) -> anyhow::Result<()> {
    let generators: Vec<Generator> = match args.generator {
        Some(g) => vec![g],
        None => Generator::ALL.to_vec(),
    };

    let mut reports = Vec::with_capacity(generators.len());
    for generator in generators {
        tracing::info!(generator = generator.name(), nodes = args.nodes, "generating");
        let t = Instant::now();
        let graph = generator
            .build(args.nodes, args.max_weight)
            .with_context(|| format!("failed to generate {}", generator.name()))?;
        let generate_time = t.elapsed();

        let report = run_benchmark(generator.name(), &graph, generate_time, args.dense_limit)?;
        if !args.json {
            print_report(&report);
        }
        reports.push(report);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

fn run_benchmark(
    name: &'static str,
    graph: &Graph,
    generate_time: Duration,
    dense_limit: u64,
) -> anyhow::Result<BenchReport> {
    let root: VertexId = 0;

    // BFS from vertex 0 (typically a hub or root)
    let mut bfs = Vec::new();
    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let t = Instant::now();
        let layers = breadth_first_layers(graph, &root, Some(depth))?;
        let elapsed = t.elapsed();
        let found: usize = layers.iter().map(Vec::len).sum();
        bfs.push(LayerTiming {
            depth,
            found,
            millis: millis(elapsed),
        });
        // Stop if we already found everything
        if layers.len() <= depth as usize {
            break;
        }
    }

    let t = Instant::now();
    let dfs_visited = depth_first(graph, &root)?.len();
    let dfs_time = t.elapsed();

    let t = Instant::now();
    let sp = shortest_paths(graph, &root)?;
    let dijkstra_time = t.elapsed();

    let dense_millis = if graph.vertex_count() as u64 <= dense_limit {
        let t = Instant::now();
        let dense = shortest_paths_dense(graph, &root)?;
        let elapsed = t.elapsed();
        ensure!(
            sp.iter().eq(dense.iter()),
            "heap and linear-scan Dijkstra disagree on {name}"
        );
        Some(millis(elapsed))
    } else {
        None
    };

    // Path reconstruction to the farthest reachable vertex
    let farthest = sp
        .iter()
        .filter_map(|(&id, entry)| entry.distance.map(|d| (d, id)))
        .max();
    let (farthest_hops, path_millis) = match farthest {
        Some((_, id)) => {
            let t = Instant::now();
            let path = sp.path_to(&id)?;
            (Some(path.len() - 1), Some(millis(t.elapsed())))
        }
        None => (None, None),
    };

    Ok(BenchReport {
        generator: name,
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        generate_secs: generate_time.as_secs_f64(),
        bfs,
        dfs_visited,
        dfs_millis: millis(dfs_time),
        dijkstra_reachable: sp.reachable_count(),
        dijkstra_millis: millis(dijkstra_time),
        dense_millis,
        farthest: farthest.map(|(_, id)| id),
        farthest_distance: farthest.map(|(d, _)| d),
        farthest_hops,
        path_millis,
    })
}

fn print_report(report: &BenchReport) {
    println!("--- {} ---", report.generator);
    println!(
        "Generated in {:.2}s, {} vertices, {} edges",
        report.generate_secs, report.vertices, report.edges
    );

    println!();
    println!("{:>8} {:>12} {:>10}", "depth", "found", "time");
    println!("{:->8} {:->12} {:->10}", "", "", "");
    for row in &report.bfs {
        println!("{:>8} {:>12} {:>8.1}ms", row.depth, row.found, row.millis);
    }

    println!();
    println!(
        "DFS from 0: {} visited in {:.1}ms",
        report.dfs_visited, report.dfs_millis
    );
    println!(
        "Dijkstra (heap) from 0: {} reachable in {:.1}ms",
        report.dijkstra_reachable, report.dijkstra_millis
    );
    match report.dense_millis {
        Some(ms) => println!("Dijkstra (linear scan) from 0: {ms:.1}ms, results identical"),
        None => println!("Dijkstra (linear scan) from 0: skipped (above --dense-limit)"),
    }
    match (report.farthest, report.farthest_distance, report.farthest_hops) {
        (Some(id), Some(d), Some(hops)) => println!(
            "Farthest vertex {}: distance {} over {} hops, path rebuilt in {:.3}ms",
            id,
            d,
            hops,
            report.path_millis.unwrap_or_default()
        ),
        _ => println!("Farthest vertex: none"),
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bench_defaults() {
        let cli = Cli::try_parse_from(["wgraph-bench", "bench"]).unwrap();
        let Command::Bench(args) = cli.command else {
            panic!("expected bench");
        };
        assert_eq!(args.max_weight, 100);
        assert_eq!(args.dense_limit, 20_000);
        assert!(!args.json);
    }

    #[test]
    fn test_parse_bench_options() {
        let cli = Cli::try_parse_from([
            "wgraph-bench",
            "-vv",
            "bench",
            "--generator",
            "barbell",
            "--nodes",
            "500",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Bench(args) = cli.command else {
            panic!("expected bench");
        };
        assert_eq!(args.generator, Some(Generator::Barbell));
        assert_eq!(args.nodes, 500);
        assert!(args.json);
    }

    #[test]
    fn test_reject_zero_nodes() {
        assert!(Cli::try_parse_from(["wgraph-bench", "bench", "--nodes", "0"]).is_err());
    }

    #[test]
    fn test_parse_demo() {
        let cli = Cli::try_parse_from(["wgraph-bench", "demo", "--source", "22"]).unwrap();
        let Command::Demo(args) = cli.command else {
            panic!("expected demo");
        };
        assert_eq!(args.source, 22);
        assert!(!args.json);
    }

    #[test]
    fn test_run_benchmark_small() {
        let graph = Generator::Lsystem.build(400, 10).unwrap();
        let report = run_benchmark("tree", &graph, Duration::ZERO, 1000).unwrap();
        assert_eq!(report.vertices, 400);
        assert_eq!(report.dfs_visited, 400);
        assert_eq!(report.dijkstra_reachable, 400);
        assert!(report.dense_millis.is_some());
        assert!(report.farthest_hops.is_some());
    }

    #[test]
    fn test_run_benchmark_single_vertex() {
        for generator in Generator::ALL {
            let graph = generator.build(1, 10).unwrap();
            let report = run_benchmark(generator.name(), &graph, Duration::ZERO, 1000).unwrap();
            assert_eq!(report.vertices, 1, "{}", generator.name());
            assert_eq!(report.dijkstra_reachable, 1);
            assert_eq!(report.farthest, Some(0));
            assert_eq!(report.farthest_hops, Some(0));
        }
    }
}
