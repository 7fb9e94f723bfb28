use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nac::api::{search_colorings, Algorithm, ClassGranularity, Coloring, RelabelStrategy, SearchCfg};
use polars::prelude::*;
use std::fs;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod graphs;
mod provenance;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "NAC-coloring search runner")]
struct Cmd {
    /// Optional run tag; propagated to provenance sidecars and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Enumerate the colorings of one graph and write them as JSON
    Run {
        /// Graph spec (`cycle:5`, `bipartite:3,3`, `grid:3x3`, ...) or a .json file
        #[arg(long)]
        graph: String,
        #[command(flatten)]
        search: SearchArgs,
        #[arg(long)]
        out: String,
    },
    /// Compare algorithms over several graphs and write one CSV row per pair
    Bench {
        /// Comma-separated graph specs
        #[arg(long, value_delimiter = ',')]
        graphs: Vec<String>,
        /// Comma-separated algorithm strings
        #[arg(long, value_delimiter = ',', default_value = "naive,cycles,subgraphs")]
        algos: Vec<String>,
        #[command(flatten)]
        search: SearchArgs,
        #[arg(long)]
        out: String,
    },
    /// Print a provenance JSON block; with --from, summarize a bench CSV
    Report {
        #[arg(long)]
        from: Option<String>,
    },
}

/// Search options; flags override values loaded with `--config`.
#[derive(Args, Clone, Default)]
struct SearchArgs {
    /// JSON file holding a `SearchCfg`
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    algo: Option<Algorithm>,
    #[arg(long)]
    relabel: Option<RelabelStrategy>,
    #[arg(long)]
    granularity: Option<ClassGranularity>,
    #[arg(long)]
    no_decompositions: bool,
    #[arg(long)]
    no_precheck: bool,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    time_limit_ms: Option<u64>,
    #[arg(long)]
    max_results: Option<usize>,
}

impl SearchArgs {
    fn resolve(&self) -> Result<SearchCfg> {
        let mut cfg = match &self.config {
            Some(path) => {
                let bytes = fs::read(path).with_context(|| format!("reading config {path}"))?;
                serde_json::from_slice(&bytes).with_context(|| format!("parsing config {path}"))?
            }
            None => SearchCfg::default(),
        };
        if let Some(algo) = self.algo {
            cfg.algorithm = algo;
        }
        if let Some(relabel) = self.relabel {
            cfg.relabel = relabel;
        }
        if let Some(granularity) = self.granularity {
            cfg.granularity = granularity;
        }
        if self.no_decompositions {
            cfg.use_decompositions = false;
        }
        if self.no_precheck {
            cfg.use_precheck = false;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if self.time_limit_ms.is_some() {
            cfg.budget.time_limit_ms = self.time_limit_ms;
        }
        if self.max_results.is_some() {
            cfg.budget.max_results = self.max_results;
        }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run { graph, search, out } => run(&graph, &search, &out, cmd.tag),
        Action::Bench {
            graphs,
            algos,
            search,
            out,
        } => bench(&graphs, &algos, &search, &out, cmd.tag),
        Action::Report { from } => report(from.as_deref(), cmd.tag),
    }
}

fn ensure_parent(out: &str) -> Result<()> {
    if let Some(parent) = Path::new(out).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

fn run(spec: &str, search: &SearchArgs, out: &str, tag: Option<String>) -> Result<()> {
    let graph = graphs::load(spec)?;
    let cfg = search.resolve()?;
    tracing::info!(graph = spec, algorithm = %cfg.algorithm, out, tag = ?tag, "run");

    let mut found = search_colorings(&graph, &cfg)?;
    let colorings: Vec<Coloring> = found.by_ref().collect();
    let stats = found.stats().clone();
    tracing::info!(
        colorings = colorings.len(),
        exhausted = stats.exhausted,
        elapsed_ms = stats.elapsed_ms,
        "search done"
    );

    ensure_parent(out)?;
    let doc = serde_json::json!({
        "graph": {
            "spec": spec,
            "vertices": graph.vertex_list(),
            "edges": graph.edge_list(),
        },
        "config": cfg,
        "stats": stats,
        "colorings": colorings,
    });
    fs::write(out, serde_json::to_vec_pretty(&doc)?).with_context(|| format!("writing {out}"))?;

    let params = serde_json::json!({ "graph": spec, "config": cfg });
    let sidecar = provenance::write_sidecar(out, Payload::new(params, tag))?;
    tracing::info!(sidecar = %sidecar.display(), "provenance written");
    Ok(())
}

/// One bench row per (graph, algorithm).
#[derive(Default)]
struct BenchRows {
    graph: Vec<String>,
    algorithm: Vec<String>,
    classes: Vec<u64>,
    blocks: Vec<u64>,
    units: Vec<u64>,
    colorings: Vec<u64>,
    cycle_mask_checks: Vec<u64>,
    nac_checks: Vec<u64>,
    exhausted: Vec<bool>,
    elapsed_ms: Vec<u64>,
}

impl BenchRows {
    fn into_frame(self) -> PolarsResult<DataFrame> {
        df!(
            "graph" => self.graph,
            "algorithm" => self.algorithm,
            "classes" => self.classes,
            "blocks" => self.blocks,
            "units" => self.units,
            "colorings" => self.colorings,
            "cycle_mask_checks" => self.cycle_mask_checks,
            "nac_checks" => self.nac_checks,
            "exhausted" => self.exhausted,
            "elapsed_ms" => self.elapsed_ms,
        )
    }
}

fn bench(
    specs: &[String],
    algos: &[String],
    search: &SearchArgs,
    out: &str,
    tag: Option<String>,
) -> Result<()> {
    let base = search.resolve()?;
    let algorithms: Vec<Algorithm> = algos
        .iter()
        .map(|a| a.parse::<Algorithm>())
        .collect::<Result<_, _>>()?;
    let mut rows = BenchRows::default();
    for spec in specs {
        let graph = graphs::load(spec)?;
        for &algorithm in &algorithms {
            let cfg = base.clone().with_algorithm(algorithm);
            let mut found = search_colorings(&graph, &cfg)?;
            let count = found.by_ref().count();
            let stats = found.stats();
            tracing::info!(
                graph = %spec,
                %algorithm,
                colorings = count,
                nac_checks = stats.nac_checks,
                elapsed_ms = stats.elapsed_ms,
                "bench"
            );
            rows.graph.push(spec.clone());
            rows.algorithm.push(algorithm.to_string());
            rows.classes.push(stats.classes as u64);
            rows.blocks.push(stats.blocks as u64);
            rows.units.push(stats.units as u64);
            rows.colorings.push(count as u64);
            rows.cycle_mask_checks.push(stats.cycle_mask_checks);
            rows.nac_checks.push(stats.nac_checks);
            rows.exhausted.push(stats.exhausted);
            rows.elapsed_ms.push(stats.elapsed_ms);
        }
    }

    ensure_parent(out)?;
    let mut df = rows.into_frame()?;
    let mut file = fs::File::create(out).with_context(|| format!("creating {out}"))?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    tracing::info!(rows = df.height(), out, "bench table written");

    let params = serde_json::json!({
        "graphs": specs,
        "algorithms": algos,
        "base_config": base,
    });
    provenance::write_sidecar(out, Payload::new(params, tag))?;
    Ok(())
}

fn report(from: Option<&str>, tag: Option<String>) -> Result<()> {
    let mut params = serde_json::json!({});
    if let Some(path) = from {
        let lf = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?;
        let summary = lf
            .group_by([col("algorithm")])
            .agg([
                len().alias("runs"),
                col("nac_checks").sum(),
                col("cycle_mask_checks").sum(),
                col("elapsed_ms").sum(),
            ])
            .sort(["algorithm"], SortMultipleOptions::default())
            .collect()?;
        tracing::info!(rows = summary.height(), cols = summary.width(), "bench_summary_shape");
        println!("{summary}");
        params = serde_json::json!({ "from": path });
    }
    let doc = provenance::document(&Payload::new(params, tag), &[]);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
