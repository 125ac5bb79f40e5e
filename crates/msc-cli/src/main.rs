//! Mean-shift clustering of CSV point sets
//!
//! Reads one point per line from a file or stdin, clusters the points and
//! writes `<cluster>,<coordinates...>` lines to stdout. Diagnostics go to
//! stderr; set `RUST_LOG` to change their verbosity.

mod dispatch;
mod io;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dispatch::{cluster_points, AnyEstimator, EstimatorArg, KernelArg, MetricArg, Setup};
use msc_cluster::{ClusteringResult, DegenerateWeightPolicy, MeanShiftParams, ParallelEngine};
use msc_core::DEFAULT_EPSILON;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum DegenerateArg {
    /// Keep the point at its last position
    Freeze,
    /// Leave the point out of the output
    Fail,
}

impl From<DegenerateArg> for DegenerateWeightPolicy {
    fn from(arg: DegenerateArg) -> Self {
        match arg {
            DegenerateArg::Freeze => DegenerateWeightPolicy::Freeze,
            DegenerateArg::Fail => DegenerateWeightPolicy::Fail,
        }
    }
}

/// Cluster points with mean shift
#[derive(Parser, Debug)]
#[command(name = "msc", version, about)]
struct Args {
    /// Kernel bandwidth, in the distance units the kernel expects
    #[arg(default_value_t = 1.0)]
    bandwidth: f64,

    /// Input CSV file; read from stdin when omitted, or prompted for when
    /// stdin is a terminal
    input: Option<PathBuf>,

    /// Distance metric
    #[arg(long, value_enum, default_value_t = MetricArg::L2Sq)]
    metric: MetricArg,

    /// Kernel profile; must accept the metric's distance scale
    #[arg(long, value_enum, default_value_t = KernelArg::ParabolicSq)]
    kernel: KernelArg,

    /// Bandwidth estimator
    #[arg(long, value_enum, default_value_t = EstimatorArg::Constant)]
    estimator: EstimatorArg,

    /// Exponent of the min-max estimator [default: 1/bandwidth^2]
    #[arg(long)]
    power: Option<f64>,

    /// Convergence tolerance [default: single-precision machine epsilon]
    #[arg(long)]
    epsilon: Option<f64>,

    /// Iteration cap per point [default: unbounded]
    #[arg(long)]
    max_iter: Option<usize>,

    /// Mode matching tolerance [default: --epsilon]
    #[arg(long)]
    cluster_epsilon: Option<f64>,

    /// Worker threads [default: all cores]
    #[arg(long)]
    threads: Option<usize>,

    /// Handling of points whose kernel weights vanish
    #[arg(long, value_enum, default_value_t = DegenerateArg::Freeze)]
    degenerate: DegenerateArg,
}

impl Args {
    fn params(&self) -> MeanShiftParams {
        MeanShiftParams {
            epsilon: self.epsilon.unwrap_or(DEFAULT_EPSILON),
            max_iter: self.max_iter.unwrap_or(usize::MAX),
            degenerate_policy: self.degenerate.into(),
            cluster_epsilon: self.cluster_epsilon,
        }
    }

    fn setup(&self) -> Result<Setup> {
        let engine = match self.threads {
            Some(n) => ParallelEngine::with_num_threads(n)?,
            None => ParallelEngine::new(),
        };
        Ok(Setup {
            estimator: AnyEstimator::new(self.estimator, self.bandwidth, self.power)
                .context("invalid estimator settings")?,
            engine,
            params: self.params(),
        })
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Ask for the input file name on `prompt` and read it from `input`
fn prompt_for_path<R: BufRead, W: Write>(mut input: R, mut prompt: W) -> Result<PathBuf> {
    write!(prompt, "Input CSV file: ")?;
    prompt.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed to read file name")?;
    let name = line.trim();
    if name.is_empty() {
        bail!("no input file given");
    }
    Ok(PathBuf::from(name))
}

fn load(args: &Args) -> Result<io::PointSet> {
    match &args.input {
        Some(path) => io::read_points_from_path(path),
        None => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                let path = prompt_for_path(stdin.lock(), std::io::stderr())?;
                return io::read_points_from_path(&path);
            }
            io::read_points(stdin.lock()).context("failed to parse stdin")
        }
    }
}

fn report(result: &ClusteringResult<f64>) {
    info!(clusters = result.cluster_count(), "clustering finished");
    for cluster in result.clusters() {
        info!(members = cluster.len(), "{cluster}");
    }
    for failure in result.failures() {
        warn!("{failure}");
    }
}

fn run(args: &Args) -> Result<()> {
    info!(bandwidth = args.bandwidth, "kernel bandwidth");
    let points = load(args)?;
    info!(n_points = points.len(), dim = points.dim, "points loaded");
    if points.is_empty() {
        warn!("no points to cluster");
        return Ok(());
    }

    let setup = args.setup()?;
    let start = Instant::now();
    let result = cluster_points(args.metric, args.kernel, setup, &points.points, points.dim)
        .context("clustering failed")?;
    let elapsed = start.elapsed();

    report(&result);
    info!(seconds = elapsed.as_secs_f64(), "elapsed time");

    let stdout = std::io::stdout();
    io::write_clusters(std::io::BufWriter::new(stdout.lock()), &points, result.clusters())
        .context("failed to write output")
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    run(&args)
}
