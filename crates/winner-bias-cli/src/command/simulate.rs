use std::{num::NonZeroUsize, path::PathBuf, thread, time::Instant};

use winner_bias_analysis::{statistic::DEFAULT_HISTOGRAM_BINS, summary::SimulationSummary};
use winner_bias_engine::SimulationParams;
use winner_bias_simulation::driver::ReplicationDriver;

use crate::{schema::artifact::SimulationArtifact, util};

const DEFAULTS: SimulationParams = SimulationParams::DEFAULT;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Subjects per simulated trial (N)
    #[arg(long, default_value_t = DEFAULTS.subjects)]
    subjects: usize,
    /// Number of simulated trials (B)
    #[arg(long, default_value_t = DEFAULTS.replicates)]
    replicates: usize,
    /// Two-sided significance level
    #[arg(long, default_value_t = DEFAULTS.alpha)]
    alpha: f64,
    /// Standard deviation of every period response
    #[arg(long, default_value_t = DEFAULTS.sigma)]
    sigma: f64,
    /// Seed of the master random stream
    #[arg(long, default_value_t = DEFAULTS.seed)]
    seed: u64,
    /// Worker threads [default: available parallelism]
    #[arg(long)]
    pub(super) workers: Option<usize>,
    /// Output file path for the result matrix (stdout if omitted)
    #[arg(long)]
    pub(super) output: Option<PathBuf>,
    /// Skip the report
    #[arg(long)]
    no_report: bool,
    /// Main histogram bins per t statistic in the report
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
    bins: usize,
}

impl SimulateArg {
    pub(super) fn params(&self) -> SimulationParams {
        SimulationParams {
            subjects: self.subjects,
            replicates: self.replicates,
            alpha: self.alpha,
            sigma: self.sigma,
            seed: self.seed,
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let workers = arg
        .workers
        .unwrap_or_else(|| thread::available_parallelism().map_or(1, NonZeroUsize::get));
    let driver = ReplicationDriver::new(arg.params())?.with_workers(workers)?;

    let params = driver.params();
    eprintln!(
        "Simulating {} trials of {} subjects (alpha={}, sigma={}, seed={}) on {} workers...",
        params.replicates,
        params.subjects,
        params.alpha,
        params.sigma,
        params.seed,
        driver.workers(),
    );
    let started = Instant::now();
    let matrix = driver.run()?;
    eprintln!("Simulation finished in {:.2?}", started.elapsed());
    let flagged = matrix.flagged_count();
    if flagged > 0 {
        eprintln!("{flagged} replicates had a degenerate sample in at least one test");
    }

    let artifact = SimulationArtifact::new(matrix);
    util::write_artifact(arg.output.as_deref(), &artifact)?;
    if let Some(path) = &arg.output {
        tracing::info!("result matrix saved to {}", path.display());
    }

    if !arg.no_report {
        let summary = SimulationSummary::from_matrix(&artifact.result, arg.bins)?;
        if arg.output.is_some() {
            println!("{summary}");
        } else {
            // stdout carries the JSON
            eprintln!("{summary}");
        }
    }

    Ok(())
}
