use std::path::PathBuf;

use winner_bias_analysis::{statistic::DEFAULT_HISTOGRAM_BINS, summary::SimulationSummary};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Path to the result matrix JSON file
    pub(super) path: PathBuf,
    /// Main histogram bins per t statistic
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
    pub(super) bins: usize,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let artifact = util::read_artifact_file(&arg.path)?;
    eprintln!(
        "Loaded {} replicates generated at {}",
        artifact.result.len(),
        artifact.generated_at.to_rfc3339(),
    );
    let summary = SimulationSummary::from_matrix(&artifact.result, arg.bins)?;
    println!("{summary}");
    Ok(())
}
