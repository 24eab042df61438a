use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;

use crate::schema::artifact::SimulationArtifact;

/// Writes `artifact` as pretty JSON to `path`, or to stdout when `path` is `None`.
pub fn write_artifact(path: Option<&Path>, artifact: &SimulationArtifact) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(BufWriter::new(file), artifact)
                .with_context(|| format!("Failed to write result matrix to {}", path.display()))
        }
        None => write_json(io::stdout().lock(), artifact)
            .context("Failed to write result matrix to stdout"),
    }
}

fn write_json<W: Write>(mut writer: W, artifact: &SimulationArtifact) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, artifact)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Reads a result matrix saved by `simulate`.
pub fn read_artifact_file(path: &Path) -> anyhow::Result<SimulationArtifact> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open result matrix file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse result matrix JSON file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use winner_bias_engine::{ResultMatrix, SimulationParams};
    use winner_bias_simulation::driver::ReplicationDriver;

    use super::*;

    #[test]
    fn test_artifact_round_trip_is_exact() {
        let params = SimulationParams {
            subjects: 15,
            replicates: 60,
            seed: 3,
            ..SimulationParams::default()
        };
        let matrix = ReplicationDriver::new(params).unwrap().run().unwrap();
        let artifact = SimulationArtifact::new(matrix);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        write_artifact(Some(&path), &artifact).unwrap();

        let loaded = read_artifact_file(&path).unwrap();
        assert_eq!(loaded, artifact);
        for (a, b) in loaded.result.replicates.iter().zip(&artifact.result.replicates) {
            assert_eq!(a.t_primary.map(f64::to_bits), b.t_primary.map(f64::to_bits));
            assert_eq!(a.t_proposed.map(f64::to_bits), b.t_proposed.map(f64::to_bits));
            assert_eq!(a.r_cor.map(f64::to_bits), b.r_cor.map(f64::to_bits));
        }
    }

    #[test]
    fn test_unwritable_output_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("result.json");
        let artifact = SimulationArtifact::new(ResultMatrix {
            params: SimulationParams::default(),
            replicates: vec![],
        });
        let err = write_artifact(Some(&path), &artifact).unwrap_err();
        assert!(err.to_string().contains("result.json"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = read_artifact_file(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"generated_at\": 1}").unwrap();
        let err = read_artifact_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse result matrix JSON file"));
    }
}
