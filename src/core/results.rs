use crate::core::roster::{DEPARTMENT_COLUMN, NAME_COLUMN};
use crate::domain::model::Participant;
use crate::domain::ports::ResultSink;
use crate::utils::error::{DrawError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `round_{N}.csv` files into an output directory.
#[derive(Debug, Clone)]
pub struct CsvResultWriter {
    output_dir: PathBuf,
}

impl CsvResultWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn round_path(&self, round: u32) -> PathBuf {
        self.output_dir.join(format!("round_{}.csv", round))
    }

    fn write_csv(&self, path: &Path, winners: &[Participant]) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_path(path)?;

        // 空輪次也要有標題列
        writer.write_record([DEPARTMENT_COLUMN, NAME_COLUMN])?;
        for winner in winners {
            writer.serialize(winner)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl ResultSink for CsvResultWriter {
    fn write_round(&self, round: u32, winners: &[Participant]) -> Result<PathBuf> {
        let path = self.round_path(round);
        self.write_csv(&path, winners)
            .map_err(|e| DrawError::PersistenceError {
                round,
                message: e.to_string(),
            })?;

        tracing::debug!("Round {} results written to {}", round, path.display());
        Ok(path)
    }
}
