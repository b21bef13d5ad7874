use crate::domain::model::Participant;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Where each round's winners end up.
pub trait ResultSink {
    /// Persist one round and return the location written to.
    fn write_round(&self, round: u32, winners: &[Participant]) -> Result<PathBuf>;
}

pub trait ConfigProvider: Send + Sync {
    fn participants_path(&self) -> &Path;
    fn output_dir(&self) -> &Path;
}
