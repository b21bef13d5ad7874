use crate::domain::model::Participant;
use crate::utils::error::{DrawError, Result};
use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub const DEPARTMENT_COLUMN: &str = "department";
pub const NAME_COLUMN: &str = "name";

/// CSV-backed participant list.
#[derive(Debug, Clone)]
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every row in file order. Fails when the file is missing or lacks a required column.
    pub fn load(&self) -> Result<Vec<Participant>> {
        if !self.path.is_file() {
            return Err(DrawError::SourceNotFound {
                path: self.path.display().to_string(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let department_idx = self.column_index(&headers, DEPARTMENT_COLUMN)?;
        let name_idx = self.column_index(&headers, NAME_COLUMN)?;

        let mut participants = Vec::new();
        for row in reader.records() {
            let row = row?;
            // 欄位不足的列以空字串補齊
            participants.push(Participant {
                department: row.get(department_idx).unwrap_or_default().to_string(),
                name: row.get(name_idx).unwrap_or_default().to_string(),
            });
        }

        tracing::debug!(
            "Loaded {} participants from {}",
            participants.len(),
            self.path.display()
        );
        Ok(participants)
    }

    /// Like [`load`](Self::load) but an absent file is an empty roster.
    pub fn list(&self) -> Result<Vec<Participant>> {
        match self.load() {
            Err(DrawError::SourceNotFound { .. }) => Ok(Vec::new()),
            other => other,
        }
    }

    /// Append one record, writing the header first when the file is absent or empty.
    pub fn append(&self, participant: &Participant) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;

        let len = file.metadata()?.len();
        if len > 0 {
            // 上一列沒有換行時先補上，避免兩筆資料黏在一起
            file.seek(SeekFrom::End(-1))?;
            let mut last = [0u8; 1];
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        if len == 0 {
            writer.write_record([DEPARTMENT_COLUMN, NAME_COLUMN])?;
        }
        writer.write_record([participant.department.as_str(), participant.name.as_str()])?;
        writer.flush()?;

        tracing::info!(
            "Registered {} into {}",
            participant,
            self.path.display()
        );
        Ok(())
    }

    fn column_index(&self, headers: &csv::StringRecord, column: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
            .ok_or_else(|| DrawError::MissingColumnError {
                column: column.to_string(),
                path: self.path.display().to_string(),
            })
    }
}
