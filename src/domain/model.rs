use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::utils::error::DrawError;

/// One roster row. Two records with the same department and name are equal in value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub department: String,
    pub name: String,
}

impl Participant {
    pub fn new(department: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.department)
    }
}

/// Result of one completed round.
#[derive(Debug)]
pub struct RoundOutcome {
    pub round: u32,
    pub winners: Vec<Participant>,
    /// 寫檔失敗不會撤銷本輪抽獎
    pub saved_to: Result<PathBuf, DrawError>,
}

impl RoundOutcome {
    pub fn is_saved(&self) -> bool {
        self.saved_to.is_ok()
    }
}

/// Serializable view of a round, used for the `--json` summary.
#[derive(Debug, Clone, Serialize)]
pub struct RoundSummary {
    pub round: u32,
    pub winners: Vec<Participant>,
    pub saved_to: Option<String>,
    pub save_error: Option<String>,
}

impl From<&RoundOutcome> for RoundSummary {
    fn from(outcome: &RoundOutcome) -> Self {
        let (saved_to, save_error) = match &outcome.saved_to {
            Ok(path) => (Some(path.display().to_string()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            round: outcome.round,
            winners: outcome.winners.clone(),
            saved_to,
            save_error,
        }
    }
}

/// Everything the `--json` output reports about a session, including the
/// rounds finished before a failure.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub rounds: Vec<RoundSummary>,
    pub error: Option<String>,
}

impl SessionReport {
    pub fn new(outcomes: &[RoundOutcome], error: Option<&DrawError>) -> Self {
        Self {
            rounds: outcomes.iter().map(RoundSummary::from).collect(),
            error: error.map(|e| e.user_friendly_message()),
        }
    }
}
