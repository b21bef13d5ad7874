pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
#[cfg(feature = "web")]
pub mod web;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use crate::core::{
    draw::DrawModel,
    results::CsvResultWriter,
    roster::RosterStore,
    session::{DrawSession, SessionCommand, SessionRun},
    shuffle::ShuffleTimer,
};
pub use domain::model::{Participant, RoundOutcome, RoundSummary, SessionReport};
pub use utils::error::{DrawError, Result};
