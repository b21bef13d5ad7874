pub mod draw;
pub mod results;
pub mod roster;
pub mod session;
pub mod shuffle;

pub use crate::domain::model::{Participant, RoundOutcome, RoundSummary, SessionReport};
pub use crate::domain::ports::{ConfigProvider, ResultSink};
pub use crate::utils::error::Result;
