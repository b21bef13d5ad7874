use crate::core::draw::DrawModel;
use crate::core::shuffle::ShuffleTimer;
use crate::domain::model::{Participant, RoundOutcome, SessionReport};
use crate::domain::ports::ResultSink;
use crate::utils::error::{DrawError, Result};
use rand::rngs::StdRng;
use rand::Rng;
use std::future::Future;
use std::path::{Path, PathBuf};

/// What an operator can type between rounds in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Empty line: start the next round.
    Start,
    /// `r` / `reset`: put every winner back into the pool.
    Reset,
    /// `i [path]` / `import [path]`: load another roster, or re-read the current one.
    Import(Option<PathBuf>),
    /// `q` / `quit`: skip the remaining rounds.
    Quit,
}

impl SessionCommand {
    /// Returns `None` for anything that is not a command.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match (word, rest.is_empty()) {
            ("", _) => Some(SessionCommand::Start),
            ("r" | "reset", true) => Some(SessionCommand::Reset),
            ("q" | "quit", true) => Some(SessionCommand::Quit),
            ("i" | "import", true) => Some(SessionCommand::Import(None)),
            ("i" | "import", false) => Some(SessionCommand::Import(Some(PathBuf::from(rest)))),
            _ => None,
        }
    }
}

/// Rounds completed by a session, plus the error that stopped it early, if any.
#[derive(Debug, Default)]
pub struct SessionRun {
    pub outcomes: Vec<RoundOutcome>,
    pub error: Option<DrawError>,
}

impl SessionRun {
    pub fn report(&self) -> SessionReport {
        SessionReport::new(&self.outcomes, self.error.as_ref())
    }

    pub fn into_result(self) -> Result<Vec<RoundOutcome>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.outcomes),
        }
    }
}

/// Drives rounds against a [`DrawModel`]: capacity check, optional shuffle display, draw.
pub struct DrawSession<S: ResultSink, R: Rng = StdRng> {
    model: DrawModel<S, R>,
    shuffle: Option<ShuffleTimer>,
}

impl<S: ResultSink, R: Rng> DrawSession<S, R> {
    pub fn new(model: DrawModel<S, R>) -> Self {
        Self {
            model,
            shuffle: None,
        }
    }

    pub fn with_shuffle(mut self, timer: ShuffleTimer) -> Self {
        self.shuffle = Some(timer);
        self
    }

    pub fn model(&self) -> &DrawModel<S, R> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut DrawModel<S, R> {
        &mut self.model
    }

    /// Re-read the participant source before a session so registrations made elsewhere count.
    pub fn refresh(&mut self) -> Result<usize> {
        self.model.reload()
    }

    /// Start the draw over with the same roster. Returns the pool size.
    pub fn reset(&mut self) -> usize {
        self.model.reset();
        self.model.remaining_count()
    }

    /// Load `path`, or re-read the current source when `path` is `None`.
    /// A failed import keeps the current roster and draw state.
    pub fn import(&mut self, path: Option<&Path>) -> Result<usize> {
        match path {
            Some(path) => self.model.load(path),
            None => self.refresh(),
        }
    }

    /// Check the pool, roll names until `stop` resolves, then draw `count` winners.
    pub async fn run_round<Fut, F>(
        &mut self,
        count: usize,
        stop: Fut,
        on_frame: F,
    ) -> Result<RoundOutcome>
    where
        Fut: Future<Output = ()>,
        F: FnMut(&[Participant]),
    {
        if !self.model.can_draw(count) {
            return Err(DrawError::InsufficientPoolError {
                requested: count,
                remaining: self.model.remaining_count(),
            });
        }

        if let Some(timer) = self.shuffle.as_mut() {
            timer.run(&mut self.model, count, stop, on_frame).await;
        }

        self.model
            .draw_round(count)
            .ok_or(DrawError::InsufficientPoolError {
                requested: count,
                remaining: self.model.remaining_count(),
            })
    }

    /// Run every round in order, stopping at the first one the pool cannot cover.
    /// Rounds finished before the failure stay in the returned [`SessionRun`].
    pub async fn run_all<Fut, MakeStop, F>(
        &mut self,
        rounds: &[usize],
        mut make_stop: MakeStop,
        mut on_frame: F,
    ) -> SessionRun
    where
        Fut: Future<Output = ()>,
        MakeStop: FnMut(usize) -> Fut,
        F: FnMut(&[Participant]),
    {
        let mut run = SessionRun {
            outcomes: Vec::with_capacity(rounds.len()),
            error: None,
        };
        for &count in rounds {
            tracing::debug!(
                "Starting round {} with {} winners",
                self.model.current_round() + 1,
                count
            );
            match self.run_round(count, make_stop(count), &mut on_frame).await {
                Ok(outcome) => run.outcomes.push(outcome),
                Err(e) => {
                    run.error = Some(e);
                    break;
                }
            }
        }
        run
    }
}
