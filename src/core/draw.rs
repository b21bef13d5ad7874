use crate::core::roster::RosterStore;
use crate::domain::model::{Participant, RoundOutcome};
use crate::domain::ports::ResultSink;
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

/// Owns the roster state and performs the draws.
///
/// `remaining` and `winners` always add up (as multisets) to `participants`.
/// Every mutation goes through `&mut self`, so there is exactly one writer.
pub struct DrawModel<S: ResultSink, R: Rng = StdRng> {
    source: RosterStore,
    sink: S,
    rng: R,
    participants: Vec<Participant>,
    remaining: Vec<Participant>,
    winners: Vec<Participant>,
    current_round: u32,
}

impl<S: ResultSink> DrawModel<S, StdRng> {
    /// Build the model and try an initial load of `source`.
    /// A failed initial load leaves the model empty; check `participants()` or call `load` again.
    pub fn new(source: impl Into<PathBuf>, sink: S) -> Self {
        Self::with_rng(source, sink, StdRng::from_entropy())
    }
}

impl<S: ResultSink, R: Rng> DrawModel<S, R> {
    fn empty(source: PathBuf, sink: S, rng: R) -> Self {
        Self {
            source: RosterStore::new(source),
            sink,
            rng,
            participants: Vec::new(),
            remaining: Vec::new(),
            winners: Vec::new(),
            current_round: 0,
        }
    }

    pub fn with_rng(source: impl Into<PathBuf>, sink: S, rng: R) -> Self {
        let mut model = Self::empty(source.into(), sink, rng);
        if let Err(e) = model.reload() {
            tracing::warn!("Initial participant load failed: {}", e);
        }
        model
    }

    /// Like [`DrawModel::with_rng`], but a failed initial load is an error.
    pub fn open(source: impl Into<PathBuf>, sink: S, rng: R) -> Result<Self> {
        let mut model = Self::empty(source.into(), sink, rng);
        model.reload()?;
        Ok(model)
    }

    /// Replace the roster with the contents of `path`.
    ///
    /// On success the draw starts over: the pool is refilled, winners are cleared and the
    /// round counter goes back to 0. On failure nothing changes.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let store = RosterStore::new(path.as_ref());
        let participants = store.load()?;

        self.source = store;
        self.participants = participants;
        self.reset();

        tracing::info!(
            "Loaded {} participants from {}",
            self.participants.len(),
            self.source.path().display()
        );
        Ok(self.participants.len())
    }

    /// Re-read the current source, picking up rows appended by other writers.
    pub fn reload(&mut self) -> Result<usize> {
        let path = self.source.path().to_path_buf();
        self.load(path)
    }

    pub fn reset(&mut self) {
        self.remaining = self.participants.clone();
        self.winners.clear();
        self.current_round = 0;
    }

    pub fn can_draw(&self, count: usize) -> bool {
        self.remaining.len() >= count
    }

    /// Draw `count` winners. Returns an empty list when the pool is too small.
    pub fn draw(&mut self, count: usize) -> Vec<Participant> {
        self.draw_round(count)
            .map(|outcome| outcome.winners)
            .unwrap_or_default()
    }

    /// Draw `count` winners and persist them as the next round.
    ///
    /// Returns `None` (state untouched) if `can_draw(count)` is false. A persistence
    /// failure is reported in [`RoundOutcome::saved_to`]; the draw itself stands.
    pub fn draw_round(&mut self, count: usize) -> Option<RoundOutcome> {
        if !self.can_draw(count) {
            tracing::debug!(
                "Cannot draw {} from a pool of {}",
                count,
                self.remaining.len()
            );
            return None;
        }

        let picked_idx = index::sample(&mut self.rng, self.remaining.len(), count);
        let mut picked = vec![false; self.remaining.len()];
        let winners: Vec<Participant> = picked_idx
            .iter()
            .map(|i| {
                picked[i] = true;
                self.remaining[i].clone()
            })
            .collect();

        let mut pos = 0;
        self.remaining.retain(|_| {
            let keep = !picked[pos];
            pos += 1;
            keep
        });

        self.winners.extend(winners.iter().cloned());
        self.current_round += 1;

        let saved_to = self.sink.write_round(self.current_round, &winners);
        match &saved_to {
            Ok(path) => tracing::info!(
                "Round {} drew {} winners, saved to {}",
                self.current_round,
                winners.len(),
                path.display()
            ),
            Err(e) => tracing::warn!(
                "Round {} drew {} winners but results were not saved: {}",
                self.current_round,
                winners.len(),
                e
            ),
        }

        Some(RoundOutcome {
            round: self.current_round,
            winners,
            saved_to,
        })
    }

    /// Sample up to `count` names from the pool without removing them. Display only.
    pub fn get_random_names(&mut self, count: usize) -> Vec<Participant> {
        if self.remaining.is_empty() || count == 0 {
            return Vec::new();
        }

        let sample_size = count.min(self.remaining.len());
        self.remaining
            .choose_multiple(&mut self.rng, sample_size)
            .cloned()
            .collect()
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn remaining(&self) -> &[Participant] {
        &self.remaining
    }

    pub fn winners(&self) -> &[Participant] {
        &self.winners
    }

    pub fn source_path(&self) -> &Path {
        self.source.path()
    }
}
