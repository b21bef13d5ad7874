use crate::core::draw::DrawModel;
use crate::domain::model::Participant;
use crate::domain::ports::ResultSink;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::future::Future;
use std::time::Duration;

/// Timing of the rolling name display shown while a round is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShuffleSettings {
    pub initial_interval: Duration,
    pub min_interval: Duration,
    pub max_interval: Duration,
    /// Chance per frame of picking a new interval in `min_interval..=max_interval`.
    pub jitter_probability: f64,
}

impl Default for ShuffleSettings {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(150),
            min_interval: Duration::from_millis(100),
            max_interval: Duration::from_millis(300),
            jitter_probability: 0.2,
        }
    }
}

impl ShuffleSettings {
    /// Settings the timer can always run with: a probability in `[0, 1]`
    /// (NaN means never re-roll) and `min_interval <= max_interval`.
    pub fn normalized(self) -> Self {
        let jitter_probability = if self.jitter_probability.is_nan() {
            0.0
        } else {
            self.jitter_probability.clamp(0.0, 1.0)
        };
        Self {
            min_interval: self.min_interval.min(self.max_interval),
            max_interval: self.min_interval.max(self.max_interval),
            jitter_probability,
            ..self
        }
    }
}

/// Repeating display task. It only peeks at the pool, so stopping it at any point is harmless.
pub struct ShuffleTimer {
    settings: ShuffleSettings,
    rng: StdRng,
}

impl ShuffleTimer {
    pub fn new(settings: ShuffleSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    pub fn with_rng(settings: ShuffleSettings, rng: StdRng) -> Self {
        Self {
            settings: settings.normalized(),
            rng,
        }
    }

    pub fn settings(&self) -> &ShuffleSettings {
        &self.settings
    }

    fn next_interval(&mut self, current: Duration) -> Duration {
        if self.rng.gen_bool(self.settings.jitter_probability) {
            let min = self.settings.min_interval.as_millis() as u64;
            let max = self.settings.max_interval.as_millis() as u64;
            Duration::from_millis(self.rng.gen_range(min..=max))
        } else {
            current
        }
    }

    /// Show `count` random names from the pool every tick until `stop` resolves.
    /// Returns the number of frames shown.
    pub async fn run<S, R, Fut, F>(
        &mut self,
        model: &mut DrawModel<S, R>,
        count: usize,
        stop: Fut,
        mut on_frame: F,
    ) -> usize
    where
        S: ResultSink,
        R: Rng,
        Fut: Future<Output = ()>,
        F: FnMut(&[Participant]),
    {
        tokio::pin!(stop);
        let mut interval = self.settings.initial_interval;
        let mut frames = 0;

        loop {
            let names = model.get_random_names(count);
            if !names.is_empty() {
                on_frame(&names);
                frames += 1;
            }

            tokio::select! {
                _ = &mut stop => break,
                _ = tokio::time::sleep(interval) => {}
            }

            interval = self.next_interval(interval);
        }

        tracing::debug!("Shuffle display stopped after {} frames", frames);
        frames
    }
}
