//! Time-sliced text scramble
//!
//! Each tick shows the first `floor(iteration)` characters of the source and
//! random alphabet characters for the rest, then advances `iteration`.
//! Spaces are never scrambled. Once `iteration` reaches the source length the
//! exact source is shown and the effect goes idle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::clock::{ClockTick, FrameDriven, Interval};
use crate::config::ScrambleConfig;

pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Clone)]
pub struct ScrambleText {
    source: Vec<char>,
    displayed: String,
    iteration: f64,
    step: f64,
    alphabet: Vec<char>,
    interval: Interval,
    running: bool,
    rng: StdRng,
}

impl ScrambleText {
    pub fn new(text: &str, config: &ScrambleConfig) -> Self {
        Self::with_rng(text, config, StdRng::from_os_rng())
    }

    /// Deterministic scramble for reproducible output
    pub fn with_seed(text: &str, config: &ScrambleConfig, seed: u64) -> Self {
        Self::with_rng(text, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(text: &str, config: &ScrambleConfig, rng: StdRng) -> Self {
        let mut alphabet: Vec<char> = config.alphabet.chars().collect();
        if alphabet.is_empty() {
            alphabet = DEFAULT_ALPHABET.chars().collect();
        }
        Self {
            source: text.chars().collect(),
            displayed: text.to_string(),
            iteration: 0.0,
            step: config.step,
            alphabet,
            interval: Interval::new(config.tick_ms),
            running: false,
            rng,
        }
    }

    /// Start the effect, restarting from scratch if it is already running
    pub fn trigger(&mut self) {
        self.interval.reset();
        self.iteration = 0.0;
        let degenerate = self.source.is_empty()
            || !(self.step > 0.0 && self.step.is_finite())
            || !(self.interval.period_ms() > 0.0 && self.interval.period_ms().is_finite());
        if degenerate {
            self.finish();
            return;
        }
        debug!(
            len = self.source.len(),
            restarted = self.running,
            "Scramble triggered"
        );
        self.running = true;
    }

    /// Stop early and show the source. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if self.running {
            debug!("Scramble cancelled");
        }
        self.finish();
    }

    fn finish(&mut self) {
        self.running = false;
        self.iteration = self.source.len() as f64;
        self.displayed = self.source.iter().collect();
    }

    pub fn update(&mut self, delta_ms: f64) -> &str {
        if self.running {
            for _ in 0..self.interval.advance(delta_ms) {
                self.tick();
                if !self.running {
                    break;
                }
            }
        }
        &self.displayed
    }

    fn tick(&mut self) {
        let revealed = self.iteration.floor() as usize;
        let alphabet = &self.alphabet;
        let rng = &mut self.rng;
        self.displayed = self
            .source
            .iter()
            .enumerate()
            .map(|(idx, &ch)| {
                if idx < revealed || ch == ' ' {
                    ch
                } else {
                    alphabet[rng.random_range(0..alphabet.len())]
                }
            })
            .collect();
        self.iteration += self.step;
        trace!(iteration = self.iteration, "Scramble tick");
        if self.iteration >= self.source.len() as f64 {
            self.finish();
        }
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn source(&self) -> String {
        self.source.iter().collect()
    }

    pub fn iteration(&self) -> f64 {
        self.iteration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl FrameDriven for ScrambleText {
    fn on_frame(&mut self, tick: &ClockTick) {
        self.update(tick.delta_ms);
    }
}
