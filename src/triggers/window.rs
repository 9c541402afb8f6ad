//! Rolling sample window for trend triggers

use std::collections::VecDeque;

/// Maximum number of retained samples per window
pub const WINDOW_CAPACITY: usize = 30;

/// A fixed-capacity FIFO buffer of the most recent samples, plus a
/// lifetime observation count.
///
/// The buffer never holds more than [`WINDOW_CAPACITY`] samples; the
/// oldest is evicted when a full window receives another. The lifetime
/// count keeps growing, so warm-up can be judged even though the
/// retained buffer saturates.
#[derive(Debug, Clone, Default)]
pub struct RollingWindow {
    samples: VecDeque<f64>,
    seen: u64,
}

impl RollingWindow {
    /// Create an empty window
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, evicting the oldest when the window is full
    pub fn push(&mut self, sample: f64) {
        if self.samples.len() == WINDOW_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.seen += 1;
    }

    /// Arithmetic mean of the retained samples (0 when empty)
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples have been retained yet
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total samples observed over the window's lifetime
    pub fn seen(&self) -> u64 {
        self.seen
    }

    /// Whether a full window of samples has already been observed.
    /// Trend triggers stay inactive until this holds, regardless of
    /// the incoming value.
    pub fn is_warmed_up(&self) -> bool {
        self.seen >= WINDOW_CAPACITY as u64
    }

    /// Iterate the retained samples, oldest first
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }
}
