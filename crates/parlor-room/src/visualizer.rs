//! Audio-level bars for the agent's voice.

use parlor_types::AgentState;

/// Computes bar heights (`0.0..=1.0`) from the agent's audio frames.
///
/// Bars only move while the agent is speaking; every other state renders a
/// flat row at `min_level`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarVisualizer {
    bar_count: usize,
    min_level: f32,
}

impl Default for BarVisualizer {
    fn default() -> Self {
        Self {
            bar_count: 12,
            min_level: 0.1,
        }
    }
}

impl BarVisualizer {
    /// `bar_count` is clamped to at least one bar and `min_level` to
    /// `0.0..=1.0`.
    pub fn new(bar_count: usize, min_level: f32) -> Self {
        Self {
            bar_count: bar_count.max(1),
            min_level: min_level.clamp(0.0, 1.0),
        }
    }

    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    pub fn min_level(&self) -> f32 {
        self.min_level
    }

    /// Splits `frame` into `bar_count` contiguous bands of near-equal length
    /// and returns the RMS level of each, floored at `min_level`.
    ///
    /// Frames shorter than `bar_count` fill one bar per sample. Non-finite
    /// energy renders at the floor.
    pub fn levels(&self, state: AgentState, frame: Option<&[f32]>) -> Vec<f32> {
        let mut bars = vec![self.min_level; self.bar_count];
        let frame = match (state, frame) {
            (AgentState::Speaking, Some(frame)) if !frame.is_empty() => frame,
            _ => return bars,
        };

        let len = frame.len();
        let active = len.min(self.bar_count);
        for (i, bar) in bars.iter_mut().take(active).enumerate() {
            let chunk = &frame[i * len / active..(i + 1) * len / active];
            let rms = (chunk.iter().map(|s| s * s).sum::<f32>() / chunk.len() as f32).sqrt();
            *bar = if rms.is_finite() {
                rms.clamp(self.min_level, 1.0)
            } else {
                self.min_level
            };
        }
        bars
    }
}
