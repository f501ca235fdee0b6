//! Threshold crossing over per-frame spectrum means.

/// Arithmetic mean of a byte frequency buffer. Empty buffers read as silence.
pub fn mean_magnitude(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let total: u64 = bins.iter().map(|&b| u64::from(b)).sum();
    total as f32 / bins.len() as f32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Below threshold on the previous sample, at or above on this one.
    Rising,
    Falling,
}

/// Single-sample edge check. No hysteresis: a signal hovering on the
/// threshold produces an edge on every crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDetector {
    threshold: f32,
    above: bool,
}

impl EdgeDetector {
    pub fn new(threshold: u8) -> Self {
        Self {
            threshold: f32::from(threshold),
            above: false,
        }
    }

    pub fn is_above(&self) -> bool {
        self.above
    }

    pub fn observe(&mut self, mean: f32) -> Option<Edge> {
        let above = mean >= self.threshold;
        let edge = match (self.above, above) {
            (false, true) => Some(Edge::Rising),
            (true, false) => Some(Edge::Falling),
            _ => None,
        };
        self.above = above;
        edge
    }

    pub fn reset(&mut self) {
        self.above = false;
    }
}
