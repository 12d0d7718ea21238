//! PELT (Pruned Exact Linear Time) change-point search.
//!
//! Exact penalized optimal partitioning: finds the change-point set
//! minimizing total segment cost + penalty * k, with candidate pruning
//! to avoid the full quadratic sweep where possible.

use super::cost::{CostModel, SegmentCost};

/// Configuration for the PELT search.
#[derive(Debug, Clone, PartialEq)]
pub struct PeltConfig {
    /// Segment cost model.
    pub cost_model: CostModel,
    /// Penalty charged per additional change point.
    pub penalty: f64,
    /// Minimum segment length.
    pub min_segment_length: usize,
}

impl Default for PeltConfig {
    fn default() -> Self {
        Self {
            cost_model: CostModel::L2,
            penalty: 10.0,
            min_segment_length: 2,
        }
    }
}

impl PeltConfig {
    /// Set the cost model.
    pub fn cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    /// Set the penalty.
    pub fn penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    /// Set the minimum segment length (clamped to at least 1).
    pub fn min_segment_length(mut self, min_len: usize) -> Self {
        self.min_segment_length = min_len.max(1);
        self
    }
}

/// Result of the PELT search.
#[derive(Debug, Clone, PartialEq)]
pub struct PeltResult {
    /// Interior change-point indices, ascending. The end-of-series
    /// boundary is never included.
    pub changepoints: Vec<usize>,
    /// Segment `(start, end)` pairs covering the whole signal.
    pub segments: Vec<(usize, usize)>,
    /// Total segment cost of the optimal partition (excluding penalties).
    pub cost: f64,
}

impl PeltResult {
    /// Number of detected change points.
    pub fn n_changepoints(&self) -> usize {
        self.changepoints.len()
    }

    /// Mean of each segment of the given signal.
    pub fn segment_means(&self, signal: &[f64]) -> Vec<f64> {
        self.segments
            .iter()
            .map(|&(start, end)| {
                let segment = &signal[start..end];
                if segment.is_empty() {
                    f64::NAN
                } else {
                    segment.iter().sum::<f64>() / segment.len() as f64
                }
            })
            .collect()
    }
}

/// Run the PELT search over a signal.
///
/// Series shorter than two minimum-length segments cannot be split and
/// yield a single segment with no change points.
pub fn pelt_detect(signal: &[f64], config: &PeltConfig) -> PeltResult {
    let n = signal.len();
    let cache = SegmentCost::new(signal, config.cost_model);

    if n < 2 * config.min_segment_length {
        return PeltResult {
            changepoints: Vec::new(),
            segments: vec![(0, n)],
            cost: cache.cost(0, n),
        };
    }

    // f[t] = minimum penalized cost of segmenting signal[0..t]
    let mut f = vec![f64::INFINITY; n + 1];
    f[0] = -config.penalty; // First segment carries no penalty

    // cp[t] = optimal last change point for signal[0..t]
    let mut cp: Vec<usize> = vec![0; n + 1];

    // Candidate change points surviving the pruning rule
    let mut candidates: Vec<usize> = vec![0];

    for t in config.min_segment_length..=n {
        let mut best_cost = f64::INFINITY;
        let mut best_cp = 0;

        for &s in &candidates {
            if t - s >= config.min_segment_length {
                let total = f[s] + cache.cost(s, t) + config.penalty;
                if total < best_cost {
                    best_cost = total;
                    best_cp = s;
                }
            }
        }

        f[t] = best_cost;
        cp[t] = best_cp;

        // Prune candidates that can never become optimal again
        candidates.retain(|&s| {
            if t - s < config.min_segment_length {
                return true;
            }
            f[s] + cache.cost(s, t) <= f[t]
        });

        candidates.push(t);
    }

    // Backtrack: only interior indices are ever emitted
    let mut changepoints = Vec::new();
    let mut t = n;
    while t > 0 {
        let prev = cp[t];
        if prev > 0 {
            changepoints.push(prev);
        }
        t = prev;
    }
    changepoints.reverse();

    let mut segments = Vec::new();
    let mut start = 0;
    for &idx in &changepoints {
        segments.push((start, idx));
        start = idx;
    }
    segments.push((start, n));

    let cost: f64 = segments.iter().map(|&(s, e)| cache.cost(s, e)).sum();

    PeltResult {
        changepoints,
        segments,
        cost,
    }
}
