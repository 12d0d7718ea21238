//! Segment cost models for change-point detection.
//!
//! A cost model scores how well a single statistical regime explains a
//! contiguous segment of the signal. Lower cost indicates a better fit.

use crate::error::{ComplaintError, Result};
use crate::utils::stats::median;
use std::str::FromStr;

/// Cost model selecting the per-segment error function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostModel {
    /// Sum of absolute deviations from the segment median. Robust to outliers.
    L1,
    /// Sum of squared deviations from the segment mean (residual sum of squares).
    #[default]
    L2,
    /// Gaussian-kernel cost measuring within-segment homogeneity.
    Rbf,
}

impl CostModel {
    /// String form matching the configuration surface (`"l1"`, `"l2"`, `"rbf"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            CostModel::L1 => "l1",
            CostModel::L2 => "l2",
            CostModel::Rbf => "rbf",
        }
    }
}

impl FromStr for CostModel {
    type Err = ComplaintError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "l1" => Ok(CostModel::L1),
            "l2" => Ok(CostModel::L2),
            "rbf" => Ok(CostModel::Rbf),
            other => Err(ComplaintError::UnsupportedCostModel(other.to_string())),
        }
    }
}

impl std::fmt::Display for CostModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// L1 cost: sum of absolute deviations from the median.
pub fn l1_cost(segment: &[f64]) -> f64 {
    if segment.is_empty() {
        return 0.0;
    }

    let med = median(segment);
    segment.iter().map(|x| (x - med).abs()).sum()
}

/// L2 cost: sum of squared deviations from the mean.
pub fn l2_cost(segment: &[f64]) -> f64 {
    if segment.is_empty() {
        return 0.0;
    }

    let mean = segment.iter().sum::<f64>() / segment.len() as f64;
    segment.iter().map(|x| (x - mean).powi(2)).sum()
}

/// Precomputed per-signal state allowing cheap segment cost evaluation
/// over arbitrary `[start, end)` ranges during the PELT sweep.
#[derive(Debug, Clone)]
pub struct SegmentCost {
    model: CostModel,
    signal: Vec<f64>,
    /// Prefix sums for the L2 fast path.
    cum_sum: Vec<f64>,
    cum_sum_sq: Vec<f64>,
    /// 2-D prefix sums of the Gaussian Gram matrix (RBF only).
    /// gram_prefix[i][j] = sum of K over the leading i x j block.
    gram_prefix: Vec<Vec<f64>>,
}

impl SegmentCost {
    /// Build the cost cache for a signal.
    pub fn new(signal: &[f64], model: CostModel) -> Self {
        let n = signal.len();

        let cum_sum: Vec<f64> = std::iter::once(0.0)
            .chain(signal.iter().scan(0.0, |acc, &x| {
                *acc += x;
                Some(*acc)
            }))
            .collect();

        let cum_sum_sq: Vec<f64> = std::iter::once(0.0)
            .chain(signal.iter().scan(0.0, |acc, &x| {
                *acc += x * x;
                Some(*acc)
            }))
            .collect();

        let gram_prefix = if model == CostModel::Rbf && n > 0 {
            let gamma = rbf_gamma(signal);
            let mut prefix = vec![vec![0.0; n + 1]; n + 1];
            for i in 0..n {
                for j in 0..n {
                    let d = signal[i] - signal[j];
                    let k = (-gamma * d * d).exp();
                    prefix[i + 1][j + 1] =
                        k + prefix[i][j + 1] + prefix[i + 1][j] - prefix[i][j];
                }
            }
            prefix
        } else {
            Vec::new()
        };

        Self {
            model,
            signal: signal.to_vec(),
            cum_sum,
            cum_sum_sq,
            gram_prefix,
        }
    }

    /// Cost model this cache evaluates.
    pub fn model(&self) -> CostModel {
        self.model
    }

    /// Evaluate the segment cost over `[start, end)`.
    pub fn cost(&self, start: usize, end: usize) -> f64 {
        let len = end.saturating_sub(start);
        if len == 0 {
            return 0.0;
        }

        match self.model {
            CostModel::L2 => {
                // sum((x - mean)^2) = sum(x^2) - n * mean^2
                let sum = self.cum_sum[end] - self.cum_sum[start];
                let sum_sq = self.cum_sum_sq[end] - self.cum_sum_sq[start];
                let mean = sum / len as f64;
                (sum_sq - len as f64 * mean * mean).max(0.0)
            }
            CostModel::L1 => l1_cost(&self.signal[start..end]),
            CostModel::Rbf => {
                let block = self.gram_prefix[end][end] - self.gram_prefix[start][end]
                    - self.gram_prefix[end][start]
                    + self.gram_prefix[start][start];
                (len as f64 - block / len as f64).max(0.0)
            }
        }
    }
}

/// Median-heuristic bandwidth for the Gaussian kernel: the inverse median
/// of pairwise squared distances, falling back to 1.0 when the median is
/// zero (more than half of all pairs identical).
fn rbf_gamma(signal: &[f64]) -> f64 {
    let n = signal.len();
    if n < 2 {
        return 1.0;
    }

    let mut sq_dists = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = signal[i] - signal[j];
            sq_dists.push(d * d);
        }
    }

    let med = median(&sq_dists);
    if med > 0.0 {
        1.0 / med
    } else {
        1.0
    }
}

/// Compute the cost for the entire signal given change-point locations.
pub fn total_cost(signal: &[f64], changepoints: &[usize], model: CostModel) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }

    let cache = SegmentCost::new(signal, model);
    let mut total = 0.0;
    let mut start = 0;

    for &cp in changepoints {
        if cp > start && cp <= signal.len() {
            total += cache.cost(start, cp);
            start = cp;
        }
    }

    if start < signal.len() {
        total += cache.cost(start, signal.len());
    }

    total
}
