//! Detection of anomalous points in count series.

mod spike;

pub use spike::{detect_spikes, spike_z_scores, SpikeConfig};
