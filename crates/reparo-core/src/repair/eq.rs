//! Broadband three-gain level trim.

use crate::{Repair, SampleBuffer, db_to_linear};

/// Weights of the low, mid and high gains in the combined multiplier.
const BAND_WEIGHTS: [f32; 3] = [0.33, 0.33, 0.34];

/// Three band gains collapsed into one broadband multiplier.
///
/// There is no crossover: the weighted sum
/// `0.33*lin(low) + 0.33*lin(mid) + 0.34*lin(high)` scales every sample.
/// With all gains at 0 dB the buffer passes unchanged (within rounding).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BroadbandEq {
    /// Low band gain in dB.
    pub low_db: f32,
    /// Mid band gain in dB.
    pub mid_db: f32,
    /// High band gain in dB.
    pub high_db: f32,
}

impl BroadbandEq {
    /// Combined linear multiplier.
    pub fn gain(&self) -> f32 {
        [self.low_db, self.mid_db, self.high_db]
            .iter()
            .zip(BAND_WEIGHTS)
            .map(|(&db, weight)| weight * db_to_linear(db))
            .sum()
    }
}

impl Repair for BroadbandEq {
    fn name(&self) -> &'static str {
        "eq"
    }

    fn apply(&self, input: &SampleBuffer) -> SampleBuffer {
        let gain = self.gain();
        input.map(|_, sample| sample * gain)
    }
}
