// SPDX-License-Identifier: Apache-2.0

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Two independent, deterministically-seeded substreams derived from a
/// single simulation seed: one for node placement, one for self-election
/// (spec §9 Design Notes, "derive per-stream substreams from a single seed
/// ... to keep determinism stable under code reorganization"). Grounded on
/// `bft-lib::configuration::EpochConfiguration::pick_author`, which seeds a
/// fresh `Xoshiro256StarStar` from a `u64` for each independent draw.
pub struct SimRng {
    placement: Xoshiro256StarStar,
    election: Xoshiro256StarStar,
}

/// Distinguishes the two draws so that re-seeding either stream never
/// collides with the other, even for the same base seed.
const PLACEMENT_TAG: u64 = 0x5EED_0001;
const ELECTION_TAG: u64 = 0x5EED_0002;

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        SimRng {
            placement: Xoshiro256StarStar::seed_from_u64(seed ^ PLACEMENT_TAG),
            election: Xoshiro256StarStar::seed_from_u64(seed ^ ELECTION_TAG),
        }
    }

    pub fn placement_range(&mut self, low: i32, high_inclusive: i32) -> i32 {
        self.placement.gen_range(low..=high_inclusive)
    }

    /// Draw from `Uniform(0,1)` for the self-election threshold test
    /// (spec §4.5 step 4).
    pub fn election_uniform(&mut self) -> f64 {
        self.election.gen_range(0.0..1.0)
    }
}
