// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[cfg(test)]
#[path = "unit_tests/base_types_tests.rs"]
mod base_types_tests;

/// Stable integer node identity in `[0, N)`.
pub type NodeId = usize;

/// Sentinel identity of the base station, used as a `CH id` and as the
/// destination of orphan JOIN/DATA traffic.
pub const BS_ID: NodeId = 999_999;

/// Authoritative, BS-owned, strictly increasing round counter.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, Serialize, Deserialize, Debug, Default)]
pub struct Round(pub u64);

impl Round {
    /// The value the counter holds before the first START_ROUND (spec: "starts at -1").
    pub fn before_first() -> Round {
        Round(u64::MAX)
    }

    pub fn next(self) -> Round {
        if self == Round::before_first() {
            Round(0)
        } else {
            Round(self.0 + 1)
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Simulation-time instant, in seconds. Wraps `f64` with a total order so it
/// can key a `BinaryHeap`; simulation time never produces `NaN` in practice
/// (all inputs are non-negative finite quantities), so `total_cmp` is exact.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// The epsilon ordering nudge used throughout the protocol (spec §4.1).
    pub const EPSILON: f64 = 1e-6;

    pub fn plus(self, seconds: f64) -> SimTime {
        SimTime(self.0 + seconds)
    }

    pub fn plus_epsilon(self) -> SimTime {
        self.plus(Self::EPSILON)
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}
impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{:.6}", self.0)
    }
}

/// A node's position on the square field. Integer per spec §3, unique
/// across nodes.
#[derive(Eq, PartialEq, Copy, Clone, Hash, Debug, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}
