// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Raised at initialization time (spec §7.2, `ConfigurationInvalid`). The run
/// aborts before simulation time 0 rather than surfacing as a runtime fault.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Nnodes must be at least 1, got {0}")]
    TooFewNodes(usize),

    #[error("edge must be positive, got {0}")]
    NonPositiveEdge(f64),

    #[error("bitrate must be positive, got {0}")]
    NonPositiveBitrate(f64),

    #[error("initial energy must be positive, got {0}")]
    NonPositiveEnergy(f64),

    #[error("P must be in (0, 1], got {0}")]
    InvalidP(f64),

    #[error("1/P must be a positive integer number of rounds per election cycle, got 1/P = {0}")]
    NonIntegerElectionCycle(f64),

    #[error("message sizes must be positive (ADV={adv}, JOIN={join}, SCHED={sched}, DATA={data})")]
    NonPositiveMessageSize {
        adv: u32,
        join: u32,
        sched: u32,
        data: u32,
    },

    #[error("could not place {requested} nodes with unique integer positions in a field of {available} candidate points")]
    CannotPlaceUniquePositions { requested: usize, available: usize },
}
