// SPDX-License-Identifier: Apache-2.0

//! Protocol state machine and discrete-event simulation kernel for LEACH
//! (Low-Energy Adaptive Clustering Hierarchy) and its distance-aware and
//! energy-aware cluster-head reassignment variants.

/// Common value types: node/round identifiers, simulation time.
pub mod base_types;

/// Simulation parameters and their validation.
pub mod config;

/// Error types returned at configuration time.
pub mod error;

/// Deterministic per-stream random number generation.
pub mod rng;

/// Field geometry and propagation-delay computation.
pub mod geometry;

/// Closed-form radio energy cost model.
pub mod energy;

/// Protocol message payloads and internal timer kinds.
pub mod message;

/// Event queue and virtual clock.
pub mod scheduler;

/// State shared across nodes and owned by the scheduler: round counter,
/// round duration, death count.
pub mod network_state;

/// Base-station state machine.
pub mod base_station;

/// Sensor-node state machine (the bulk of the protocol logic).
pub mod sensor;

/// Scalar and per-node time-series recording interface.
pub mod sink;

/// Top-level orchestrator tying scheduler, network state and nodes together.
pub mod simulation;

pub use base_types::{NodeId, Round, SimTime, BS_ID};
pub use config::SimConfig;
pub use error::ConfigError;
pub use simulation::Simulation;
