// SPDX-License-Identifier: Apache-2.0

use crate::base_types::{NodeId, SimTime};

/// Scalar and per-node time-series recording interface (spec §6): "The core
/// exposes a scalar sink interface with at least the keys `endTime`,
/// `rounds`, `firstNodeDead`, and a per-node time-series sink keyed
/// `energy`." Scalar-result recording to files is explicitly out of the
/// core's scope (spec §1); `leach-core` only calls through this trait, and
/// `leach-sim` supplies the file-backed implementation.
pub trait ScalarSink {
    /// Record a whole-run scalar, e.g. `"endTime"`, `"rounds"`,
    /// `"firstNodeDead"`.
    fn record_scalar(&mut self, key: &str, value: f64);

    /// Record one sample of a node's pre-deduction energy, taken at every
    /// charged radio operation (spec §4.3 `apply_cost`).
    fn record_energy_sample(&mut self, node: NodeId, time: SimTime, energy: f64);
}

/// A sink that discards everything; useful for tests and for callers that
/// only care about the final `Simulation` state.
#[derive(Default)]
pub struct NullSink;

impl ScalarSink for NullSink {
    fn record_scalar(&mut self, _key: &str, _value: f64) {}
    fn record_energy_sample(&mut self, _node: NodeId, _time: SimTime, _energy: f64) {}
}
