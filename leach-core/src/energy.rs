// SPDX-License-Identifier: Apache-2.0

use crate::config::EnergyParams;

#[cfg(test)]
#[path = "unit_tests/energy_tests.rs"]
mod energy_tests;

/// The three closed-form per-operation radio costs (spec §4.3). A TX of `k`
/// bits at distance `d`.
pub fn energy_tx(params: EnergyParams, k: u32, d: f64) -> f64 {
    params.eelec * k as f64 + params.eamp * k as f64 * d * d
}

/// RX of `k` bits.
pub fn energy_rx(params: EnergyParams, k: u32) -> f64 {
    params.eelec * k as f64
}

/// Compressing `k_n` bits (the concatenation of a cluster's raw DATA).
pub fn energy_compress(params: EnergyParams, k_n: f64) -> f64 {
    params.ecomp * k_n
}

/// The operation kind charged by `apply_cost`, mirroring the source's
/// `compState` enum (`RX`, `TX`, `COMPRESS`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RadioOp {
    Tx,
    Rx,
    Compress,
}

/// Compute the cost of one radio operation (spec §4.3). `k` is bits for
/// `Tx`/`Rx` and total aggregated bits for `Compress`; `d` is unused for
/// `Rx`/`Compress`.
pub fn cost_of(params: EnergyParams, op: RadioOp, d: f64, k: f64) -> f64 {
    match op {
        RadioOp::Tx => energy_tx(params, k as u32, d),
        RadioOp::Rx => energy_rx(params, k as u32),
        RadioOp::Compress => energy_compress(params, k),
    }
}

/// Outcome of `apply_cost`: whether the node survived the charge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnergyOutcome {
    Survived { remaining: f64 },
    Died,
}

/// A node's monotonically-decreasing energy reserve (spec §3, §4.3).
#[derive(Clone, Copy, Debug)]
pub struct EnergyReserve {
    remaining: f64,
}

impl EnergyReserve {
    pub fn new(initial: f64) -> Self {
        EnergyReserve { remaining: initial }
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Charge `cost`; emits the pre-deduction value as the "energy" sample
    /// (the caller does so before/around this call, see `sensor::apply_cost`).
    /// Returns whether the node is still alive after the charge (spec §4.3:
    /// "if cost < energy, subtract ...; else mark the node DEAD").
    pub fn apply(&mut self, cost: f64) -> EnergyOutcome {
        if cost < self.remaining {
            self.remaining -= cost;
            EnergyOutcome::Survived {
                remaining: self.remaining,
            }
        } else {
            EnergyOutcome::Died
        }
    }
}
