// SPDX-License-Identifier: Apache-2.0

use super::*;

fn params() -> EnergyParams {
    EnergyParams {
        eelec: 50e-9,
        eamp: 100e-12,
        ecomp: 5e-9,
        gamma: 2.0,
    }
}

#[test]
fn tx_cost_grows_with_distance_squared() {
    let p = params();
    let near = energy_tx(p, 1000, 1.0);
    let far = energy_tx(p, 1000, 2.0);
    // Eamp*k*d^2 term quadruples while Eelec*k stays fixed.
    assert!(far > near);
    assert!((far - near) > 3.0 * (p.eamp * 1000.0));
}

#[test]
fn rx_cost_ignores_distance() {
    let p = params();
    assert!((energy_rx(p, 2000) - p.eelec * 2000.0).abs() < 1e-15);
}

#[test]
fn reserve_survives_a_cheap_operation() {
    let mut reserve = EnergyReserve::new(1.0);
    match reserve.apply(0.1) {
        EnergyOutcome::Survived { remaining } => assert!((remaining - 0.9).abs() < 1e-9),
        EnergyOutcome::Died => panic!("should have survived"),
    }
    assert!((reserve.remaining() - 0.9).abs() < 1e-9);
}

#[test]
fn reserve_dies_when_cost_meets_or_exceeds_remaining() {
    let mut reserve = EnergyReserve::new(1.0);
    assert_eq!(reserve.apply(1.0), EnergyOutcome::Died);
    // A dead reserve's remaining value is left at its last charged amount.
    assert!((reserve.remaining() - 1.0).abs() < 1e-9);
}
