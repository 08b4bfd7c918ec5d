// SPDX-License-Identifier: Apache-2.0

use super::*;

#[test]
fn round_before_first_advances_to_zero() {
    let r = Round::before_first();
    assert_eq!(r.next(), Round(0));
    assert_eq!(r.next().next(), Round(1));
}

#[test]
fn sim_time_orders_by_value() {
    let a = SimTime(1.0);
    let b = SimTime(2.5);
    assert!(a < b);
    assert_eq!(a.plus(1.5), b);
}

#[test]
fn sim_time_epsilon_is_tiny_but_nonzero() {
    let a = SimTime(1.0);
    let b = a.plus_epsilon();
    assert!(b > a);
    assert!(b.0 - a.0 < 1e-3);
}

#[test]
fn position_equality_is_by_coordinate() {
    assert_eq!(Position::new(1, 2), Position::new(1, 2));
    assert_ne!(Position::new(1, 2), Position::new(2, 1));
}
