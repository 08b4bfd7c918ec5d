// SPDX-License-Identifier: Apache-2.0

use super::*;

#[test]
fn distance_is_euclidean() {
    let a = Position::new(0, 0);
    let b = Position::new(3, 4);
    assert!((distance(a, b) - 5.0).abs() < 1e-9);
}

#[test]
fn distance_to_origin_matches_distance_from_zero_zero() {
    let p = Position::new(6, 8);
    assert!((distance_to_origin(p) - 10.0).abs() < 1e-9);
}

#[test]
fn range_is_field_diagonal() {
    assert!((range(1.0) - 2.0_f64.sqrt()).abs() < 1e-9);
}

#[test]
fn propagation_delay_combines_travel_and_packet_time() {
    let bits = 1000;
    let dist = LIGHTSPEED; // travel time of exactly 1 second
    let bitrate = 1000.0; // packet duration of exactly 1 second
    let delay = propagation_delay(bits, dist, bitrate);
    assert!((delay - 2.0).abs() < 1e-9);
}
