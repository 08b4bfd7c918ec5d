// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::error::ConfigError;
use crate::sink::NullSink;

fn small_config() -> SimConfig {
    let mut config = SimConfig::default();
    config.n_nodes = 4;
    config.edge = 50.0;
    config.p = 0.5;
    config
}

#[test]
fn construction_rejects_invalid_configuration() {
    let mut config = small_config();
    config.n_nodes = 0;
    let result = Simulation::new(config, 1, NullSink);
    assert!(matches!(result, Err(ConfigError::TooFewNodes(0))));
}

#[test]
fn places_every_node_at_a_unique_position() {
    let sim = Simulation::new(small_config(), 42, NullSink).unwrap();
    let mut positions: Vec<Position> = sim.sensors().iter().map(|s| s.position()).collect();
    let before = positions.len();
    positions.sort_by_key(|p| (p.x, p.y));
    positions.dedup();
    assert_eq!(positions.len(), before);
}

#[test]
fn run_terminates_when_every_node_is_eventually_dead() {
    let mut config = small_config();
    config.energy = 1e-7; // a tiny battery guarantees deaths within a few rounds
    let mut sim = Simulation::new(config, 7, NullSink).unwrap();

    sim.run_until(3600.0);

    assert!(sim.net().all_dead());
}

#[test]
fn same_seed_yields_identical_end_state() {
    let run = |seed: u64| {
        let mut sim = Simulation::new(small_config(), seed, NullSink).unwrap();
        sim.run_until(3600.0);
        (sim.net().round(), sim.net().n_dead())
    };
    assert_eq!(run(99), run(99));
}
