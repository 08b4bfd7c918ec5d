// SPDX-License-Identifier: Apache-2.0

use super::*;

fn base_config() -> SimConfig {
    SimConfig::default()
}

#[test]
fn default_config_validates() {
    assert!(base_config().validate().is_ok());
}

#[test]
fn rejects_too_few_nodes() {
    let mut config = base_config();
    config.n_nodes = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::TooFewNodes(0))
    ));
}

#[test]
fn rejects_non_positive_edge() {
    let mut config = base_config();
    config.edge = 0.0;
    assert!(matches!(config.validate(), Err(ConfigError::NonPositiveEdge(_))));
}

#[test]
fn rejects_non_integer_election_cycle() {
    let mut config = base_config();
    config.p = 0.3;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NonIntegerElectionCycle(_))
    ));
}

#[test]
fn election_cycle_rounds_is_inverse_of_p() {
    let mut config = base_config();
    config.p = 0.25;
    assert_eq!(config.election_cycle_rounds().unwrap(), 4);
}

#[test]
fn rejects_more_nodes_than_placeable_positions() {
    let mut config = base_config();
    config.edge = 1.0;
    config.min_x = 0;
    config.min_y = 0;
    config.n_nodes = 100;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::CannotPlaceUniquePositions { .. })
    ));
}

#[test]
fn max_dist_is_the_field_diagonal() {
    let mut config = base_config();
    config.edge = 10.0;
    assert!((config.max_dist() - (200.0_f64).sqrt()).abs() < 1e-9);
}
