// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::config::SimConfig;
use crate::rng::SimRng;
use crate::scheduler::Event;
use crate::sink::NullSink;

fn round_zero_network(n_nodes: usize) -> NetworkState {
    let mut net = NetworkState::new(n_nodes);
    net.advance_round();
    net.publish_round_time(1.0);
    net
}

#[test]
fn threshold_is_zero_once_already_elected_this_cycle() {
    let sensor = Sensor::new(0, Position::new(0, 0), 1.0);
    assert_eq!(sensor.threshold(0.5, 2, Round(0)), 0.5 / (1.0 - 0.5 * 0.0));
    let mut already = sensor;
    already.already_ch = true;
    assert_eq!(already.threshold(0.5, 2, Round(1)), 0.0);
}

#[test]
fn product_order_orders_strictly_dominant_pairs() {
    assert_eq!(product_order_cmp((1.0, 1.0), (2.0, 2.0)), Ordering::Less);
    assert_eq!(product_order_cmp((2.0, 2.0), (1.0, 1.0)), Ordering::Greater);
    // Neither dominates: incomparable under the product order.
    assert_eq!(product_order_cmp((1.0, 2.0), (2.0, 1.0)), Ordering::Equal);
}

#[test]
fn self_election_with_p_one_always_becomes_ch() {
    let mut sensor = Sensor::new(0, Position::new(0, 0), 1.0);
    let mut scheduler = Scheduler::new();
    let mut net = round_zero_network(2);
    let mut config = SimConfig::default();
    config.n_nodes = 2;
    config.p = 1.0;
    let mut rng = SimRng::from_seed(1);
    let mut sink = NullSink;

    sensor.on_event(
        Event {
            time: scheduler.now(),
            destination: 0,
            kind: EventKind::Timer(TimerKind::StartRound),
        },
        &mut scheduler,
        &mut net,
        &config,
        &[],
        &mut rng,
        &mut sink,
    );

    assert_eq!(sensor.role(), Role::Ch);
    assert!(sensor.already_ch);
}

#[test]
fn orphan_joins_the_base_station_when_no_adv_arrives() {
    let mut sensor = Sensor::new(0, Position::new(0, 0), 1.0);
    let mut scheduler = Scheduler::new();
    let mut net = round_zero_network(1);
    let config = SimConfig::default();
    let mut sink = NullSink;

    sensor.declare_orphan(&mut scheduler, &mut net, &config, &mut sink);

    assert_eq!(sensor.ch_id, Some(BS_ID));
    let event = scheduler.pop_next().expect("JOIN to BS scheduled");
    assert_eq!(event.destination, BS_ID);
    match event.kind {
        EventKind::Message(Payload::Join { sender }) => assert_eq!(sender, 0),
        _ => panic!("expected a JOIN"),
    }
}

#[test]
fn choose_ch_picks_the_nearest_advertiser_and_clears_the_buffer() {
    let mut sensor = Sensor::new(0, Position::new(0, 0), 1.0);
    sensor.msg_buf = vec![2, 1]; // node 1 is closer than node 2
    let mut scheduler = Scheduler::new();
    let mut net = round_zero_network(3);
    let config = SimConfig::default();
    let mut sink = NullSink;
    let peers = [
        PeerSnapshot {
            position: Position::new(0, 0),
            energy_remaining: 1.0,
        },
        PeerSnapshot {
            position: Position::new(1, 0),
            energy_remaining: 1.0,
        },
        PeerSnapshot {
            position: Position::new(5, 0),
            energy_remaining: 1.0,
        },
    ];

    sensor.choose_ch(&mut scheduler, &mut net, &config, &peers, &mut sink);

    assert_eq!(sensor.ch_id, Some(1));
    assert!(sensor.msg_buf.is_empty());
}

#[test]
fn dead_sensor_ignores_every_event() {
    let mut sensor = Sensor::new(0, Position::new(0, 0), 1.0);
    sensor.role = Role::Dead;
    let mut scheduler = Scheduler::new();
    let mut net = round_zero_network(1);
    let config = SimConfig::default();
    let mut rng = SimRng::from_seed(1);
    let mut sink = NullSink;

    sensor.on_event(
        Event {
            time: scheduler.now(),
            destination: 0,
            kind: EventKind::Message(Payload::Adv { sender: 1 }),
        },
        &mut scheduler,
        &mut net,
        &config,
        &[],
        &mut rng,
        &mut sink,
    );

    assert!(sensor.msg_buf.is_empty());
    assert!(scheduler.is_empty());
}

#[test]
fn apply_cost_kills_the_node_and_records_the_first_death() {
    let mut sensor = Sensor::new(0, Position::new(0, 0), 1e-6);
    let mut scheduler = Scheduler::new();
    let mut net = round_zero_network(1);
    let params = SimConfig::default().energy_params;
    let mut sink = NullSink;

    scheduler.schedule_at(
        scheduler.now().plus(1.0),
        sensor.id,
        EventKind::Timer(TimerKind::StartRound),
    );

    let alive = apply_cost(
        &mut sensor,
        &mut scheduler,
        &mut net,
        &mut sink,
        params,
        RadioOp::Compress,
        0.0,
        1_000_000.0,
    );

    assert!(!alive);
    assert_eq!(sensor.role(), Role::Dead);
    assert_eq!(net.n_dead(), 1);
    assert_eq!(net.first_node_dead(), Some(net.round()));
    assert!(
        scheduler.pop_next().is_none(),
        "the node's pending START_ROUND must be cancelled on death"
    );
}
