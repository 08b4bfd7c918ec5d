// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::config::SimConfig;

fn config() -> SimConfig {
    let mut config = SimConfig::default();
    config.n_nodes = 2;
    config
}

#[test]
fn first_start_round_publishes_round_time_and_advances_to_zero() {
    let mut bs = BaseStation::new();
    let mut scheduler = Scheduler::new();
    let mut net = NetworkState::new(2);
    let config = config();

    bs.on_event(
        Event {
            time: SimTime::ZERO,
            destination: BS_ID,
            kind: EventKind::Timer(TimerKind::StartRound),
        },
        &mut scheduler,
        &mut net,
        &config,
    );

    assert_eq!(net.round(), Round(0));
    assert!(net.round_time().is_some());
}

#[test]
fn join_buffers_and_arms_rcvd_join_only_on_the_first_arrival() {
    let mut bs = BaseStation::new();
    let mut scheduler = Scheduler::new();
    let mut net = NetworkState::new(2);
    let config = config();

    bs.on_event(
        Event {
            time: SimTime::ZERO,
            destination: BS_ID,
            kind: EventKind::Message(Payload::Join { sender: 0 }),
        },
        &mut scheduler,
        &mut net,
        &config,
    );
    assert_eq!(bs.buffer_len(), 1);

    bs.on_event(
        Event {
            time: SimTime::ZERO,
            destination: BS_ID,
            kind: EventKind::Message(Payload::Join { sender: 1 }),
        },
        &mut scheduler,
        &mut net,
        &config,
    );
    assert_eq!(bs.buffer_len(), 2);
}

#[test]
fn rcvd_join_on_empty_buffer_emits_no_schedule() {
    let mut bs = BaseStation::new();
    let mut scheduler = Scheduler::new();
    let mut net = NetworkState::new(2);
    let config = config();

    bs.on_event(
        Event {
            time: SimTime::ZERO,
            destination: BS_ID,
            kind: EventKind::Timer(TimerKind::RcvdJoin),
        },
        &mut scheduler,
        &mut net,
        &config,
    );
    assert!(scheduler.is_empty());
}

#[test]
fn rcvd_join_on_nonempty_buffer_schedules_one_sched_per_member_and_clears() {
    let mut bs = BaseStation::new();
    let mut scheduler = Scheduler::new();
    let mut net = NetworkState::new(2);
    let config = config();

    bs.on_event(
        Event {
            time: SimTime::ZERO,
            destination: BS_ID,
            kind: EventKind::Message(Payload::Join { sender: 0 }),
        },
        &mut scheduler,
        &mut net,
        &config,
    );
    bs.on_event(
        Event {
            time: SimTime::ZERO,
            destination: BS_ID,
            kind: EventKind::Timer(TimerKind::RcvdJoin),
        },
        &mut scheduler,
        &mut net,
        &config,
    );

    assert_eq!(bs.buffer_len(), 0);
    let mut scheds = 0;
    while let Some(event) = scheduler.pop_next() {
        if let EventKind::Message(Payload::Sched { ch_id, .. }) = event.kind {
            assert_eq!(ch_id, BS_ID);
            scheds += 1;
        }
    }
    assert_eq!(scheds, 1);
}
