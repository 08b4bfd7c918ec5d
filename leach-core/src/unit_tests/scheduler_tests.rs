// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::message::Payload;

#[test]
fn pops_in_time_order() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule_at(SimTime(2.0), 0, EventKind::Message(Payload::Join { sender: 1 }));
    scheduler.schedule_at(SimTime(1.0), 0, EventKind::Message(Payload::Join { sender: 2 }));
    let first = scheduler.pop_next().unwrap();
    let second = scheduler.pop_next().unwrap();
    assert_eq!(first.time, SimTime(1.0));
    assert_eq!(second.time, SimTime(2.0));
}

#[test]
fn ties_break_fifo_by_insertion_order() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule_at(SimTime(1.0), 0, EventKind::Message(Payload::Join { sender: 1 }));
    scheduler.schedule_at(SimTime(1.0), 0, EventKind::Message(Payload::Join { sender: 2 }));
    let first = scheduler.pop_next().unwrap();
    match first.kind {
        EventKind::Message(Payload::Join { sender }) => assert_eq!(sender, 1),
        _ => panic!("unexpected kind"),
    }
}

#[test]
fn clock_advances_monotonically_with_pops() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule_at(SimTime(5.0), 0, EventKind::Timer(TimerKind::StartRound));
    scheduler.pop_next();
    assert_eq!(scheduler.now(), SimTime(5.0));
}

#[test]
fn scheduling_a_timer_supersedes_the_previous_one_of_the_same_kind() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule_at(SimTime(10.0), 0, EventKind::Timer(TimerKind::RcvdJoin));
    scheduler.schedule_at(SimTime(1.0), 0, EventKind::Timer(TimerKind::RcvdJoin));
    let event = scheduler.pop_next().unwrap();
    assert_eq!(event.time, SimTime(1.0));
    assert!(scheduler.pop_next().is_none());
}

#[test]
fn cancel_drops_a_pending_self_timer() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule_at(SimTime(1.0), 0, EventKind::Timer(TimerKind::StartRound));
    scheduler.cancel(0, TimerKind::StartRound);
    assert!(scheduler.pop_next().is_none());
}

#[test]
fn cancel_does_not_affect_a_different_node() {
    let mut scheduler = Scheduler::new();
    scheduler.schedule_at(SimTime(1.0), 0, EventKind::Timer(TimerKind::StartRound));
    scheduler.schedule_at(SimTime(1.0), 1, EventKind::Timer(TimerKind::StartRound));
    scheduler.cancel(0, TimerKind::StartRound);
    let event = scheduler.pop_next().unwrap();
    assert_eq!(event.destination, 1);
    assert!(scheduler.pop_next().is_none());
}
