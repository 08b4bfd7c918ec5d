// SPDX-License-Identifier: Apache-2.0

use crate::base_types::{NodeId, SimTime};
use crate::message::{EventKind, TimerKind};
use log::trace;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

#[cfg(test)]
#[path = "unit_tests/scheduler_tests.rs"]
mod scheduler_tests;

/// A scheduled `(time, destination, kind)` event (spec §3 "Event"). Carries
/// no explicit sequence number in its public shape; FIFO tie-breaking is an
/// internal property of the queue (spec §4.1), not part of the delivered
/// event's identity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Event {
    pub time: SimTime,
    pub destination: NodeId,
    pub kind: EventKind,
}

struct HeapEntry {
    time: SimTime,
    seq: u64,
    /// Set for `Timer` events: the generation this entry was scheduled
    /// under, checked against the live generation at pop time to implement
    /// cancellation (see `Scheduler::cancel`).
    generation: Option<u64>,
    event: Event,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse both keys so the earliest time,
        // and within a tie the earliest-inserted (lowest seq), pops first.
        Reverse(self.time)
            .cmp(&Reverse(other.time))
            .then_with(|| Reverse(self.seq).cmp(&Reverse(other.seq)))
    }
}

/// Priority queue of pending events ordered by scheduled simulation time,
/// with FIFO tie-break by insertion sequence (spec §4.1).
pub struct Scheduler {
    clock: SimTime,
    next_seq: u64,
    pending: BinaryHeap<HeapEntry>,
    /// Per-`(node, timer kind)` generation counter backing `cancel`: bumping
    /// it invalidates any already-queued entry for that timer without
    /// touching the heap, so cancellation is immediate from the caller's
    /// point of view even though the stale heap entry is only discarded
    /// lazily, at `pop_next` time. Grounded on
    /// `bft-lib::simulator::SimulatedNode::ignore_scheduled_updates_until`.
    timer_generation: HashMap<(NodeId, TimerKind), u64>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Scheduler {
            clock: SimTime::ZERO,
            next_seq: 0,
            pending: BinaryHeap::new(),
            timer_generation: HashMap::new(),
        }
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> SimTime {
        self.clock
    }

    /// Insert an event to fire at `time`. For `Timer` kinds this atomically
    /// supersedes any event of the same `(destination, kind)` previously
    /// scheduled (spec §3 invariant: at most one pending self-event of each
    /// kind per node).
    pub fn schedule_at(&mut self, time: SimTime, destination: NodeId, kind: EventKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let generation = if let EventKind::Timer(timer_kind) = kind {
            let slot = self
                .timer_generation
                .entry((destination, timer_kind))
                .or_insert(0);
            *slot += 1;
            Some(*slot)
        } else {
            None
        };
        trace!(
            "scheduling {:?} for node {} at {} (seq {})",
            kind,
            destination,
            time,
            seq
        );
        self.pending.push(HeapEntry {
            time,
            seq,
            generation,
            event: Event {
                time,
                destination,
                kind,
            },
        });
    }

    /// Cancel a pending self-event of the given kind for `node`, if any
    /// (spec §4.1, §5: "cancellation is immediate and removes the event from
    /// the queue").
    pub fn cancel(&mut self, node: NodeId, kind: TimerKind) {
        let slot = self.timer_generation.entry((node, kind)).or_insert(0);
        *slot += 1;
    }

    /// Pop the earliest non-cancelled event, advancing the virtual clock
    /// monotonically to its time.
    pub fn pop_next(&mut self) -> Option<Event> {
        while let Some(entry) = self.pending.pop() {
            if let EventKind::Timer(timer_kind) = entry.event.kind {
                let live = self
                    .timer_generation
                    .get(&(entry.event.destination, timer_kind))
                    .copied()
                    .unwrap_or(0);
                if entry.generation != Some(live) {
                    continue; // superseded or cancelled
                }
            }
            self.clock = std::cmp::max(self.clock, entry.time);
            return Some(entry.event);
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
