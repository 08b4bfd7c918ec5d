// SPDX-License-Identifier: Apache-2.0

use crate::base_types::{NodeId, Round};

/// The protocol's tagged message union (spec §2 item 2, §3 "Protocol
/// payloads"; Design Notes §9: "Message polymorphism via subclass casts maps
/// to a single tagged union/variant"). Wire layout is not modeled — these
/// are value types carried directly by `Event`, not serialized bytes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Payload {
    /// Cluster-head election advertisement.
    Adv { sender: NodeId },
    /// A non-CH sensor joining a cluster (or, from an orphan, the BS).
    Join { sender: NodeId },
    /// TDMA schedule entry for one member.
    Sched {
        turn: usize,
        duration: f64,
        round: Round,
        ch_id: NodeId,
    },
    /// One member's sensed reading for the round.
    Data { sender: NodeId, round: Round },
    /// Alternative-CH handoff (distance-aware/energy-aware variants).
    Center {
        cluster_n: usize,
        idle_time: f64,
        sched_delay: f64,
    },
}

/// Internal timer kinds a node schedules on itself (spec §2 item 2). Exactly
/// one of each may be pending per node at any instant (spec §3 Invariants).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TimerKind {
    StartRound,
    StartTx,
    RcvdAdv,
    RcvdSched,
    RcvdJoin,
    RcvdData,
}

/// What a dispatched event carries: either a self-scheduled timer or a
/// message payload delivered from (possibly) another node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventKind {
    Timer(TimerKind),
    Message(Payload),
}
