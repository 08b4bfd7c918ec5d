// SPDX-License-Identifier: Apache-2.0

use crate::base_types::{NodeId, Round, BS_ID};
use crate::config::SimConfig;
use crate::geometry::propagation_delay;
use crate::message::{EventKind, Payload, TimerKind};
use crate::network_state::NetworkState;
use crate::scheduler::{Event, Scheduler};
use log::debug;

#[cfg(test)]
#[path = "unit_tests/base_station_tests.rs"]
mod base_station_tests;

/// The fixed sink (spec §4.4). Owns the authoritative round counter and
/// round duration via `NetworkState`; collects orphan JOIN/DATA traffic and
/// emits a TDMA schedule back to it.
#[derive(Debug, Default)]
pub struct BaseStation {
    /// Orphan JOIN (and, within the current round, DATA) senders awaiting a
    /// schedule. Spec §4.4: "DATA ... is treated like a JOIN for the next
    /// schedule."
    msg_buf: Vec<NodeId>,
}

impl BaseStation {
    pub fn new() -> Self {
        BaseStation::default()
    }

    /// `roundTime = 1 + N * propagation_delay(DATA_SIZE, MAX_DIST)`,
    /// published once at simulation construction (spec §4.4).
    pub fn compute_round_time(config: &SimConfig) -> f64 {
        1.0 + config.n_nodes as f64
            * propagation_delay(config.message_sizes.data, config.max_dist(), config.bitrate)
    }

    /// Dispatch one event addressed to the base station (spec §4.4 state
    /// machine). No-op once every sensor is dead.
    pub fn on_event(
        &mut self,
        event: Event,
        scheduler: &mut Scheduler,
        net: &mut NetworkState,
        config: &SimConfig,
    ) {
        if net.all_dead() {
            return;
        }
        match event.kind {
            EventKind::Timer(TimerKind::StartRound) => self.on_start_round(scheduler, net, config),
            EventKind::Timer(TimerKind::RcvdJoin) => self.on_rcvd_join(scheduler, net, config),
            EventKind::Message(Payload::Join { sender }) => self.on_join(sender, scheduler),
            EventKind::Message(Payload::Data { sender, round }) => {
                self.on_data(sender, round, net)
            }
            // The BS never receives ADV/SCHED/CENTER; a node sending one to
            // BS_ID would be a protocol violation and is silently dropped
            // (spec §7.3).
            _ => debug!("BS dropping unexpected event {:?}", event.kind),
        }
    }

    fn on_start_round(&mut self, scheduler: &mut Scheduler, net: &mut NetworkState, config: &SimConfig) {
        let round = net.advance_round();
        if round == Round(0) {
            net.publish_round_time(Self::compute_round_time(config));
        }
        self.msg_buf.clear();
        scheduler.cancel(BS_ID, TimerKind::RcvdJoin);
        let round_time = net
            .round_time()
            .expect("round_time is published at round 0, before any later START_ROUND fires");
        scheduler.schedule_at(
            scheduler.now().plus(round_time),
            BS_ID,
            EventKind::Timer(TimerKind::StartRound),
        );
    }

    fn on_join(&mut self, sender: NodeId, scheduler: &mut Scheduler) {
        let is_first = self.msg_buf.is_empty();
        self.msg_buf.push(sender);
        if is_first {
            scheduler.schedule_at(
                scheduler.now().plus_epsilon(),
                BS_ID,
                EventKind::Timer(TimerKind::RcvdJoin),
            );
        }
    }

    fn on_data(&mut self, sender: NodeId, round: Round, net: &NetworkState) {
        if round == net.round() {
            self.msg_buf.push(sender);
        }
    }

    fn on_rcvd_join(&mut self, scheduler: &mut Scheduler, net: &NetworkState, config: &SimConfig) {
        if !self.msg_buf.is_empty() {
            self.create_tx_schedule(scheduler, net, config);
        }
    }

    /// Traditional LEACH schedule creation at the BS (spec §4.4
    /// `create_tx_schedule`): always network-uniform slot width, CH id is
    /// the BS sentinel.
    fn create_tx_schedule(&mut self, scheduler: &mut Scheduler, net: &NetworkState, config: &SimConfig) {
        let cluster_n = self.msg_buf.len();
        let max_dist = config.max_dist();
        let slot = propagation_delay(config.message_sizes.data, max_dist, config.bitrate);
        let sched_delay = propagation_delay(config.message_sizes.sched, max_dist, config.bitrate);
        let round = net.round();
        let now = scheduler.now();
        for (turn, &sender) in self.msg_buf.iter().enumerate() {
            scheduler.schedule_at(
                now.plus(sched_delay),
                sender,
                EventKind::Message(Payload::Sched {
                    turn,
                    duration: slot,
                    round,
                    ch_id: BS_ID,
                }),
            );
        }
        self.msg_buf.clear();
        if !config.one_tx_per_round {
            let idle_duration = cluster_n as f64 * slot;
            scheduler.schedule_at(
                now.plus(sched_delay + idle_duration).plus_epsilon(),
                BS_ID,
                EventKind::Timer(TimerKind::RcvdJoin),
            );
        }
    }

    #[cfg(test)]
    pub(crate) fn buffer_len(&self) -> usize {
        self.msg_buf.len()
    }
}
