// SPDX-License-Identifier: Apache-2.0

use crate::base_types::{NodeId, Position, Round, BS_ID};
use crate::config::{EnergyParams, SimConfig};
use crate::energy::{cost_of, EnergyOutcome, EnergyReserve, RadioOp};
use crate::geometry::{self, distance, propagation_delay};
use crate::message::{EventKind, Payload, TimerKind};
use crate::network_state::NetworkState;
use crate::rng::SimRng;
use crate::scheduler::{Event, Scheduler};
use crate::sink::ScalarSink;
use std::cmp::Ordering;

#[cfg(test)]
#[path = "unit_tests/sensor_tests.rs"]
mod sensor_tests;

/// A node's current role (spec §3, §4.5). `Dead` is terminal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Sensor,
    Ch,
    Dead,
}

/// A read-only view of one node's position and remaining energy, handed to
/// every other node's handler during CH reassignment (spec §4.6) without
/// requiring simultaneous `&mut` access to the node itself. Built fresh by
/// the orchestrator before each dispatch.
#[derive(Clone, Copy, Debug)]
pub struct PeerSnapshot {
    pub position: Position,
    pub energy_remaining: f64,
}

/// One sensor node's full state (spec §3 "Node"). `ch_dist` and `cluster_n`
/// are meaningful only in the role that uses them (member vs. CH
/// respectively) and are left stale otherwise, mirroring the source.
#[derive(Clone, Debug)]
pub struct Sensor {
    id: NodeId,
    position: Position,
    role: Role,
    already_ch: bool,
    ch_id: Option<NodeId>,
    ch_dist: f64,
    cluster_n: usize,
    msg_buf: Vec<NodeId>,
    energy: EnergyReserve,
}

/// Charge one radio operation against `sensor` (spec §4.3 `apply_cost`):
/// emits the pre-deduction energy sample, then either subtracts the cost or
/// kills the node, cancelling its START_ROUND chain and updating the
/// network-wide death count. Returns whether the node is still alive, so
/// callers can short-circuit the rest of a handler once a node dies (the
/// source keeps running the handler regardless, but every future self-event
/// is a no-op against a dead node, see `Sensor::on_event`, so there is no
/// observable difference).
fn apply_cost(
    sensor: &mut Sensor,
    scheduler: &mut Scheduler,
    net: &mut NetworkState,
    sink: &mut dyn ScalarSink,
    params: EnergyParams,
    op: RadioOp,
    d: f64,
    k: f64,
) -> bool {
    sink.record_energy_sample(sensor.id, scheduler.now(), sensor.energy.remaining());
    let cost = cost_of(params, op, d, k);
    match sensor.energy.apply(cost) {
        EnergyOutcome::Survived { .. } => true,
        EnergyOutcome::Died => {
            sensor.role = Role::Dead;
            scheduler.cancel(sensor.id, TimerKind::StartRound);
            let is_first_death = net.record_death();
            if is_first_death {
                sink.record_scalar("firstNodeDead", net.round().0 as f64);
            }
            false
        }
    }
}

/// `a < b` iff `a` is strictly better on both coordinates; this is the
/// "avoid too close CH" product order (spec §4.6, §9 Open Questions): not a
/// total order, so two candidates may compare as neither-less-than-the-other
/// (returned here as `Equal`). Mirrored as written rather than replaced with
/// a well-defined order, per the documented parity choice; see DESIGN.md.
fn product_order_cmp(a: (f64, f64), b: (f64, f64)) -> Ordering {
    let a_better = a.0 < b.0 && a.1 < b.1;
    let b_better = b.0 < a.0 && b.1 < a.1;
    if a_better {
        Ordering::Less
    } else if b_better {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

impl Sensor {
    pub fn new(id: NodeId, position: Position, energy: f64) -> Self {
        Sensor {
            id,
            position,
            role: Role::Sensor,
            already_ch: false,
            ch_id: None,
            ch_dist: 0.0,
            cluster_n: 0,
            msg_buf: Vec::new(),
            energy: EnergyReserve::new(energy),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_dead(&self) -> bool {
        self.role == Role::Dead
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn energy_remaining(&self) -> f64 {
        self.energy.remaining()
    }

    pub fn snapshot(&self) -> PeerSnapshot {
        PeerSnapshot {
            position: self.position,
            energy_remaining: self.energy.remaining(),
        }
    }

    /// Dispatch one event addressed to this node (spec §4.5 state machine).
    /// No-op once DEAD, regardless of whether the event is a self-timer or
    /// a message from another node (spec §4.7).
    #[allow(clippy::too_many_arguments)]
    pub fn on_event(
        &mut self,
        event: Event,
        scheduler: &mut Scheduler,
        net: &mut NetworkState,
        config: &SimConfig,
        peers: &[PeerSnapshot],
        rng: &mut SimRng,
        sink: &mut dyn ScalarSink,
    ) {
        if self.role == Role::Dead {
            return;
        }
        match event.kind {
            EventKind::Timer(TimerKind::StartRound) => {
                self.on_start_round(scheduler, net, config, rng, sink)
            }
            EventKind::Timer(TimerKind::RcvdAdv) => self.choose_ch(scheduler, net, config, peers, sink),
            EventKind::Timer(TimerKind::RcvdJoin) => {
                self.on_rcvd_join(scheduler, net, config, peers, sink)
            }
            EventKind::Timer(TimerKind::RcvdData) => {
                self.compress_and_send_to_bs(scheduler, net, config, sink)
            }
            EventKind::Timer(TimerKind::StartTx) => self.send_data(scheduler, net, config, sink),
            // Multi-TX-per-round liveness watchdog; spec §9 flags this path as
            // experimental and only partially wired in the source. Left as a
            // no-op here rather than half-implemented.
            EventKind::Timer(TimerKind::RcvdSched) => {}
            EventKind::Message(Payload::Adv { sender }) => {
                if self.role == Role::Sensor {
                    self.msg_buf.push(sender);
                }
            }
            // Unlike ADV, the source buffers JOIN regardless of current role;
            // harmless in a well-formed run since JOIN only ever targets a
            // node currently acting as CH or the BS.
            EventKind::Message(Payload::Join { sender }) => self.msg_buf.push(sender),
            EventKind::Message(Payload::Sched {
                turn,
                duration,
                round,
                ch_id,
            }) => self.on_sched(turn, duration, round, ch_id, scheduler, net, config, peers),
            EventKind::Message(Payload::Data { sender, round }) => {
                if self.role == Role::Ch && round == net.round() {
                    self.msg_buf.push(sender);
                }
            }
            EventKind::Message(Payload::Center {
                cluster_n,
                idle_time,
                sched_delay,
            }) => self.on_center(cluster_n, idle_time, sched_delay, scheduler, net, config, sink),
        }
    }

    /// Return to the base SENSOR state between rounds (spec §4.5 step 2).
    /// `already_ch` is cleared separately, only on election-cycle boundaries.
    fn reset(&mut self, scheduler: &mut Scheduler) {
        self.role = Role::Sensor;
        self.ch_id = None;
        self.cluster_n = 0;
        self.msg_buf.clear();
        scheduler.cancel(self.id, TimerKind::RcvdAdv);
        scheduler.cancel(self.id, TimerKind::RcvdJoin);
        scheduler.cancel(self.id, TimerKind::RcvdData);
        scheduler.cancel(self.id, TimerKind::StartTx);
    }

    fn threshold(&self, p: f64, cycle_rounds: u64, round: Round) -> f64 {
        if self.already_ch {
            0.0
        } else {
            p / (1.0 - p * (round.0 % cycle_rounds) as f64)
        }
    }

    fn on_start_round(
        &mut self,
        scheduler: &mut Scheduler,
        net: &mut NetworkState,
        config: &SimConfig,
        rng: &mut SimRng,
        sink: &mut dyn ScalarSink,
    ) {
        let round = net.round();
        if round != Round(0) {
            self.reset(scheduler);
        }
        let cycle_rounds = config
            .election_cycle_rounds()
            .expect("validated at simulation construction");
        if round.0 % cycle_rounds == 0 {
            self.already_ch = false;
        }

        let threshold = self.threshold(config.p, cycle_rounds, round);
        let draw = rng.election_uniform();
        if draw < threshold {
            self.advertisement_phase(scheduler, net, config, sink);
        } else {
            let max_dist = config.max_dist();
            let delay = propagation_delay(config.message_sizes.adv, max_dist, config.bitrate);
            scheduler.schedule_at(
                scheduler.now().plus(delay).plus_epsilon(),
                self.id,
                EventKind::Timer(TimerKind::RcvdAdv),
            );
            if config.account_ch_setup
                && !apply_cost(
                    self,
                    scheduler,
                    net,
                    sink,
                    config.energy_params,
                    RadioOp::Rx,
                    0.0,
                    config.message_sizes.adv as f64,
                )
            {
                return;
            }
        }

        let round_time = net
            .round_time()
            .expect("round_time is published at round 0, before any later START_ROUND fires");
        scheduler.schedule_at(
            scheduler.now().plus(round_time),
            self.id,
            EventKind::Timer(TimerKind::StartRound),
        );
    }

    fn advertisement_phase(
        &mut self,
        scheduler: &mut Scheduler,
        net: &mut NetworkState,
        config: &SimConfig,
        sink: &mut dyn ScalarSink,
    ) {
        self.already_ch = true;
        self.role = Role::Ch;
        self.broadcast_adv(scheduler, net, config, sink);
    }

    fn broadcast_adv(
        &mut self,
        scheduler: &mut Scheduler,
        net: &mut NetworkState,
        config: &SimConfig,
        sink: &mut dyn ScalarSink,
    ) {
        let max_dist = config.max_dist();
        let adv_delay = propagation_delay(config.message_sizes.adv, max_dist, config.bitrate);
        let now = scheduler.now();
        for peer in 0..net.n_nodes() {
            if peer != self.id {
                scheduler.schedule_at(
                    now.plus(adv_delay),
                    peer,
                    EventKind::Message(Payload::Adv { sender: self.id }),
                );
            }
        }
        if config.account_ch_setup
            && !apply_cost(
                self,
                scheduler,
                net,
                sink,
                config.energy_params,
                RadioOp::Tx,
                max_dist,
                config.message_sizes.adv as f64,
            )
        {
            return;
        }

        let join_delay = propagation_delay(config.message_sizes.join, max_dist, config.bitrate);
        scheduler.schedule_at(
            now.plus(adv_delay + join_delay).plus_epsilon(),
            self.id,
            EventKind::Timer(TimerKind::RcvdJoin),
        );
        if config.account_ch_setup {
            apply_cost(
                self,
                scheduler,
                net,
                sink,
                config.energy_params,
                RadioOp::Rx,
                0.0,
                config.message_sizes.join as f64,
            );
        }
    }

    fn choose_ch(
        &mut self,
        scheduler: &mut Scheduler,
        net: &mut NetworkState,
        config: &SimConfig,
        peers: &[PeerSnapshot],
        sink: &mut dyn ScalarSink,
    ) {
        let mut nearest: Option<(NodeId, f64)> = None;
        for &sender in &self.msg_buf {
            let dist = distance(self.position, peers[sender].position);
            if nearest.map_or(true, |(_, best)| dist < best) {
                nearest = Some((sender, dist));
            }
        }
        self.msg_buf.clear();

        match nearest {
            Some((ch_id, ch_dist)) => {
                self.ch_id = Some(ch_id);
                self.ch_dist = ch_dist;
                let delay = propagation_delay(config.message_sizes.join, ch_dist, config.bitrate);
                scheduler.schedule_at(
                    scheduler.now().plus(delay),
                    ch_id,
                    EventKind::Message(Payload::Join { sender: self.id }),
                );
                if config.account_ch_setup {
                    apply_cost(
                        self,
                        scheduler,
                        net,
                        sink,
                        config.energy_params,
                        RadioOp::Tx,
                        ch_dist,
                        config.message_sizes.join as f64,
                    );
                }
            }
            None => self.declare_orphan(scheduler, net, config, sink),
        }
    }

    /// No ADV heard (or, from a CH whose cluster emptied out, a reassigned
    /// CH's own fallback): join the BS directly (spec §4.5, §4.7 Orphan CH).
    fn declare_orphan(
        &mut self,
        scheduler: &mut Scheduler,
        net: &mut NetworkState,
        config: &SimConfig,
        sink: &mut dyn ScalarSink,
    ) {
        self.ch_id = Some(BS_ID);
        self.ch_dist = if config.use_bs_dist {
            geometry::distance_to_origin(self.position)
        } else {
            config.max_dist()
        };
        let delay = propagation_delay(config.message_sizes.join, self.ch_dist, config.bitrate);
        scheduler.schedule_at(
            scheduler.now().plus(delay),
            BS_ID,
            EventKind::Message(Payload::Join { sender: self.id }),
        );
        if config.account_ch_setup {
            apply_cost(
                self,
                scheduler,
                net,
                sink,
                config.energy_params,
                RadioOp::Tx,
                self.ch_dist,
                config.message_sizes.join as f64,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn on_sched(
        &mut self,
        turn: usize,
        duration: f64,
        round: Round,
        ch_id: NodeId,
        scheduler: &mut Scheduler,
        net: &NetworkState,
        config: &SimConfig,
        peers: &[PeerSnapshot],
    ) {
        if round != net.round() {
            return;
        }
        if config.dist_aware_ch && self.ch_id != Some(ch_id) {
            self.ch_id = Some(ch_id);
            self.ch_dist = if ch_id == BS_ID {
                if config.use_bs_dist {
                    geometry::distance_to_origin(self.position)
                } else {
                    config.max_dist()
                }
            } else {
                distance(self.position, peers[ch_id].position)
            };
        }
        scheduler.schedule_at(
            scheduler.now().plus(duration * turn as f64),
            self.id,
            EventKind::Timer(TimerKind::StartTx),
        );
    }

    fn send_data(
        &mut self,
        scheduler: &mut Scheduler,
        net: &mut NetworkState,
        config: &SimConfig,
        sink: &mut dyn ScalarSink,
    ) {
        let round = net.round();
        // `ch_id.is_some()` mirrors the source's `CH_id > -1` guard; a node
        // left without a CH (e.g. reassigned away under `EnergyAwareCH`
        // alone, which never re-adopts a SCHED's CH id, see `on_sched`)
        // silently transmits nothing this round.
        let ch_id = match self.ch_id {
            Some(ch_id) => ch_id,
            None => return,
        };
        let delay = propagation_delay(config.message_sizes.data, self.ch_dist, config.bitrate);
        scheduler.schedule_at(
            scheduler.now().plus(delay),
            ch_id,
            EventKind::Message(Payload::Data {
                sender: self.id,
                round,
            }),
        );
        if !apply_cost(
            self,
            scheduler,
            net,
            sink,
            config.energy_params,
            RadioOp::Tx,
            self.ch_dist,
            config.message_sizes.data as f64,
        ) {
            return;
        }
        if !config.one_tx_per_round {
            let timeout = propagation_delay(config.message_sizes.sched, self.ch_dist, config.bitrate);
            scheduler.schedule_at(
                scheduler.now().plus(2.0 * timeout),
                self.id,
                EventKind::Timer(TimerKind::RcvdSched),
            );
        }
    }

    fn on_rcvd_join(
        &mut self,
        scheduler: &mut Scheduler,
        net: &mut NetworkState,
        config: &SimConfig,
        peers: &[PeerSnapshot],
        sink: &mut dyn ScalarSink,
    ) {
        if self.msg_buf.is_empty() {
            // Every member died or none joined this round; fall back to
            // acting as a plain orphan (spec §4.7 "Orphan CH").
            self.reset(scheduler);
            self.declare_orphan(scheduler, net, config, sink);
        } else {
            self.create_tx_schedule(scheduler, net, config, peers, sink);
        }
    }

    fn compress_and_send_to_bs(
        &mut self,
        scheduler: &mut Scheduler,
        net: &mut NetworkState,
        config: &SimConfig,
        sink: &mut dyn ScalarSink,
    ) {
        let aggregate_bits = self.cluster_n as f64 * config.message_sizes.data as f64;
        if !apply_cost(
            self,
            scheduler,
            net,
            sink,
            config.energy_params,
            RadioOp::Compress,
            0.0,
            aggregate_bits,
        ) {
            return;
        }

        // The compressed payload is assumed to fit in one DATA-sized packet
        // regardless of cluster size; no message is actually delivered here,
        // only the cost of the final hop is charged (spec §4.5 CH rcvdData
        // handler).
        let data_aggr_size = config.message_sizes.data;
        let dist = if config.use_bs_dist {
            geometry::distance_to_origin(self.position)
        } else {
            config.max_dist()
        };
        if !apply_cost(
            self,
            scheduler,
            net,
            sink,
            config.energy_params,
            RadioOp::Tx,
            dist,
            data_aggr_size as f64,
        ) {
            return;
        }

        if !config.one_tx_per_round {
            let delay = propagation_delay(data_aggr_size, dist, config.bitrate);
            scheduler.schedule_at(
                scheduler.now().plus(delay),
                self.id,
                EventKind::Timer(TimerKind::RcvdJoin),
            );
        }
    }

    fn on_center(
        &mut self,
        cluster_n: usize,
        idle_time: f64,
        sched_delay: f64,
        scheduler: &mut Scheduler,
        net: &mut NetworkState,
        config: &SimConfig,
        sink: &mut dyn ScalarSink,
    ) {
        self.already_ch = true;
        self.role = Role::Ch;
        self.cluster_n = cluster_n;
        scheduler.schedule_at(
            scheduler.now().plus(sched_delay + idle_time).plus_epsilon(),
            self.id,
            EventKind::Timer(TimerKind::RcvdData),
        );
        if config.account_ch_setup {
            apply_cost(
                self,
                scheduler,
                net,
                sink,
                config.energy_params,
                RadioOp::Rx,
                0.0,
                cluster_n as f64 * config.message_sizes.data as f64,
            );
        }
    }

    /// Schedule creation at a CH (spec §4.6): the Traditional LEACH path and
    /// the distance-aware/energy-aware CH-reassignment variant.
    fn create_tx_schedule(
        &mut self,
        scheduler: &mut Scheduler,
        net: &mut NetworkState,
        config: &SimConfig,
        peers: &[PeerSnapshot],
        sink: &mut dyn ScalarSink,
    ) {
        self.cluster_n = self.msg_buf.len();

        // Slot width/SCHED delay basis distance: per-cluster farthest member
        // when `CH_SLOT_MAXDIST_IN_CLUSTER` is on, else the network-global
        // MAX_DIST. The source recomputes this basis only in the former
        // case and otherwise charges a stale `sensor_max_dist` left over
        // from a previous round at every SCHED-transmission charge site
        // below; that looks like an uninitialized-variable bug rather than
        // a deliberate design choice, so here the same basis distance that
        // set `slot`/`sched_delay` is reused consistently at every charge
        // site instead (see DESIGN.md).
        let basis_dist = if config.ch_slot_maxdist_in_cluster {
            self.msg_buf
                .iter()
                .map(|&member| distance(self.position, peers[member].position))
                .fold(f64::NEG_INFINITY, f64::max)
        } else {
            config.max_dist()
        };
        let slot = propagation_delay(config.message_sizes.data, basis_dist, config.bitrate);
        let sched_delay = propagation_delay(config.message_sizes.sched, basis_dist, config.bitrate);
        let round = net.round();
        let now = scheduler.now();

        if config.dist_aware_ch || config.energy_aware_ch {
            let max_energy = config.energy;
            // (id, sum of distances to every cluster member, drain) for
            // this node and for every member; self goes first so a tie at
            // index 0 after sorting still resolves in the CH's own favor.
            let mut candidates: Vec<(NodeId, f64, f64)> = Vec::with_capacity(self.msg_buf.len() + 1);
            let self_sum_dist: f64 = self
                .msg_buf
                .iter()
                .map(|&member| distance(self.position, peers[member].position))
                .sum();
            candidates.push((self.id, self_sum_dist, max_energy - self.energy.remaining()));
            for &candidate in &self.msg_buf {
                let sum_dist: f64 = self
                    .msg_buf
                    .iter()
                    .map(|&member| distance(peers[candidate].position, peers[member].position))
                    .sum();
                let drain = max_energy - peers[candidate].energy_remaining;
                candidates.push((candidate, sum_dist, drain));
            }

            let mut ranked = candidates.clone();
            ranked.sort_by(|a, b| match (config.dist_aware_ch, config.energy_aware_ch) {
                (true, true) => product_order_cmp((a.1, a.2), (b.1, b.2)),
                (true, false) => a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal),
                (false, true) => a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal),
                (false, false) => unreachable!("guarded by the outer if"),
            });
            let winner = ranked[0];
            let center_id = candidates
                .iter()
                .find(|c| c.1 == winner.1 && c.2 == winner.2)
                .map(|c| c.0)
                .unwrap_or(self.id);

            if center_id != self.id {
                self.role = Role::Sensor;
                self.already_ch = false;
                self.ch_id = Some(center_id);
                self.ch_dist = distance(self.position, peers[center_id].position);

                scheduler.schedule_at(
                    now,
                    center_id,
                    EventKind::Message(Payload::Center {
                        cluster_n: self.cluster_n,
                        idle_time: self.cluster_n as f64 * slot,
                        sched_delay,
                    }),
                );

                for (turn, &member) in self.msg_buf.iter().enumerate() {
                    // The slot that would have told the new center its own
                    // turn is redirected to the old CH instead: it now
                    // transmits as a regular member at that turn.
                    let destination = if member == center_id { self.id } else { member };
                    scheduler.schedule_at(
                        now.plus(sched_delay),
                        destination,
                        EventKind::Message(Payload::Sched {
                            turn,
                            duration: slot,
                            round,
                            ch_id: center_id,
                        }),
                    );
                }
                self.msg_buf.clear();
                if config.account_ch_setup {
                    apply_cost(
                        self,
                        scheduler,
                        net,
                        sink,
                        config.energy_params,
                        RadioOp::Tx,
                        basis_dist,
                        config.message_sizes.sched as f64,
                    );
                }
                return;
            }
            // Fall through: this node remains the best-placed/best-charged
            // candidate, so it keeps the CH role for this round.
        }

        for (turn, &member) in self.msg_buf.iter().enumerate() {
            scheduler.schedule_at(
                now.plus(sched_delay),
                member,
                EventKind::Message(Payload::Sched {
                    turn,
                    duration: slot,
                    round,
                    ch_id: self.id,
                }),
            );
        }
        self.msg_buf.clear();
        if config.account_ch_setup
            && !apply_cost(
                self,
                scheduler,
                net,
                sink,
                config.energy_params,
                RadioOp::Tx,
                basis_dist,
                config.message_sizes.sched as f64,
            )
        {
            return;
        }

        let idle_duration = self.cluster_n as f64 * slot;
        scheduler.schedule_at(
            now.plus(sched_delay + idle_duration).plus_epsilon(),
            self.id,
            EventKind::Timer(TimerKind::RcvdData),
        );
        if config.account_ch_setup {
            apply_cost(
                self,
                scheduler,
                net,
                sink,
                config.energy_params,
                RadioOp::Rx,
                0.0,
                self.cluster_n as f64 * config.message_sizes.data as f64,
            );
        }
    }
}
