// SPDX-License-Identifier: Apache-2.0

use crate::base_station::BaseStation;
use crate::base_types::{Position, SimTime, BS_ID};
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::message::{EventKind, TimerKind};
use crate::network_state::NetworkState;
use crate::rng::SimRng;
use crate::scheduler::{Event, Scheduler};
use crate::sensor::{PeerSnapshot, Sensor};
use crate::sink::ScalarSink;
use std::collections::HashSet;

/// Ties the event queue, shared network state, the base station and every
/// sensor together and drives them to completion (spec §2 "Round
/// orchestrator", Design Notes §9: "a small trait/interface ... with two
/// implementations"). Generic over the scalar sink so the core never
/// depends on how a caller records results; handlers themselves take
/// `&mut dyn ScalarSink` so the per-handler signatures stay small (spec §6).
pub struct Simulation<S: ScalarSink> {
    scheduler: Scheduler,
    net: NetworkState,
    config: SimConfig,
    rng: SimRng,
    base_station: BaseStation,
    sensors: Vec<Sensor>,
    sink: S,
}

impl<S: ScalarSink> Simulation<S> {
    /// Validate `config`, place `config.n_nodes` sensors at unique integer
    /// positions, and schedule every node's first START_ROUND at t=0 (spec
    /// §3 "Node: created at t=0 SENSOR with full battery"). The base
    /// station's own initial event is scheduled first so it is always
    /// dispatched before any sensor's same-instant START_ROUND: the BS is
    /// the sole writer of the round counter, and every sensor handler reads
    /// it read-only (spec §9 Design Notes), so sensors must observe the
    /// already-advanced round whenever their own START_ROUND coincides with
    /// the BS's.
    pub fn new(config: SimConfig, seed: u64, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = SimRng::from_seed(seed);
        let positions = place_nodes(&config, &mut rng);

        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(SimTime::ZERO, BS_ID, EventKind::Timer(TimerKind::StartRound));
        let sensors: Vec<Sensor> = positions
            .into_iter()
            .enumerate()
            .map(|(id, position)| {
                scheduler.schedule_at(SimTime::ZERO, id, EventKind::Timer(TimerKind::StartRound));
                Sensor::new(id, position, config.energy)
            })
            .collect();

        Ok(Simulation {
            scheduler,
            net: NetworkState::new(config.n_nodes),
            config,
            rng,
            base_station: BaseStation::new(),
            sensors,
            sink,
        })
    }

    pub fn net(&self) -> &NetworkState {
        &self.net
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Pop and dispatch exactly one event, if any is pending, regardless of
    /// `max_time`. Returns whether an event ran; useful to drive the
    /// simulation one step at a time (e.g. to inspect mid-round state in
    /// tests) without the wall-clock bound `run_until` enforces.
    pub fn step(&mut self) -> bool {
        match self.scheduler.pop_next() {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    fn dispatch(&mut self, event: Event) {
        if event.destination == BS_ID {
            self.base_station
                .on_event(event, &mut self.scheduler, &mut self.net, &self.config);
        } else {
            // A fresh read-only snapshot of every node's position/energy,
            // built before taking `&mut` on the one handler that runs
            // (spec §4.6 CH reassignment needs to read every cluster
            // member's state while holding only its own `&mut self`).
            let peers: Vec<PeerSnapshot> = self.sensors.iter().map(Sensor::snapshot).collect();
            let sensor = &mut self.sensors[event.destination];
            sensor.on_event(
                event,
                &mut self.scheduler,
                &mut self.net,
                &self.config,
                &peers,
                &mut self.rng,
                &mut self.sink,
            );
        }
    }

    /// Run until every node is dead, the queue drains, or simulation time
    /// exceeds `max_time` (a safety bound; a well-formed run always
    /// terminates via `Ndead == N`, spec §3 Invariants). Records the
    /// `endTime` and `rounds` scalars once the run stops (spec §6);
    /// `firstNodeDead` is recorded as soon as it happens, in `sensor::apply_cost`.
    pub fn run_until(&mut self, max_time: f64) {
        while !self.net.all_dead() {
            let event = match self.scheduler.pop_next() {
                Some(event) => event,
                None => break,
            };
            if event.time.0 > max_time {
                break;
            }
            self.dispatch(event);
        }
        self.sink.record_scalar("endTime", self.scheduler.now().0);
        self.sink
            .record_scalar("rounds", self.net.round().0 as f64 + 1.0);
    }
}

/// Place `config.n_nodes` sensors at unique integer positions in
/// `[min_x, edge] x [min_y, edge]` via rejection sampling (spec §3 "2-D
/// integer position ... unique across nodes"), mirroring the source's
/// do-while uniqueness loop. `config.validate()` guarantees enough distinct
/// grid points exist before this is ever called.
fn place_nodes(config: &SimConfig, rng: &mut SimRng) -> Vec<Position> {
    let max_x = config.edge as i32;
    let max_y = config.edge as i32;
    let mut seen = HashSet::with_capacity(config.n_nodes);
    let mut positions = Vec::with_capacity(config.n_nodes);
    for _ in 0..config.n_nodes {
        loop {
            let x = rng.placement_range(config.min_x, max_x);
            let y = rng.placement_range(config.min_y, max_y);
            let position = Position::new(x, y);
            if seen.insert(position) {
                positions.push(position);
                break;
            }
        }
    }
    positions
}

#[cfg(test)]
#[path = "unit_tests/simulation_tests.rs"]
mod simulation_tests;
