// SPDX-License-Identifier: Apache-2.0

//! Main executable to run a Monte-Carlo simulation of LEACH and its
//! distance-aware/energy-aware cluster-head reassignment variants.

mod csv_sink;

use clap::{App, Arg};
use csv_sink::CsvSink;
use leach_core::config::{EnergyParams, SimConfig};
use leach_core::sink::NullSink;
use leach_core::Simulation;
use log::{info, warn};

fn main() -> anyhow::Result<()> {
    let args = get_arguments();
    env_logger::init();

    let config = SimConfig {
        n_nodes: args.nodes,
        edge: args.edge,
        min_x: 0,
        min_y: 0,
        bitrate: args.bitrate,
        energy: args.energy,
        energy_params: EnergyParams {
            eelec: args.eelec,
            eamp: args.eamp,
            ecomp: args.ecomp,
            gamma: args.gamma,
        },
        p: args.p,
        dist_aware_ch: args.dist_aware_ch,
        energy_aware_ch: args.energy_aware_ch,
        account_ch_setup: args.account_ch_setup,
        one_tx_per_round: args.one_tx_per_round,
        ch_slot_maxdist_in_cluster: args.ch_slot_maxdist_in_cluster,
        use_bs_dist: args.use_bs_dist,
        ..SimConfig::default()
    };

    match args.output_dir {
        Some(output_dir) => {
            let sink = CsvSink::new(&output_dir)?;
            let mut sim = Simulation::new(config, args.seed, sink)?;
            sim.run_until(args.max_time);
            sim.sink_mut().flush()?;
        }
        None => {
            let mut sim = Simulation::new(config, args.seed, NullSink)?;
            sim.run_until(args.max_time);
            warn!("nodes dead at end of run: {}", sim.net().n_dead());
        }
    }

    info!("simulation complete");
    Ok(())
}

struct CliArguments {
    nodes: usize,
    edge: f64,
    p: f64,
    bitrate: f64,
    energy: f64,
    eelec: f64,
    eamp: f64,
    ecomp: f64,
    gamma: f64,
    dist_aware_ch: bool,
    energy_aware_ch: bool,
    account_ch_setup: bool,
    one_tx_per_round: bool,
    ch_slot_maxdist_in_cluster: bool,
    use_bs_dist: bool,
    seed: u64,
    max_time: f64,
    output_dir: Option<String>,
}

fn get_arguments() -> CliArguments {
    let matches = App::new("LEACH simulator")
        .about("A monte-carlo simulation of the LEACH wireless-sensor-network clustering protocol")
        .arg(
            Arg::with_name("nodes")
                .long("nodes")
                .help("Number of sensor nodes to simulate")
                .default_value("10"),
        )
        .arg(
            Arg::with_name("edge")
                .long("edge")
                .help("Side length of the square field, in meters")
                .default_value("100.0"),
        )
        .arg(
            Arg::with_name("p")
                .long("p")
                .help("Desired fraction of cluster-heads per round; 1/p must be a positive integer")
                .default_value("0.1"),
        )
        .arg(
            Arg::with_name("bitrate")
                .long("bitrate")
                .help("Radio bitrate, in bits per second")
                .default_value("1e6"),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .help("Initial energy reserve per node, in joules")
                .default_value("1.0"),
        )
        .arg(
            Arg::with_name("eelec")
                .long("eelec")
                .help("Energy cost per bit of electronics, in joules/bit")
                .default_value("50e-9"),
        )
        .arg(
            Arg::with_name("eamp")
                .long("eamp")
                .help("Energy cost per bit per squared meter of amplifier, in joules/bit/m^2")
                .default_value("100e-12"),
        )
        .arg(
            Arg::with_name("ecomp")
                .long("ecomp")
                .help("Energy cost per bit of data aggregation, in joules/bit")
                .default_value("5e-9"),
        )
        .arg(
            Arg::with_name("gamma")
                .long("gamma")
                .help("Amplifier path-loss-exponent parameter")
                .default_value("2.0"),
        )
        .arg(
            Arg::with_name("dist_aware_ch")
                .long("dist-aware-ch")
                .help("Enable the distance-aware cluster-head reassignment variant"),
        )
        .arg(
            Arg::with_name("energy_aware_ch")
                .long("energy-aware-ch")
                .help("Enable the energy-aware cluster-head reassignment variant"),
        )
        .arg(
            Arg::with_name("account_ch_setup")
                .long("account-ch-setup")
                .help("Charge energy for control-plane transfers (ADV/JOIN/SCHED/idle listening)"),
        )
        .arg(
            Arg::with_name("multi_tx_per_round")
                .long("multi-tx-per-round")
                .help("Allow multiple DATA transmissions per member per round, instead of exactly one"),
        )
        .arg(
            Arg::with_name("ch_slot_maxdist_in_cluster")
                .long("ch-slot-maxdist-in-cluster")
                .help("Size TDMA slots from the per-cluster farthest member instead of the field diagonal"),
        )
        .arg(
            Arg::with_name("use_bs_dist")
                .long("use-bs-dist")
                .help("Use the real distance to the base station instead of the field diagonal"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .help("Seed for the deterministic random number generator")
                .default_value("1"),
        )
        .arg(
            Arg::with_name("max_time")
                .long("max_time")
                .help("Simulation time, in seconds, at which to stop even if nodes are still alive")
                .default_value("1e6"),
        )
        .arg(
            Arg::with_name("output_dir")
                .long("output_dir")
                .help("If given, write scalars.csv and energy.csv into this directory")
                .takes_value(true),
        )
        .get_matches();

    CliArguments {
        nodes: matches.value_of("nodes").unwrap().parse().unwrap(),
        edge: matches.value_of("edge").unwrap().parse().unwrap(),
        p: matches.value_of("p").unwrap().parse().unwrap(),
        bitrate: matches.value_of("bitrate").unwrap().parse().unwrap(),
        energy: matches.value_of("energy").unwrap().parse().unwrap(),
        eelec: matches.value_of("eelec").unwrap().parse().unwrap(),
        eamp: matches.value_of("eamp").unwrap().parse().unwrap(),
        ecomp: matches.value_of("ecomp").unwrap().parse().unwrap(),
        gamma: matches.value_of("gamma").unwrap().parse().unwrap(),
        dist_aware_ch: matches.is_present("dist_aware_ch"),
        energy_aware_ch: matches.is_present("energy_aware_ch"),
        account_ch_setup: matches.is_present("account_ch_setup"),
        one_tx_per_round: !matches.is_present("multi_tx_per_round"),
        ch_slot_maxdist_in_cluster: matches.is_present("ch_slot_maxdist_in_cluster"),
        use_bs_dist: matches.is_present("use_bs_dist"),
        seed: matches.value_of("seed").unwrap().parse().unwrap(),
        max_time: matches.value_of("max_time").unwrap().parse().unwrap(),
        output_dir: matches.value_of("output_dir").map(|s| s.to_string()),
    }
}
