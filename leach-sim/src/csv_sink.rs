// SPDX-License-Identifier: Apache-2.0

use leach_core::sink::ScalarSink;
use leach_core::{NodeId, SimTime};
use log::warn;
use std::fs;
use std::path::Path;

/// File-backed `ScalarSink`: one CSV of whole-run scalars, one CSV of
/// per-node energy samples (spec §6: "scalar sink ... consumed by the host
/// observability layer"). Grounded on `DataWriter::write_to_file`, relocated
/// out of the core crate since file I/O is explicitly out of its scope.
pub struct CsvSink {
    scalars: csv::Writer<fs::File>,
    energy: csv::Writer<fs::File>,
}

impl CsvSink {
    pub fn new(output_dir: &str) -> anyhow::Result<Self> {
        if !Path::new(output_dir).exists() {
            fs::create_dir_all(output_dir)?;
        }
        let mut scalars = csv::Writer::from_path(format!("{}/scalars.csv", output_dir))?;
        scalars.write_record(["key", "value"])?;
        let mut energy = csv::Writer::from_path(format!("{}/energy.csv", output_dir))?;
        energy.write_record(["node", "time", "energy"])?;
        Ok(CsvSink { scalars, energy })
    }

    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.scalars.flush()?;
        self.energy.flush()?;
        Ok(())
    }
}

impl ScalarSink for CsvSink {
    fn record_scalar(&mut self, key: &str, value: f64) {
        if let Err(err) = self.scalars.write_record([key, &value.to_string()]) {
            warn!("failed to write scalar {}: {}", key, err);
        }
    }

    fn record_energy_sample(&mut self, node: NodeId, time: SimTime, energy: f64) {
        let record = [node.to_string(), time.0.to_string(), energy.to_string()];
        if let Err(err) = self.energy.write_record(record) {
            warn!("failed to write energy sample for node {}: {}", node, err);
        }
    }
}
