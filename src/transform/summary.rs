// The summary of a run, for operators and scripts.

use log::info;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fs;

use voter_history::{DistrictId, ElectionConfig};

use crate::transform::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistrictStatus {
    Written,
    Failed,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DistrictSummary {
    pub district: String,
    pub report: String,
    pub status: DistrictStatus,
    /// The number of voters written, header excluded.
    pub rows: Option<u32>,
    pub error: Option<String>,
}

impl DistrictSummary {
    pub fn written(district: DistrictId, rows: u32) -> DistrictSummary {
        DistrictSummary {
            district: district.to_string(),
            report: district.report_name(),
            status: DistrictStatus::Written,
            rows: Some(rows),
            error: None,
        }
    }

    pub fn failed(district: DistrictId, error: &TransformError) -> DistrictSummary {
        DistrictSummary {
            district: district.to_string(),
            report: district.report_name(),
            status: DistrictStatus::Failed,
            rows: None,
            error: Some(describe(error)),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub elections: Vec<String>,
    #[serde(rename = "votersIndexed")]
    pub voters_indexed: usize,
    pub districts: Vec<DistrictSummary>,
}

impl RunSummary {
    pub fn new(elections: &ElectionConfig, voters_indexed: usize) -> RunSummary {
        RunSummary {
            elections: elections.names().map(|n| n.to_string()).collect(),
            voters_indexed,
            districts: Vec::new(),
        }
    }

    pub fn push(&mut self, district: DistrictSummary) {
        info!(
            "CD{}: {:?}, {} rows",
            district.district,
            district.status,
            district.rows.unwrap_or(0)
        );
        self.districts.push(district);
    }

    /// The names of the reports that were produced.
    pub fn written_reports(&self) -> Vec<String> {
        self.districts
            .iter()
            .filter(|d| d.status == DistrictStatus::Written)
            .map(|d| d.report.clone())
            .collect()
    }

    pub fn num_failed(&self) -> usize {
        self.districts
            .iter()
            .filter(|d| d.status == DistrictStatus::Failed)
            .count()
    }
}

/// Writes the summary as JSON to a file, or to the standard output for `stdout`.
pub fn write_summary(summary: &RunSummary, out: &str) -> TransformResult<()> {
    let js = serde_json::to_string_pretty(summary).context(SerializingSummarySnafu {})?;
    if out == "stdout" {
        println!("{}", js);
    } else {
        info!("Writing the run summary to {}", out);
        fs::write(out, js).context(WritingSummarySnafu { path: out })?;
    }
    Ok(())
}
