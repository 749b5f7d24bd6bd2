// Readers for the line-oriented configuration files.

use log::{debug, info};
use regex::Regex;
use snafu::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use voter_history::{ElectionConfig, TrackedElection};

use crate::transform::*;

pub const ELECTIONS_FILE: &str = "elections.txt";
pub const SENATE_DISTRICTS_FILE: &str = "senateDistricts.txt";
pub const SCHOOL_DISTRICTS_FILE: &str = "schoolDistricts.txt";

const ELECTION_CONFIG_PATTERN: &str = r"^(\d{2}/\d{2}/\d{4}),(.*)$";
const DISTRICT_CONFIG_PATTERN: &str = r"^[1-9][0-9]*$";

pub(crate) fn compile(pattern: &str) -> TransformResult<Regex> {
    Regex::new(pattern).context(InvalidPatternSnafu { pattern })
}

/// The trimmed, non-blank lines of a configuration file.
fn config_lines(contents: &str) -> impl Iterator<Item = &str> {
    contents.lines().map(|l| l.trim()).filter(|l| !l.is_empty())
}

/// Reads `MM/DD/YYYY,Display Name` lines. The slots follow the order of the lines.
pub fn read_election_config(path: &Path) -> TransformResult<ElectionConfig> {
    let path_s = path.display().to_string();
    info!("Reading configuration from {}", path_s);
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path: &path_s })?;
    let config = parse_election_config(&contents, &path_s)?;
    info!("{} elections found to watch.", config.len());
    Ok(config)
}

pub fn parse_election_config(contents: &str, path: &str) -> TransformResult<ElectionConfig> {
    let pattern = compile(ELECTION_CONFIG_PATTERN)?;
    let mut elections: Vec<TrackedElection> = Vec::new();
    for line in config_lines(contents) {
        let caps = pattern
            .captures(line)
            .context(InvalidElectionLineSnafu { path, line })?;
        let election = TrackedElection {
            date: caps[1].to_string(),
            name: caps[2].to_string(),
        };
        debug!("parse_election_config: slot {}: {:?}", elections.len(), election);
        elections.push(election);
    }
    ElectionConfig::new(elections).context(InvalidElectionConfigSnafu { path })
}

/// Reads a list of sub-district codes, one per line.
///
/// A missing file is not an error: it means that no filter applies.
pub fn read_district_filter(path: &Path) -> TransformResult<HashSet<String>> {
    let path_s = path.display().to_string();
    info!("Reading district filter from {}", path_s);
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("File not found - no filter will be applied.");
            return Ok(HashSet::new());
        }
        Err(e) => return Err(e).context(OpeningConfigSnafu { path: &path_s }),
    };
    let districts = parse_district_filter(&contents, &path_s)?;
    if districts.is_empty() {
        info!("File empty - no filter will be applied.");
    } else {
        info!("{} districts loaded to include.", districts.len());
    }
    Ok(districts)
}

pub fn parse_district_filter(contents: &str, path: &str) -> TransformResult<HashSet<String>> {
    let pattern = compile(DISTRICT_CONFIG_PATTERN)?;
    let mut districts: HashSet<String> = HashSet::new();
    for line in config_lines(contents) {
        ensure!(
            pattern.is_match(line),
            InvalidDistrictLineSnafu { path, line }
        );
        districts.insert(line.to_string());
    }
    Ok(districts)
}
