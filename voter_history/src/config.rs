// ********* Input data structures ***********

use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::Display;

/// The label found in the date column of the header line of an election history file.
pub const ELECTION_HEADER_DATE: &str = "ElectionDate";

/// The label found in the identity column of the header line of a voter roster file.
pub const VOTER_HEADER_ID: &str = "VoterId";

/// A congressional district, as named by the digit in the input file names.
///
/// The ordering follows the digit, which is the processing order of the districts.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct DistrictId(pub char);

impl DistrictId {
    /// The name of the sheet and of the output workbook (without extension).
    pub fn report_name(&self) -> String {
        format!("CD{}", self.0)
    }

    pub fn election_file_name(&self) -> String {
        format!("Election0{}.txt", self.0)
    }

    pub fn voter_file_name(&self) -> String {
        format!("Voter0{}.txt", self.0)
    }
}

impl Display for DistrictId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The join key between the election history and the voter roster.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct VoterId(pub u64);

impl VoterId {
    pub fn parse(raw: &str) -> Result<VoterId, VoterHistoryError> {
        raw.parse::<u64>()
            .map(VoterId)
            .map_err(|_| VoterHistoryError::InvalidVoterId(raw.to_string()))
    }
}

/// An election to report on.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TrackedElection {
    /// The date as written in the history files, e.g. `11/06/2018`.
    pub date: String,
    /// The header of the column in the report.
    pub name: String,
}

/// The ordered set of tracked elections.
///
/// The slot of an election is its position in registration order. Slots are
/// dense: `0..len()`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionConfig {
    elections: Vec<TrackedElection>,
    slots_by_date: HashMap<String, usize>,
}

impl ElectionConfig {
    pub fn new(elections: Vec<TrackedElection>) -> Result<ElectionConfig, VoterHistoryError> {
        if elections.is_empty() {
            return Err(VoterHistoryError::EmptyElectionConfig);
        }
        let mut slots_by_date: HashMap<String, usize> = HashMap::new();
        for (slot, election) in elections.iter().enumerate() {
            if slots_by_date.insert(election.date.clone(), slot).is_some() {
                return Err(VoterHistoryError::DuplicateElectionDate(
                    election.date.clone(),
                ));
            }
        }
        Ok(ElectionConfig {
            elections,
            slots_by_date,
        })
    }

    /// The slot of the election held at this date, if it is tracked.
    pub fn slot_of(&self, date: &str) -> Option<usize> {
        self.slots_by_date.get(date).cloned()
    }

    pub fn len(&self) -> usize {
        self.elections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elections.is_empty()
    }

    /// The display names, in slot order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.elections.iter().map(|e| e.name.as_str())
    }
}

/// Allow-lists of sub-district codes.
///
/// An empty set does not filter anything.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct DistrictFilters {
    pub senate: HashSet<String>,
    pub school: HashSet<String>,
}

impl DistrictFilters {
    pub fn new(senate: HashSet<String>, school: HashSet<String>) -> DistrictFilters {
        DistrictFilters { senate, school }
    }

    pub fn is_empty(&self) -> bool {
        self.senate.is_empty() && self.school.is_empty()
    }
}

/// Errors raised by the pipeline on malformed configuration or records.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VoterHistoryError {
    EmptyElectionConfig,
    DuplicateElectionDate(String),
    /// The record does not reach a column the pipeline needs.
    ShortRecord {
        expected: usize,
        found: usize,
    },
    InvalidVoterId(String),
}

impl Error for VoterHistoryError {}

impl Display for VoterHistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoterHistoryError::EmptyElectionConfig => write!(f, "no election configured"),
            VoterHistoryError::DuplicateElectionDate(date) => {
                write!(f, "election date {} is configured more than once", date)
            }
            VoterHistoryError::ShortRecord { expected, found } => write!(
                f,
                "record has {} fields, at least {} are required",
                found, expected
            ),
            VoterHistoryError::InvalidVoterId(raw) => write!(f, "invalid voter id {:?}", raw),
        }
    }
}
