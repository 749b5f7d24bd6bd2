// Named records over the positional columns of the state extracts.
// A change of layout in the extracts only requires updating the column
// constants below.

use crate::config::*;
use crate::line::split_quoted;

// Columns of the election history files.
const ELECTION_VOTER_ID: usize = 0;
const ELECTION_DATE: usize = 1;
const ELECTION_METHOD: usize = 3;

// Columns of the voter roster files.
const VOTER_VOTER_ID: usize = 0;
pub const VOTER_COUNTY: usize = 1;
const VOTER_SCHOOL_DISTRICT: usize = 26;
const VOTER_SENATE_DISTRICT: usize = 30;

fn field<'a>(fields: &[&'a str], idx: usize, min_len: usize) -> Result<&'a str, VoterHistoryError> {
    fields
        .get(idx)
        .cloned()
        .ok_or(VoterHistoryError::ShortRecord {
            expected: min_len,
            found: fields.len(),
        })
}

/// One line of an election history file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ElectionRecord<'a> {
    Header,
    Participation(ElectionLine<'a>),
}

/// A non-header line of an election history file.
///
/// Only the date is checked up front: the other columns are resolved on demand,
/// for the tracked elections.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionLine<'a> {
    pub date: &'a str,
    fields: Vec<&'a str>,
}

impl<'a> ElectionLine<'a> {
    const MIN_FIELDS: usize = ELECTION_METHOD + 1;

    pub fn voter_id(&self) -> Result<VoterId, VoterHistoryError> {
        VoterId::parse(field(&self.fields, ELECTION_VOTER_ID, Self::MIN_FIELDS)?)
    }

    pub fn method(&self) -> Result<&'a str, VoterHistoryError> {
        field(&self.fields, ELECTION_METHOD, Self::MIN_FIELDS)
    }
}

impl<'a> ElectionRecord<'a> {
    pub fn from_line(line: &'a str) -> Result<ElectionRecord<'a>, VoterHistoryError> {
        let fields = split_quoted(line);
        let date = field(&fields, ELECTION_DATE, ELECTION_DATE + 1)?;
        if date == ELECTION_HEADER_DATE {
            return Ok(ElectionRecord::Header);
        }
        Ok(ElectionRecord::Participation(ElectionLine { date, fields }))
    }
}

/// What the identity column of a roster line holds.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RosterRow {
    Header,
    Voter(VoterId),
}

/// One line of a voter roster file.
///
/// All the raw fields are kept in file order for the report, and the
/// columns used by the pipeline are also exposed by name.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoterRecord<'a> {
    pub row: RosterRow,
    pub county_code: &'a str,
    pub school_district: &'a str,
    pub senate_district: &'a str,
    pub fields: Vec<&'a str>,
}

impl<'a> VoterRecord<'a> {
    pub const MIN_FIELDS: usize = VOTER_SENATE_DISTRICT + 1;

    pub fn from_line(line: &'a str) -> Result<VoterRecord<'a>, VoterHistoryError> {
        VoterRecord::from_fields(split_quoted(line))
    }

    pub fn from_fields(fields: Vec<&'a str>) -> Result<VoterRecord<'a>, VoterHistoryError> {
        let raw_id = field(&fields, VOTER_VOTER_ID, Self::MIN_FIELDS)?;
        let county_code = field(&fields, VOTER_COUNTY, Self::MIN_FIELDS)?;
        let school_district = field(&fields, VOTER_SCHOOL_DISTRICT, Self::MIN_FIELDS)?;
        let senate_district = field(&fields, VOTER_SENATE_DISTRICT, Self::MIN_FIELDS)?;
        let row = if raw_id == VOTER_HEADER_ID {
            RosterRow::Header
        } else {
            RosterRow::Voter(VoterId::parse(raw_id)?)
        };
        Ok(VoterRecord {
            row,
            county_code,
            school_district,
            senate_district,
            fields,
        })
    }

    pub fn is_header(&self) -> bool {
        self.row == RosterRow::Header
    }
}
