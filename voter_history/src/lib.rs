/*!
Joins the voter roster of a congressional district with the election history of
its voters.

The pipeline has two phases:
- the election history files of all the districts are read once, with an
  [`builder::ElectionIndexBuilder`], into an [`ElectionIndex`]: for every voter,
  the participation method in each tracked election;
- the roster of each district is then streamed line by line: every record is
  checked against the [`DistrictFilters`], turned into an [`report::OutputRow`]
  by the [`ReportRowAssembler`] and written by a [`report::ReportWriter`].

```
use voter_history::*;
use voter_history::builder::ElectionIndexBuilder;
use voter_history::records::VoterRecord;
use voter_history::report::{MemorySheet, ReportWriter};

let config = ElectionConfig::new(vec![TrackedElection {
    date: "11/06/2018".to_string(),
    name: "General Election".to_string(),
}])?;
let mut builder = ElectionIndexBuilder::new(&config);
builder.add_line(r#""1001","11/06/2018","","AB""#)?;
let index = builder.finalize();

let filters = DistrictFilters::default();
let mut assembler = ReportRowAssembler::new(&config, &index);
let mut writer = ReportWriter::new(MemorySheet::new());

let mut fields = vec![""; VoterRecord::MIN_FIELDS];
fields[0] = "1001";
fields[1] = "27";
let record = VoterRecord::from_fields(fields)?;
if filters.includes(&record) {
    writer.append(&assembler.assemble(&record)).unwrap();
}
let (sheet, _) = writer.finish();
assert_eq!(sheet.row(0).unwrap().get(1), Some("Hennepin"));

# Ok::<(), VoterHistoryError>(())
```
*/

pub mod builder;
mod config;
pub mod counties;
pub mod line;
pub mod records;
pub mod report;

use log::{debug, warn};
use std::collections::HashMap;

pub use crate::config::*;
use crate::records::{RosterRow, VoterRecord, VOTER_COUNTY};
use crate::report::OutputRow;

/// The participation methods of one voter, one slot per tracked election.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParticipationVector(Vec<Option<String>>);

impl ParticipationVector {
    pub fn empty(num_slots: usize) -> ParticipationVector {
        ParticipationVector(vec![None; num_slots])
    }

    /// Sets a slot and returns the value it replaced.
    pub fn set(&mut self, slot: usize, method: String) -> Option<String> {
        self.0.get_mut(slot).and_then(|s| s.replace(method))
    }

    pub fn get(&self, slot: usize) -> Option<&str> {
        self.0.get(slot).and_then(|s| s.as_deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recorded slots, with their methods.
    pub fn recorded(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(slot, m)| m.as_deref().map(|m| (slot, m)))
    }
}

/// The participation vectors of all the voters found in the election history files.
///
/// It is shared by all the districts: voter ids are assumed to be unique across
/// the whole dataset.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionIndex {
    pub(crate) vectors: HashMap<VoterId, ParticipationVector>,
}

impl ElectionIndex {
    pub fn get(&self, voter: VoterId) -> Option<&ParticipationVector> {
        self.vectors.get(&voter)
    }

    /// The participation method of a voter in the election of this slot.
    pub fn method(&self, voter: VoterId, slot: usize) -> Option<&str> {
        self.get(voter).and_then(|v| v.get(slot))
    }

    /// The number of voters indexed.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl DistrictFilters {
    /// Decides if a roster record goes into the report.
    ///
    /// The header is always kept. Other records must pass both the senate and the
    /// school filters.
    pub fn includes(&self, record: &VoterRecord) -> bool {
        if record.is_header() {
            return true;
        }
        let senate_ok = self.senate.is_empty() || self.senate.contains(record.senate_district);
        let school_ok = self.school.is_empty() || self.school.contains(record.school_district);
        senate_ok && school_ok
    }
}

/// Turns the roster records of one district into report rows.
///
/// A new assembler must be used for each district: the number of roster
/// columns is taken from the header of the district.
pub struct ReportRowAssembler<'a> {
    config: &'a ElectionConfig,
    index: &'a ElectionIndex,
    base_width: Option<usize>,
}

impl<'a> ReportRowAssembler<'a> {
    pub fn new(config: &'a ElectionConfig, index: &'a ElectionIndex) -> ReportRowAssembler<'a> {
        ReportRowAssembler {
            config,
            index,
            base_width: None,
        }
    }

    /// The number of roster columns, once the header has been seen.
    pub fn base_width(&self) -> Option<usize> {
        self.base_width
    }

    pub fn assemble(&mut self, record: &VoterRecord) -> OutputRow {
        match record.row {
            RosterRow::Header => self.assemble_header(record),
            RosterRow::Voter(voter) => self.assemble_voter(voter, record),
        }
    }

    fn assemble_header(&mut self, record: &VoterRecord) -> OutputRow {
        let base_width = record.fields.len();
        debug!("assemble_header: base width {}", base_width);
        self.base_width = Some(base_width);

        let mut row = OutputRow::new();
        for (idx, value) in record.fields.iter().enumerate() {
            row.set(idx, *value);
        }
        for (slot, name) in self.config.names().enumerate() {
            row.set(base_width + slot, name);
        }
        row
    }

    fn assemble_voter(&self, voter: VoterId, record: &VoterRecord) -> OutputRow {
        let mut row = OutputRow::new();
        for (idx, value) in record.fields.iter().enumerate() {
            row.set(idx, *value);
        }
        if let Some(county) = counties::county_name(record.county_code) {
            row.set(VOTER_COUNTY, county);
        }

        let base_width = match self.base_width {
            Some(w) => w,
            None => {
                warn!(
                    "assemble_voter: voter {:?} comes before any header, using its own width",
                    voter
                );
                record.fields.len()
            }
        };
        if let Some(vector) = self.index.get(voter) {
            for (slot, method) in vector.recorded() {
                row.set(base_width + slot, method);
            }
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::builder::ElectionIndexBuilder;
    use super::records::tests::roster_line;
    use super::*;
    use std::collections::HashSet;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn config() -> ElectionConfig {
        ElectionConfig::new(vec![
            TrackedElection {
                date: "11/06/2018".to_string(),
                name: "General 2018".to_string(),
            },
            TrackedElection {
                date: "08/14/2018".to_string(),
                name: "Primary 2018".to_string(),
            },
            TrackedElection {
                date: "11/08/2016".to_string(),
                name: "General 2016".to_string(),
            },
        ])
        .unwrap()
    }

    fn index(config: &ElectionConfig, lines: &[&str]) -> ElectionIndex {
        let mut b = ElectionIndexBuilder::new(config);
        for l in lines {
            b.add_line(l).unwrap();
        }
        b.finalize()
    }

    fn codes(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|s| s.to_string()).collect()
    }

    const BASE: usize = VoterRecord::MIN_FIELDS;

    #[test]
    fn config_rejects_empty_and_duplicates() {
        assert_eq!(
            ElectionConfig::new(vec![]),
            Err(VoterHistoryError::EmptyElectionConfig)
        );
        let e = TrackedElection {
            date: "11/06/2018".to_string(),
            name: "A".to_string(),
        };
        assert_eq!(
            ElectionConfig::new(vec![e.clone(), e]),
            Err(VoterHistoryError::DuplicateElectionDate(
                "11/06/2018".to_string()
            ))
        );
    }

    #[test]
    fn config_slots_follow_registration() {
        let c = config();
        assert_eq!(c.slot_of("11/06/2018"), Some(0));
        assert_eq!(c.slot_of("11/08/2016"), Some(2));
        assert_eq!(c.slot_of("ElectionDate"), None);
        assert_eq!(
            c.names().collect::<Vec<_>>(),
            vec!["General 2018", "Primary 2018", "General 2016"]
        );
    }

    #[test]
    fn filters_compose_with_and() {
        let header = roster_line("VoterId", "CountyCode", "SchoolDistNum", "SenateDistrict");
        let both = roster_line("1", "27", "625", "41");
        let senate_only = roster_line("2", "27", "11", "41");
        let school_only = roster_line("3", "27", "625", "66");
        let neither = roster_line("4", "27", "11", "66");
        let records: Vec<VoterRecord> = [&header, &both, &senate_only, &school_only, &neither]
            .iter()
            .map(|l| VoterRecord::from_line(l).unwrap())
            .collect();

        let filters = DistrictFilters::new(codes(&["41"]), codes(&["625"]));
        let kept: Vec<bool> = records.iter().map(|r| filters.includes(r)).collect();
        assert_eq!(kept, vec![true, true, false, false, false]);

        let senate = DistrictFilters::new(codes(&["41"]), HashSet::new());
        let kept: Vec<bool> = records.iter().map(|r| senate.includes(r)).collect();
        assert_eq!(kept, vec![true, true, true, false, false]);

        let school = DistrictFilters::new(HashSet::new(), codes(&["625", "11"]));
        let kept: Vec<bool> = records.iter().map(|r| school.includes(r)).collect();
        assert_eq!(kept, vec![true, true, true, true, true]);

        let none = DistrictFilters::default();
        assert!(none.is_empty());
        assert!(records.iter().all(|r| none.includes(r)));
    }

    #[test]
    fn header_gets_election_names() {
        init();
        let c = config();
        let idx = index(&c, &[]);
        let mut a = ReportRowAssembler::new(&c, &idx);
        let header = roster_line("VoterId", "CountyCode", "SchoolDistNum", "SenateDistrict");
        let row = a.assemble(&VoterRecord::from_line(&header).unwrap());
        assert_eq!(a.base_width(), Some(BASE));
        assert_eq!(row.width(), BASE + 3);
        assert_eq!(row.get(1), Some("CountyCode"));
        assert_eq!(row.get(BASE), Some("General 2018"));
        assert_eq!(row.get(BASE + 1), Some("Primary 2018"));
        assert_eq!(row.get(BASE + 2), Some("General 2016"));
    }

    #[test]
    fn voter_rows_are_ragged() {
        init();
        let c = config();
        let idx = index(
            &c,
            &[
                r#""1001","11/06/2018","","AB""#,
                r#""1002","08/14/2018","","MB""#,
                r#""1002","11/05/2019","","P""#,
            ],
        );
        let mut a = ReportRowAssembler::new(&c, &idx);
        let header = roster_line("VoterId", "CountyCode", "SchoolDistNum", "SenateDistrict");
        a.assemble(&VoterRecord::from_line(&header).unwrap());

        let line = roster_line("1001", "27", "625", "41");
        let row = a.assemble(&VoterRecord::from_line(&line).unwrap());
        assert_eq!(row.get(1), Some("Hennepin"));
        assert_eq!(row.get(BASE), Some("AB"));
        assert_eq!(row.width(), BASE + 1);

        // A gap in the middle: only the recorded slot is written.
        let line = roster_line("1002", "62", "625", "41");
        let row = a.assemble(&VoterRecord::from_line(&line).unwrap());
        assert_eq!(row.get(BASE), None);
        assert_eq!(row.get(BASE + 1), Some("MB"));
        assert_eq!(row.len(), BASE + 1);

        let line = roster_line("1003", "27", "625", "41");
        let row = a.assemble(&VoterRecord::from_line(&line).unwrap());
        assert_eq!(row.width(), BASE);
    }

    #[test]
    fn unknown_county_is_kept() {
        let c = config();
        let idx = index(&c, &[]);
        let mut a = ReportRowAssembler::new(&c, &idx);
        let line = roster_line("1001", "99", "625", "41");
        let row = a.assemble(&VoterRecord::from_line(&line).unwrap());
        assert_eq!(row.get(1), Some("99"));
    }

    #[test]
    fn base_width_follows_the_header() {
        let c = config();
        let idx = index(&c, &[r#""1001","11/06/2018","","AB""#]);
        let mut a = ReportRowAssembler::new(&c, &idx);
        // A header with two extra columns.
        let header = format!(
            "{},\"Extra1\",\"Extra2\"",
            roster_line("VoterId", "CountyCode", "SchoolDistNum", "SenateDistrict")
        );
        a.assemble(&VoterRecord::from_line(&header).unwrap());
        assert_eq!(a.base_width(), Some(BASE + 2));
        let line = roster_line("1001", "27", "625", "41");
        let row = a.assemble(&VoterRecord::from_line(&line).unwrap());
        assert_eq!(row.get(BASE + 2), Some("AB"));
        assert_eq!(row.get(BASE), None);
    }

    #[test]
    fn values_come_from_the_voter_history_only() {
        let c = config();
        let idx = index(
            &c,
            &[
                r#""1001","11/06/2018","","AB""#,
                r#""1002","08/14/2018","","MB""#,
                r#""1003","11/08/2016","","P""#,
            ],
        );
        let mut a = ReportRowAssembler::new(&c, &idx);
        let header = roster_line("VoterId", "CountyCode", "SchoolDistNum", "SenateDistrict");
        a.assemble(&VoterRecord::from_line(&header).unwrap());
        for id in ["1001", "1002", "1003"] {
            let line = roster_line(id, "27", "625", "41");
            let record = VoterRecord::from_line(&line).unwrap();
            let row = a.assemble(&record);
            let vid = VoterId::parse(id).unwrap();
            for slot in 0..c.len() {
                assert_eq!(row.get(BASE + slot), idx.method(vid, slot));
            }
        }
    }
}
