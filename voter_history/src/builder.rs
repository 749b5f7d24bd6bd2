use log::debug;
use std::collections::HashMap;

pub use crate::config::*;
use crate::records::ElectionRecord;
use crate::{ElectionIndex, ParticipationVector};

/// What happened to a line given to the builder.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum LineOutcome {
    Header,
    /// The date of the line is not a tracked election.
    Untracked,
    Recorded(VoterId),
}

/// A builder for the election index.
///
/// Lines of the election history files are added one at a time, in file order.
/// When the same voter has several lines for the same election, the last one wins.
///
/// ```
/// use voter_history::builder::*;
///
/// let config = ElectionConfig::new(vec![TrackedElection {
///     date: "11/06/2018".to_string(),
///     name: "General Election".to_string(),
/// }])?;
/// let mut builder = ElectionIndexBuilder::new(&config);
///
/// builder.add_line(r#""1001","11/06/2018","","AB""#)?;
/// builder.add_line(r#""1002","08/14/2018","","MB""#)?;
///
/// let index = builder.finalize();
/// assert_eq!(index.len(), 1);
/// assert_eq!(index.method(VoterId(1001), 0), Some("AB"));
///
/// # Ok::<(), VoterHistoryError>(())
/// ```
pub struct ElectionIndexBuilder<'c> {
    config: &'c ElectionConfig,
    vectors: HashMap<VoterId, ParticipationVector>,
    lines_recorded: u64,
}

impl<'c> ElectionIndexBuilder<'c> {
    pub fn new(config: &'c ElectionConfig) -> ElectionIndexBuilder<'c> {
        ElectionIndexBuilder {
            config,
            vectors: HashMap::new(),
            lines_recorded: 0,
        }
    }

    /// Adds a raw line of an election history file.
    pub fn add_line(&mut self, line: &str) -> Result<LineOutcome, VoterHistoryError> {
        match ElectionRecord::from_line(line)? {
            ElectionRecord::Header => Ok(LineOutcome::Header),
            ElectionRecord::Participation(line) => match self.config.slot_of(line.date) {
                None => Ok(LineOutcome::Untracked),
                Some(slot) => {
                    let vid = line.voter_id()?;
                    self.record(vid, slot, line.method()?);
                    Ok(LineOutcome::Recorded(vid))
                }
            },
        }
    }

    /// Sets the participation method of a voter for the election in this slot.
    pub fn record(&mut self, voter: VoterId, slot: usize, method: &str) {
        let num_slots = self.config.len();
        let vector = self
            .vectors
            .entry(voter)
            .or_insert_with(|| ParticipationVector::empty(num_slots));
        if let Some(previous) = vector.set(slot, method.to_string()) {
            debug!(
                "record: voter {:?} slot {}: replacing {:?} by {:?}",
                voter, slot, previous, method
            );
        }
        self.lines_recorded += 1;
    }

    /// The number of distinct voters seen so far.
    pub fn num_voters(&self) -> usize {
        self.vectors.len()
    }

    pub fn finalize(self) -> ElectionIndex {
        debug!(
            "finalize: {} voters from {} recorded lines",
            self.vectors.len(),
            self.lines_recorded
        );
        ElectionIndex {
            vectors: self.vectors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
        ])
        .unwrap()
    }

    #[test]
    fn header_and_untracked_lines() {
        let config = config();
        let mut b = ElectionIndexBuilder::new(&config);
        assert_eq!(
            b.add_line(r#""VoterId","ElectionDate","ElectionDescription","VotingMethod""#),
            Ok(LineOutcome::Header)
        );
        assert_eq!(
            b.add_line(r#""1001","11/08/2016","","P""#),
            Ok(LineOutcome::Untracked)
        );
        assert!(b.finalize().is_empty());
    }

    #[test]
    fn untracked_lines_do_not_need_a_valid_id() {
        let config = config();
        let mut b = ElectionIndexBuilder::new(&config);
        assert_eq!(
            b.add_line(r#""n/a","11/08/2016","","P""#),
            Ok(LineOutcome::Untracked)
        );
        assert_eq!(
            b.add_line(r#""n/a","11/06/2018","","P""#),
            Err(VoterHistoryError::InvalidVoterId("n/a".to_string()))
        );
    }

    #[test]
    fn untracked_lines_do_not_need_all_columns() {
        let config = config();
        let mut b = ElectionIndexBuilder::new(&config);
        assert_eq!(
            b.add_line(r#""1001","11/08/2016","General""#),
            Ok(LineOutcome::Untracked)
        );
        assert_eq!(
            b.add_line(r#""1001","11/06/2018","General""#),
            Err(VoterHistoryError::ShortRecord {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(b.num_voters(), 0);
    }

    #[test]
    fn fills_slots_in_registration_order() {
        let config = config();
        let mut b = ElectionIndexBuilder::new(&config);
        b.add_line(r#""1001","08/14/2018","","MB""#).unwrap();
        b.add_line(r#""1001","11/06/2018","","AB""#).unwrap();
        b.add_line(r#""1002","11/06/2018","","P""#).unwrap();
        assert_eq!(b.num_voters(), 2);
        let index = b.finalize();
        assert_eq!(index.method(VoterId(1001), 0), Some("AB"));
        assert_eq!(index.method(VoterId(1001), 1), Some("MB"));
        assert_eq!(index.method(VoterId(1002), 0), Some("P"));
        assert_eq!(index.method(VoterId(1002), 1), None);
        assert_eq!(index.get(VoterId(1003)), None);
    }

    #[test]
    fn last_write_wins() {
        let config = config();
        let mut b = ElectionIndexBuilder::new(&config);
        b.add_line(r#""1001","11/06/2018","","AB""#).unwrap();
        b.add_line(r#""1001","11/06/2018","","P""#).unwrap();
        let index = b.finalize();
        assert_eq!(index.method(VoterId(1001), 0), Some("P"));
    }

    #[test]
    fn vectors_have_one_slot_per_election() {
        let config = config();
        let mut b = ElectionIndexBuilder::new(&config);
        b.record(VoterId(7), 1, "AB");
        let index = b.finalize();
        let v = index.get(VoterId(7)).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v.get(0), None);
        assert_eq!(v.get(1), Some("AB"));
    }
}
