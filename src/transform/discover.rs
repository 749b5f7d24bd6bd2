// Finding the districts to process from the names of the input files.

use log::{info, warn};
use snafu::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use voter_history::DistrictId;

use crate::transform::config_reader::compile;
use crate::transform::*;

const INPUT_FILE_PATTERN: &str = r"^(?:Election|Voter)0(\d)\.txt$";

/// The districts with an election or a voter file in the input directory, sorted.
///
/// Every file of the directory must be an input file. A missing input directory is
/// created for the operator, but the run still fails.
pub fn discover_districts(input_dir: &Path) -> TransformResult<Vec<DistrictId>> {
    let path = input_dir.display().to_string();
    info!("Looking for Secretary of State data files in {}", path);

    if !input_dir.is_dir() {
        warn!("Input directory {} does not exist - creating it.", path);
        fs::create_dir_all(input_dir).context(CreatingInputDirSnafu { path: &path })?;
        return MissingInputDirSnafu { path }.fail();
    }

    let pattern = compile(INPUT_FILE_PATTERN)?;
    let mut districts: BTreeSet<DistrictId> = BTreeSet::new();
    for entry_r in fs::read_dir(input_dir).context(ListingInputSnafu { path: &path })? {
        let entry = entry_r.context(ListingInputSnafu { path: &path })?;
        let filename = entry.file_name().to_string_lossy().to_string();
        let district = pattern
            .captures(&filename)
            .and_then(|caps| caps[1].chars().next())
            .context(UnrecognizedInputFileSnafu {
                filename: &filename,
            })?;
        districts.insert(DistrictId(district));
    }

    ensure!(!districts.is_empty(), NoInputFilesSnafu { path });
    info!(
        "Found districts: {}",
        districts
            .iter()
            .map(|d| d.report_name())
            .collect::<Vec<String>>()
            .join(", ")
    );
    Ok(districts.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn sorted_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["Voter03.txt", "Election01.txt", "Voter01.txt", "Election03.txt", "Election02.txt"] {
            touch(dir.path(), name);
        }
        let d = discover_districts(dir.path()).unwrap();
        assert_eq!(d, vec![DistrictId('1'), DistrictId('2'), DistrictId('3')]);
    }

    #[test]
    fn unrecognized_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Voter01.txt");
        touch(dir.path(), "notes.txt");
        let r = discover_districts(dir.path());
        assert!(matches!(
            r,
            Err(TransformError::UnrecognizedInputFile { filename }) if filename == "notes.txt"
        ));
    }

    #[test]
    fn pattern_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Voter01xtxt");
        assert!(matches!(
            discover_districts(dir.path()),
            Err(TransformError::UnrecognizedInputFile { .. })
        ));
    }

    #[test]
    fn empty_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            discover_districts(dir.path()),
            Err(TransformError::NoInputFiles { .. })
        ));
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input");
        assert!(matches!(
            discover_districts(&input),
            Err(TransformError::MissingInputDir { .. })
        ));
        assert!(input.is_dir());
    }
}
