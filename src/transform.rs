use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use voter_history::builder::ElectionIndexBuilder;
use voter_history::records::VoterRecord;
use voter_history::report::ReportWriter;
use voter_history::*;

use std::fs;
use std::path::{Path, PathBuf};

use crate::transform::config_reader::*;
use crate::transform::io_lines::{latin1_lines, text_lines};
use crate::transform::io_xlsx::XlsxSheet;
use crate::transform::summary::*;

pub mod check;
pub mod config_reader;
pub mod discover;
pub mod io_lines;
pub mod io_xlsx;
pub mod summary;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TransformError {
    #[snafu(display("Input directory {path} did not exist and could not be created"))]
    CreatingInputDir {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(
        "Input directory {path} did not exist, it has been created: place the data files there"
    ))]
    MissingInputDir { path: String },
    #[snafu(display("Error looking for input files in {path}"))]
    ListingInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Unrecognized input file name: {filename}"))]
    UnrecognizedInputFile { filename: String },
    #[snafu(display("No input files found in {path}"))]
    NoInputFiles { path: String },
    #[snafu(display("Invalid pattern {pattern}"))]
    InvalidPattern {
        source: regex::Error,
        pattern: String,
    },

    #[snafu(display("Error reading configuration from {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid election configuration line in {path}: {line}"))]
    InvalidElectionLine { path: String, line: String },
    #[snafu(display("Invalid district configuration line in {path}: {line}"))]
    InvalidDistrictLine { path: String, line: String },
    #[snafu(display("Invalid election configuration in {path}"))]
    InvalidElectionConfig {
        source: VoterHistoryError,
        path: String,
    },

    #[snafu(display("Unable to create output directory {path}"))]
    OutputDir {
        source: std::io::Error,
        path: String,
    },

    #[snafu(display("Error opening input file {path}"))]
    OpeningInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading {path} at line {lineno}"))]
    ReadingInput {
        source: std::io::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error parsing {path} at line {lineno}"))]
    ParsingRecord {
        source: VoterHistoryError,
        path: String,
        lineno: usize,
    },

    #[snafu(display("Error writing report {path}"))]
    WritingXlsx {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook {path} has no sheet"))]
    EmptyExcel { path: String },

    #[snafu(display("Error serializing the run summary"))]
    SerializingSummary { source: serde_json::Error },
    #[snafu(display("Error writing the run summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TransformResult<T> = Result<T, TransformError>;

/// The message of an error followed by the messages of its causes.
pub fn describe(e: &dyn std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        msg.push_str(": ");
        msg.push_str(&s.to_string());
        source = s.source();
    }
    msg
}

fn path_str(p: &Path) -> String {
    p.display().to_string()
}

/// Everything a run needs, loaded once at startup.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TransformConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub elections: ElectionConfig,
    pub filters: DistrictFilters,
}

impl TransformConfig {
    pub fn load(
        input_dir: &Path,
        config_dir: &Path,
        output_dir: &Path,
    ) -> TransformResult<TransformConfig> {
        let elections = read_election_config(&config_dir.join(ELECTIONS_FILE))?;
        let senate = read_district_filter(&config_dir.join(SENATE_DISTRICTS_FILE))?;
        let school = read_district_filter(&config_dir.join(SCHOOL_DISTRICTS_FILE))?;
        Ok(TransformConfig {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            elections,
            filters: DistrictFilters::new(senate, school),
        })
    }

    pub fn report_path(&self, district: DistrictId) -> PathBuf {
        self.output_dir
            .join(format!("{}.xlsx", district.report_name()))
    }
}

/// Reads the election files of all the districts into one index.
///
/// Any error is fatal: a partial index would silently drop participation data.
pub fn build_index(
    config: &TransformConfig,
    districts: &[DistrictId],
) -> TransformResult<ElectionIndex> {
    let mut builder = ElectionIndexBuilder::new(&config.elections);
    for district in districts.iter() {
        let p = config.input_dir.join(district.election_file_name());
        let path = path_str(&p);
        info!("Reading election records for CD{} from {}", district, path);
        for (idx, line_r) in text_lines(&p)?.enumerate() {
            let lineno = idx + 1;
            let line = line_r.context(ReadingInputSnafu {
                path: &path,
                lineno,
            })?;
            if line.trim().is_empty() {
                continue;
            }
            builder.add_line(&line).context(ParsingRecordSnafu {
                path: &path,
                lineno,
            })?;
        }
        debug!(
            "build_index: after CD{}: {} voters indexed",
            district,
            builder.num_voters()
        );
    }
    let index = builder.finalize();
    info!("{} election records processed.", index.len());
    Ok(index)
}

/// Streams the voter file of one district into its report.
///
/// Returns the number of voters written. The report is only saved when the whole
/// file was read: on error, nothing is produced for this district.
pub fn process_district(
    config: &TransformConfig,
    index: &ElectionIndex,
    district: DistrictId,
) -> TransformResult<u32> {
    let p = config.input_dir.join(district.voter_file_name());
    let path = path_str(&p);
    let out_p = config.report_path(district);
    let out_path = path_str(&out_p);
    info!("Processing CD{}", district);

    let sheet = XlsxSheet::new(&district.report_name()).context(WritingXlsxSnafu {
        path: &out_path,
    })?;
    let mut writer = ReportWriter::new(sheet);
    let mut assembler = ReportRowAssembler::new(&config.elections, index);
    let mut skipped: u64 = 0;

    for (idx, line_r) in latin1_lines(&p)?.enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(ReadingInputSnafu {
            path: &path,
            lineno,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let record = VoterRecord::from_line(&line).context(ParsingRecordSnafu {
            path: &path,
            lineno,
        })?;
        if !config.filters.includes(&record) {
            skipped += 1;
            continue;
        }
        let row = assembler.assemble(&record);
        writer.append(&row).context(WritingXlsxSnafu { path: &out_path })?;
    }
    debug!(
        "process_district: CD{}: {} voters excluded by the district filters",
        district, skipped
    );

    let (sheet, data_rows) = writer.finish();
    info!("Writing {} records to {}", data_rows, out_path);
    sheet
        .save(&out_p)
        .context(WritingXlsxSnafu { path: &out_path })?;
    Ok(data_rows)
}

fn recreate_output_dir(output_dir: &Path) -> TransformResult<()> {
    let path = path_str(output_dir);
    if output_dir.exists() {
        fs::remove_dir_all(output_dir).context(OutputDirSnafu { path: &path })?;
    }
    fs::create_dir_all(output_dir).context(OutputDirSnafu { path: &path })
}

/// Runs the whole pipeline.
///
/// The districts are found first, then the configuration is loaded, the output
/// directory is emptied and the index is built. Each district is then processed in
/// turn; the failure of one district is reported and does not stop the others.
pub fn run_transform(
    input_dir: &Path,
    config_dir: &Path,
    output_dir: &Path,
) -> TransformResult<RunSummary> {
    let districts = discover::discover_districts(input_dir)?;
    let config = TransformConfig::load(input_dir, config_dir, output_dir)?;
    recreate_output_dir(&config.output_dir)?;

    let index = build_index(&config, &districts)?;
    let mut summary = RunSummary::new(&config.elections, index.len());

    for district in districts {
        match process_district(&config, &index, district) {
            Ok(rows) => summary.push(DistrictSummary::written(district, rows)),
            Err(e) => {
                warn!(
                    "Error processing the voter file for CD{}: {}",
                    district,
                    describe(&e)
                );
                summary.push(DistrictSummary::failed(district, &e));
            }
        }
    }

    info!("Job completed.");
    Ok(summary)
}

/// Compares the written reports with the reports of the same name in the reference
/// directory.
pub fn check_reports(
    summary: &RunSummary,
    output_dir: &Path,
    reference_dir: &Path,
) -> TransformResult<()> {
    let mut differences: Vec<String> = Vec::new();
    for name in summary.written_reports() {
        let file_name = format!("{}.xlsx", name);
        let same = check::check_against_reference(
            &output_dir.join(&file_name),
            &reference_dir.join(&file_name),
        )?;
        if !same {
            warn!("Found differences with the reference report {}", file_name);
            differences.push(name);
        }
    }
    if !differences.is_empty() {
        whatever!(
            "Difference detected between the generated and the reference reports: {:?}",
            differences
        )
    }
    Ok(())
}
