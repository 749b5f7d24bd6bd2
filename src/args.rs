use clap::Parser;

/// Builds one spreadsheet per congressional district from the Secretary of State
/// voter history extracts, with a column per tracked election.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (directory, default 'input') The directory containing the ElectionXX.txt and VoterXX.txt files.
    #[clap(short, long, value_parser, default_value = "input")]
    pub input: String,

    /// (directory, default 'config') The directory containing elections.txt and the optional
    /// senateDistricts.txt and schoolDistricts.txt filters.
    #[clap(short, long, value_parser, default_value = "config")]
    pub config: String,

    /// (directory, default 'output') Where the CDX.xlsx reports are written. This directory is deleted
    /// and created again at every run.
    #[clap(long, value_parser, default_value = "output")]
    pub output: String,

    /// (file path, 'stdout' or empty) If specified, a summary of the run will be written in JSON format
    /// to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (directory or empty) A directory of reference reports. If provided, every generated report is
    /// compared with the report of the same name in this directory, and the run fails on any difference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
