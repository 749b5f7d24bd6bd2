mod args;
mod transform;

use args::Args;
use clap::Parser;
use log::{info, warn};
use snafu::ErrorCompat;
use std::path::Path;

use crate::transform::summary::write_summary;
use crate::transform::{check_reports, describe, run_transform, TransformResult};

fn run(args: &Args) -> TransformResult<()> {
    let output_dir = Path::new(args.output.as_str());
    let summary = run_transform(
        Path::new(args.input.as_str()),
        Path::new(args.config.as_str()),
        output_dir,
    )?;
    if summary.num_failed() > 0 {
        warn!(
            "{} district(s) could not be processed, see the messages above",
            summary.num_failed()
        );
    }
    if let Some(out) = &args.out {
        write_summary(&summary, out.as_str())?;
    }
    if let Some(reference) = &args.reference {
        check_reports(&summary, output_dir, Path::new(reference.as_str()))?;
        info!("All reports match the reference reports.");
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(&args) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", describe(&e));
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
