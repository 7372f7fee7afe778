use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use hrv_rmssd::source::FileSource;
use hrv_rmssd::workflow::{RunPlan, Runner};
use hrv_rmssd::Width;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "RMSSD of RR intervals at single, double and double-double precision"
)]
struct Args {
    /// Text file with one RR interval per line
    data: Option<PathBuf>,
    /// Load a run plan from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Evaluate only these widths (narrow, standard, extended), in the given order
    #[arg(long = "width")]
    widths: Vec<Width>,
    /// Round every sample to this many decimal places before the reduction
    #[arg(long)]
    round_to: Option<u32>,
    /// Decimal places shown for each result
    #[arg(long)]
    places: Option<usize>,
}

fn build_plan(args: &Args) -> anyhow::Result<RunPlan> {
    let mut plan = match &args.config {
        Some(path) => RunPlan::load(path)?,
        None => RunPlan::default(),
    };

    if !args.widths.is_empty() || args.round_to.is_some() {
        let widths = if args.widths.is_empty() {
            Width::ALL.to_vec()
        } else {
            args.widths.clone()
        };
        plan.evaluations = RunPlan::from_widths(&widths, args.round_to).evaluations;
    }
    if let Some(places) = args.places {
        plan.display_places = places;
    }
    if let Some(data) = &args.data {
        plan.data_file = Some(data.clone());
    }
    Ok(plan)
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let plan = build_plan(&args)?;
    let data_file = plan
        .data_file
        .clone()
        .context("no data file given; pass one as an argument or set data_file in the run plan")?;
    let places = plan.display_places;

    let runner = Runner::new(plan);
    let outcomes = runner.run_source(&FileSource::new(data_file))?;

    let mut failed = false;
    for outcome in &outcomes {
        println!("{}", outcome.evaluation.label());
        match &outcome.result {
            Ok(rmssd) => {
                println!("{}-bit float", rmssd.width().bits());
                println!("{}", rmssd.to_decimal_string(places));
            }
            Err(err) => {
                failed = true;
                eprintln!("ERROR: {err}");
            }
        }
        println!();
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
