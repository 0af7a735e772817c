use std::error::Error;
use std::path::PathBuf;

use apd_exact::SolveReport;
use apd_exp::{to_canonical_json_pretty, Classification, ExponentBounds};
use clap::Args;
use serde::Serialize;

use super::matrix_file::load_matrix;

#[derive(Args, Debug)]
pub struct SolveArgs {
    /// JSON file holding an array of rows; entries are integers or "p/q" strings.
    #[arg(long)]
    pub matrix: PathBuf,
}

#[derive(Debug, Serialize)]
struct SolveOutput {
    input: String,
    report: SolveReport,
    bounds: ExponentBounds,
    classification: Classification,
}

pub fn run(args: &SolveArgs) -> Result<(), Box<dyn Error>> {
    let matrix = load_matrix(&args.matrix)?;
    let report = matrix.solve();
    let bounds = ExponentBounds::for_size(report.size);
    let output = SolveOutput {
        input: args.matrix.display().to_string(),
        classification: bounds.classify(report.exponent),
        report,
        bounds,
    };
    println!("{}", to_canonical_json_pretty(&output)?);
    Ok(())
}
