use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use apd_exp::{
    from_json_slice, run_size, to_canonical_json_bytes, ExperimentPlan, ExperimentReport,
    SizeReport,
};
use clap::Args;
use log::info;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML (or `.json`) experiment plan; the built-in plan is used when omitted.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Override the plan's master seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Restrict the run to these matrix sizes (repeatable).
    #[arg(long = "size", value_name = "N")]
    pub sizes: Vec<usize>,
    /// Directory that receives `experiment_report.json`.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let mut plan = match &args.plan {
        Some(path) => load_plan(path)?,
        None => ExperimentPlan::default(),
    };
    if let Some(seed) = args.seed {
        plan = plan.with_seed(seed);
    }
    if !args.sizes.is_empty() {
        plan.sizes.retain(|size, _| args.sizes.contains(size));
    }
    plan.validate()?;
    info!("running {} sizes with seed {}", plan.sizes.len(), plan.seed);

    println!("APD minimal-exponent experiment (seed {})", plan.seed);
    println!();
    let mut sizes = Vec::with_capacity(plan.sizes.len());
    for &size in plan.sizes.keys() {
        let started = Instant::now();
        let report = run_size(&plan, size)?;
        print_size(&report, started.elapsed().as_secs_f64());
        sizes.push(report);
    }

    let report = ExperimentReport::assemble(&plan, sizes)?;
    if let Some(out) = &args.out {
        fs::create_dir_all(out)?;
        fs::write(
            out.join("experiment_report.json"),
            to_canonical_json_bytes(&report)?,
        )?;
        info!("wrote {}", out.join("experiment_report.json").display());
    }

    verdict(&report)?;
    println!(
        "No violations in {} samples: every finite m1 lies in [n-1, n(n-1)/2].",
        report.total_samples
    );
    Ok(())
}

/// Turns any violation into an error so the process exits nonzero.
fn verdict(report: &ExperimentReport) -> Result<(), Box<dyn Error>> {
    if report.conjecture_holds() {
        return Ok(());
    }
    let samples = report
        .sizes
        .iter()
        .flat_map(|size| {
            size.violation_records
                .iter()
                .map(move |record| format!("n = {} #{}", size.size, record.sample))
        })
        .collect::<Vec<_>>()
        .join(", ");
    Err(format!(
        "{} of {} samples fell outside [n-1, n(n-1)/2]: {samples}",
        report.total_violations, report.total_samples
    )
    .into())
}

fn load_plan(path: &Path) -> Result<ExperimentPlan, Box<dyn Error>> {
    let bytes = fs::read(path)?;
    let plan = if path.extension().is_some_and(|ext| ext == "json") {
        let plan: ExperimentPlan = from_json_slice(&bytes)?;
        plan.validate()?;
        plan
    } else {
        ExperimentPlan::from_yaml_str(std::str::from_utf8(&bytes)?)?
    };
    Ok(plan)
}

fn print_size(report: &SizeReport, elapsed: f64) {
    println!(
        "n = {} | range [{}, {}] | seed {:#018x}",
        report.size, report.bounds.lower, report.bounds.upper, report.seed
    );
    for case in &report.special_cases {
        println!("  special  {:<24} m1 = {}", case.kind.label(), case.exponent);
    }
    let distribution = report
        .distribution
        .iter()
        .map(|(exponent, count)| format!("{exponent}: {count}"))
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "  samples  {} | violations {}",
        report.samples, report.violations
    );
    println!("  m1 dist  {{{distribution}}}");
    println!(
        "  success  {:.2}% | {:.2}s",
        report.success_rate, elapsed
    );
    println!();
}
