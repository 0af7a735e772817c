use std::error::Error;

use apd_core::RngHandle;
use apd_exp::{generate, ExponentBounds, MatrixKind, ValueRanges};
use clap::Args;

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Largest matrix size to evaluate, starting from 2.
    #[arg(long, default_value_t = 5)]
    pub max_size: usize,
}

pub fn run(args: &DemoArgs) -> Result<(), Box<dyn Error>> {
    let ranges = ValueRanges::default();
    // Special cases never draw from the generator.
    let mut rng = RngHandle::from_seed(0);
    println!("{:>3}  {:<10} {:<24} {:>5}  classification", "n", "range", "matrix", "m1");
    for size in 2..=args.max_size {
        let bounds = ExponentBounds::for_size(size);
        for kind in MatrixKind::SPECIAL_CASES {
            let exponent = generate(kind, size, &ranges, &mut rng)?.solve().exponent;
            println!(
                "{:>3}  {:<10} {:<24} {:>5}  {:?}",
                size,
                format!("[{}, {}]", bounds.lower, bounds.upper),
                kind.label(),
                exponent.to_string(),
                bounds.classify(exponent)
            );
        }
    }
    Ok(())
}
