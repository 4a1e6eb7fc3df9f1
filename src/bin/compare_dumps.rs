//! Compare two `key=value` output dumps within a numeric tolerance.
//!
//! # Usage
//!
//! ```bash
//! compare-dumps cilk_output.txt openmp_output.txt
//! compare-dumps --tolerance 1e-9 reference.txt candidate.txt
//! ```
//!
//! Exits with 0 when every reference key matches, 1 otherwise.

use clap::{Arg, Command, value_parser};
use dump_compare::{Dump, compare};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("compare-dumps")
        .version("0.1.0")
        .about("Compare key=value output dumps with a numeric tolerance")
        .arg(
            Arg::new("reference")
                .help("Dump produced by the original build")
                .required(true)
                .value_name("REFERENCE")
                .index(1),
        )
        .arg(
            Arg::new("candidate")
                .help("Dump produced by the converted build")
                .required(true)
                .value_name("CANDIDATE")
                .index(2),
        )
        .arg(
            Arg::new("tolerance")
                .long("tolerance")
                .short('t')
                .help("Largest accepted absolute difference")
                .value_name("TOLERANCE")
                .value_parser(value_parser!(f64))
                .default_value("1e-12"),
        )
        .get_matches();

    let reference = matches
        .get_one::<String>("reference")
        .ok_or("Reference dump is required")?;
    let candidate = matches
        .get_one::<String>("candidate")
        .ok_or("Candidate dump is required")?;
    let tolerance = *matches
        .get_one::<f64>("tolerance")
        .ok_or("Tolerance is required")?;

    let comparison = compare(
        &Dump::from_path(reference)?,
        &Dump::from_path(candidate)?,
        tolerance,
    );
    println!("{comparison}");

    std::process::exit(comparison.exit_code());
}
