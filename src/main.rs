//! cilk-simd CLI entry point.

mod cli;
mod diagnostics;

use clap::Parser;
use cli::{Cli, Command, ConvertArgs};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Convert(args) => {
            if let Err(e) = convert(&args) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn convert(args: &ConvertArgs) -> cilk_rewrite::Result<()> {
    let run = cilk_rewrite::convert_file(&args.input, &args.output, &args.log, args.config())?;
    let warnings = &run.outcome.diagnostics;
    tracing::info!(
        input = %args.input.display(),
        conversions = run.outcome.conversions,
        warnings = warnings.len(),
        "conversion finished"
    );

    if !args.quiet && !warnings.is_empty() {
        let source = String::from_utf8_lossy(&run.source);
        let file_path = args.input.display().to_string();
        for diag in warnings {
            diagnostics::print_diagnostic(diag, &source, &file_path);
        }
    }

    println!("Converted {} Cilk Plus constructs", run.outcome.conversions);
    if !warnings.is_empty() {
        println!(
            "Warnings: {} (see {})",
            warnings.len(),
            args.log.display()
        );
    }
    Ok(())
}
