//! Command-line interface for the converter.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cilk_rewrite::RewriteConfig;
use cilk_rewrite::config::{DEFAULT_INDEX_SYMBOL, DEFAULT_LENGTH_SYMBOL};

/// Log file used when `--log` is not given.
pub const DEFAULT_LOG_PATH: &str = "cilk_convert_ts.log";

#[derive(Parser)]
#[command(name = "cilk-simd")]
#[command(about = "Rewrite Cilk Plus array notation into OpenMP SIMD loops", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert one C source file
    Convert(ConvertArgs),
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Input C file using Cilk Plus array notation
    pub input: PathBuf,

    /// Where to write the converted C file
    pub output: PathBuf,

    /// Diagnostics log file
    #[arg(long, value_name = "LOG", default_value = DEFAULT_LOG_PATH)]
    pub log: PathBuf,

    /// Trip-count symbol for `[vALL]` slices and generated loops
    #[arg(long, value_name = "SYMBOL", default_value = DEFAULT_LENGTH_SYMBOL)]
    pub length_symbol: String,

    /// Index variable introduced by generated loops
    #[arg(long, value_name = "NAME", default_value = DEFAULT_INDEX_SYMBOL)]
    pub index: String,

    /// Do not render diagnostics on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

impl ConvertArgs {
    pub fn config(&self) -> RewriteConfig {
        RewriteConfig::default()
            .with_length_symbol(&self.length_symbol)
            .with_index_symbol(&self.index)
    }
}
