use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "liftbeam")]
#[command(about = "Elevator machine support beam calculator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the three-beam calculation for a structure input file
    Calculate {
        /// Structure input (.json)
        input: PathBuf,

        /// Design factors (.json); defaults when omitted
        #[arg(short, long)]
        factors: Option<PathBuf>,

        /// Steel catalog (.json or AISC .csv); built-in W-shapes when omitted
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Only consider one shape type (W, M, S, HP, C, MC)
        #[arg(long)]
        shape: Option<String>,

        /// Write the JSON result to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the JSON result instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Print a sample structure input as JSON
    Sample,
}
