use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Smart diet calculator: energy needs, macros and personal advice.
#[derive(Parser, Debug)]
#[command(name = "smart_diet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Read the profile from a JSON file instead of prompting.
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Skip the advice request.
    #[arg(long)]
    pub no_advice: bool,

    /// Print the plan and advice as JSON.
    #[arg(long)]
    pub json: bool,

    /// Export the generated weekly menu to a CSV file.
    #[arg(long)]
    pub menu_csv: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Calculate the plan and request advice.
    #[default]
    Plan,

    /// Print an example profile file.
    Example,
}
