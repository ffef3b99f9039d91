use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

#[derive(Parser)]
#[command(
    name = "chainlog",
    about = "Chainlog: append-only, hash-linked block ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format; overrides the config file
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the genesis block shared by every chain
    Genesis,
    /// Build a chain from payloads and verify it
    Build(BuildArgs),
    /// Verify a chain snapshot file
    Verify(VerifyArgs),
    /// Interactive prompt over an in-memory chain
    Shell,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Payloads appended in order
    pub payloads: Vec<String>,
    /// Read additional payloads from a file, one raw byte line per payload
    #[arg(short, long)]
    pub file: Option<PathBuf>,
    /// Write the resulting chain as a JSON snapshot
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct VerifyArgs {
    pub path: PathBuf,
}
