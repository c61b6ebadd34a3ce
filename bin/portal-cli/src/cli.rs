//! Argument parsing for the portal CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "portal-cli",
    about = "Key generation and launch scaffolding for portal deployments",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    GenerateKey(GenerateKeyArgs),

    InitParams(InitParamsArgs),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Generate a validator keypair", version)]
pub(crate) struct GenerateKeyArgs {
    #[arg(
        long,
        help = "optional seed for deterministic generation; omit for OS entropy"
    )]
    pub(crate) seed: Option<u64>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Scaffold a launch parameters file", version)]
pub(crate) struct InitParamsArgs {
    #[arg(long, help = "validator public keys in signing order", num_args = 1..)]
    pub(crate) validators: Vec<String>,

    #[arg(long, help = "signatures required per operation")]
    pub(crate) threshold: usize,

    #[arg(long, help = "the path to write the params file to")]
    pub(crate) output: PathBuf,
}
