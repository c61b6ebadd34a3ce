//! Operator CLI for portal deployments: validator key generation and launch
//! parameter scaffolding.

use anyhow::{Error, Result};
use clap::Parser;
use portal_common::logging::{self, LoggerConfig};

use crate::handlers::{keys, params};

mod cli;
mod handlers;

fn main() -> Result<(), Error> {
    logging::init(LoggerConfig::new("portal-cli".to_string()));

    let cli = cli::Cli::parse();
    match cli.command {
        cli::Commands::GenerateKey(args) => keys::handle_generate_key(args),
        cli::Commands::InitParams(args) => params::handle_init_params(args),
    }
}
