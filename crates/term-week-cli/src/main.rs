mod cli;
mod compile_cmd;
mod input;
mod logging;
mod output;
mod query_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let clock = input::clock(cli.now.as_deref())?;
    match cli.command {
        Command::Compile(args) => compile_cmd::run(args, clock),
        Command::Term(args) => query_cmd::term(args, clock),
        Command::Week(args) => query_cmd::week(args, clock),
        Command::Weeks(args) => query_cmd::weeks(args, clock),
        Command::Terms(args) => query_cmd::terms(args, clock),
    }
}
