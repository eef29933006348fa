//! Compile command: term configuration → JSON term table.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use term_week::{store, TableBuilder, TermConfigFile, WeekClock};

use crate::cli::CompileArgs;

pub fn run(args: CompileArgs, clock: WeekClock) -> Result<()> {
    let _cmd = info_span!("compile").entered();

    let config = TermConfigFile::load(&args.config)
        .with_context(|| format!("failed to load term config: {}", args.config.display()))?;
    info!(path = %args.config.display(), terms = config.len(), "term config loaded");

    let table = TableBuilder::new(&clock)
        .build(&config)
        .context("failed to compile term table")?;

    store::save(&table, &args.output)
        .with_context(|| format!("failed to write term table: {}", args.output.display()))?;
    info!(path = %args.output.display(), "term table written");

    println!("compiled {} terms into {}", table.len(), args.output.display());
    Ok(())
}
