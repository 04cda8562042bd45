use anyhow::Result;
use bigint_cli::{init_logging, BigcalcArgs, BigcalcCli};
use clap::Parser;

fn main() -> Result<()> {
  let BigcalcArgs { log, maybe_command } = BigcalcArgs::parse();
  init_logging(&log)?;
  BigcalcCli.execute(maybe_command)
}
