use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use super::{BigcalcArgs, BigcalcCli};

impl BigcalcCli {
  pub fn completions(&self, CompletionsArgs { shell }: CompletionsArgs) -> Result<()> {
    let mut command = BigcalcArgs::command();
    let name = command.get_name().to_owned();
    generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
  }
}

#[derive(Clone, Args)]
pub struct CompletionsArgs {
  #[arg(value_enum)]
  shell: Shell,
}
