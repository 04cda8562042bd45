mod completions;
mod eval;
mod repl;
mod run;

use anyhow::Result;
use clap::{Parser, Subcommand};
use completions::CompletionsArgs;
use eval::EvalArgs;
use repl::ReplArgs;
use run::RunArgs;

#[derive(Clone, Parser)]
#[command(
  name = "bigcalc",
  version,
  about = "An arbitrary-precision integer calculator",
  propagate_version = true
)]
pub struct BigcalcArgs {
  #[clap(long, env = "BIGCALC_LOG", default_value = "warn")]
  pub log: String,
  #[command(subcommand)]
  pub maybe_command: Option<BigcalcCommand>,
}

pub struct BigcalcCli;

impl BigcalcCli {
  pub fn execute(&self, maybe_command: Option<BigcalcCommand>) -> Result<()> {
    match maybe_command {
      None => self.repl(ReplArgs::default()),
      Some(command) => match command {
        BigcalcCommand::Run(args) => self.run(args),
        BigcalcCommand::Eval(args) => self.eval(args),
        BigcalcCommand::Repl(args) => self.repl(args),
        BigcalcCommand::Completions(args) => self.completions(args),
      },
    }
  }
}

#[derive(Clone, Subcommand)]
pub enum BigcalcCommand {
  #[command(about = "Evaluate a calculator program")]
  Run(RunArgs),
  #[command(about = "Evaluate an expression given on the command line")]
  Eval(EvalArgs),
  #[command(about = "Start an interactive session")]
  Repl(ReplArgs),
  #[command(about = "Print shell completions")]
  Completions(CompletionsArgs),
}
