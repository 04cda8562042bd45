use std::{fs, io, process::exit};

use anyhow::{Context, Result};
use calc::Calc;
use clap::Args;

use super::BigcalcCli;
use crate::eval_source;

impl BigcalcCli {
  pub fn run(&self, RunArgs { src }: RunArgs) -> Result<()> {
    let contents = fs::read_to_string(&src).with_context(|| format!("could not read `{src}`"))?;
    if !eval_source(&mut Calc::new(), &src, &contents, &mut io::stdout().lock())? {
      exit(1);
    }
    Ok(())
  }
}

#[derive(Clone, Args)]
pub struct RunArgs {
  #[arg(index = 1, default_value = "main.calc")]
  src: String,
}
