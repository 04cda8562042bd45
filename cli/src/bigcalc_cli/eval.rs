use std::{io, process::exit};

use anyhow::Result;
use calc::Calc;
use clap::Args;

use super::BigcalcCli;
use crate::eval_source;

impl BigcalcCli {
  pub fn eval(&self, EvalArgs { expr }: EvalArgs) -> Result<()> {
    let src = expr.join(" ");
    if !eval_source(&mut Calc::new(), "<eval>", &src, &mut io::stdout().lock())? {
      exit(1);
    }
    Ok(())
  }
}

#[derive(Clone, Args)]
pub struct EvalArgs {
  #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
  expr: Vec<String>,
}
