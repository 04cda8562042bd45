use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;
use calc::Calc;
use clap::Args;
use rustyline::{error::ReadlineError, DefaultEditor};
use tracing::debug;

use super::BigcalcCli;
use crate::eval_source;

const PROMPT: &str = "> ";

impl BigcalcCli {
  pub fn repl(&self, ReplArgs { echo }: ReplArgs) -> Result<()> {
    let mut repl = Repl { calc: Calc::new(), echo };
    if io::stdin().is_terminal() {
      let mut editor = DefaultEditor::new()?;
      loop {
        match editor.readline(PROMPT) {
          Ok(line) => {
            editor.add_history_entry(line.as_str())?;
            repl.line(&line)?;
          }
          Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
          Err(err) => Err(err)?,
        }
      }
    } else {
      for line in io::stdin().lock().lines() {
        repl.line(&line?)?;
      }
    }
    Ok(())
  }
}

#[derive(Clone, Default, Args)]
pub struct ReplArgs {
  /// Reprint each input line before its output.
  #[arg(long, env = "BIGCALC_ECHO")]
  echo: bool,
}

struct Repl {
  calc: Calc,
  echo: bool,
}

impl Repl {
  fn line(&mut self, line: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    if self.echo {
      writeln!(out, "{PROMPT}{line}")?;
    }
    if line.trim() == ":vars" {
      for (name, value) in self.calc.vars() {
        writeln!(out, "{name} = {value}")?;
      }
      return Ok(());
    }
    if !eval_source(&mut self.calc, "<repl>", line, &mut out)? {
      debug!("continuing after error");
    }
    Ok(())
  }
}
