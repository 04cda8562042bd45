use std::{
  io::{self, Write},
  ops::ControlFlow,
};

use anyhow::{anyhow, Context, Result};
use calc::Calc;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global `tracing` subscriber, writing to stderr.
pub fn init_logging(filter: &str) -> Result<()> {
  fmt()
    .with_env_filter(EnvFilter::try_new(filter)?)
    .with_writer(io::stderr)
    .without_time()
    .try_init()
    .map_err(|err| anyhow!(err))
}

/// Evaluate `src`, writing each value to `out` and any diagnostic to stderr.
///
/// Returns whether every statement succeeded. Failing to write a value is an error, and no
/// further statements are executed once a write has failed.
pub fn eval_source(calc: &mut Calc, file: &str, src: &str, out: &mut impl Write) -> Result<bool> {
  let mut write_err = None;
  let result = calc.run(src, |value| match writeln!(out, "{value}") {
    Ok(()) => ControlFlow::Continue(()),
    Err(err) => {
      write_err = Some(err);
      ControlFlow::Break(())
    }
  });
  if let Some(err) = write_err {
    Err(err).context("could not write output")?
  }
  out.flush().context("could not write output")?;
  Ok(match result {
    Ok(()) => true,
    Err(diag) => {
      debug!(?diag, "evaluation failed");
      eprintln!("{}", diag.report(file, src));
      false
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Full;

  impl Write for Full {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
      Err(io::Error::other("no space left on device"))
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  #[test]
  fn writes_each_value() {
    let mut out = Vec::new();
    assert!(eval_source(&mut Calc::new(), "<test>", "x = 6; x * 7; -x", &mut out).unwrap());
    assert_eq!(String::from_utf8(out).unwrap(), "42\n-6\n");
  }

  #[test]
  fn diagnostics_are_not_write_errors() {
    let mut out = Vec::new();
    assert!(!eval_source(&mut Calc::new(), "<test>", "1; 1 / 0", &mut out).unwrap());
    assert_eq!(out, b"1\n");
  }

  #[test]
  fn write_failure_is_reported_and_stops_evaluation() {
    let mut calc = Calc::new();
    let err = eval_source(&mut calc, "<test>", "1; x = 2", &mut Full).unwrap_err();
    assert_eq!(err.to_string(), "could not write output");
    assert_eq!(calc.vars().count(), 0);
  }
}
