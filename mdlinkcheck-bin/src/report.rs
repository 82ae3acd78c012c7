//! Human-readable output of a single run.
//!
//! Regular output goes to `out` (stdout); dead links and errors go to `err`
//! (stderr), so `--quiet` runs can be piped without losing failures.

use std::fmt::Display;
use std::io::{self, Stderr, Stdout, Write};

use console::Style;
use mdlinkcheck_lib::{LinkResult, LinkStatus, RunOutcome};

use crate::formatters::color::{BOLD_RED, DIM, GREEN, RED, YELLOW, color_stderr};
use crate::formatters::glyph;

/// Name used in messages about the standard input target
const STDIN_NAME: &str = "stdin";

fn style_for(status: LinkStatus) -> &'static Style {
    match status {
        LinkStatus::Alive => &GREEN,
        LinkStatus::Dead => &RED,
        LinkStatus::Ignored => &DIM,
        LinkStatus::Error => &YELLOW,
    }
}

/// Writes headers, per-link lines and summaries
pub(crate) struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
    quiet: bool,
    verbose: bool,
}

impl Reporter<Stdout, Stderr> {
    /// Reporter writing to the standard streams
    pub(crate) fn stdio(quiet: bool, verbose: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), quiet, verbose)
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub(crate) const fn new(out: O, err: E, quiet: bool, verbose: bool) -> Self {
        Self {
            out,
            err,
            quiet,
            verbose,
        }
    }

    #[cfg(test)]
    pub(crate) const fn err(&self) -> &E {
        &self.err
    }

    /// Announce the document about to be checked.
    ///
    /// Nothing is printed in quiet mode or for standard input.
    pub(crate) fn header(&mut self, name: Option<&str>) -> io::Result<()> {
        if let Some(name) = name
            && !self.quiet
        {
            writeln!(self.out, "\nFILE: {name}")?;
        }
        Ok(())
    }

    /// Report a run that could not produce results
    pub(crate) fn error(&mut self, name: Option<&str>, error: &dyn Display) -> io::Result<()> {
        let err = &mut self.err;
        writeln!(err)?;
        color_stderr!(
            err,
            BOLD_RED,
            "ERROR: {}: {}",
            name.unwrap_or(STDIN_NAME),
            error
        )?;
        writeln!(err)?;
        self.err.flush()
    }

    /// Print the results of a run and summarize them.
    ///
    /// The run failed if at least one link is dead.
    pub(crate) fn results(
        &mut self,
        name: Option<&str>,
        results: &[LinkResult],
    ) -> io::Result<RunOutcome> {
        let outcome = RunOutcome::from_results(results);

        if !self.quiet {
            if results.is_empty() {
                writeln!(self.out, "No hyperlinks found!")?;
            }
            for result in results {
                write_link(&mut self.out, result, self.verbose, false)?;
            }
            writeln!(self.out, "\n{} links checked.", results.len())?;
            self.out.flush()?;
        }

        if outcome.dead > 0 {
            let err = &mut self.err;
            writeln!(err)?;
            if self.quiet {
                color_stderr!(
                    err,
                    BOLD_RED,
                    "ERROR: {} dead links found in {} !",
                    outcome.dead,
                    name.unwrap_or(STDIN_NAME)
                )?;
            } else {
                color_stderr!(err, BOLD_RED, "ERROR: {} dead links found!", outcome.dead)?;
            }
            writeln!(err)?;
            for dead in results.iter().filter(|r| r.is_dead()) {
                write_link(err, dead, true, true)?;
            }
            self.err.flush()?;
        }

        Ok(outcome)
    }
}

/// `[✓] link`, followed by status code and diagnostic if `detailed`
fn write_link<W: Write>(
    f: &mut W,
    result: &LinkResult,
    detailed: bool,
    on_stderr: bool,
) -> io::Result<()> {
    let mut status = style_for(result.status).apply_to(format!("[{}]", glyph(result.status)));
    if on_stderr {
        status = status.for_stderr();
    }
    write!(f, "  {status} {}", result.link)?;
    if detailed && let Some(code) = result.status_code {
        write!(f, " → Status: {code}")?;
    }
    writeln!(f)?;
    if detailed && let Some(err) = &result.err {
        writeln!(f, "    {err}")?;
    }
    Ok(())
}
