//! `mdlinkcheck` checks the hyperlinks of Markdown documents.
//!
//! The binary is a wrapper around `mdlinkcheck-lib`: it turns its arguments
//! into targets, checks them one after another and prints the results.
//!
//! Check a single file:
//! ```sh
//! mdlinkcheck README.md
//! ```
//!
//! Check every Markdown file below a directory, only reporting dead links:
//! ```sh
//! mdlinkcheck --quiet docs/
//! ```
//!
//! Check a remote document with a configuration file:
//! ```sh
//! mdlinkcheck -c config.json https://example.com/README.md
//! ```
//!
//! Read from standard input:
//! ```sh
//! cat README.md | mdlinkcheck
//! ```
#![warn(clippy::all, clippy::pedantic)]
#![warn(
    absolute_paths_not_starting_with_crate,
    rustdoc::invalid_html_tags,
    missing_copy_implementations,
    semicolon_in_expressions_from_macros,
    unreachable_pub,
    unused_extern_crates,
    variant_size_differences,
    clippy::missing_const_for_fn
)]
#![deny(anonymous_parameters, macro_use_extern_crate)]

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use mdlinkcheck_lib::{LinkChecker, input};

mod commands;
mod formatters;
mod options;
mod report;

use crate::commands::CommandParams;
use crate::formatters::log::init_logging;
use crate::options::MdLinkCheckOptions;
use crate::report::Reporter;

/// A C-like enum that can be cast to `i32` and used as process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitCode {
    Success = 0,
    // Dead links, failed runs and fatal errors alike
    Failure = 1,
}

fn main() -> Result<()> {
    // std::process::exit doesn't guarantee that all destructors will be run,
    // therefore we wrap the main code in another function to ensure that.
    // See: https://doc.rust-lang.org/stable/std/process/fn.exit.html
    let exit_code = run_main()?;
    std::process::exit(exit_code as i32);
}

/// Parse the command line, set up the runtime and check all inputs
fn run_main() -> Result<ExitCode> {
    let opts = MdLinkCheckOptions::parse();
    init_logging(opts.quiet, opts.verbose);

    match run(&opts) {
        Ok(code) => Ok(code),
        Err(e) => {
            error!("{e:#}");
            Ok(ExitCode::Failure)
        }
    }
}

fn run(opts: &MdLinkCheckOptions) -> Result<ExitCode> {
    let global = opts.global_options()?;
    let targets = input::resolve(&opts.inputs, &global)?;
    info!("Checking {} documents", targets.len());

    let checker = LinkChecker::new()?;
    let mut params = CommandParams {
        client: checker.client().clone(),
        checker,
        config_file: opts.config_file.clone(),
        reporter: Reporter::stdio(opts.quiet, opts.verbose),
    };

    let runtime = tokio::runtime::Runtime::new().context("Cannot start async runtime")?;
    let batch = runtime.block_on(commands::check_all(targets, &mut params))?;

    info!("{} of {} runs failed", batch.failures, batch.runs);
    Ok(if batch.succeeded() {
        ExitCode::Success
    } else {
        ExitCode::Failure
    })
}
