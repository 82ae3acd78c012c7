use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;
use mdlinkcheck_lib::input::base;
use mdlinkcheck_lib::{GlobalOptions, Result};

/// mdlinkcheck checks the hyperlinks of Markdown documents.
///
/// Every input is checked on its own, one after another. The exit code is 0
/// if no dead links were found and every document could be checked, and 1
/// otherwise.
#[derive(Parser, Debug)]
#[command(version, about, next_display_order = None)]
pub(crate) struct MdLinkCheckOptions {
    /// Inputs to check
    #[arg(
        name = "inputs",
        long_help = "Inputs to check. These can be:
files (e.g. `README.md`), directories (searched recursively for `*.md` files),
remote URLs (e.g. `https://example.com/README.md`), or standard input (`-`).
Without any inputs, standard input is read."
    )]
    pub(crate) inputs: Vec<String>,

    /// Show a progress bar while checking
    #[arg(short, long)]
    pub(crate) progress: bool,

    /// Number of links checked concurrently within one document
    #[arg(long, value_name = "N")]
    pub(crate) parallel: Option<usize>,

    /// Apply a JSON configuration file to every input
    #[arg(short, long = "config", value_name = "PATH")]
    pub(crate) config_file: Option<PathBuf>,

    /// Only report dead links
    #[arg(short, long)]
    pub(crate) quiet: bool,

    /// Report status codes and diagnostics for every link
    #[arg(short, long)]
    pub(crate) verbose: bool,

    /// Comma-separated list of status codes considered alive
    #[arg(short, long, value_name = "CODES", value_delimiter = ',')]
    pub(crate) alive: Option<Vec<u16>>,

    /// Retry after the duration given by `Retry-After` when receiving
    /// `429 Too Many Requests`
    #[arg(short, long)]
    pub(crate) retry: bool,

    /// Path substituted for `{{BASEURL}}` in replacement patterns
    /// [default: current directory]
    #[arg(short = 'b', long = "projectBaseUrl", value_name = "PATH")]
    pub(crate) project_base_url: Option<String>,
}

impl MdLinkCheckOptions {
    /// Settings shared by every target of this invocation
    pub(crate) fn global_options(&self) -> Result<GlobalOptions> {
        Ok(GlobalOptions {
            show_progress_bar: self.progress,
            quiet: self.quiet,
            verbose: self.verbose,
            retry_on_429: self.retry,
            parallel_request_count: self.parallel,
            alive_status_codes: self
                .alive
                .as_ref()
                .map(|codes| codes.iter().copied().collect::<HashSet<_>>()),
            project_base_url: base::project_base_url(self.project_base_url.as_deref())?,
        })
    }
}
