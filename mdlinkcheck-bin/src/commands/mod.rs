pub(crate) mod check;

pub(crate) use check::check;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use log::debug;
use mdlinkcheck_lib::{BatchResult, Checker, ErrorKind, RunOutcome, Target};

use crate::report::Reporter;

/// Parameters passed to every command
pub(crate) struct CommandParams<C: Checker, O: Write, E: Write> {
    pub(crate) checker: C,
    /// Client for fetching remote documents
    pub(crate) client: reqwest::Client,
    pub(crate) config_file: Option<PathBuf>,
    pub(crate) reporter: Reporter<O, E>,
}

/// Check all targets one after another.
///
/// A target that cannot be checked counts as a failed run and the batch goes
/// on with the next one.
///
/// # Errors
///
/// Fatal errors, such as an unreadable or malformed configuration file, abort
/// the batch.
pub(crate) async fn check_all<C, O, E>(
    targets: Vec<Target>,
    params: &mut CommandParams<C, O, E>,
) -> Result<BatchResult>
where
    C: Checker,
    O: Write,
    E: Write,
{
    let mut batch = BatchResult::new();
    for target in targets {
        let source = target.source.to_string();
        match check(target, params).await {
            Ok(outcome) => batch.record(&outcome),
            Err(e) if is_fatal(&e) => return Err(e),
            Err(e) => {
                debug!("Run for `{source}` failed: {e}");
                batch.record(&RunOutcome::failure());
            }
        }
    }
    Ok(batch)
}

fn is_fatal(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<ErrorKind>()
        .is_some_and(ErrorKind::is_fatal)
}
