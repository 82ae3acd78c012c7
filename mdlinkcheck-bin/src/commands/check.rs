use std::io::Write;

use anyhow::Result;
use log::debug;
use mdlinkcheck_lib::{Checker, RunOutcome, Target, config};

use super::CommandParams;

/// Check a single target.
///
/// The document is read first, then its header is printed and the
/// configuration file is applied. Errors of the checker are reported before
/// they are returned; the caller decides whether the batch goes on.
pub(crate) async fn check<C, O, E>(
    target: Target,
    params: &mut CommandParams<C, O, E>,
) -> Result<RunOutcome>
where
    C: Checker,
    O: Write,
    E: Write,
{
    let name = target.display_name();
    debug!("Checking {}", target.source);

    let contents = match target.contents(&params.client).await {
        Ok(contents) => contents,
        Err(e) => {
            params.reporter.error(name.as_deref(), &e)?;
            return Err(e.into());
        }
    };

    params.reporter.header(name.as_deref())?;

    let options = config::merge(target.options, params.config_file.as_deref())?;

    match params.checker.check(&contents, &options).await {
        Ok(results) => Ok(params.reporter.results(name.as_deref(), &results)?),
        Err(e) => {
            params.reporter.error(name.as_deref(), &e)?;
            Err(e.into())
        }
    }
}
