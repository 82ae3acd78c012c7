//! Input resolution
//!
//! Turns the raw command-line arguments into an ordered list of
//! [`Target`]s. Each argument is one of:
//! - nothing at all (or `-`), meaning standard input
//! - a URL with `http` or `https` scheme
//! - a directory, which is walked recursively for Markdown files
//! - a single file
//!
//! Every target gets its own [`CheckOptions`], seeded with a base URL derived
//! from the input and with a copy of the [`GlobalOptions`].

pub mod base;

use std::path::{Path, PathBuf};

use log::{debug, warn};
use reqwest::Url;
use walkdir::WalkDir;

use crate::types::{CheckOptions, ContentSource, GlobalOptions, Target};
use crate::{ErrorKind, Result};

/// Files ending in this suffix are picked up when walking directories
pub const MARKDOWN_EXTENSION: &str = ".md";

const STDIN: &str = "-";

/// A single command-line argument after classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Standard input
    Stdin,
    /// Remote document
    RemoteUrl(Box<Url>),
    /// Directory to search for Markdown files
    Directory(PathBuf),
    /// Single local file
    File(PathBuf),
}

impl Input {
    /// Classify a raw argument.
    ///
    /// Returns `Ok(None)` for arguments that look like URLs but cannot be
    /// parsed; those are skipped without an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument is neither a URL nor an accessible
    /// file or directory.
    pub fn new(input: &str) -> Result<Option<Self>> {
        if input == STDIN {
            return Ok(Some(Self::Stdin));
        }

        if is_url(input) {
            return Ok(match Url::parse(input) {
                Ok(url) => Some(Self::RemoteUrl(Box::new(url))),
                Err(e) => {
                    debug!("Skipping malformed URL `{input}`: {e}");
                    None
                }
            });
        }

        let path = PathBuf::from(input);
        let metadata =
            std::fs::metadata(&path).map_err(|e| ErrorKind::ReadInput(path.clone(), e))?;
        if metadata.is_dir() {
            Ok(Some(Self::Directory(path)))
        } else {
            Ok(Some(Self::File(path)))
        }
    }

    /// Expand this input into targets, seeding each with the shared
    /// command-line settings
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be walked or an absolute path
    /// cannot be determined.
    pub fn into_targets(self, global: &GlobalOptions) -> Result<Vec<Target>> {
        match self {
            Self::Stdin => Ok(vec![Target::new(
                ContentSource::Stdin,
                CheckOptions::new(None, global),
            )]),
            Self::RemoteUrl(url) => {
                let options = CheckOptions::new(Some(base::url_base(&url)), global);
                Ok(vec![Target::new(ContentSource::RemoteUrl(url), options)])
            }
            Self::File(path) => Ok(vec![file_target(path, global)?]),
            Self::Directory(dir) => markdown_files(&dir)?
                .into_iter()
                .map(|path| file_target(path, global))
                .collect(),
        }
    }
}

/// Resolve all command-line inputs into targets, in argument order.
///
/// Without any inputs, standard input is checked.
///
/// # Errors
///
/// Fails on the first input that does not exist or cannot be walked.
pub fn resolve<S: AsRef<str>>(inputs: &[S], global: &GlobalOptions) -> Result<Vec<Target>> {
    if inputs.is_empty() {
        return Input::Stdin.into_targets(global);
    }

    let mut targets = Vec::new();
    for raw in inputs {
        if let Some(input) = Input::new(raw.as_ref())? {
            targets.extend(input.into_targets(global)?);
        }
    }
    Ok(targets)
}

fn is_url(input: &str) -> bool {
    input.starts_with("http:") || input.starts_with("https:")
}

fn file_target(path: PathBuf, global: &GlobalOptions) -> Result<Target> {
    let options = CheckOptions::new(Some(base::file_base(&path)?), global);
    Ok(Target::new(ContentSource::FsPath(path), options))
}

fn is_markdown(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(MARKDOWN_EXTENSION))
}

/// All Markdown files below `dir`, in the order the filesystem lists them.
///
/// Symbolic links are followed. Entries below `dir` that cannot be visited,
/// such as dangling links, unreadable subdirectories or links pointing back
/// to one of their own ancestors, are reported and skipped. Only a failure
/// on `dir` itself is an error.
fn markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) if e.loop_ancestor().is_some() => {
                warn!(
                    "Skipping symlink cycle at `{}`",
                    e.path().unwrap_or(dir).display()
                );
                continue;
            }
            Err(e) => {
                warn!("Skipping `{}`: {e}", e.path().unwrap_or(dir).display());
                continue;
            }
        };
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
