use serde::Serialize;
use std::fmt::Display;

/// Classification of a single checked link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    /// The link target responded with an alive status code
    Alive,
    /// The link target is missing or responded with any other status code
    Dead,
    /// The link matched an ignore pattern and was not checked
    Ignored,
    /// The link could not be evaluated (e.g. unsupported scheme)
    Error,
}

impl Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Alive => "alive",
            Self::Dead => "dead",
            Self::Ignored => "ignored",
            Self::Error => "error",
        })
    }
}

/// One evaluated hyperlink as reported by a [`crate::Checker`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkResult {
    /// The link as written in the document
    pub link: String,
    /// Outcome of the check
    pub status: LinkStatus,
    /// HTTP status code (or its equivalent for local files), if any
    pub status_code: Option<u16>,
    /// Diagnostic message, if any
    pub err: Option<String>,
}

impl LinkResult {
    /// Create a result without a diagnostic message
    #[must_use]
    pub fn new<S: Into<String>>(link: S, status: LinkStatus, status_code: Option<u16>) -> Self {
        Self {
            link: link.into(),
            status,
            status_code,
            err: None,
        }
    }

    /// Attach a diagnostic message
    #[must_use]
    pub fn with_err<S: Into<String>>(mut self, err: S) -> Self {
        self.err = Some(err.into());
        self
    }

    /// Returns `true` if the link is dead
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.status == LinkStatus::Dead
    }
}
