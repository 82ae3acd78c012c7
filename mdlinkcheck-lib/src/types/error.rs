use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Possible errors when resolving, configuring or checking a document
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An input given on the command line does not exist or cannot be accessed
    #[error("Cannot access input `{path}`: {err}", path = .0.display(), err = .1)]
    ReadInput(PathBuf, #[source] std::io::Error),
    /// A directory input could not be walked
    #[error("Cannot walk directory: {0}")]
    WalkDirectory(#[from] walkdir::Error),
    /// The current working directory could not be determined
    #[error("Cannot determine the current working directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    /// The contents of a file target could not be read
    #[error("Cannot read file `{path}`: {err}", path = .1.display(), err = .0)]
    ReadFileInput(#[source] std::io::Error, PathBuf),
    /// Standard input could not be read
    #[error("Cannot read from stdin: {0}")]
    ReadStdinInput(#[source] std::io::Error),
    /// The document behind a URL target could not be fetched
    #[error("Cannot fetch `{0}`: {1}")]
    FetchInput(Url, #[source] reqwest::Error),
    /// The configuration file could not be read
    #[error("Cannot read configuration file `{path}`: {err}", path = .0.display(), err = .1)]
    ReadConfig(PathBuf, #[source] std::io::Error),
    /// The configuration file is not valid JSON or has unexpected value types
    #[error("Cannot parse configuration file `{path}`: {err}", path = .0.display(), err = .1)]
    ParseConfig(PathBuf, #[source] serde_json::Error),
    /// A pattern from the configuration is not a valid regular expression
    #[error("Invalid pattern `{0}`: {1}")]
    InvalidPattern(String, #[source] regex::Error),
    /// The base URL handed to the checker cannot be parsed
    #[error("Invalid base URL `{0}`: {1}")]
    InvalidBaseUrl(String, #[source] url::ParseError),
    /// A `file://` base URL does not name an absolute directory
    #[error("Invalid base path `{0}`: not an absolute directory")]
    InvalidBasePath(String),
    /// A configured HTTP header has an invalid name or value
    #[error("Invalid HTTP header `{0}`")]
    InvalidHeader(String),
    /// The HTTP client could not be constructed
    #[error("Cannot build HTTP client: {0}")]
    BuildClient(#[source] reqwest::Error),
}

impl ErrorKind {
    /// Whether this error must abort the whole invocation instead of only
    /// failing the run of a single target.
    ///
    /// Configuration problems and unusable command-line inputs are fatal.
    /// Everything that goes wrong while processing one document is not.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ReadInput(..)
                | Self::WalkDirectory(_)
                | Self::CurrentDir(_)
                | Self::ReadConfig(..)
                | Self::ParseConfig(..)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_errors_are_fatal() {
        let read = ErrorKind::ReadConfig(
            PathBuf::from("config.json"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(read.is_fatal());

        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let parse = ErrorKind::ParseConfig(PathBuf::from("config.json"), parse_error);
        assert!(parse.is_fatal());
    }

    #[test]
    fn test_document_errors_are_isolated() {
        let read = ErrorKind::ReadFileInput(
            io::Error::from(io::ErrorKind::PermissionDenied),
            PathBuf::from("README.md"),
        );
        assert!(!read.is_fatal());
        assert!(!ErrorKind::InvalidHeader("bad header".into()).is_fatal());
    }

    #[test]
    fn test_error_message_names_path() {
        let err = ErrorKind::ReadInput(
            PathBuf::from("missing.md"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(err.to_string().contains("`missing.md`"));
    }
}
