//! A single document to check and where to get its contents from.

use std::fmt::Display;
use std::path::PathBuf;

use reqwest::Url;
use tokio::io::{AsyncReadExt, stdin};

use super::options::CheckOptions;
use crate::{ErrorKind, Result};

/// Where the text of a [`Target`] comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ContentSource {
    /// Local file
    FsPath(PathBuf),
    /// Document fetched over HTTP(S)
    RemoteUrl(Box<Url>),
    /// Standard input
    Stdin,
}

impl Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FsPath(path) => write!(f, "{}", path.display()),
            Self::RemoteUrl(url) => f.write_str(url.as_str()),
            Self::Stdin => f.write_str("stdin"),
        }
    }
}

/// One unit of work: a document plus the options it gets checked with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Origin of the document
    pub source: ContentSource,
    /// Options for checking this document
    pub options: CheckOptions,
}

impl Target {
    /// Create a new target
    #[must_use]
    pub const fn new(source: ContentSource, options: CheckOptions) -> Self {
        Self { source, options }
    }

    /// Name used for this target in the output; `None` for standard input
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        match self.source {
            ContentSource::Stdin => None,
            _ => Some(self.source.to_string()),
        }
    }

    /// Retrieve the full text of the document.
    ///
    /// Remote documents are fetched with `client`; the body is used whatever
    /// the response status.
    ///
    /// # Errors
    ///
    /// Returns an error if the file, standard input or the remote document
    /// cannot be read.
    pub async fn contents(&self, client: &reqwest::Client) -> Result<String> {
        match &self.source {
            ContentSource::FsPath(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ErrorKind::ReadFileInput(e, path.clone())),
            ContentSource::RemoteUrl(url) => {
                let response = client
                    .get(url.as_str())
                    .send()
                    .await
                    .map_err(|e| ErrorKind::FetchInput(*url.clone(), e))?;
                if !response.status().is_success() {
                    log::warn!(
                        "Fetching `{url}` returned status {}; checking the body anyway",
                        response.status()
                    );
                }
                response
                    .text()
                    .await
                    .map_err(|e| ErrorKind::FetchInput(*url.clone(), e))
            }
            ContentSource::Stdin => {
                let mut content = String::new();
                stdin()
                    .read_to_string(&mut content)
                    .await
                    .map_err(ErrorKind::ReadStdinInput)?;
                Ok(content)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_utils::mock_server;

    #[test]
    fn test_display_name() {
        let file = Target::new(
            ContentSource::FsPath(PathBuf::from("docs/README.md")),
            CheckOptions::default(),
        );
        assert_eq!(file.display_name().as_deref(), Some("docs/README.md"));

        let url = Url::parse("https://example.com/README.md").unwrap();
        let remote = Target::new(ContentSource::RemoteUrl(Box::new(url)), CheckOptions::default());
        assert_eq!(
            remote.display_name().as_deref(),
            Some("https://example.com/README.md")
        );

        let stdin = Target::new(ContentSource::Stdin, CheckOptions::default());
        assert_eq!(stdin.display_name(), None);
    }

    #[tokio::test]
    async fn test_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[link](https://example.com)").unwrap();

        let target = Target::new(
            ContentSource::FsPath(file.path().to_path_buf()),
            CheckOptions::default(),
        );
        let contents = target.contents(&reqwest::Client::new()).await.unwrap();
        assert_eq!(contents, "[link](https://example.com)");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_fatal() {
        let target = Target::new(
            ContentSource::FsPath(PathBuf::from("/definitely/not/here.md")),
            CheckOptions::default(),
        );
        let err = target.contents(&reqwest::Client::new()).await.unwrap_err();
        assert!(matches!(err, ErrorKind::ReadFileInput(..)));
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn test_remote_contents() {
        let mock_server = mock_server!(200, set_body_string("# Remote\n"));
        let url = Url::parse(&mock_server.uri()).unwrap();
        let target = Target::new(ContentSource::RemoteUrl(Box::new(url)), CheckOptions::default());

        let contents = target.contents(&reqwest::Client::new()).await.unwrap();
        assert_eq!(contents, "# Remote\n");
    }
}
