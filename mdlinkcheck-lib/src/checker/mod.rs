//! Link checking
//!
//! The [`Checker`] trait is the seam between the run driver and whatever
//! evaluates the links of a document. [`LinkChecker`] is the default
//! implementation: it extracts the links of a Markdown document and checks
//! them over HTTP, on the local filesystem or by their shape.

mod extract;
mod file;
mod mail;
mod progress;
mod rules;
mod website;

use std::collections::HashSet;

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use log::debug;
use reqwest::Url;

use crate::types::{CheckOptions, LinkResult, LinkStatus};
use crate::{ErrorKind, Result};

use progress::Progress;
use rules::LinkRules;
use website::{RequestHeaders, WebsiteChecker};

/// User agent sent with every request of the default client
pub const DEFAULT_USER_AGENT: &str = concat!("mdlinkcheck/", env!("CARGO_PKG_VERSION"));

const FILE_SCHEME_PREFIX: &str = "file://";

/// Evaluates all hyperlinks of one Markdown document
#[async_trait]
pub trait Checker: Send + Sync {
    /// Check every link of `markdown` with the given options.
    ///
    /// Results are returned in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the options cannot be used, for example because
    /// of an invalid pattern. Unreachable or missing links are not errors;
    /// they are reported as dead results.
    async fn check(&self, markdown: &str, options: &CheckOptions) -> Result<Vec<LinkResult>>;
}

/// Default [`Checker`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct LinkChecker {
    client: reqwest::Client,
}

impl LinkChecker {
    /// Create a checker with a fresh HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .gzip(true)
            .build()
            .map_err(ErrorKind::BuildClient)?;
        Ok(Self::with_client(client))
    }

    /// Create a checker reusing an existing client
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// The HTTP client used for checking, also handy for fetching documents
    #[must_use]
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl Checker for LinkChecker {
    async fn check(&self, markdown: &str, options: &CheckOptions) -> Result<Vec<LinkResult>> {
        let rules = LinkRules::new(options)?;
        let headers = RequestHeaders::new(&options.http_headers)?;
        let base = options.base_url.as_deref().map(parse_base).transpose()?;

        let links = extract::extract_links(markdown, !options.ignore_disable_comments);
        debug!("Found {} links", links.len());

        let anchors = extract::heading_anchors(markdown);
        let progress = Progress::new(options.show_progress_bar, links.len());
        let website = WebsiteChecker::new(&self.client, &headers, options);

        let context = LinkContext {
            rules: &rules,
            base: base.as_ref(),
            anchors: &anchors,
            website: &website,
        };
        let progress_ref = &progress;
        let results = stream::iter(links)
            .map(|link| async move {
                let result = context.check(&link).await;
                progress_ref.update(&link);
                result
            })
            .buffered(options.parallelism())
            .collect::<Vec<_>>()
            .await;

        progress.finish();
        Ok(results)
    }
}

/// Everything needed to check a single link of a document
#[derive(Clone, Copy)]
struct LinkContext<'a> {
    rules: &'a LinkRules,
    base: Option<&'a Url>,
    anchors: &'a HashSet<String>,
    website: &'a WebsiteChecker<'a>,
}

impl LinkContext<'_> {
    async fn check(self, link: &str) -> LinkResult {
        if self.rules.is_ignored(link) {
            return LinkResult::new(link, LinkStatus::Ignored, None);
        }

        let rewritten = self.rules.rewrite(link);
        if let Some(fragment) = rewritten.strip_prefix('#') {
            return self.check_anchor(link, fragment);
        }

        let url = match resolve(&rewritten, self.base) {
            Ok(url) => url,
            Err(e) => return LinkResult::new(link, LinkStatus::Error, None).with_err(e),
        };

        match url.scheme() {
            "http" | "https" => self.website.check(link, &url).await,
            "file" => file::check(link, &url).await,
            "mailto" => mail::check(link, &url),
            scheme => LinkResult::new(link, LinkStatus::Error, None)
                .with_err(format!("Unsupported scheme `{scheme}`")),
        }
    }

    /// Links to `#fragment` point to a heading of the same document
    fn check_anchor(self, link: &str, fragment: &str) -> LinkResult {
        if fragment.is_empty() || self.anchors.contains(&fragment.to_lowercase()) {
            LinkResult::new(link, LinkStatus::Alive, Some(200))
        } else {
            LinkResult::new(link, LinkStatus::Dead, Some(404))
                .with_err(format!("No heading for anchor `#{fragment}`"))
        }
    }
}

/// Parse the base URL of a document.
///
/// `file://` bases name directories and are taken as raw paths, so `#` or
/// `?` in a directory name end up percent-encoded in the URL path.
fn parse_base(base: &str) -> Result<Url> {
    match base.strip_prefix(FILE_SCHEME_PREFIX) {
        Some(dir) => Url::from_directory_path(dir)
            .map_err(|()| ErrorKind::InvalidBasePath(dir.to_string())),
        None => Url::parse(base).map_err(|e| ErrorKind::InvalidBaseUrl(base.to_string(), e)),
    }
}

fn resolve(link: &str, base: Option<&Url>) -> std::result::Result<Url, String> {
    match Url::parse(link) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => match base {
            Some(base) => base.join(link).map_err(|e| e.to_string()),
            None => Err(format!("Cannot resolve relative link `{link}` without a base URL")),
        },
        Err(e) => Err(e.to_string()),
    }
}
