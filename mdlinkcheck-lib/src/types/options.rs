use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Number of links checked concurrently within one document if nothing else
/// was requested
pub const DEFAULT_PARALLEL_REQUESTS: usize = 2;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of retries after a `429 Too Many Requests` response
pub const DEFAULT_RETRY_COUNT: u64 = 2;

/// Default delay between retries if the server sent no usable `Retry-After`
pub const DEFAULT_FALLBACK_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Status code considered alive if no custom set was configured
pub const DEFAULT_ALIVE_STATUS_CODE: u16 = 200;

/// Links matching this regular expression are not checked.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct IgnorePattern {
    /// Regular expression matched against the raw link
    pub pattern: String,
}

/// Rewrites a link before it gets checked.
///
/// The placeholder `{{BASEURL}}` inside `replacement` expands to the project
/// base URL.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReplacementPattern {
    /// Regular expression matched against the link
    pub pattern: String,
    /// Replacement text; supports `$1`-style capture group references
    pub replacement: String,
}

/// Extra headers sent with requests to URLs starting with one of `urls`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HttpHeaders {
    /// URL prefixes the headers apply to
    pub urls: Vec<String>,
    /// Header names and values
    pub headers: HashMap<String, String>,
}

impl HttpHeaders {
    /// Returns `true` if these headers should be sent along with a request
    /// for `link`
    #[must_use]
    pub fn applies_to(&self, link: &str) -> bool {
        self.urls.iter().any(|prefix| link.starts_with(prefix.as_str()))
    }
}

/// Command-line settings shared by every target of one invocation.
///
/// Built once from the parsed flags and copied into the options of each
/// target, so no target ever observes another target's settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    /// Show a progress bar while the links of a document get checked
    pub show_progress_bar: bool,
    /// Only report dead links
    pub quiet: bool,
    /// Report status codes and diagnostics for every link
    pub verbose: bool,
    /// Retry requests answered with `429 Too Many Requests`
    pub retry_on_429: bool,
    /// Number of links checked concurrently, if given on the command line
    pub parallel_request_count: Option<usize>,
    /// Status codes considered alive, if given on the command line
    pub alive_status_codes: Option<HashSet<u16>>,
    /// Replaces `{{BASEURL}}` in replacement patterns
    pub project_base_url: String,
}

/// Options controlling a single checker invocation.
///
/// Starts out with the values derived from the command line and the target
/// itself; a configuration file may then overlay it (see
/// [`crate::config::ConfigFile`]).
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Base for resolving relative links; unset for standard input
    pub base_url: Option<String>,
    /// Replaces `{{BASEURL}}` in replacement patterns
    pub project_base_url: Option<String>,
    /// Show a progress bar while checking
    pub show_progress_bar: bool,
    /// Only report dead links
    pub quiet: bool,
    /// Report status codes and diagnostics for every link
    pub verbose: bool,
    /// Retry requests answered with `429 Too Many Requests`
    pub retry_on_429: bool,
    /// Number of links checked concurrently
    pub parallel_request_count: Option<usize>,
    /// Status codes considered alive
    pub alive_status_codes: Option<HashSet<u16>>,
    /// Links which are not checked at all
    pub ignore_patterns: Vec<IgnorePattern>,
    /// Rewrites applied to links before checking
    pub replacement_patterns: Vec<ReplacementPattern>,
    /// Extra request headers per URL prefix
    pub http_headers: Vec<HttpHeaders>,
    /// Per-request timeout
    pub timeout: Option<Duration>,
    /// Check links even inside regions disabled by comments
    pub ignore_disable_comments: bool,
    /// Number of retries after a `429` response
    pub retry_count: Option<u64>,
    /// Retry delay used when the server sends no usable `Retry-After`
    pub fallback_retry_delay: Option<Duration>,
}

impl CheckOptions {
    /// Create the options of a target from its base URL and the shared
    /// command-line settings
    #[must_use]
    pub fn new(base_url: Option<String>, global: &GlobalOptions) -> Self {
        Self {
            base_url,
            project_base_url: Some(global.project_base_url.clone()),
            show_progress_bar: global.show_progress_bar,
            quiet: global.quiet,
            verbose: global.verbose,
            retry_on_429: global.retry_on_429,
            parallel_request_count: global.parallel_request_count,
            alive_status_codes: global.alive_status_codes.clone(),
            ..Self::default()
        }
    }

    /// Number of links to check concurrently
    #[must_use]
    pub fn parallelism(&self) -> usize {
        self.parallel_request_count
            .unwrap_or(DEFAULT_PARALLEL_REQUESTS)
            .max(1)
    }

    /// Per-request timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Maximum number of retries after a `429` response; zero unless
    /// retrying was requested
    #[must_use]
    pub fn max_retries(&self) -> u64 {
        if self.retry_on_429 {
            self.retry_count.unwrap_or(DEFAULT_RETRY_COUNT)
        } else {
            0
        }
    }

    /// Delay used when the server does not say how long to wait
    #[must_use]
    pub fn fallback_retry_delay(&self) -> Duration {
        self.fallback_retry_delay
            .unwrap_or(DEFAULT_FALLBACK_RETRY_DELAY)
    }

    /// Returns `true` if `code` counts as an alive response
    #[must_use]
    pub fn is_alive_status(&self, code: u16) -> bool {
        match &self.alive_status_codes {
            Some(codes) => codes.contains(&code),
            None => code == DEFAULT_ALIVE_STATUS_CODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn global() -> GlobalOptions {
        GlobalOptions {
            show_progress_bar: true,
            quiet: true,
            verbose: false,
            retry_on_429: true,
            parallel_request_count: Some(4),
            alive_status_codes: Some(HashSet::from([200, 206])),
            project_base_url: "file:///project".to_string(),
        }
    }

    #[test]
    fn test_new_copies_global_settings() {
        let options = CheckOptions::new(Some("file:///project/docs".into()), &global());

        assert_eq!(options.base_url.as_deref(), Some("file:///project/docs"));
        assert_eq!(options.project_base_url.as_deref(), Some("file:///project"));
        assert!(options.show_progress_bar);
        assert!(options.quiet);
        assert!(options.retry_on_429);
        assert_eq!(options.parallel_request_count, Some(4));
        assert_eq!(options.alive_status_codes, Some(HashSet::from([200, 206])));
        assert!(options.ignore_patterns.is_empty());
        assert_eq!(options.timeout, None);
    }

    #[test]
    fn test_defaults() {
        let options = CheckOptions::default();
        assert_eq!(options.parallelism(), DEFAULT_PARALLEL_REQUESTS);
        assert_eq!(options.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(options.max_retries(), 0);
        assert!(options.is_alive_status(200));
        assert!(!options.is_alive_status(206));
    }

    #[test]
    fn test_zero_parallelism_is_clamped() {
        let options = CheckOptions {
            parallel_request_count: Some(0),
            ..CheckOptions::default()
        };
        assert_eq!(options.parallelism(), 1);
    }

    #[test]
    fn test_retries_only_when_enabled() {
        let mut options = CheckOptions {
            retry_count: Some(5),
            ..CheckOptions::default()
        };
        assert_eq!(options.max_retries(), 0);
        options.retry_on_429 = true;
        assert_eq!(options.max_retries(), 5);
    }

    #[test]
    fn test_http_headers_match_by_prefix() {
        let headers = HttpHeaders {
            urls: vec!["https://example.com/private".into()],
            headers: HashMap::from([("Authorization".into(), "Basic abc".into())]),
        };
        assert!(headers.applies_to("https://example.com/private/page"));
        assert!(!headers.applies_to("https://example.com/public"));
    }
}
