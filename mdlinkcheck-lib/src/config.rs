//! Configuration files
//!
//! A configuration file is a JSON object. Every recognized key overrides the
//! value derived from the command line, with one exception: `parallel` only
//! applies if no parallelism was given on the command line.
//!
//! ```json
//! {
//!   "ignorePatterns": [{ "pattern": "^https://localhost" }],
//!   "replacementPatterns": [{ "pattern": "^/", "replacement": "{{BASEURL}}/" }],
//!   "httpHeaders": [{ "urls": ["https://example.com"], "headers": { "Accept": "text/html" } }],
//!   "timeout": "20s",
//!   "retryOn429": true,
//!   "retryCount": 5,
//!   "fallbackRetryDelay": "30s",
//!   "aliveStatusCodes": [200, 206]
//! }
//! ```
//!
//! Unknown keys are ignored.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::types::{CheckOptions, HttpHeaders, IgnorePattern, ReplacementPattern};
use crate::{ErrorKind, Result};

/// Contents of a configuration file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Links matching one of these patterns are not checked
    #[serde(default)]
    pub ignore_patterns: Option<Vec<IgnorePattern>>,
    /// Rewrites applied to links before they get checked
    #[serde(default)]
    pub replacement_patterns: Option<Vec<ReplacementPattern>>,
    /// Extra request headers per URL prefix
    #[serde(default)]
    pub http_headers: Option<Vec<HttpHeaders>>,
    /// Per-request timeout
    #[serde(default, deserialize_with = "deserialize_duration")]
    pub timeout: Option<Duration>,
    /// Check links even inside regions disabled by comments
    #[serde(default)]
    pub ignore_disable: Option<bool>,
    /// Retry requests answered with `429 Too Many Requests`
    #[serde(default, rename = "retryOn429")]
    pub retry_on_429: Option<bool>,
    /// Number of retries after a `429` response
    #[serde(default)]
    pub retry_count: Option<u64>,
    /// Retry delay used when the server sends no usable `Retry-After`
    #[serde(default, deserialize_with = "deserialize_duration")]
    pub fallback_retry_delay: Option<Duration>,
    /// Status codes considered alive
    #[serde(default)]
    pub alive_status_codes: Option<HashSet<u16>>,
    /// Number of links checked concurrently
    #[serde(default)]
    pub parallel: Option<usize>,
}

// Overwrite option fields with the config values that are present
macro_rules! overlay {
    ($options:ident, $config:ident; $( $key:ident => $field:ident, )* ) => {
        $(
            if let Some(value) = $config.$key {
                $options.$field = value.into();
            }
        )*
    };
}

impl ConfigFile {
    /// Read and parse a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// configuration.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ErrorKind::ReadConfig(path.to_path_buf(), e))?;
        Self::parse(path, &contents)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| ErrorKind::ParseConfig(path.to_path_buf(), e))
    }

    /// Overlay this configuration onto `options`
    pub fn apply(self, options: &mut CheckOptions) {
        // Parallelism from the command line takes precedence
        if options.parallel_request_count.is_none() {
            options.parallel_request_count = self.parallel;
        }

        let config = self;
        overlay! {
            options, config;
            ignore_patterns => ignore_patterns,
            replacement_patterns => replacement_patterns,
            http_headers => http_headers,
            timeout => timeout,
            ignore_disable => ignore_disable_comments,
            retry_on_429 => retry_on_429,
            retry_count => retry_count,
            fallback_retry_delay => fallback_retry_delay,
            alive_status_codes => alive_status_codes,
        }
    }
}

/// Produce the final options of a run.
///
/// Without a configuration file the command-line options are used as they
/// are. The file is read anew on every call.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be read or parsed.
pub fn merge(mut options: CheckOptions, config_file: Option<&Path>) -> Result<CheckOptions> {
    if let Some(path) = config_file {
        ConfigFile::load_from_file(path)?.apply(&mut options);
    }
    Ok(options)
}

/// A duration as written in a configuration file: a number of milliseconds,
/// either bare or as a string, or a human-readable duration such as `"20s"`
/// or `"1m 30s"`
#[serde_as]
#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigDuration {
    Millis(#[serde_as(as = "PickFirst<(_, DisplayFromStr)>")] u64),
    Human(#[serde(with = "humantime_serde")] Duration),
}

impl From<ConfigDuration> for Duration {
    fn from(value: ConfigDuration) -> Self {
        match value {
            ConfigDuration::Millis(ms) => Duration::from_millis(ms),
            ConfigDuration::Human(duration) => duration,
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ConfigDuration>::deserialize(deserializer)?.map(Duration::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GlobalOptions;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn cli_options(parallel: Option<usize>) -> CheckOptions {
        let global = GlobalOptions {
            parallel_request_count: parallel,
            alive_status_codes: Some(HashSet::from([200])),
            project_base_url: "file:///project".into(),
            ..GlobalOptions::default()
        };
        CheckOptions::new(Some("file:///project/docs".into()), &global)
    }

    #[test]
    fn test_without_config_options_are_unchanged() {
        let options = cli_options(Some(3));
        assert_eq!(merge(options.clone(), None).unwrap(), options);
    }

    #[test]
    fn test_config_parallel_applies_without_cli_value() {
        let file = config_file(r#"{ "parallel": 5 }"#);
        let merged = merge(cli_options(None), Some(file.path())).unwrap();
        assert_eq!(merged.parallel_request_count, Some(5));
    }

    #[test]
    fn test_cli_parallel_wins_over_config() {
        let file = config_file(r#"{ "parallel": 5 }"#);
        let merged = merge(cli_options(Some(3)), Some(file.path())).unwrap();
        assert_eq!(merged.parallel_request_count, Some(3));
    }

    #[test]
    fn test_config_overrides_cli_values() {
        let file = config_file(
            r#"{
                "ignorePatterns": [{ "pattern": "^https://localhost" }],
                "replacementPatterns": [{ "pattern": "^/", "replacement": "{{BASEURL}}/" }],
                "httpHeaders": [{ "urls": ["https://example.com"], "headers": { "Accept": "text/html" } }],
                "timeout": "20s",
                "ignoreDisable": true,
                "retryOn429": true,
                "retryCount": 5,
                "fallbackRetryDelay": "30s",
                "aliveStatusCodes": [200, 206]
            }"#,
        );
        let merged = merge(cli_options(None), Some(file.path())).unwrap();

        assert_eq!(
            merged.ignore_patterns,
            vec![IgnorePattern {
                pattern: "^https://localhost".into()
            }]
        );
        assert_eq!(merged.replacement_patterns[0].replacement, "{{BASEURL}}/");
        assert!(merged.http_headers[0].applies_to("https://example.com/page"));
        assert_eq!(merged.timeout, Some(Duration::from_secs(20)));
        assert!(merged.ignore_disable_comments);
        assert!(merged.retry_on_429);
        assert_eq!(merged.retry_count, Some(5));
        assert_eq!(merged.fallback_retry_delay, Some(Duration::from_secs(30)));
        assert_eq!(merged.alive_status_codes, Some(HashSet::from([200, 206])));

        // Values the configuration does not mention stay untouched
        assert_eq!(merged.base_url.as_deref(), Some("file:///project/docs"));
        assert_eq!(merged.project_base_url.as_deref(), Some("file:///project"));
    }

    #[test]
    fn test_config_can_switch_cli_flags_off() {
        let file = config_file(r#"{ "retryOn429": false }"#);
        let mut options = cli_options(None);
        options.retry_on_429 = true;
        assert!(!merge(options, Some(file.path())).unwrap().retry_on_429);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let file = config_file(r#"{ "projectBaseUrl": "x", "comment": "hello" }"#);
        let options = cli_options(Some(1));
        assert_eq!(merge(options.clone(), Some(file.path())).unwrap(), options);
    }

    #[test]
    fn test_missing_config_file_is_fatal() {
        let err = merge(cli_options(None), Some(Path::new("/definitely/not/here.json")))
            .unwrap_err();
        assert!(matches!(err, ErrorKind::ReadConfig(..)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_malformed_config_file_is_fatal() {
        let file = config_file("{ not json");
        let err = merge(cli_options(None), Some(file.path())).unwrap_err();
        assert!(matches!(err, ErrorKind::ParseConfig(..)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_config_is_read_on_every_merge() {
        let file = config_file(r#"{ "retryCount": 1 }"#);
        let first = merge(cli_options(None), Some(file.path())).unwrap();

        std::fs::write(file.path(), r#"{ "retryCount": 7 }"#).unwrap();
        let second = merge(cli_options(None), Some(file.path())).unwrap();

        assert_eq!(first.retry_count, Some(1));
        assert_eq!(second.retry_count, Some(7));
    }

    #[rstest]
    #[case(r#"{ "timeout": 1500 }"#, Duration::from_millis(1500))]
    #[case(r#"{ "timeout": "1500" }"#, Duration::from_millis(1500))]
    #[case(r#"{ "timeout": "20s" }"#, Duration::from_secs(20))]
    #[case(r#"{ "timeout": "1m 30s" }"#, Duration::from_secs(90))]
    #[case(r#"{ "timeout": "250ms" }"#, Duration::from_millis(250))]
    fn test_duration_formats(#[case] json: &str, #[case] expected: Duration) {
        let config = ConfigFile::parse(Path::new("test.json"), json).unwrap();
        assert_eq!(config.timeout, Some(expected));
    }

    #[rstest]
    #[case(r#"{ "timeout": "soon" }"#)]
    #[case(r#"{ "timeout": -1 }"#)]
    #[case(r#"{ "timeout": true }"#)]
    #[case(r#"{ "timeout": 1.5 }"#)]
    #[case(r#"{ "fallbackRetryDelay": "later" }"#)]
    #[case(r#"{ "aliveStatusCodes": "200" }"#)]
    fn test_invalid_values(#[case] json: &str) {
        assert!(matches!(
            ConfigFile::parse(Path::new("test.json"), json),
            Err(ErrorKind::ParseConfig(..))
        ));
    }

    #[test]
    fn test_null_duration_is_absent() {
        let config = ConfigFile::parse(Path::new("test.json"), r#"{ "timeout": null }"#).unwrap();
        assert_eq!(config.timeout, None);
    }
}
