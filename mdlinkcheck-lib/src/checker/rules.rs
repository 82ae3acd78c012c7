use regex::Regex;

use crate::types::CheckOptions;
use crate::{ErrorKind, Result};

const BASEURL_PLACEHOLDER: &str = "{{BASEURL}}";

/// Compiled ignore and replacement patterns of one run
#[derive(Debug, Default)]
pub(crate) struct LinkRules {
    ignores: Vec<Regex>,
    replacements: Vec<(Regex, String)>,
}

impl LinkRules {
    /// Compile the patterns of `options`
    ///
    /// # Errors
    ///
    /// Returns an error for the first pattern that is not a valid regular
    /// expression.
    pub(crate) fn new(options: &CheckOptions) -> Result<Self> {
        let ignores = options
            .ignore_patterns
            .iter()
            .map(|p| compile(&p.pattern))
            .collect::<Result<_>>()?;

        // `$` would start a capture group reference in the replacement
        let project_base = options
            .project_base_url
            .as_deref()
            .unwrap_or_default()
            .replace('$', "$$");
        let replacements = options
            .replacement_patterns
            .iter()
            .map(|p| {
                let replacement = p.replacement.replace(BASEURL_PLACEHOLDER, &project_base);
                Ok((compile(&p.pattern)?, replacement))
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            ignores,
            replacements,
        })
    }

    pub(crate) fn is_ignored(&self, link: &str) -> bool {
        self.ignores.iter().any(|re| re.is_match(link))
    }

    /// Apply every replacement pattern in order; each replaces its first match
    pub(crate) fn rewrite(&self, link: &str) -> String {
        self.replacements
            .iter()
            .fold(link.to_string(), |link, (re, replacement)| {
                re.replace(&link, replacement.as_str()).into_owned()
            })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ErrorKind::InvalidPattern(pattern.to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IgnorePattern, ReplacementPattern};
    use pretty_assertions::assert_eq;

    fn options() -> CheckOptions {
        CheckOptions {
            project_base_url: Some("file:///srv/project".into()),
            ignore_patterns: vec![IgnorePattern {
                pattern: "^https?://localhost".into(),
            }],
            replacement_patterns: vec![
                ReplacementPattern {
                    pattern: "^/".into(),
                    replacement: "{{BASEURL}}/".into(),
                },
                ReplacementPattern {
                    pattern: "^https://old\\.example\\.com/(.*)$".into(),
                    replacement: "https://new.example.com/$1".into(),
                },
            ],
            ..CheckOptions::default()
        }
    }

    #[test]
    fn test_ignore() {
        let rules = LinkRules::new(&options()).unwrap();
        assert!(rules.is_ignored("http://localhost:8080/x"));
        assert!(!rules.is_ignored("https://example.com"));
    }

    #[test]
    fn test_rewrite_with_base_url_placeholder() {
        let rules = LinkRules::new(&options()).unwrap();
        assert_eq!(rules.rewrite("/docs/a.md"), "file:///srv/project/docs/a.md");
    }

    #[test]
    fn test_rewrite_with_capture_group() {
        let rules = LinkRules::new(&options()).unwrap();
        assert_eq!(
            rules.rewrite("https://old.example.com/page"),
            "https://new.example.com/page"
        );
        assert_eq!(rules.rewrite("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_dollar_in_project_base_is_literal() {
        let mut options = options();
        options.project_base_url = Some("file:///srv/$HOME".into());
        let rules = LinkRules::new(&options).unwrap();
        assert_eq!(rules.rewrite("/a.md"), "file:///srv/$HOME/a.md");
    }

    #[test]
    fn test_invalid_pattern() {
        let mut options = options();
        options.ignore_patterns.push(IgnorePattern {
            pattern: "(unclosed".into(),
        });
        let err = LinkRules::new(&options).unwrap_err();
        assert!(matches!(err, ErrorKind::InvalidPattern(..)));
        assert!(!err.is_fatal());
    }
}
