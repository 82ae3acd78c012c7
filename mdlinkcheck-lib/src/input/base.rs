//! Derivation of the base URLs handed to the checker.

use std::path::Path;

use reqwest::Url;

use crate::utils::path;
use crate::{ErrorKind, Result};

const FILE_SCHEME_PREFIX: &str = "file://";

/// The "directory" of a remote document: `url` without query and fragment,
/// with its path cut after the last `/`.
///
/// `https://example.com/a/b?x=1#y` becomes `https://example.com/a/`.
#[must_use]
pub fn url_base(url: &Url) -> String {
    let mut base = url.clone();
    base.set_query(None);
    base.set_fragment(None);
    let dir = match base.path().rfind('/') {
        Some(idx) => base.path()[..=idx].to_string(),
        None => "/".to_string(),
    };
    base.set_path(&dir);
    base.to_string()
}

/// `file://` followed by the absolute parent directory of `file`
///
/// # Errors
///
/// Returns an error if `file` is relative and the current working directory
/// cannot be determined.
pub fn file_base(file: &Path) -> Result<String> {
    let absolute = path::absolute(file)?;
    let parent = absolute.parent().unwrap_or(&absolute);
    Ok(format!("{FILE_SCHEME_PREFIX}{}", parent.display()))
}

/// The project base URL shared by every target.
///
/// This is the file scheme followed by `flag` if one was given on the command
/// line, or by the current working directory otherwise.
///
/// # Errors
///
/// Returns an error if no flag was given and the current working directory
/// cannot be determined.
pub fn project_base_url(flag: Option<&str>) -> Result<String> {
    match flag {
        Some(value) => Ok(format!("{FILE_SCHEME_PREFIX}{value}")),
        None => {
            let cwd = std::env::current_dir().map_err(ErrorKind::CurrentDir)?;
            Ok(format!("{FILE_SCHEME_PREFIX}{}", cwd.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("https://example.com/a/b?x=1#y", "https://example.com/a/")]
    #[case("https://example.com/a/b/", "https://example.com/a/b/")]
    #[case("https://example.com/README.md", "https://example.com/")]
    #[case("https://example.com", "https://example.com/")]
    #[case("http://example.com:8080/docs/guide.md#intro", "http://example.com:8080/docs/")]
    fn test_url_base(#[case] input: &str, #[case] expected: &str) {
        let url = Url::parse(input).unwrap();
        assert_eq!(url_base(&url), expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_base_of_absolute_path() {
        let base = file_base(Path::new("/srv/docs/README.md")).unwrap();
        assert_eq!(base, "file:///srv/docs");
    }

    #[test]
    fn test_file_base_of_relative_path() {
        let cwd = std::env::current_dir().unwrap();
        let base = file_base(Path::new("docs/./README.md")).unwrap();
        assert_eq!(base, format!("file://{}", cwd.join("docs").display()));
    }

    #[test]
    fn test_project_base_url() {
        assert_eq!(
            project_base_url(Some("/srv/project")).unwrap(),
            "file:///srv/project"
        );

        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            project_base_url(None).unwrap(),
            format!("file://{}", cwd.display())
        );
    }
}
