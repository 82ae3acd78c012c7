use reqwest::Url;

use crate::types::{LinkResult, LinkStatus};

/// Status code reported for existing local files
const FOUND: u16 = 200;
/// Status code reported for missing local files
const NOT_FOUND: u16 = 400;

/// Check a `file://` link by looking at the filesystem.
///
/// Query and fragment are ignored; only the existence of the path matters.
pub(crate) async fn check(link: &str, url: &Url) -> LinkResult {
    let Ok(path) = url.to_file_path() else {
        return LinkResult::new(link, LinkStatus::Error, None)
            .with_err(format!("`{url}` is not a valid file path"));
    };

    if tokio::fs::try_exists(&path).await.unwrap_or(false) {
        LinkResult::new(link, LinkStatus::Alive, Some(FOUND))
    } else {
        LinkResult::new(link, LinkStatus::Dead, Some(NOT_FOUND))
            .with_err(format!("File not found: {}", path.display()))
    }
}
