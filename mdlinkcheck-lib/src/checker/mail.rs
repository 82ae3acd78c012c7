use reqwest::Url;

use crate::types::{LinkResult, LinkStatus};

/// Check a `mailto:` link.
///
/// Only the shape of the address is verified; no mail server is contacted.
pub(crate) fn check(link: &str, url: &Url) -> LinkResult {
    match url.path().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            LinkResult::new(link, LinkStatus::Alive, None)
        }
        _ => LinkResult::new(link, LinkStatus::Dead, None)
            .with_err(format!("Invalid mail address `{}`", url.path())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("mailto:someone@example.com", LinkStatus::Alive)]
    #[case("mailto:someone@example.com?subject=Hello", LinkStatus::Alive)]
    #[case("mailto:someone", LinkStatus::Dead)]
    #[case("mailto:@example.com", LinkStatus::Dead)]
    #[case("mailto:someone@", LinkStatus::Dead)]
    fn test_mail_address(#[case] link: &str, #[case] expected: LinkStatus) {
        let url = Url::parse(link).unwrap();
        assert_eq!(check(link, &url).status, expected);
    }
}
