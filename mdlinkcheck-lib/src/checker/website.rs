use std::time::{Duration, SystemTime};

use http::header::{HeaderMap, HeaderName, HeaderValue, RETRY_AFTER};
use http::{Method, StatusCode};
use log::debug;
use reqwest::{Client, Response, Url};

use crate::types::{CheckOptions, HttpHeaders, LinkResult, LinkStatus};
use crate::{ErrorKind, Result};

/// Configured request headers, validated up front
#[derive(Debug, Default)]
pub(crate) struct RequestHeaders(Vec<(Vec<String>, HeaderMap)>);

impl RequestHeaders {
    /// # Errors
    ///
    /// Returns an error if a header name or value is not valid in HTTP.
    pub(crate) fn new(headers: &[HttpHeaders]) -> Result<Self> {
        let mut entries = Vec::with_capacity(headers.len());
        for entry in headers {
            let mut map = HeaderMap::with_capacity(entry.headers.len());
            for (name, value) in &entry.headers {
                let header_name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|_| ErrorKind::InvalidHeader(name.clone()))?;
                let header_value = HeaderValue::from_str(value)
                    .map_err(|_| ErrorKind::InvalidHeader(format!("{name}: {value}")))?;
                map.insert(header_name, header_value);
            }
            entries.push((entry.urls.clone(), map));
        }
        Ok(Self(entries))
    }

    /// All headers whose URL prefixes match `link`
    fn for_link(&self, link: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (prefixes, map) in &self.0 {
            if prefixes.iter().any(|prefix| link.starts_with(prefix.as_str())) {
                headers.extend(map.clone());
            }
        }
        headers
    }
}

/// Checks `http` and `https` links
pub(crate) struct WebsiteChecker<'a> {
    client: &'a Client,
    headers: &'a RequestHeaders,
    options: &'a CheckOptions,
}

impl<'a> WebsiteChecker<'a> {
    pub(crate) const fn new(
        client: &'a Client,
        headers: &'a RequestHeaders,
        options: &'a CheckOptions,
    ) -> Self {
        Self {
            client,
            headers,
            options,
        }
    }

    /// Check `url`, reporting the result under the name `link`.
    ///
    /// A `HEAD` request is tried first; servers that do not answer it with an
    /// alive status get a `GET` request. A `429 Too Many Requests` answer is
    /// retried when configured, after the delay the server asks for.
    pub(crate) async fn check(&self, link: &str, url: &Url) -> LinkResult {
        let headers = self.headers.for_link(url.as_str());
        let max_retries = self.options.max_retries();
        let mut retries = 0;

        loop {
            let response = match self.head_then_get(url, &headers).await {
                Ok(response) => response,
                Err(e) => {
                    return LinkResult::new(link, LinkStatus::Dead, None).with_err(e.to_string());
                }
            };

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS && retries < max_retries {
                retries += 1;
                let delay = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(parse_retry_after)
                    .unwrap_or_else(|| self.options.fallback_retry_delay());
                debug!("`{url}` is rate limited, retry {retries}/{max_retries} in {delay:?}");
                tokio::time::sleep(delay).await;
                continue;
            }

            let code = status.as_u16();
            let link_status = if self.options.is_alive_status(code) {
                LinkStatus::Alive
            } else {
                LinkStatus::Dead
            };
            return LinkResult::new(link, link_status, Some(code));
        }
    }

    async fn head_then_get(&self, url: &Url, headers: &HeaderMap) -> reqwest::Result<Response> {
        match self.request(Method::HEAD, url, headers).await {
            Ok(response)
                if self.options.is_alive_status(response.status().as_u16())
                    || response.status() == StatusCode::TOO_MANY_REQUESTS =>
            {
                Ok(response)
            }
            Ok(response) => {
                debug!("HEAD `{url}` returned {}, trying GET", response.status());
                self.request(Method::GET, url, headers).await
            }
            Err(e) => {
                debug!("HEAD `{url}` failed, trying GET: {e}");
                self.request(Method::GET, url, headers).await
            }
        }
    }

    async fn request(
        &self,
        method: Method,
        url: &Url,
        headers: &HeaderMap,
    ) -> reqwest::Result<Response> {
        self.client
            .request(method, url.clone())
            .headers(headers.clone())
            .timeout(self.options.timeout())
            .send()
            .await
    }
}

/// Parse the `Retry-After` header value, which is either a number of seconds
/// or an HTTP date.
/// Dates in the past mean no delay.
fn parse_retry_after(value: &HeaderValue) -> Option<Duration> {
    let value = value.to_str().ok()?;

    // RFC 7231: Retry-After = HTTP-date / delay-seconds
    value.parse::<u64>().map(Duration::from_secs).ok().or_else(|| {
        httpdate::parse_http_date(value)
            .ok()
            .map(|date| date.duration_since(SystemTime::now()).unwrap_or(Duration::ZERO))
    })
}
