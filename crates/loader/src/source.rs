use std::future::Future;
use std::pin::Pin;

/// Refuse to buffer feeds larger than this; the biggest real dataset (the
/// full launch log) is under 4 MB.
pub const MAX_FETCH_BYTES: usize = 8 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// URL scheme is not http or https.
    Scheme(String),
    /// Transport-level failure (DNS, connect, read).
    Transport(String),
    /// Non-success HTTP status.
    Status(u16),
    /// Response exceeded `MAX_FETCH_BYTES`.
    TooLarge(usize),
    /// Response body is not valid UTF-8.
    Encoding(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Scheme(url) => write!(f, "unsupported url scheme: {url}"),
            FetchError::Transport(msg) => write!(f, "fetch failed: {msg}"),
            FetchError::Status(code) => write!(f, "http status {code}"),
            FetchError::TooLarge(len) => write!(f, "response too large: {len} bytes"),
            FetchError::Encoding(msg) => write!(f, "response is not utf-8: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A source of plain-text datasets.
///
/// Methods return boxed futures for dyn-compatibility; tests substitute an
/// in-memory implementation so no loader test touches the network.
pub trait TextSource: Send + Sync {
    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>>;
}

/// HTTP text source backed by a shared `reqwest` client.
#[derive(Debug, Default)]
pub struct HttpTextSource {
    client: reqwest::Client,
}

impl HttpTextSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl TextSource for HttpTextSource {
    fn fetch_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        Box::pin(async move {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(FetchError::Scheme(url.to_string()));
            }

            let resp = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            if !resp.status().is_success() {
                return Err(FetchError::Status(resp.status().as_u16()));
            }

            let bytes = resp
                .bytes()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            if bytes.len() > MAX_FETCH_BYTES {
                return Err(FetchError::TooLarge(bytes.len()));
            }

            String::from_utf8(bytes.to_vec()).map_err(|e| FetchError::Encoding(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{FetchError, HttpTextSource, TextSource};

    #[tokio::test]
    async fn non_http_scheme_is_rejected_without_io() {
        let source = HttpTextSource::new();
        let err = source.fetch_text("file:///etc/passwd").await.unwrap_err();
        assert_eq!(err, FetchError::Scheme("file:///etc/passwd".to_string()));
    }
}
