//! The HTTP seam. Everything that talks to the network goes through [`Transport`].

use crate::core::MxError;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Client;
use url::Url;

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes one query value on its own, so `,`, `&`, `=` and spaces inside it
/// cannot bleed into neighbouring parameters.
pub(crate) fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT_ENCODE_SET).to_string()
}

/// Sets `url`'s query to `pairs`, encoding every key and value independently.
pub(crate) fn set_query(url: &mut Url, pairs: &[(&str, &str)]) {
    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&");
    url.set_query(Some(&query));
}

/// HTTP method used by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

/// One outbound request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Request method.
    pub method: Method,
    /// Fully built URL, query string included.
    pub url: Url,
    /// Optional JSON body (sent with `Content-Type: application/json`).
    pub json: Option<serde_json::Value>,
    /// Optional bearer token for the `Authorization` header.
    pub bearer: Option<String>,
}

impl TransportRequest {
    /// A plain `GET` with no body and no auth header.
    #[must_use]
    pub const fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            json: None,
            bearer: None,
        }
    }

    /// A `POST` carrying a JSON body.
    #[must_use]
    pub const fn post_json(url: Url, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            url,
            json: Some(body),
            bearer: None,
        }
    }

    /// Attaches a bearer token.
    #[must_use]
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// A completed round trip. Any status code lands here, including failures.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body text.
    pub body: String,
}

impl TransportResponse {
    /// Whether the status is in the `2xx` range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Performs one HTTP request per call.
///
/// An `Err` means the request never completed; a response with a failing status is still `Ok`.
/// Implementations must return `Ok` once a non-2xx status has arrived, even if its body cannot
/// be read, and report an unreadable 2xx body as [`MxError::Data`] rather than [`MxError::Http`].
/// It is implemented by [`HttpTransport`] and can be swapped out on the client builder.
pub trait Transport: Send + Sync {
    /// Sends `req` and resolves to the status and body text.
    fn send<'a>(
        &'a self,
        req: TransportRequest,
    ) -> core::pin::Pin<
        Box<dyn core::future::Future<Output = Result<TransportResponse, MxError>> + Send + 'a>,
    >;
}

/// Default transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Wraps an already configured client.
    #[must_use]
    pub const fn new(http: Client) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    fn send<'a>(
        &'a self,
        req: TransportRequest,
    ) -> core::pin::Pin<
        Box<dyn core::future::Future<Output = Result<TransportResponse, MxError>> + Send + 'a>,
    > {
        Box::pin(async move {
            let mut builder = match req.method {
                Method::Get => self.http.get(req.url),
                Method::Post => self.http.post(req.url),
            };
            if let Some(body) = &req.json {
                builder = builder.json(body);
            }
            if let Some(token) = &req.bearer {
                builder = builder.bearer_auth(token);
            }

            let resp = builder.send().await?;
            let status = resp.status().as_u16();

            // A failing status wins over a broken body.
            let body = if resp.status().is_success() {
                resp.text()
                    .await
                    .map_err(|e| MxError::Data(format!("failed to read response body: {e}")))?
            } else {
                resp.text().await.unwrap_or_default()
            };

            #[cfg(feature = "tracing")]
            tracing::trace!(status, bytes = body.len(), "transport round trip complete");

            Ok(TransportResponse { status, body })
        })
    }
}
