//! Compliance verdicts from the `hello` endpoint.

use crate::core::client::ENDPOINT_HELLO;
use crate::core::transport::{TransportRequest, set_query};
use crate::core::{CellValue, MxClient, MxError};
use crate::credentials::Credential;
use crate::projection::redact_token;
use serde_json::Value;

/// What the service said about a ticker.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The service's own `message`.
    Message(CellValue),
    /// The response carried no usable `message`.
    Unknown,
}

impl Verdict {
    /// The verdict as a cell, using `Unknown status for {ticker}` when there is no message.
    #[must_use]
    pub fn into_cell(self, ticker: &str) -> CellValue {
        match self {
            Self::Message(v) => v,
            Self::Unknown => CellValue::Text(format!("Unknown status for {ticker}")),
        }
    }
}

/// A builder for a compliance check of one ticker.
#[derive(Debug, Clone)]
pub struct ComplianceCheck {
    client: MxClient,
    ticker: String,
}

impl ComplianceCheck {
    /// Creates a check for `ticker`.
    pub fn new(client: &MxClient, ticker: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            ticker: ticker.into(),
        }
    }

    /// Runs the check with the stored credential.
    ///
    /// # Errors
    ///
    /// - [`MxError::LoginRequired`] when no credential is stored; nothing is sent.
    /// - [`MxError::Http`] when the request could not be completed.
    /// - [`MxError::Status`] for a non-2xx response.
    /// - [`MxError::Json`] / [`MxError::Data`] when the body is malformed, unreadable or `null`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), err, fields(ticker = %self.ticker))
    )]
    pub async fn fetch(&self) -> Result<Verdict, MxError> {
        let credential = self.client.credential().ok_or(MxError::LoginRequired)?;
        self.fetch_with(&credential).await
    }

    /// Runs the check with an explicitly supplied credential.
    ///
    /// # Errors
    ///
    /// Same as [`ComplianceCheck::fetch`], minus [`MxError::LoginRequired`].
    pub async fn fetch_with(&self, credential: &Credential) -> Result<Verdict, MxError> {
        let mut url = self.client.endpoint(ENDPOINT_HELLO)?;
        set_query(
            &mut url,
            &[("ticker", self.ticker.as_str()), ("token", credential.expose())],
        );

        let resp = self.client.send(TransportRequest::get(url.clone())).await?;
        if !resp.is_success() {
            return Err(MxError::Status {
                status: resp.status,
                url: redact_token(&url),
            });
        }

        parse_verdict(&resp.body)
    }
}

/// Extracts the verdict from a `hello` body.
///
/// Only a truthy `message` counts: empty strings, `0`, `false` and `null` fall back to
/// [`Verdict::Unknown`]. Non-object bodies have no `message`; a `null` body is an error.
///
/// # Errors
///
/// Returns [`MxError::Json`] for a malformed body and [`MxError::Data`] for `null`.
pub fn parse_verdict(body: &str) -> Result<Verdict, MxError> {
    let data: Value = serde_json::from_str(body)?;
    let message = match &data {
        Value::Null => return Err(MxError::Data("response body is null".into())),
        Value::Object(map) => map.get("message"),
        _ => None,
    };

    Ok(match message {
        Some(v) if is_truthy(v) => {
            CellValue::from_json(v).map_or(Verdict::Unknown, Verdict::Message)
        }
        _ => Verdict::Unknown,
    })
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
