//! Field-projected lookups: one entity, an arbitrary list of fields, one row back.

mod fields;
mod reduce;

pub use fields::{FieldArg, FieldRequest};
pub use reduce::{RemoteRecord, UNKNOWN, reduce};

use crate::core::transport::{TransportRequest, set_query};
use crate::core::{CellValue, MxClient, MxError};
use crate::credentials::Credential;
use url::Url;

/// Which identifier the entity is looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Exchange ticker symbol, served by `ticker-data`.
    Ticker,
    /// International Securities Identification Number, served by `isin-data`.
    Isin,
}

impl EntityKind {
    /// Endpoint name under the API base.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Ticker => "ticker-data",
            Self::Isin => "isin-data",
        }
    }

    /// Query parameter carrying the identifier.
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Ticker => "ticker",
            Self::Isin => "isin",
        }
    }
}

/// Builds the lookup URL: `{base}{endpoint}?{param}={id}&fields={a,b,..}&token={credential}`.
///
/// The identifier is sent exactly as given. `fields` is always present, empty when no field
/// was requested.
///
/// # Errors
///
/// Returns [`MxError::Url`] if the endpoint cannot be joined onto the API base.
pub fn lookup_url(
    client: &MxClient,
    kind: EntityKind,
    entity_id: &str,
    fields: &FieldRequest,
    credential: &Credential,
) -> Result<Url, MxError> {
    let mut url = client.endpoint(kind.endpoint())?;
    let joined = fields.joined();
    set_query(
        &mut url,
        &[
            (kind.param(), entity_id),
            ("fields", joined.as_str()),
            ("token", credential.expose()),
        ],
    );
    Ok(url)
}

/// A builder for a single field-projected lookup.
///
/// # Example
///
/// ```no_run
/// # use mxfinance_rs::{EntityKind, FieldLookup, MxClient};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = MxClient::default();
/// let row = FieldLookup::new(&client, EntityKind::Ticker, "AAPL")
///     .fields(["price", "sector"])
///     .fetch_row()
///     .await?;
/// println!("{row:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FieldLookup {
    client: MxClient,
    kind: EntityKind,
    entity_id: String,
    fields: FieldRequest,
}

impl FieldLookup {
    /// Creates a lookup of `entity_id` with no fields requested yet.
    pub fn new(client: &MxClient, kind: EntityKind, entity_id: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            kind,
            entity_id: entity_id.into(),
            fields: FieldRequest::default(),
        }
    }

    /// Sets the requested fields. Nested groups are flattened in order.
    #[must_use]
    pub fn fields<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldArg>,
    {
        self.fields = FieldRequest::from_args(args);
        self
    }

    /// Sets an already flattened field request.
    #[must_use]
    pub fn field_request(mut self, fields: FieldRequest) -> Self {
        self.fields = fields;
        self
    }

    /// The flattened fields this lookup will ask for.
    #[must_use]
    pub const fn requested(&self) -> &FieldRequest {
        &self.fields
    }

    /// Fetches the raw record for the entity.
    ///
    /// The credential is checked before anything is sent.
    ///
    /// # Errors
    ///
    /// - [`MxError::LoginRequired`] when no credential is stored.
    /// - [`MxError::Http`] when the request could not be completed.
    /// - [`MxError::Status`] for a non-2xx response; the body is not read.
    /// - [`MxError::Json`] / [`MxError::Data`] when the body is not a usable record.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            skip(self),
            err,
            fields(kind = ?self.kind, entity = %self.entity_id)
        )
    )]
    pub async fn fetch_record(&self) -> Result<RemoteRecord, MxError> {
        let credential = self.client.credential().ok_or(MxError::LoginRequired)?;
        self.fetch_record_with(&credential).await
    }

    /// Fetches the record and projects it onto the requested fields.
    ///
    /// # Errors
    ///
    /// Same as [`FieldLookup::fetch_record`].
    pub async fn fetch_row(&self) -> Result<Vec<CellValue>, MxError> {
        let record = self.fetch_record().await?;
        Ok(reduce(&record, &self.fields))
    }

    /// Like [`FieldLookup::fetch_record`], with an explicitly supplied credential.
    ///
    /// # Errors
    ///
    /// Same as [`FieldLookup::fetch_record`], minus [`MxError::LoginRequired`].
    pub async fn fetch_record_with(
        &self,
        credential: &Credential,
    ) -> Result<RemoteRecord, MxError> {
        let url = lookup_url(
            &self.client,
            self.kind,
            &self.entity_id,
            &self.fields,
            credential,
        )?;

        let resp = self.client.send(TransportRequest::get(url.clone())).await?;
        if !resp.is_success() {
            #[cfg(feature = "tracing")]
            tracing::debug!(status = resp.status, "field lookup returned failure status");
            return Err(MxError::Status {
                status: resp.status,
                url: redact_token(&url),
            });
        }

        RemoteRecord::from_body(&resp.body)
    }
}

/// The URL with its `token` value masked, safe to put in errors and logs.
pub(crate) fn redact_token(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "token" {
                "REDACTED".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    if pairs.is_empty() {
        return masked.to_string();
    }
    let borrowed: Vec<(&str, &str)> = pairs
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    set_query(&mut masked, &borrowed);
    masked.to_string()
}
