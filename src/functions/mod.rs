//! Spreadsheet-callable functions.
//!
//! Everything here returns a [`CellResult`] and never an error: each failure becomes a short
//! phrase in the calling cell. Precedence, first match wins:
//!
//! 1. no stored credential: `Login required` (nothing is sent)
//! 2. request not completed: `Request Failed` (`Network Error` for [`compliant`])
//! 3. non-2xx status: `API Error {status}`
//! 4. unusable body: `Request Failed`
//!
//! Fields the service does not return are not errors; see [`crate::projection::reduce`].

use crate::compliance::ComplianceCheck;
use crate::core::{CellResult, CellValue, MxClient, MxError};
use crate::projection::{EntityKind, FieldArg, FieldLookup, FieldRequest, reduce};
use futures::future::join_all;

/// Shown when no session token is stored.
pub const LOGIN_REQUIRED: &str = "Login required";
/// Shown when a lookup could not be completed or its body was unusable.
pub const REQUEST_FAILED: &str = "Request Failed";
/// Shown by [`compliant`] when the request could not be completed.
pub const NETWORK_ERROR: &str = "Network Error";

/// `=TICKER(ticker, fields...)`: one row of the requested fields for a ticker symbol.
pub async fn ticker<I>(client: &MxClient, ticker: &str, fields: I) -> CellResult
where
    I: IntoIterator,
    I::Item: Into<FieldArg>,
{
    project(client, EntityKind::Ticker, ticker, FieldRequest::from_args(fields)).await
}

/// `=ISIN(isin, fields...)`: one row of the requested fields for an ISIN.
pub async fn isin<I>(client: &MxClient, isin: &str, fields: I) -> CellResult
where
    I: IntoIterator,
    I::Item: Into<FieldArg>,
{
    project(client, EntityKind::Isin, isin, FieldRequest::from_args(fields)).await
}

/// `=COMPLIANT(ticker)`: the service's compliance message for a ticker.
///
/// Falls back to `Unknown status for {ticker}` when the response has no message.
/// A missing login spills as a one-cell grid; every other outcome is a scalar.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(client)))]
pub async fn compliant(client: &MxClient, ticker: &str) -> CellResult {
    let Some(credential) = client.credential() else {
        return CellResult::diagnostic(LOGIN_REQUIRED);
    };

    let cell = match ComplianceCheck::new(client, ticker)
        .fetch_with(&credential)
        .await
    {
        Ok(verdict) => verdict.into_cell(ticker),
        Err(MxError::Http(_)) => CellValue::text(NETWORK_ERROR),
        Err(MxError::Status { status, .. }) => CellValue::Text(format!("API Error {status}")),
        Err(_) => CellValue::text(REQUEST_FAILED),
    };
    CellResult::Scalar(cell)
}

/// Shared body of [`ticker`] and [`isin`].
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(client, fields), fields(n = fields.len()))
)]
pub async fn project(
    client: &MxClient,
    kind: EntityKind,
    entity_id: &str,
    fields: FieldRequest,
) -> CellResult {
    let Some(credential) = client.credential() else {
        #[cfg(feature = "tracing")]
        tracing::debug!("no credential; short-circuiting");
        return CellResult::diagnostic(LOGIN_REQUIRED);
    };

    let lookup = FieldLookup::new(client, kind, entity_id).field_request(fields);
    match lookup.fetch_record_with(&credential).await {
        Ok(record) => CellResult::row(reduce(&record, lookup.requested())),
        Err(MxError::Status { status, .. }) => {
            CellResult::diagnostic(format!("API Error {status}"))
        }
        Err(_) => CellResult::diagnostic(REQUEST_FAILED),
    }
}

/// The spreadsheet functions by their sheet names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellFunction {
    /// `TICKER`
    Ticker,
    /// `ISIN`
    Isin,
    /// `COMPLIANT`
    Compliant,
}

impl CellFunction {
    /// Looks up a function by sheet name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "TICKER" => Some(Self::Ticker),
            "ISIN" => Some(Self::Isin),
            "COMPLIANT" => Some(Self::Compliant),
            _ => None,
        }
    }

    /// The sheet name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ticker => "TICKER",
            Self::Isin => "ISIN",
            Self::Compliant => "COMPLIANT",
        }
    }
}

/// One formula instance: a function, its entity argument and any field arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellCall {
    /// Which function the cell calls.
    pub function: CellFunction,
    /// Ticker or ISIN argument.
    pub entity: String,
    /// Remaining arguments. Ignored by `COMPLIANT`.
    pub fields: Vec<FieldArg>,
}

impl CellCall {
    /// A call with no field arguments.
    pub fn new(function: CellFunction, entity: impl Into<String>) -> Self {
        Self {
            function,
            entity: entity.into(),
            fields: Vec::new(),
        }
    }

    /// Appends field arguments.
    #[must_use]
    pub fn with_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FieldArg>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }
}

/// Evaluates a single formula.
pub async fn evaluate(client: &MxClient, call: &CellCall) -> CellResult {
    match call.function {
        CellFunction::Ticker => ticker(client, &call.entity, call.fields.iter().cloned()).await,
        CellFunction::Isin => isin(client, &call.entity, call.fields.iter().cloned()).await,
        CellFunction::Compliant => compliant(client, &call.entity).await,
    }
}

/// Evaluates many formulas concurrently, as a sheet recalculation does.
///
/// Each call runs independently; results come back in the order of `calls`.
pub async fn recalculate(client: &MxClient, calls: &[CellCall]) -> Vec<CellResult> {
    join_all(calls.iter().map(|call| evaluate(client, call))).await
}
