//! Core components of the `mxfinance-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`MxClient`] and its builder.
//! - The primary [`MxError`] type.
//! - The spreadsheet value model ([`CellValue`], [`CellResult`]).
//! - The [`Transport`] seam all HTTP traffic goes through.

/// The main client (`MxClient`), builder, and configuration.
pub mod client;
/// The primary error type (`MxError`) for the crate.
pub mod error;
/// Spreadsheet cell values and grids.
pub mod cell;
/// The HTTP transport trait and its `reqwest` implementation.
pub mod transport;

// convenient re-exports so most code can just `use crate::core::MxClient`
pub use cell::{CellResult, CellValue, Grid};
pub use client::{MxClient, MxClientBuilder};
pub use error::MxError;
pub use transport::{HttpTransport, Method, Transport, TransportRequest, TransportResponse};
