//! mxfinance-rs: spreadsheet-shaped access to the MuslimXchange data API.
//!
//! Three sheet functions sit on top of a small authenticated client:
//!
//! - `TICKER(ticker, fields...)` and `ISIN(isin, fields...)` return one row of the requested
//!   fields, see [`functions::ticker`] and [`functions::isin`].
//! - `COMPLIANT(ticker)` returns the compliance verdict, see [`functions::compliant`].
//!
//! All of them read the session token from the client's [`CredentialStore`], which a
//! [`Session`] fills on login, and none of them ever return an error: failures become short
//! phrases in the cell.
//!
//! ```no_run
//! # use mxfinance_rs::{MxClient, Session, functions};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MxClient::default();
//! Session::new(&client).login("alice", "s3cret").await?;
//!
//! let row = functions::ticker(&client, "AAPL", ["price", "sector"]).await;
//! println!("{row:?}");
//! # Ok(())
//! # }
//! ```

pub mod compliance;
pub mod core;
pub mod credentials;
pub mod functions;
pub mod projection;
pub mod session;

pub use compliance::{ComplianceCheck, Verdict};
pub use crate::core::{
    CellResult, CellValue, Grid, HttpTransport, Method, MxClient, MxClientBuilder, MxError,
    Transport, TransportRequest, TransportResponse,
};
pub use credentials::{Credential, CredentialStore, FileStore, MemoryStore};
pub use functions::{CellCall, CellFunction};
pub use projection::{EntityKind, FieldArg, FieldLookup, FieldRequest, RemoteRecord};
pub use session::{SecureGreeting, Session, User};

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `mxfinance_rs=debug`).
///
/// Calling it twice is harmless; the second call is ignored.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mxfinance_rs=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
