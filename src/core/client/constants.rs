//! Centralized constants for default endpoints and UA.

/// UA sent with every request.
pub(crate) const USER_AGENT: &str = concat!("mxfinance-rs/", env!("CARGO_PKG_VERSION"));

/// MuslimXchange REST base (endpoint names are appended).
pub(crate) const DEFAULT_API_BASE: &str = "https://muslimxchange.com/wp-json/mx/v1/";

/// Key under which the session token lives in the credential store.
pub const CREDENTIAL_KEY: &str = "jwt";

/// Verdict endpoint.
pub(crate) const ENDPOINT_HELLO: &str = "hello";

/// Credential issuance endpoint.
pub(crate) const ENDPOINT_LOGIN: &str = "login";

/// Authenticated identity echo.
pub(crate) const ENDPOINT_SECURE_HELLO: &str = "secure-hello";

/// Environment override for the API base URL.
pub(crate) const ENV_API_BASE: &str = "MX_API_BASE";

/// Environment override for the overall request timeout, in seconds.
pub(crate) const ENV_TIMEOUT_SECS: &str = "MX_TIMEOUT_SECS";

/// Environment selector for the credential store (`memory` or `file`).
pub(crate) const ENV_CREDENTIALS: &str = "MX_CREDENTIALS";
