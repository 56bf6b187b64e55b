//! Public client surface + builder.
//! Defaults (UA, base URL, store key) live in `constants`.

mod constants;

pub use constants::CREDENTIAL_KEY;
pub(crate) use constants::{ENDPOINT_HELLO, ENDPOINT_LOGIN, ENDPOINT_SECURE_HELLO};

use crate::core::MxError;
use crate::core::transport::{HttpTransport, Transport, TransportRequest, TransportResponse};
use crate::credentials::{self, Credential, CredentialStore, FileStore, MemoryStore};
use constants::{DEFAULT_API_BASE, ENV_API_BASE, ENV_CREDENTIALS, ENV_TIMEOUT_SECS, USER_AGENT};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Handle to the remote data service.
///
/// Cheap to clone; clones share the transport and the credential store, so one client can
/// serve any number of concurrent cell evaluations.
#[derive(Clone)]
pub struct MxClient {
    api_base: Url,
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
}

impl fmt::Debug for MxClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MxClient")
            .field("api_base", &self.api_base.as_str())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl Default for MxClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl MxClient {
    /// Create a new builder.
    #[must_use]
    pub fn builder() -> MxClientBuilder {
        MxClientBuilder::default()
    }

    /// Base URL every endpoint is resolved against (always ends with `/`).
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// The injected credential store.
    #[must_use]
    pub fn credential_store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// The current session credential, if any. Never touches the network.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        credentials::resolve(self.store.as_ref())
    }

    /* -------- internal helpers used by other modules -------- */

    pub(crate) fn endpoint(&self, name: &str) -> Result<Url, MxError> {
        Ok(self.api_base.join(name)?)
    }

    pub(crate) async fn send(&self, req: TransportRequest) -> Result<TransportResponse, MxError> {
        self.transport.send(req).await
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct MxClientBuilder {
    api_base: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    store: Option<Arc<dyn CredentialStore>>,
    transport: Option<Arc<dyn Transport>>,
    env_error: Option<MxError>,
}

impl MxClientBuilder {
    /// A builder seeded from the environment.
    ///
    /// - `MX_API_BASE`: API base URL.
    /// - `MX_TIMEOUT_SECS`: overall request timeout.
    /// - `MX_CREDENTIALS`: `file` persists the session under the user config directory,
    ///   anything else keeps it in memory.
    ///
    /// Unparseable values surface from [`MxClientBuilder::build`].
    #[must_use]
    pub fn from_env() -> Self {
        let mut b = Self::default();

        if let Ok(raw) = std::env::var(ENV_API_BASE) {
            match Url::parse(raw.trim()) {
                Ok(url) => b.api_base = Some(url),
                Err(e) => b.env_error = Some(MxError::Url(e)),
            }
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => b.timeout = Some(Duration::from_secs(secs)),
                Err(_) => {
                    b.env_error = Some(MxError::Data(format!(
                        "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {raw:?}"
                    )));
                }
            }
        }
        if std::env::var(ENV_CREDENTIALS)
            .is_ok_and(|v| v.trim().eq_ignore_ascii_case("file"))
            && let Some(store) = FileStore::default_location()
        {
            b.store = Some(Arc::new(store));
        }

        b
    }

    /// Override the API base (e.g., `https://muslimxchange.com/wp-json/mx/v1/`).
    ///
    /// A missing trailing slash is added so endpoint names resolve beneath it.
    #[must_use]
    pub fn api_base(mut self, url: Url) -> Self {
        self.api_base = Some(url);
        self
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Use `store` for the session credential. Default: a fresh [`MemoryStore`].
    #[must_use]
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the HTTP transport. When set, `user_agent` and the timeouts are ignored.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment override was malformed, the base URL cannot be
    /// parsed, or the HTTP client fails to initialize.
    pub fn build(self) -> Result<MxClient, MxError> {
        if let Some(e) = self.env_error {
            return Err(e);
        }

        let mut api_base = match self.api_base {
            Some(u) => u,
            None => Url::parse(DEFAULT_API_BASE)?,
        };
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => {
                let mut httpb = reqwest::Client::builder()
                    .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));
                if let Some(t) = self.timeout {
                    httpb = httpb.timeout(t);
                }
                if let Some(ct) = self.connect_timeout {
                    httpb = httpb.connect_timeout(ct);
                }
                Arc::new(HttpTransport::new(httpb.build()?))
            }
        };

        let store: Arc<dyn CredentialStore> = match self.store {
            Some(s) => s,
            None => Arc::new(MemoryStore::new()),
        };

        Ok(MxClient {
            api_base,
            transport,
            store,
        })
    }
}
