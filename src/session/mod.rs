//! Login, logout and session checks.
//!
//! These are the only operations that write to the credential store. A successful login
//! stores the issued token under [`CREDENTIAL_KEY`]; logout and a server rejection remove it.

mod wire;

use crate::core::client::{CREDENTIAL_KEY, ENDPOINT_LOGIN, ENDPOINT_SECURE_HELLO};
use crate::core::transport::TransportRequest;
use crate::core::{MxClient, MxError};
use serde::Deserialize;
use wire::{ErrorBody, LoginRequest, LoginResponse};

/// The account a token belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Display name.
    pub name: String,
}

/// Response of the authenticated identity echo.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SecureGreeting {
    /// Greeting text, if the service sent one.
    #[serde(default)]
    pub message: Option<String>,
    /// The authenticated account.
    pub user: User,
}

impl SecureGreeting {
    /// `"{message} from {name}"`, or just the name when there is no message.
    #[must_use]
    pub fn display(&self) -> String {
        match self.message.as_deref() {
            Some(m) if !m.is_empty() => format!("{m} from {}", self.user.name),
            _ => self.user.name.clone(),
        }
    }
}

/// Session lifecycle over a client's credential store.
#[derive(Debug, Clone)]
pub struct Session {
    client: MxClient,
}

impl Session {
    /// Wraps `client`; the session shares its credential store.
    #[must_use]
    pub fn new(client: &MxClient) -> Self {
        Self {
            client: client.clone(),
        }
    }

    /// Exchanges a username and password for a token and stores it.
    ///
    /// The username is trimmed; the password is sent as given.
    ///
    /// # Errors
    ///
    /// - [`MxError::Rejected`] when the service refuses, carrying its `message`
    ///   (or `"Login failed."`).
    /// - [`MxError::Http`] when the request could not be completed.
    /// - [`MxError::Json`] when a successful response is not the expected shape.
    /// - [`MxError::Store`] when the token cannot be saved.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, password), err))]
    pub async fn login(&self, username: &str, password: &str) -> Result<User, MxError> {
        let url = self.client.endpoint(ENDPOINT_LOGIN)?;
        let body = serde_json::to_value(LoginRequest {
            username: username.trim(),
            password,
        })?;

        let resp = self.client.send(TransportRequest::post_json(url, body)).await?;
        if !resp.is_success() {
            let err: ErrorBody = serde_json::from_str(&resp.body).unwrap_or_default();
            return Err(MxError::Rejected {
                status: resp.status,
                message: err
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "Login failed.".to_string()),
            });
        }

        let LoginResponse { token, user } = serde_json::from_str(&resp.body)?;
        if token.is_empty() {
            return Err(MxError::Data("login response carried an empty token".into()));
        }
        self.client.credential_store().set(CREDENTIAL_KEY, &token)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(user = %user.name, "session token stored");

        Ok(user)
    }

    /// Forgets the stored token. Logging out twice is fine.
    ///
    /// # Errors
    ///
    /// Returns [`MxError::Store`] when the store cannot be written.
    pub fn logout(&self) -> Result<(), MxError> {
        self.client.credential_store().remove(CREDENTIAL_KEY)
    }

    /// Asks the service who the stored token belongs to.
    ///
    /// Returns `Ok(None)` without a network call when no token is stored. A `401` or `403`
    /// means the token is no longer accepted; it is removed from the store before the
    /// status error is returned.
    ///
    /// # Errors
    ///
    /// - [`MxError::Status`] for a non-2xx response.
    /// - [`MxError::Http`] when the request could not be completed.
    /// - [`MxError::Json`] when the response is not the expected shape.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn current_user(&self) -> Result<Option<SecureGreeting>, MxError> {
        let Some(credential) = self.client.credential() else {
            return Ok(None);
        };

        let url = self.client.endpoint(ENDPOINT_SECURE_HELLO)?;
        let req = TransportRequest::get(url.clone()).bearer(credential.expose());
        let resp = self.client.send(req).await?;

        if matches!(resp.status, 401 | 403) {
            self.logout()?;
        }
        if !resp.is_success() {
            return Err(MxError::Status {
                status: resp.status,
                url: url.to_string(),
            });
        }

        Ok(Some(serde_json::from_str(&resp.body)?))
    }

    /// One-line session summary for a status bar.
    pub async fn status_line(&self) -> String {
        match self.current_user().await {
            Ok(Some(greeting)) => format!("Logged in as {}", greeting.user.name),
            Ok(None) | Err(MxError::Status { status: 401 | 403, .. }) => "Logged out.".to_string(),
            Err(_) => "Unable to verify session.".to_string(),
        }
    }
}
