//! The shared client handle and the request/response plumbing used by
//! `AuthClient` and `TaskClient`.
//!
//! # Design
//! `Client` owns the transport, the application credentials and the
//! endpoint configuration, and nothing else. Tokens are passed per call and
//! never stored, so one `Client` can be shared by reference across threads
//! whenever its transport can.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::auth::AuthClient;
use crate::config::Endpoints;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::tasks::TaskClient;
use crate::transport::Transport;

/// Configured access to the Todoist API.
pub struct Client<T> {
    transport: T,
    client_id: String,
    client_secret: String,
    endpoints: Endpoints,
}

impl<T: Transport> Client<T> {
    /// Client against the production Todoist hosts.
    pub fn new(transport: T, client_id: &str, client_secret: &str) -> Self {
        Self::with_endpoints(transport, client_id, client_secret, Endpoints::default())
    }

    pub fn with_endpoints(
        transport: T,
        client_id: &str,
        client_secret: &str,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            transport,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            endpoints,
        }
    }

    pub fn auth(&self) -> AuthClient<'_, T> {
        AuthClient::new(self)
    }

    pub fn tasks(&self) -> TaskClient<'_, T> {
        TaskClient::new(self)
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Run one request through the transport. Exactly one call per
    /// invocation; nothing is retried.
    pub(crate) fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method.as_str();
        let url = request.url.clone();
        debug!(method, url = %url, "sending request");

        let response = self.transport.execute(request).map_err(|e| {
            warn!(method, url = %url, error = %e, "transport failure");
            ApiError::from(e)
        })?;

        debug!(method, url = %url, status = response.status, "received response");
        Ok(response)
    }
}

impl<T> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

/// Reject an empty required argument before anything is sent.
pub(crate) fn require(value: &str, name: &'static str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::InvalidArgument(name));
    }
    Ok(())
}

pub(crate) fn parse_url(raw: &str) -> Result<Url, ApiError> {
    Url::parse(raw).map_err(|e| ApiError::InvalidEndpoint(format!("{raw}: {e}")))
}

/// Any status other than `expected` is a rejection, 2xx included. The body
/// is not inspected.
pub(crate) fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    let status_text = response.status_line();
    warn!(status = response.status, expected, "unexpected response status");
    Err(ApiError::RemoteRejection {
        status: response.status,
        status_text,
    })
}

pub(crate) fn decode<D: DeserializeOwned>(response: &HttpResponse) -> Result<D, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| {
        warn!(error = %e, "failed to decode response body");
        ApiError::Decode(e.to_string())
    })
}

pub(crate) fn encode<S: Serialize>(value: &S) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Encode(e.to_string()))
}
