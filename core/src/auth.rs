//! OAuth2 authorization-code flow against the Todoist authorization server.
//!
//! The flow is linear: send the user to `authentication_url`, read the
//! `code` back off the redirect with `parse_callback`, then trade it for an
//! access token with `exchange_code_for_token`. Nothing here stores the
//! token; callers keep it and hand it to `TaskClient` per call.

use std::collections::HashMap;

use tracing::debug;

use crate::client::{check_status, decode, encode, parse_url, require, Client};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{AuthorizationRequest, AuthorizationResponse, TokenRequest, TokenResponse};

/// Authorization half of the client. Obtained with `Client::auth`.
#[derive(Debug)]
pub struct AuthClient<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> AuthClient<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    /// URL of the consent page for `client_id`. Pure; no request is sent.
    pub fn authentication_url(
        &self,
        client_id: &str,
        scope: &str,
        state: &str,
    ) -> Result<String, ApiError> {
        require(client_id, "client_id")?;
        require(scope, "scope")?;
        require(state, "state")?;

        let request = AuthorizationRequest {
            client_id: client_id.to_string(),
            scope: scope.to_string(),
            state: state.to_string(),
        };
        let mut url = parse_url(&self.client.endpoints().authorize_url())?;
        url.query_pairs_mut()
            .append_pair("client_id", &request.client_id)
            .append_pair("scope", &request.scope)
            .append_pair("state", &request.state);
        Ok(url.into())
    }

    /// `authentication_url` for the client's own `client_id`.
    pub fn authorization_url(&self, scope: &str, state: &str) -> Result<String, ApiError> {
        self.authentication_url(self.client.client_id(), scope, state)
    }

    /// Pull the authorization code out of the URL the server redirected the
    /// user to, checking `state` against the value sent on the way out.
    pub fn parse_callback(
        &self,
        redirect_url: &str,
        expected_state: &str,
    ) -> Result<AuthorizationResponse, ApiError> {
        require(expected_state, "expected_state")?;
        let url = parse_url(redirect_url)?;
        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

        // State first: an unsolicited redirect is a mismatch even when it
        // carries an error.
        let state = params.get("state").ok_or(ApiError::StateMismatch)?;
        if state != expected_state {
            return Err(ApiError::StateMismatch);
        }
        if let Some(error) = params.get("error") {
            return Err(ApiError::AuthorizationDenied(error.clone()));
        }
        let code = params
            .get("code")
            .filter(|c| !c.is_empty())
            .ok_or(ApiError::InvalidArgument("code"))?;

        Ok(AuthorizationResponse {
            code: code.clone(),
            state: state.clone(),
        })
    }

    pub fn build_token_request(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
    ) -> Result<HttpRequest, ApiError> {
        require(client_id, "client_id")?;
        require(client_secret, "client_secret")?;
        require(code, "code")?;

        let body = encode(&TokenRequest {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            code: code.to_string(),
        })?;
        Ok(HttpRequest::new(HttpMethod::Post, self.client.endpoints().token_url()).json_body(body))
    }

    /// Anything but 200 is a rejection and the body is left alone.
    pub fn parse_token_response(&self, response: HttpResponse) -> Result<TokenResponse, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    /// Trade an authorization code for an access token. One request, no retry.
    pub fn exchange_code_for_token(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
    ) -> Result<TokenResponse, ApiError> {
        let request = self.build_token_request(client_id, client_secret, code)?;
        let token = self.parse_token_response(self.client.send(request)?)?;
        debug!(token_type = %token.token_type, "exchanged authorization code");
        Ok(token)
    }

    /// `exchange_code_for_token` with the client's own credentials.
    pub fn exchange_code(&self, code: &str) -> Result<TokenResponse, ApiError> {
        self.exchange_code_for_token(self.client.client_id(), self.client.client_secret(), code)
    }
}
