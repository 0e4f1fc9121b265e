//! Blocking client for the Todoist REST v2 task API and its OAuth2
//! authorization-code flow.
//!
//! # Overview
//! `Client` holds an injected `Transport`, the application's
//! `client_id`/`client_secret` and the `Endpoints` to talk to.
//! `Client::auth` exposes the OAuth flow, `Client::tasks` the task CRUD.
//!
//! # Design
//! - Every operation is a `build_*` step producing an `HttpRequest` and a
//!   `parse_*` step consuming an `HttpResponse`, joined by exactly one
//!   `Transport::execute` call. Both halves are public and pure.
//! - The SDK keeps no token and no task between calls.
//! - Errors are returned as `ApiError`, classified by `ErrorKind`; nothing
//!   panics and nothing is retried.
//! - With the default `ureq` feature, `UreqTransport` is a ready-made
//!   blocking transport.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod tasks;
pub mod transport;
pub mod types;

pub use auth::AuthClient;
pub use client::Client;
pub use config::Endpoints;
pub use error::{ApiError, ErrorKind, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use tasks::TaskClient;
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{
    AddTask, AuthorizationRequest, AuthorizationResponse, Due, Task, TaskFilter, TokenRequest,
    TokenResponse, UpdateTask,
};
