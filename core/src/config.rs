//! Base URLs for the two Todoist hosts.

pub const DEFAULT_API_BASE: &str = "https://api.todoist.com";
pub const DEFAULT_AUTH_BASE: &str = "https://todoist.com";

pub const ENV_API_BASE: &str = "TODOIST_API_BASE";
pub const ENV_AUTH_BASE: &str = "TODOIST_AUTH_BASE";

const REST_VERSION: &str = "v2";
const TASKS_ENDPOINT: &str = "tasks";
const AUTHORIZE_ENDPOINT: &str = "oauth/authorize";
const TOKEN_ENDPOINT: &str = "oauth/access_token";

/// Immutable endpoint configuration shared by every call of a `Client`.
///
/// Point both bases at a local server to run against a fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    auth_base: String,
}

impl Endpoints {
    pub fn new(api_base: &str, auth_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            auth_base: auth_base.trim_end_matches('/').to_string(),
        }
    }

    /// Read `TODOIST_API_BASE` / `TODOIST_AUTH_BASE`, falling back to the
    /// production hosts for whichever is unset or empty.
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self::new(
            &var(ENV_API_BASE, DEFAULT_API_BASE),
            &var(ENV_AUTH_BASE, DEFAULT_AUTH_BASE),
        )
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn auth_base(&self) -> &str {
        &self.auth_base
    }

    pub(crate) fn tasks_url(&self) -> String {
        format!("{}/rest/{REST_VERSION}/{TASKS_ENDPOINT}", self.api_base)
    }

    pub(crate) fn authorize_url(&self) -> String {
        format!("{}/{AUTHORIZE_ENDPOINT}", self.auth_base)
    }

    pub(crate) fn token_url(&self) -> String {
        format!("{}/{TOKEN_ENDPOINT}", self.auth_base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_AUTH_BASE)
    }
}
