//! DTOs for the OAuth exchange and the REST v2 task resource.
//!
//! # Design
//! Request payloads are typed structs serialized with serde, never JSON
//! assembled by hand. Response types default every field the API may omit
//! so a sparse body still decodes; a body of the wrong shape is an error.

use serde::{Deserialize, Serialize};

/// Body of `POST /oauth/access_token`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenRequest {
    pub client_id: String,
    pub client_secret: String,
    pub code: String,
}

/// Successful token exchange. Returned as received; expiry and shape are
/// not checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Query parameters of the authorize redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub scope: String,
    pub state: String,
}

/// Parameters the authorization server appends to the redirect URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationResponse {
    pub code: String,
    pub state: String,
}

/// Due date descriptor attached to a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Due {
    /// Human-readable form, e.g. `"every monday"` or `"tomorrow"`.
    #[serde(default)]
    pub string: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// A task as returned by the API. Priority runs 1 (normal) to 4 (urgent).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_priority")]
    pub priority: u8,
    #[serde(default)]
    pub due: Option<Due>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn default_priority() -> u8 {
    1
}

/// Payload for creating a task. `priority` is sent as given; the API
/// rejects values outside 1..=4.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddTask {
    pub content: String,
    #[serde(default)]
    pub description: String,
    pub priority: u8,
    /// Free-text date understood by the API, e.g. `"next friday"`. Left
    /// out of the body when empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub due_string: String,
}

impl AddTask {
    pub fn new(
        content: impl Into<String>,
        priority: u8,
        description: impl Into<String>,
        due_string: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            description: description.into(),
            priority,
            due_string: due_string.into(),
        }
    }
}

/// Payload for updating a task. Only the fields present are sent; omitted
/// fields stay unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
}

impl UpdateTask {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    pub fn priority(priority: u8) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    pub fn due_string(due_string: impl Into<String>) -> Self {
        Self {
            due_string: Some(due_string.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_string.is_none()
    }
}

/// Which tasks `list_tasks_filtered` asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    Today,
    /// Any expression of the API's filter language, e.g. `"overdue | p1"`.
    Custom(String),
}

impl TaskFilter {
    pub(crate) fn query(&self) -> Option<&str> {
        match self {
            TaskFilter::All => None,
            TaskFilter::Today => Some("today"),
            TaskFilter::Custom(expr) => Some(expr.as_str()),
        }
    }
}
