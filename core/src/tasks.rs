//! Authenticated CRUD on `{api_base}/rest/v2/tasks`.
//!
//! # Design
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`,
//! both pure. The undecorated method composes the two around a single
//! transport call. The bearer token is an argument of every call and is
//! never kept.

use tracing::debug;
use url::Url;

use crate::client::{check_status, decode, encode, parse_url, require, Client};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{AddTask, Task, TaskFilter, UpdateTask};

/// Task half of the client. Obtained with `Client::tasks`.
#[derive(Debug)]
pub struct TaskClient<'a, T> {
    client: &'a Client<T>,
}

impl<'a, T: Transport> TaskClient<'a, T> {
    pub(crate) fn new(client: &'a Client<T>) -> Self {
        Self { client }
    }

    // -----------------------------------------------------------------------
    // Request builders
    // -----------------------------------------------------------------------

    pub fn build_create_task(&self, task: &AddTask, token: &str) -> Result<HttpRequest, ApiError> {
        require(&task.content, "content")?;
        let url = self.tasks_url(&[])?;
        Ok(self.authorized(HttpMethod::Post, url, token)?.json_body(encode(task)?))
    }

    pub fn build_get_task(&self, id: &str, token: &str) -> Result<HttpRequest, ApiError> {
        let url = self.task_url(id, None)?;
        self.authorized(HttpMethod::Get, url, token)
    }

    pub fn build_list_tasks(
        &self,
        token: &str,
        filter: &TaskFilter,
    ) -> Result<HttpRequest, ApiError> {
        let mut url = self.tasks_url(&[])?;
        if let Some(expr) = filter.query() {
            require(expr, "filter")?;
            url.query_pairs_mut().append_pair("filter", expr);
        }
        self.authorized(HttpMethod::Get, url, token)
    }

    pub fn build_close_task(&self, id: &str, token: &str) -> Result<HttpRequest, ApiError> {
        let url = self.task_url(id, Some("close"))?;
        self.authorized(HttpMethod::Post, url, token)
    }

    pub fn build_delete_task(&self, id: &str, token: &str) -> Result<HttpRequest, ApiError> {
        let url = self.task_url(id, None)?;
        self.authorized(HttpMethod::Delete, url, token)
    }

    pub fn build_update_task(
        &self,
        id: &str,
        token: &str,
        update: &UpdateTask,
    ) -> Result<HttpRequest, ApiError> {
        if update.is_empty() {
            return Err(ApiError::InvalidArgument("update"));
        }
        let url = self.task_url(id, None)?;
        Ok(self.authorized(HttpMethod::Post, url, token)?.json_body(encode(update)?))
    }

    // -----------------------------------------------------------------------
    // Response parsers
    // -----------------------------------------------------------------------

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    pub fn parse_get_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_close_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    pub fn parse_update_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    pub fn create_task(&self, task: &AddTask, token: &str) -> Result<(), ApiError> {
        let request = self.build_create_task(task, token)?;
        self.parse_create_task(self.client.send(request)?)
    }

    pub fn get_task(&self, id: &str, token: &str) -> Result<Task, ApiError> {
        let request = self.build_get_task(id, token)?;
        self.parse_get_task(self.client.send(request)?)
    }

    pub fn list_tasks(&self, token: &str) -> Result<Vec<Task>, ApiError> {
        self.list_tasks_filtered(token, &TaskFilter::All)
    }

    pub fn list_today_tasks(&self, token: &str) -> Result<Vec<Task>, ApiError> {
        self.list_tasks_filtered(token, &TaskFilter::Today)
    }

    pub fn list_tasks_filtered(
        &self,
        token: &str,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, ApiError> {
        let request = self.build_list_tasks(token, filter)?;
        let tasks = self.parse_list_tasks(self.client.send(request)?)?;
        debug!(count = tasks.len(), ?filter, "listed tasks");
        Ok(tasks)
    }

    pub fn close_task(&self, id: &str, token: &str) -> Result<(), ApiError> {
        let request = self.build_close_task(id, token)?;
        self.parse_close_task(self.client.send(request)?)
    }

    pub fn delete_task(&self, id: &str, token: &str) -> Result<(), ApiError> {
        let request = self.build_delete_task(id, token)?;
        self.parse_delete_task(self.client.send(request)?)
    }

    pub fn update_task(&self, id: &str, token: &str, update: &UpdateTask) -> Result<(), ApiError> {
        let request = self.build_update_task(id, token, update)?;
        self.parse_update_task(self.client.send(request)?)
    }

    pub fn update_task_name(&self, id: &str, token: &str, name: &str) -> Result<(), ApiError> {
        require(name, "content")?;
        self.update_task(id, token, &UpdateTask::content(name))
    }

    /// Priority is forwarded as is; the API rejects anything outside 1..=4.
    pub fn update_task_priority(
        &self,
        id: &str,
        token: &str,
        priority: u8,
    ) -> Result<(), ApiError> {
        self.update_task(id, token, &UpdateTask::priority(priority))
    }

    pub fn update_task_due_date(
        &self,
        id: &str,
        token: &str,
        due_string: &str,
    ) -> Result<(), ApiError> {
        require(due_string, "due_string")?;
        self.update_task(id, token, &UpdateTask::due_string(due_string))
    }

    /// An empty description clears it.
    pub fn update_task_description(
        &self,
        id: &str,
        token: &str,
        description: &str,
    ) -> Result<(), ApiError> {
        self.update_task(id, token, &UpdateTask::description(description))
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn tasks_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let raw = self.client.endpoints().tasks_url();
        let mut url = parse_url(&raw)?;
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|()| ApiError::InvalidEndpoint(raw.clone()))?
                .extend(segments);
        }
        Ok(url)
    }

    /// `.` and `..` would be dropped as dot segments and retarget the request.
    fn task_url(&self, id: &str, action: Option<&str>) -> Result<Url, ApiError> {
        require(id, "id")?;
        if id == "." || id == ".." {
            return Err(ApiError::InvalidArgument("id"));
        }
        match action {
            Some(action) => self.tasks_url(&[id, action]),
            None => self.tasks_url(&[id]),
        }
    }

    fn authorized(
        &self,
        method: HttpMethod,
        url: Url,
        token: &str,
    ) -> Result<HttpRequest, ApiError> {
        require(token, "token")?;
        Ok(HttpRequest::new(method, url.into()).bearer(token))
    }
}
