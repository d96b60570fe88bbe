// File: src/client/core.rs
use crate::error::Result;
use anyhow::Context;
use reqwest::blocking::Client;

/// The read paths the reporting core needs from the project-management
/// service. Every method returns the raw XML document body; parsing happens
/// in the core so a fixture-replay double can satisfy this trait unchanged.
pub trait ServiceConnection {
    fn fetch_project(&self, project_id: u64) -> Result<String>;
    fn fetch_message_archive(&self, project_id: u64) -> Result<String>;
    fn fetch_comments(&self, message_id: u64) -> Result<String>;
    fn fetch_milestones(&self, project_id: u64) -> Result<String>;
    fn fetch_todo_lists(&self, project_id: u64) -> Result<String>;
}

/// Live connection to a Basecamp-style HTTP/XML API using basic auth.
///
/// Blocking on purpose: each cache miss in the aggregate is exactly one
/// synchronous round trip. Timeout and retry policy live with the caller.
#[derive(Clone, Debug)]
pub struct HttpClient {
    base_url: String,
    username: String,
    password: String,
    http: Client,
}

impl HttpClient {
    pub fn new(url: &str, username: &str, password: &str) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: password.to_string(),
            http,
        })
    }

    fn request(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/xml")
            .send()
            .with_context(|| format!("request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("request to {} was rejected", url))?;
        let body = response
            .text()
            .with_context(|| format!("could not read response body from {}", url))?;
        Ok(body)
    }
}

impl ServiceConnection for HttpClient {
    fn fetch_project(&self, project_id: u64) -> Result<String> {
        self.request(&format!("/projects/{}.xml", project_id))
    }

    fn fetch_message_archive(&self, project_id: u64) -> Result<String> {
        self.request(&format!("/projects/{}/msg/archive.xml", project_id))
    }

    fn fetch_comments(&self, message_id: u64) -> Result<String> {
        self.request(&format!("/msg/comments/{}.xml", message_id))
    }

    fn fetch_milestones(&self, project_id: u64) -> Result<String> {
        self.request(&format!("/projects/{}/milestones/list.xml", project_id))
    }

    fn fetch_todo_lists(&self, project_id: u64) -> Result<String> {
        self.request(&format!("/projects/{}/todos/lists.xml", project_id))
    }
}
