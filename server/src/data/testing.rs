//! Test double for the LQL client

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use super::error::ClientError;
use super::traits::LqlClient;
use super::types::Row;

/// One call observed by [`RecordingClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub query: String,
    pub user: String,
    pub limit: u64,
}

enum Reply {
    Rows(Vec<Row>),
    Fail(String),
}

/// Client that records every request and answers with canned data
pub struct RecordingClient {
    admins: Vec<String>,
    reply: Reply,
    calls: Mutex<Vec<RecordedRequest>>,
}

impl RecordingClient {
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            admins: Vec::new(),
            reply: Reply::Rows(rows),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            admins: Vec::new(),
            reply: Reply::Fail(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn admins(mut self, admins: &[&str]) -> Self {
        self.admins = admins.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<RecordedRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LqlClient for RecordingClient {
    async fn request(&self, query: &str, user: &str, limit: u64) -> Result<Vec<Row>, ClientError> {
        self.calls.lock().unwrap().push(RecordedRequest {
            query: query.to_string(),
            user: user.to_string(),
            limit,
        });
        match &self.reply {
            Reply::Rows(rows) => Ok(rows.clone()),
            Reply::Fail(message) => Err(ClientError::Other(message.clone())),
        }
    }

    fn is_admin(&self, user: &str) -> bool {
        self.admins.iter().any(|a| a == user)
    }
}

/// Build a row from a JSON object literal
pub fn row(value: serde_json::Value) -> Row {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("row must be a JSON object, got {}", other),
    }
}

/// Rows shaped like a `GET columns` answer
pub fn column_rows(names: &[&str]) -> Vec<Row> {
    names.iter().map(|n| row(json!({ "name": n }))).collect()
}
