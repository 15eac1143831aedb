//! Client trait for the monitoring core
//!
//! The LQL client owns the transport: connecting, sending the query text,
//! decoding the tabular response, timeouts and row-level user scoping. This
//! crate only assembles query text and calls through this trait.

use async_trait::async_trait;

use crate::data::error::ClientError;
use crate::data::types::Row;

/// External LQL protocol client
#[async_trait]
pub trait LqlClient: Send + Sync {
    /// Send a newline-joined LQL query.
    ///
    /// `user` restricts rows to objects the user may see; an empty string
    /// means no restriction. A `limit` of 0 means no limit.
    async fn request(&self, query: &str, user: &str, limit: u64) -> Result<Vec<Row>, ClientError>;

    /// Whether `user` is an administrator of the monitoring core
    fn is_admin(&self, user: &str) -> bool;
}
