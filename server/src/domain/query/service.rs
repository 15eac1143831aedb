//! Table query service
//!
//! Turns request parameters into LQL text, applies the administrator bypass
//! for row-level scoping and delegates to the LQL client.

use std::sync::Arc;

use super::builder::{TableQuery, TableQueryParams, columns_query};
use super::error::QueryError;
use super::registry::TableRegistry;
use crate::data::{LqlClient, Row};

/// Query translator shared by the table routes
#[derive(Clone)]
pub struct QueryService {
    registry: Arc<TableRegistry>,
    client: Arc<dyn LqlClient>,
}

impl QueryService {
    pub fn new(registry: Arc<TableRegistry>, client: Arc<dyn LqlClient>) -> Self {
        Self { registry, client }
    }

    /// Row-level scope for `user`: empty for administrators, else the user
    pub fn effective_user<'a>(&self, user: &'a str) -> &'a str {
        if self.client.is_admin(user) { "" } else { user }
    }

    /// Fetch rows of a table
    pub async fn get_table(
        &self,
        user: &str,
        params: &TableQueryParams,
    ) -> Result<Vec<Row>, QueryError> {
        let user = self.effective_user(user);
        let query = TableQuery::build(&self.registry, params)?;
        let text = query.to_lql();

        tracing::trace!(query = %text, user = %user, limit = query.limit, "Sending LQL query");
        self.request(&text, user, query.limit).await
    }

    /// List the column names of a table
    pub async fn get_columns(&self, user: &str, table: &str) -> Result<Vec<String>, QueryError> {
        let user = self.effective_user(user);
        let text = columns_query(table);

        tracing::trace!(query = %text, user = %user, "Sending LQL column query");
        let rows = self.request(&text, user, 0).await?;
        column_names(rows)
    }

    async fn request(&self, query: &str, user: &str, limit: u64) -> Result<Vec<Row>, QueryError> {
        match self.client.request(query, user, limit).await {
            Ok(rows) => Ok(rows),
            Err(e) => {
                tracing::error!(error = %e, "LQL request failed");
                Err(e.into())
            }
        }
    }
}

/// Project column-discovery rows onto their `name` field
pub fn column_names(rows: Vec<Row>) -> Result<Vec<String>, QueryError> {
    rows.into_iter()
        .enumerate()
        .map(|(index, mut row)| match row.remove("name") {
            Some(serde_json::Value::String(name)) => Ok(name),
            _ => Err(QueryError::MissingColumnName { index }),
        })
        .collect()
}
