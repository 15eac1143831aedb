//! Shared data types for the client seam

/// One result row as returned by the LQL client.
///
/// Keys are column names; values are whatever JSON type the monitoring core
/// produced for that column (string, number, list, ...).
pub type Row = serde_json::Map<String, serde_json::Value>;
