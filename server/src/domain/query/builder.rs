//! LQL query text assembly

use super::error::QueryError;
use super::filter::expand_filters;
use super::registry::TableRegistry;

/// Column token that requests every column (no `Columns:` header)
pub const ALL_COLUMNS: &str = "all";

/// Column requested for tables without registered defaults
pub const FALLBACK_COLUMN: &str = "name";

/// Request parameters for a table query
#[derive(Debug, Clone, Default)]
pub struct TableQueryParams {
    pub table: String,
    pub columns: Option<Vec<String>>,
    pub filters: Option<Vec<String>>,
    pub limit: Option<f64>,
}

impl TableQueryParams {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }
}

/// Resolved column selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelection {
    /// Omit the `Columns:` header
    All,
    /// Emit `Columns:` with these names, space separated
    List(Vec<String>),
}

impl ColumnSelection {
    /// Pick the columns for `table`.
    ///
    /// `all` anywhere in the requested list wins; otherwise a non-empty
    /// request is used as given, then registry defaults, then `name`.
    pub fn resolve(registry: &TableRegistry, table: &str, requested: Option<&[String]>) -> Self {
        match requested {
            Some(cols) if cols.iter().any(|c| c == ALL_COLUMNS) => Self::All,
            Some(cols) if !cols.is_empty() => Self::List(cols.to_vec()),
            _ => match registry.default_columns(table) {
                Some(defaults) => Self::List(defaults.to_vec()),
                None => Self::List(vec![FALLBACK_COLUMN.to_string()]),
            },
        }
    }

    /// The `Columns:` header line, if any
    pub fn header(&self) -> Option<String> {
        match self {
            Self::All => None,
            Self::List(cols) => Some(format!("Columns: {}", cols.join(" "))),
        }
    }
}

/// Truncate a requested limit toward zero; absent means 0 (no limit)
pub fn resolve_limit(limit: Option<f64>) -> u64 {
    // `as` saturates: negative and NaN become 0
    limit.map(|l| l.trunc() as u64).unwrap_or(0)
}

/// A fully resolved table query
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    pub table: String,
    pub columns: ColumnSelection,
    pub filters: Vec<String>,
    pub limit: u64,
}

impl TableQuery {
    /// Resolve columns, limit and filters against the registry
    pub fn build(registry: &TableRegistry, params: &TableQueryParams) -> Result<Self, QueryError> {
        let columns = ColumnSelection::resolve(registry, &params.table, params.columns.as_deref());
        let limit = resolve_limit(params.limit);
        let filters = match params.filters.as_deref() {
            Some(tokens) => expand_filters(registry, tokens)?,
            None => Vec::new(),
        };

        Ok(Self {
            table: params.table.clone(),
            columns,
            filters,
            limit,
        })
    }

    /// Query lines: `GET`, optional `Columns:`, then filter lines
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.filters.len() + 2);
        lines.push(format!("GET {}", self.table));
        if let Some(header) = self.columns.header() {
            lines.push(header);
        }
        lines.extend(self.filters.iter().cloned());
        lines
    }

    /// Newline-joined query text as sent to the client
    pub fn to_lql(&self) -> String {
        self.lines().join("\n")
    }
}

/// Fixed query listing the column names of `table`.
///
/// The table name is inserted verbatim.
pub fn columns_query(table: &str) -> String {
    format!("GET columns\nColumns: name\nFilter: table = {}", table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn build(params: TableQueryParams) -> TableQuery {
        TableQuery::build(&TableRegistry::builtin(), &params).unwrap()
    }

    #[test]
    fn test_default_columns_for_known_tables() {
        let registry = TableRegistry::builtin();
        for table in ["hosts", "services"] {
            let query = build(TableQueryParams::new(table));
            let expected = format!(
                "Columns: {}",
                registry.default_columns(table).unwrap().join(" ")
            );
            assert_eq!(query.lines()[1], expected);
        }
    }

    #[test]
    fn test_unknown_table_falls_back_to_name() {
        let query = build(TableQueryParams::new("contacts"));
        assert_eq!(query.to_lql(), "GET contacts\nColumns: name");
    }

    #[test]
    fn test_all_anywhere_omits_columns_header() {
        for cols in [vec!["all"], vec!["name", "all"], vec!["all", "state", "alias"]] {
            let query = build(TableQueryParams {
                columns: Some(strings(&cols)),
                ..TableQueryParams::new("hosts")
            });
            assert_eq!(query.columns, ColumnSelection::All);
            assert_eq!(query.to_lql(), "GET hosts");
        }
    }

    #[test]
    fn test_requested_columns_keep_order_and_duplicates() {
        let query = build(TableQueryParams {
            columns: Some(strings(&["state", "name", "state"])),
            ..TableQueryParams::new("hosts")
        });
        assert_eq!(query.lines()[1], "Columns: state name state");
    }

    #[test]
    fn test_all_is_case_sensitive() {
        let query = build(TableQueryParams {
            columns: Some(strings(&["ALL"])),
            ..TableQueryParams::new("hosts")
        });
        assert_eq!(query.lines()[1], "Columns: ALL");
    }

    #[test]
    fn test_empty_column_list_uses_defaults() {
        let query = build(TableQueryParams {
            columns: Some(Vec::new()),
            ..TableQueryParams::new("contacts")
        });
        assert_eq!(query.lines()[1], "Columns: name");
    }

    #[test]
    fn test_limit_truncates() {
        assert_eq!(resolve_limit(Some(3.9)), 3);
        assert_eq!(resolve_limit(Some(0.2)), 0);
        assert_eq!(resolve_limit(Some(25.0)), 25);
        assert_eq!(resolve_limit(None), 0);
    }

    #[test]
    fn test_limit_saturates() {
        assert_eq!(resolve_limit(Some(-1.5)), 0);
        assert_eq!(resolve_limit(Some(f64::NAN)), 0);
        assert_eq!(resolve_limit(Some(1e30)), u64::MAX);
    }

    #[test]
    fn test_services_unhandled_end_to_end() {
        let query = build(TableQueryParams {
            filters: Some(strings(&["services_unhandled"])),
            ..TableQueryParams::new("services")
        });
        assert_eq!(
            query.lines(),
            vec![
                "GET services",
                "Columns: state host_name display_name description plugin_output comments",
                "Filter: state > 0",
                "Filter: scheduled_downtime_depth = 0",
                "Filter: host_scheduled_downtime_depth = 0",
                "Filter: acknowledged = 0",
                "Filter: host_state = 0",
                "And: 5",
            ]
        );
    }

    #[test]
    fn test_hosts_raw_then_preset_end_to_end() {
        let query = build(TableQueryParams {
            filters: Some(strings(&["Filter: alias = x", "hosts_stale"])),
            ..TableQueryParams::new("hosts")
        });
        assert_eq!(
            query.filters,
            vec![
                "Filter: alias = x",
                "Filter: host_staleness >= 1.5",
                "Filter: host_scheduled_downtime_depth = 0",
                "And: 2",
            ]
        );
    }

    #[test]
    fn test_invalid_filter_fails_build() {
        let err = TableQuery::build(
            &TableRegistry::builtin(),
            &TableQueryParams {
                filters: Some(strings(&["Filter: a = 1", "state > 0"])),
                ..TableQueryParams::new("hosts")
            },
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::InvalidFilter(ref t) if t == "state > 0"));
    }

    #[test]
    fn test_all_columns_with_filters() {
        let query = build(TableQueryParams {
            columns: Some(strings(&["all"])),
            filters: Some(strings(&["Filter: state = 2"])),
            limit: Some(10.0),
            ..TableQueryParams::new("services")
        });
        assert_eq!(query.to_lql(), "GET services\nFilter: state = 2");
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_columns_query() {
        assert_eq!(
            columns_query("hosts"),
            "GET columns\nColumns: name\nFilter: table = hosts"
        );
    }
}
