//! Registry of default table columns and named filter presets
//!
//! Built once at startup (built-in content plus configured overrides) and
//! shared read-only between requests.

use std::collections::HashMap;

/// Default columns for the `hosts` table
const HOSTS_COLUMNS: &[&str] = &[
    "state",
    "name",
    "display_name",
    "address",
    "alias",
    "tags",
    "labels",
    "groups",
    "latency",
    "parents",
];

/// Default columns for the `services` table
const SERVICES_COLUMNS: &[&str] = &[
    "state",
    "host_name",
    "display_name",
    "description",
    "plugin_output",
    "comments",
];

const BUILTIN_COLUMNS: &[(&str, &[&str])] =
    &[("hosts", HOSTS_COLUMNS), ("services", SERVICES_COLUMNS)];

const BUILTIN_FILTER_PRESETS: &[(&str, &[&str])] = &[
    (
        "services_problems",
        &[
            "Filter: state > 0",
            "Filter: scheduled_downtime_depth = 0",
            "Filter: host_scheduled_downtime_depth = 0",
            "Filter: host_state = 0",
            "And: 4",
        ],
    ),
    (
        "services_unhandled",
        &[
            "Filter: state > 0",
            "Filter: scheduled_downtime_depth = 0",
            "Filter: host_scheduled_downtime_depth = 0",
            "Filter: acknowledged = 0",
            "Filter: host_state = 0",
            "And: 5",
        ],
    ),
    (
        "services_stale",
        &[
            "Filter: service_staleness >= 1.5",
            "Filter: host_scheduled_downtime_depth = 0",
            "Filter: service_scheduled_downtime_depth = 0",
            "And: 3",
        ],
    ),
    (
        "hosts_problems",
        &[
            "Filter: state >= 0",
            "Filter: state > 0",
            "Filter: scheduled_downtime_depth = 0",
            "And: 3",
        ],
    ),
    (
        "hosts_unhandled",
        &[
            "Filter: state > 0",
            "Filter: scheduled_downtime_depth = 0",
            "Filter: acknowledged = 0",
            "And: 3",
        ],
    ),
    (
        "hosts_stale",
        &[
            "Filter: host_staleness >= 1.5",
            "Filter: host_scheduled_downtime_depth = 0",
            "And: 2",
        ],
    ),
];

/// Lookup tables for default columns and filter presets
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    columns: HashMap<String, Vec<String>>,
    filters: HashMap<String, Vec<String>>,
}

impl TableRegistry {
    /// Registry with no entries (every table falls back to `name`)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in hosts/services columns and presets
    pub fn builtin() -> Self {
        let registry = BUILTIN_COLUMNS
            .iter()
            .fold(Self::empty(), |r, (table, cols)| {
                r.with_columns(*table, cols.iter().copied())
            });
        BUILTIN_FILTER_PRESETS
            .iter()
            .fold(registry, |r, (name, lines)| {
                r.with_filter_preset(*name, lines.iter().copied())
            })
    }

    /// Add or replace the default columns of a table
    pub fn with_columns<I, S>(mut self, table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns
            .insert(table.into(), columns.into_iter().map(Into::into).collect());
        self
    }

    /// Add or replace a named filter preset
    pub fn with_filter_preset<I, S>(mut self, name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters
            .insert(name.into(), lines.into_iter().map(Into::into).collect());
        self
    }

    /// Layer configured entries over this registry (same key replaces)
    pub fn overlay(
        mut self,
        columns: &HashMap<String, Vec<String>>,
        filters: &HashMap<String, Vec<String>>,
    ) -> Self {
        for (table, cols) in columns {
            tracing::debug!(table = %table, count = cols.len(), "Registering default columns");
            self = self.with_columns(table.as_str(), cols.iter().map(String::as_str));
        }
        for (name, lines) in filters {
            tracing::debug!(preset = %name, lines = lines.len(), "Registering filter preset");
            self = self.with_filter_preset(name.as_str(), lines.iter().map(String::as_str));
        }
        self
    }

    /// Default columns for `table`, in registry order
    pub fn default_columns(&self, table: &str) -> Option<&[String]> {
        self.columns.get(table).map(Vec::as_slice)
    }

    /// Expansion lines of the preset called `name`, in registry order
    pub fn filter_preset(&self, name: &str) -> Option<&[String]> {
        self.filters.get(name).map(Vec::as_slice)
    }

    /// Names of all registered presets (unordered)
    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn table_count(&self) -> usize {
        self.columns.len()
    }

    pub fn preset_count(&self) -> usize {
        self.filters.len()
    }
}
