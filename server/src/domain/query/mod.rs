//! LQL query translation
//!
//! - `registry` - default columns per table and named filter presets
//! - `filter` - filter token classification, preset expansion and checks
//! - `builder` - column, limit and query text assembly
//! - `service` - request handling with admin bypass and client delegation
//! - `error` - error types

pub mod builder;
pub mod error;
pub mod filter;
pub mod registry;
pub mod service;

pub use builder::{ColumnSelection, TableQuery, TableQueryParams, columns_query};
pub use error::{PresetError, QueryError};
pub use filter::{FilterToken, check_preset, expand_filters};
pub use registry::TableRegistry;
pub use service::QueryService;
