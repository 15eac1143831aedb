//! Domain logic
//!
//! - `query` - translation of table requests into LQL query text

pub mod query;

pub use query::{QueryService, TableRegistry};
