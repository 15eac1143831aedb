//! Data access layer
//!
//! - `traits` - the `LqlClient` seam implemented by the host process
//! - `error` - error type reported by client implementations
//! - `types` - row type shared with the query layer

pub mod error;
pub mod traits;
pub mod types;

pub use error::ClientError;
pub use traits::LqlClient;
pub use types::Row;

#[cfg(test)]
pub(crate) mod testing;
