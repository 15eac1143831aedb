//! Caller identification
//!
//! Authentication itself happens upstream (reverse proxy, SSO gateway). The
//! gateway only reads the trusted identity header and forwards it to the LQL
//! client, which applies per-user visibility.

mod context;
pub mod middleware;

pub use context::{AuthContext, Caller};
pub use middleware::{AuthState, identify_caller};
