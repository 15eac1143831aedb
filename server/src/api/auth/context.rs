//! Caller context and extractor

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Identity of the caller as reported by the trusted header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    /// Empty when the header was absent or not valid UTF-8
    pub user: String,
}

/// Extractor yielding the caller's user name.
///
/// Falls back to an anonymous caller when `identify_caller` did not run, so
/// handlers never fail on identity alone.
#[derive(Debug, Clone)]
pub struct Caller(pub AuthContext);

impl Caller {
    pub fn user(&self) -> &str {
        &self.0.user
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .unwrap_or_default();
        Ok(Self(ctx))
    }
}
