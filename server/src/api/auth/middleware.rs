//! Caller identification middleware

use axum::extract::{Request, State};
use axum::http::HeaderName;
use axum::middleware::Next;
use axum::response::Response;

use super::context::AuthContext;
use crate::core::AuthConfig;

/// State for the identification middleware
#[derive(Clone, Debug)]
pub struct AuthState {
    pub user_header: HeaderName,
}

impl AuthState {
    pub fn from_config(config: &AuthConfig) -> anyhow::Result<Self> {
        let user_header = HeaderName::from_bytes(config.user_header.as_bytes()).map_err(|e| {
            anyhow::anyhow!("Invalid user header '{}': {}", config.user_header, e)
        })?;
        Ok(Self { user_header })
    }
}

/// Middleware that reads the trusted user header.
///
/// Injects `AuthContext` into request extensions. The value is passed on
/// opaquely. Requests without the header proceed as anonymous; the LQL client
/// decides what an empty user may see.
pub async fn identify_caller(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = match request.headers().get(&state.user_header) {
        Some(value) => match value.to_str() {
            Ok(v) => v.to_string(),
            Err(_) => {
                tracing::warn!(header = %state.user_header, "Ignoring non-UTF-8 user header");
                String::new()
            }
        },
        None => String::new(),
    };

    tracing::trace!(user = %user, "Identified caller");
    request.extensions_mut().insert(AuthContext { user });
    next.run(request).await
}
