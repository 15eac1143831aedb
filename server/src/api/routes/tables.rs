//! Table query endpoints

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::api::auth::Caller;
use crate::api::extractors::{TablePath, ValidatedQuery};
use crate::api::types::{ApiError, validate_limit};
use crate::data::Row;
use crate::domain::QueryService;
use crate::domain::query::TableQueryParams;

// ============================================================================
// State
// ============================================================================

#[derive(Clone)]
pub struct TablesApiState {
    pub service: QueryService,
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Query params for fetching table rows
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TableGetQuery {
    /// Column to return; repeatable, `all` selects every column
    #[serde(default)]
    pub column: Vec<String>,

    /// Filter preset name or raw `Filter:`/`Negate:`/`Or:`/`And:` line; repeatable
    #[serde(default)]
    pub filter: Vec<String>,

    /// Maximum rows, truncated toward zero; 0 means unlimited
    #[serde(default)]
    #[validate(custom(function = "validate_limit"))]
    pub limit: f64,
}

impl TableGetQuery {
    fn into_query_params(self, table: String) -> TableQueryParams {
        TableQueryParams {
            table,
            columns: (!self.column.is_empty()).then_some(self.column),
            filters: (!self.filter.is_empty()).then_some(self.filter),
            limit: Some(self.limit),
        }
    }
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes(service: QueryService) -> Router<()> {
    let state = TablesApiState { service };
    Router::new()
        .route("/{name}", get(get_table_rows))
        .route("/{name}/columns", get(get_table_columns))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// Fetch rows of a monitoring table
#[utoipa::path(
    get,
    path = "/api/v1/table/{name}",
    tag = "tables",
    params(
        ("name" = String, Path, description = "Table name, e.g. hosts or services"),
        TableGetQuery
    ),
    responses(
        (status = 200, description = "Rows as JSON objects, in upstream order"),
        (status = 400, description = "Invalid table name, filter or limit"),
        (status = 502, description = "LQL client failure")
    )
)]
pub async fn get_table_rows(
    State(state): State<TablesApiState>,
    caller: Caller,
    path: TablePath,
    ValidatedQuery(query): ValidatedQuery<TableGetQuery>,
) -> Result<Json<Vec<Row>>, ApiError> {
    let params = query.into_query_params(path.name);
    let rows = state.service.get_table(caller.user(), &params).await?;
    Ok(Json(rows))
}

/// List the column names of a monitoring table
#[utoipa::path(
    get,
    path = "/api/v1/table/{name}/columns",
    tag = "tables",
    params(
        ("name" = String, Path, description = "Table name")
    ),
    responses(
        (status = 200, description = "Column names", body = [String]),
        (status = 400, description = "Invalid table name"),
        (status = 502, description = "LQL client failure or malformed column listing")
    )
)]
pub async fn get_table_columns(
    State(state): State<TablesApiState>,
    caller: Caller,
    path: TablePath,
) -> Result<Json<Vec<String>>, ApiError> {
    let columns = state.service.get_columns(caller.user(), &path.name).await?;
    Ok(Json(columns))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::api::auth::{AuthState, identify_caller};
    use crate::core::AuthConfig;
    use crate::data::testing::{RecordingClient, column_rows, row};
    use crate::domain::TableRegistry;

    fn app(client: Arc<RecordingClient>) -> Router {
        let service = QueryService::new(Arc::new(TableRegistry::builtin()), client);
        let auth = AuthState::from_config(&AuthConfig {
            user_header: "x-remote-user".to_string(),
        })
        .unwrap();
        Router::new()
            .nest("/api/v1/table", routes(service))
            .layer(axum::middleware::from_fn_with_state(auth, identify_caller))
    }

    async fn send(app: Router, uri: &str, user: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(user) = user {
            builder = builder.header("x-remote-user", user);
        }
        app.oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_rows_pass_through() {
        let client = Arc::new(RecordingClient::with_rows(vec![
            row(json!({ "name": "web01", "state": 0 })),
            row(json!({ "name": "db01", "state": 2 })),
        ]));
        let response = send(app(client.clone()), "/api/v1/table/hosts", Some("alice")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!([{ "name": "web01", "state": 0 }, { "name": "db01", "state": 2 }])
        );
        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].user, "alice");
        assert_eq!(calls[0].limit, 0);
        assert!(calls[0].query.starts_with("GET hosts\nColumns: state name"));
    }

    #[tokio::test]
    async fn test_repeated_params_and_limit() {
        let client = Arc::new(RecordingClient::with_rows(vec![]));
        let response = send(
            app(client.clone()),
            "/api/v1/table/services?column=host_name&column=state\
             &filter=Filter:%20state%20%3E%200&filter=Filter:%20acknowledged%20%3D%200\
             &filter=And:%202&limit=3.9",
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let calls = client.calls();
        assert_eq!(
            calls[0].query,
            "GET services\n\
             Columns: host_name state\n\
             Filter: state > 0\n\
             Filter: acknowledged = 0\n\
             And: 2"
        );
        assert_eq!(calls[0].user, "");
        assert_eq!(calls[0].limit, 3);
    }

    #[tokio::test]
    async fn test_column_all_sends_no_columns_header() {
        let client = Arc::new(RecordingClient::with_rows(vec![]));
        let response = send(app(client.clone()), "/api/v1/table/hosts?column=all", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(client.calls()[0].query, "GET hosts");
    }

    #[tokio::test]
    async fn test_invalid_filter_is_bad_request_without_client_call() {
        let client = Arc::new(RecordingClient::with_rows(vec![]));
        let response = send(app(client.clone()), "/api/v1/table/hosts?filter=bogus", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INVALID_FILTER");
        assert_eq!(body["message"], "Invalid Filter 'bogus' given");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_negative_limit_is_rejected() {
        let client = Arc::new(RecordingClient::with_rows(vec![]));
        let response = send(app(client.clone()), "/api/v1/table/hosts?limit=-1", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unparsable_limit_is_rejected() {
        let client = Arc::new(RecordingClient::with_rows(vec![]));
        let response = send(app(client.clone()), "/api/v1/table/hosts?limit=ten", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "QUERY_PARSE_ERROR");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_table_name_with_newline_is_rejected() {
        let client = Arc::new(RecordingClient::with_rows(vec![]));
        let response = send(app(client.clone()), "/api/v1/table/hosts%0AFilter:%20x", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "INVALID_TABLE_NAME");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_client_failure_is_bad_gateway() {
        let client = Arc::new(RecordingClient::failing("connection refused"));
        let response = send(app(client), "/api/v1/table/hosts", None).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["code"], "UPSTREAM_ERROR");
        assert_eq!(body["message"], "connection refused");
    }

    #[tokio::test]
    async fn test_columns_endpoint() {
        let client = Arc::new(
            RecordingClient::with_rows(column_rows(&["name", "state", "address"]))
                .admins(&["root"]),
        );
        let response = send(app(client.clone()), "/api/v1/table/hosts/columns", Some("root")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!(["name", "state", "address"]));
        let calls = client.calls();
        assert_eq!(
            calls[0].query,
            "GET columns\nColumns: name\nFilter: table = hosts"
        );
        assert_eq!(calls[0].user, "");
        assert_eq!(calls[0].limit, 0);
    }

    #[tokio::test]
    async fn test_columns_endpoint_malformed_listing() {
        let client = Arc::new(RecordingClient::with_rows(vec![row(json!({ "name": 7 }))]));
        let response = send(app(client), "/api/v1/table/hosts/columns", None).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["code"], "UPSTREAM_ERROR");
    }
}
