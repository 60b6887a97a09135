use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use meilgate_core::error::CoreError;
use meilgate_meili::api::MeiliApiError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `meilgate_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A call to the remote search engine failed.
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        #[source]
        source: MeiliApiError,
    },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Adapter for `map_err` that tags an engine error with what was being
    /// attempted.
    ///
    /// ```ignore
    /// state.meili.search(uid, &req).await.map_err(AppError::upstream("search failed"))?;
    /// ```
    pub fn upstream(context: &'static str) -> impl FnOnce(MeiliApiError) -> Self {
        move |source| Self::Upstream { context, source }
    }

    /// Classify into an HTTP status, error code, and client-facing message.
    pub fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::IndexNotConfigured => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INDEX_NOT_CONFIGURED",
                    core.to_string(),
                ),
            },
            AppError::Upstream { context, source } => {
                tracing::error!(error = %source, context, "Search engine call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    format!("{context}: {source}"),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.classify();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("invalid query string: {}", rejection.body_text()))
    }
}

// ---------------------------------------------------------------------------
// Settings endpoints
// ---------------------------------------------------------------------------

/// Error type for the settings endpoints.
///
/// Same classification as [`AppError`] except that a missing index is a
/// 400, and the body carries `"success": false` like the success shape.
#[derive(Debug)]
pub struct SettingsError(pub AppError);

pub type SettingsResult<T> = Result<T, SettingsError>;

impl From<AppError> for SettingsError {
    fn from(err: AppError) -> Self {
        SettingsError(err)
    }
}

impl From<CoreError> for SettingsError {
    fn from(err: CoreError) -> Self {
        SettingsError(AppError::Core(err))
    }
}

impl From<JsonRejection> for SettingsError {
    fn from(rejection: JsonRejection) -> Self {
        SettingsError(rejection.into())
    }
}

impl IntoResponse for SettingsError {
    fn into_response(self) -> Response {
        let (mut status, code, message) = self.0.classify();
        if matches!(self.0, AppError::Core(CoreError::IndexNotConfigured)) {
            status = StatusCode::BAD_REQUEST;
        }

        let body = json!({
            "success": false,
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
