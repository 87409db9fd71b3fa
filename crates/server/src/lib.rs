use api_types::ErrorResponse;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

pub use server::{ServerOptions, router, run, run_with_listener, spawn_with_listener};

mod auth;
mod currency;
mod server;
mod summary;
mod transactions;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    BadRequest { message: String, error: String },
}

impl ServerError {
    pub fn bad_request(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            error: error.into(),
        }
    }
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::Validation(_)
        | EngineError::InvalidInput(_)
        | EngineError::UnsupportedCurrency(_)
        | EngineError::UnsupportedConversion { .. } => StatusCode::BAD_REQUEST,
    }
}

fn body_for_engine_error(err: EngineError) -> ErrorResponse {
    let (message, error) = match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            ("Internal server error", Some("internal server error".to_string()))
        }
        EngineError::KeyNotFound(_) => ("Task not found", None),
        EngineError::InvalidCredentials => ("Invalid credentials", None),
        EngineError::Validation(err) => ("Validation failed", Some(err.to_string())),
        EngineError::InvalidInput(err) => ("Invalid input data", Some(err)),
        err @ (EngineError::UnsupportedCurrency(_) | EngineError::UnsupportedConversion { .. }) => {
            ("Conversion failed", Some(err.to_string()))
        }
    };

    ErrorResponse {
        message: message.to_string(),
        error,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), body_for_engine_error(err)),
            ServerError::BadRequest { message, error } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    message,
                    error: Some(error),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// Unwraps a JSON body, turning parse failures into a 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServerError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ServerError::bad_request("Invalid request body", rejection.body_text()))
}
