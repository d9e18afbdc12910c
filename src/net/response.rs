use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::types::dto::travel::ErrorBody;

/// An error response with a JSON `{"error": ...}` body.
pub struct ResponseError(Response);

impl IntoResponse for ResponseError {
    fn into_response(self) -> Response {
        self.0
    }
}

//Anything not mapped explicitly is a 500
impl<E> From<E> for ResponseError
where
    E: Into<color_eyre::eyre::Error>,
{
    fn from(value: E) -> Self {
        let report = Into::<color_eyre::eyre::Error>::into(value);
        error!("Unhandled error: {report:?}");
        Self::internal_server_error(report)
    }
}

impl ResponseError {
    pub fn with_status(status_code: StatusCode, message: impl Display) -> Self {
        ResponseError(
            (
                status_code,
                Json(ErrorBody {
                    error: message.to_string(),
                }),
            )
                .into_response(),
        )
    }

    pub fn internal_server_error(message: impl Display) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Display) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, message)
    }
}

pub type Result<T, E = ResponseError> = axum::response::Result<T, E>;
