use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::ControllerError;

pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error("{}", .0.body_text())]
    MalformedBody(#[from] JsonRejection),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let err = match self {
            Self::MalformedBody(rejection) => {
                return (
                    StatusCode::BAD_REQUEST,
                    format!("Validation failed: {}", rejection.body_text()),
                )
                    .into_response();
            }
            Self::Controller(err) => err,
        };

        match err {
            ControllerError::Validation(err) => {
                (StatusCode::BAD_REQUEST, format!("Validation failed: {err}")).into_response()
            }
            ControllerError::NotFound { .. } => StatusCode::NOT_FOUND.into_response(),
            ControllerError::Conflict { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()).into_response()
            }
            ControllerError::PreconditionFailed(_) => {
                (StatusCode::CONFLICT, err.to_string()).into_response()
            }
            ControllerError::Timeout(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string()).into_response()
            }
            ControllerError::ConsistencyFault(_) | ControllerError::Storage(_) => {
                tracing::error!("request failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}
