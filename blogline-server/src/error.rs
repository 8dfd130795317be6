use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::server::Json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error(transparent)]
    Core(#[from] blogline_core::Error),
    #[error("unable to render page: {0}")]
    Template(#[from] askama::Error),
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Json(err) => err.status(),
            Error::Core(
                blogline_core::Error::Http(_)
                | blogline_core::Error::Endpoint { .. }
                | blogline_core::Error::EmptyCompletion,
            ) => StatusCode::BAD_GATEWAY,
            Error::Core(_) | Error::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            Error::Json(err) => err.body_text(),
            Error::Core(err) => {
                tracing::error!(%err, "blogline_core error");
                err.to_string()
            }
            Error::Template(err) => {
                tracing::error!(%err, "template error");
                "Something went wrong D:".to_string()
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
