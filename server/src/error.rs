use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use showcase::term::TermParseError;
use thiserror::Error;

/// Parameter errors in our own surface. Gateway failures on a final data
/// fetch deliberately do not appear here; those come back as a 200 with an
/// empty list and a `gatewayError` note so the UI can retry.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("unknown major: {0}")]
    UnknownMajor(String),

    #[error(transparent)]
    InvalidTerm(#[from] TermParseError),

    #[error("semester and year must be provided together")]
    IncompleteTerm,

    #[error("summer is not a listing term; use sp or fa")]
    UnlistedSemester,

    #[error("unknown season: {0}")]
    UnknownSeason(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::UnknownMajor { .. }
            | AppError::InvalidTerm { .. }
            | AppError::IncompleteTerm
            | AppError::UnlistedSemester
            | AppError::UnknownSeason { .. } => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_errors_are_bad_requests() {
        let response = AppError::UnknownMajor("chemistry".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            AppError::InvalidTerm(TermParseError::UnknownSemester("wi".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
