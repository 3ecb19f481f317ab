//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while giving every
//! handler failure one uniform classification point. Extractor failures
//! (malformed JSON bodies, query strings, path parameters) are funnelled
//! through the same [`Error`] type via the config helpers below, so clients
//! always see `{"message": ...}` with the status from the classification
//! table.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use tracing::error;

use crate::domain::{Error, ErrorKind};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::Conflict | ErrorKind::MalformedQuery => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.kind())
    }

    fn error_response(&self) -> HttpResponse {
        if self.kind() == ErrorKind::Internal {
            error!(message = self.message(), "request failed with internal error");
        }
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// JSON body extractor config rejecting malformed payloads as validation
/// failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| Error::validation(err.to_string()).into())
}

/// Query string extractor config; non-numeric `offset`/`limit` and other
/// type mismatches are rejected rather than left undefined.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| Error::validation(err.to_string()).into())
}

/// Path extractor config rejecting identifiers that fail to parse.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| Error::validation(err.to_string()).into())
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    #[rstest]
    #[case(Error::validation("bad payload"), StatusCode::BAD_REQUEST)]
    #[case(Error::conflict("duplicate key"), StatusCode::BAD_REQUEST)]
    #[case(Error::malformed_query("bad shape"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("user not found"), StatusCode::NOT_FOUND)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn classification_table(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[actix_web::test]
    async fn error_body_is_message_only() {
        let response = Error::not_found("order not found").error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        let value: Value = serde_json::from_slice(&bytes).expect("error payload");
        assert_eq!(value, serde_json::json!({ "message": "order not found" }));
    }
}
