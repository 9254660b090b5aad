//! Response envelope shared by every endpoint.
//!
//! Success: `{"status": "success", "payload": ...}`.
//! Failure: `{"status": "error", "error": "..."}`.

use salvo::{
    http::StatusCode,
    prelude::{Json, Response, Scribe},
};
use serde::Serialize;
use thiserror::Error;

const GENERIC_FAILURE: &str = "internal server error";

/// Successful response body.
#[derive(Debug, Serialize)]
pub(crate) struct Success<T> {
    status: &'static str,
    payload: T,
}

#[derive(Debug, Serialize)]
struct Failure {
    status: &'static str,
    error: String,
}

/// Wrap a payload in the success envelope.
pub(crate) fn success<T: Serialize + Send>(payload: T) -> Json<Success<T>> {
    Json(Success {
        status: "success",
        payload,
    })
}

/// An HTTP failure rendered as the error envelope.
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// A 500 whose cause must already have been logged; the client only sees a generic message.
    pub(crate) fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE)
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(Failure {
            status: "error",
            error: self.message,
        }));
    }
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use testresult::TestResult;

    use super::*;

    #[handler]
    async fn ok() -> Json<Success<Value>> {
        success(json!({ "answer": 42 }))
    }

    #[handler]
    async fn missing() -> Result<Json<Success<Value>>, ApiError> {
        Err(ApiError::not_found("cart 123 not found"))
    }

    #[handler]
    async fn broken() -> Result<Json<Success<Value>>, ApiError> {
        Err(ApiError::internal())
    }

    fn make_service() -> Service {
        Service::new(
            Router::new()
                .push(Router::with_path("ok").get(ok))
                .push(Router::with_path("missing").get(missing))
                .push(Router::with_path("broken").get(broken)),
        )
    }

    #[tokio::test]
    async fn success_wraps_payload() -> TestResult {
        let mut res = TestClient::get("http://example.com/ok")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            res.take_json::<Value>().await?,
            json!({ "status": "success", "payload": { "answer": 42 } })
        );

        Ok(())
    }

    #[tokio::test]
    async fn errors_render_status_and_message() -> TestResult {
        let mut res = TestClient::get("http://example.com/missing")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(
            res.take_json::<Value>().await?,
            json!({ "status": "error", "error": "cart 123 not found" })
        );

        Ok(())
    }

    #[tokio::test]
    async fn internal_errors_hide_details() -> TestResult {
        let mut res = TestClient::get("http://example.com/broken")
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(
            res.take_json::<Value>().await?,
            json!({ "status": "error", "error": "internal server error" })
        );

        Ok(())
    }
}
