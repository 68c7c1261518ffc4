use crate::application::booking::BookingApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    Application(BookingApplicationError),
    /// リクエスト自体が不正（存在しない月など）
    BadRequest(String),
}

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::Application(err) => err,
            ApiError::BadRequest(message) => {
                let body = Json(ErrorResponse::new("BAD_REQUEST", message));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
        };

        let (status, error_type) = match &err {
            // 422 Unprocessable Entity - 選択が送信できない
            BookingApplicationError::InvalidRange(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_RANGE")
            }
            BookingApplicationError::DateConflict { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "DATE_CONFLICT")
            }
            BookingApplicationError::RoomUnavailable(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ROOM_UNAVAILABLE")
            }
            BookingApplicationError::EditingRangeMismatch(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "EDITING_RANGE_MISMATCH")
            }

            // 409 Conflict - サーバー側の競合。再取得が必要
            BookingApplicationError::ServerConflict(_) => (StatusCode::CONFLICT, "SERVER_CONFLICT"),
            BookingApplicationError::RefreshRequired => (StatusCode::CONFLICT, "REFRESH_REQUIRED"),

            // 404 Not Found
            BookingApplicationError::RoomNotFound(_) => (StatusCode::NOT_FOUND, "ROOM_NOT_FOUND"),
            BookingApplicationError::SessionNotFound(_) => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND")
            }

            // 401 Unauthorized
            BookingApplicationError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED")
            }

            // 502/500 - 通信・保存先の障害
            // 詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            BookingApplicationError::NetworkFailure(e) => {
                tracing::error!("Backend request failed: {}", e);
                return error_response(
                    StatusCode::BAD_GATEWAY,
                    "NETWORK_FAILURE",
                    "Could not reach the booking backend, please try again",
                );
            }
            BookingApplicationError::SessionStoreError(e) => {
                tracing::error!("Session store error: {}", e);
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SESSION_STORE_ERROR",
                    "Failed to store booking session",
                );
            }
        };

        error_response(status, error_type, &err.to_string())
    }
}

fn error_response(status: StatusCode, error_type: &str, message: &str) -> Response {
    let body = Json(ErrorResponse::new(error_type, message));
    (status, body).into_response()
}
