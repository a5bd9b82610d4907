use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::UserError;

pub mod get_me;
pub mod login;
pub mod signup;

pub const VALIDATION_FAILED_MESSAGE: &str = "입력값이 올바르지 않습니다.";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "이미 사용 중인 이메일입니다.";
pub const LOGIN_FAILED_MESSAGE: &str = "이메일 또는 비밀번호가 올바르지 않습니다.";
pub const ACCOUNT_DISABLED_MESSAGE: &str = "비활성화된 계정입니다.";
pub const INVALID_TOKEN_MESSAGE: &str = "유효하지 않은 토큰입니다.";
pub const AUTHENTICATION_REQUIRED_MESSAGE: &str = "인증이 필요합니다.";
pub const USER_NOT_FOUND_MESSAGE: &str = "사용자를 찾을 수 없습니다.";
pub const SERVER_ERROR_MESSAGE: &str = "서버 오류가 발생했습니다.";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: &str, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::success(message, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Failures surfaced to HTTP clients.
///
/// Carries only the public message; internal details are logged where the
/// error is mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    pub fn validation_failed() -> Self {
        ApiError::BadRequest(VALIDATION_FAILED_MESSAGE.to_string())
    }

    pub fn invalid_token() -> Self {
        ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
    }

    pub fn authentication_required() -> Self {
        ApiError::Unauthorized(AUTHENTICATION_REQUIRED_MESSAGE.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::error(message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidEmail(_)
            | UserError::InvalidDisplayName(_)
            | UserError::InvalidPassword(_) => {
                tracing::debug!(error = %err, "Request validation failed");
                ApiError::validation_failed()
            }
            UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string())
            }
            UserError::InvalidCredentials => {
                ApiError::Unauthorized(LOGIN_FAILED_MESSAGE.to_string())
            }
            UserError::AccountDisabled => {
                ApiError::Unauthorized(ACCOUNT_DISABLED_MESSAGE.to_string())
            }
            UserError::InvalidUserId(_) => ApiError::invalid_token(),
            UserError::NotFound(_) => ApiError::NotFound(USER_NOT_FOUND_MESSAGE.to_string()),
            UserError::InvalidStatus(_)
            | UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError(SERVER_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::validation_failed()
    }
}

/// Response envelope shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    message: String,
    data: Option<T>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponseBody<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            message,
            data: None,
        }
    }
}
