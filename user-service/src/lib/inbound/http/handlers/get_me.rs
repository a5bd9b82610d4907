use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::Authenticated;
use crate::inbound::http::router::AppState;

pub const GET_ME_SUCCESS_MESSAGE: &str = "사용자 정보 조회 성공";

/// Profile of the user named by the bearer token.
pub async fn get_me(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
) -> Result<ApiSuccess<UserInfoResponseData>, ApiError> {
    let user_id = UserId::from_string(principal.subject_id()).map_err(|e| {
        tracing::warn!(subject = principal.subject_id(), error = %e, "Token subject is not a user id");
        ApiError::invalid_token()
    })?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, GET_ME_SUCCESS_MESSAGE, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponseData {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub status: String,
}

impl From<&User> for UserInfoResponseData {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.0,
            email: user.email.as_str().to_string(),
            name: user.display_name.as_str().to_string(),
            status: user.status.name().to_string(),
        }
    }
}
