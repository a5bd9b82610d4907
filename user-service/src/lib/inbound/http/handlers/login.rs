use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub const LOGIN_SUCCESS_MESSAGE: &str = "로그인 성공";

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;

    let result = state
        .user_service
        .login(body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LOGIN_SUCCESS_MESSAGE,
        LoginResponseData {
            token: result.access_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, UserError> {
        let email = EmailAddress::new(self.email)?;
        Ok(LoginCommand::new(email, self.password)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
