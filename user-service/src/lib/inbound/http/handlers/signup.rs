use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::SignupOutcome;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub const SIGNUP_SUCCESS_MESSAGE: &str = "회원가입이 완료되었습니다.";
pub const SIGNUP_REDIRECT_MESSAGE: &str = "회원가입이 완료되었습니다. 홈화면으로 이동합니다.";

pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .user_service
        .signup(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref outcome| {
            ApiSuccess::new(StatusCode::CREATED, SIGNUP_SUCCESS_MESSAGE, outcome.into())
        })
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    email: String,
    password: String,
    name: String,
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, UserError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let display_name = DisplayName::new(self.name)?;
        Ok(SignupCommand::new(email, password, display_name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponseData {
    pub token: String,
    pub name: String,
    pub redirect_message: String,
    pub user_id: i64,
}

impl From<&SignupOutcome> for SignupResponseData {
    fn from(outcome: &SignupOutcome) -> Self {
        Self {
            token: outcome.access_token.clone(),
            name: outcome.user.display_name.as_str().to_string(),
            redirect_message: SIGNUP_REDIRECT_MESSAGE.to_string(),
            user_id: outcome.user.id.0,
        }
    }
}
