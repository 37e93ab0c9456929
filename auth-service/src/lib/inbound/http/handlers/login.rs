use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::issued_token;
use super::ApiError;
use super::ApiSuccess;
use super::FieldError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Password;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let command = body.try_into_command()?;
    let (user_id, token) = issued_token(state.auth_service.login(command).await)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user_id: user_id.to_string(),
            token,
            message: "Successfully logged In.".to_string(),
        },
    ))
}

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

impl LoginRequestBody {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        let mut errors = Vec::new();

        let email = EmailAddress::new(self.email)
            .map_err(|e| errors.push(FieldError::new("email", e)))
            .ok();
        let password = Password::new(self.password)
            .map_err(|e| errors.push(FieldError::new("password", e)))
            .ok();

        match (email, password) {
            (Some(email), Some(password)) => Ok(LoginCommand::new(email, password)),
            _ => Err(ApiError::validation("Not correct data per login.", errors)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub user_id: String,
    pub token: String,
    pub message: String,
}
