use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::issued_token;
use super::ApiError;
use super::ApiSuccess;
use super::FieldError;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let command = body.try_into_command()?;
    let (user_id, token) = issued_token(state.auth_service.register(command).await)?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        RegisterResponseData {
            user_id: user_id.to_string(),
            token,
            message: "User created and you logged in.".to_string(),
        },
    ))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequestBody {
    name: String,
    email: String,
    password: String,
}

impl RegisterRequestBody {
    /// Validate every field, reporting all failures at once.
    fn try_into_command(self) -> Result<RegisterCommand, ApiError> {
        let mut errors = Vec::new();

        let name = DisplayName::new(self.name)
            .map_err(|e| errors.push(FieldError::new("name", e)))
            .ok();
        let email = EmailAddress::new(self.email)
            .map_err(|e| errors.push(FieldError::new("email", e)))
            .ok();
        let password = Password::new(self.password)
            .map_err(|e| errors.push(FieldError::new("password", e)))
            .ok();

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => {
                Ok(RegisterCommand::new(name, email, password))
            }
            _ => Err(ApiError::validation(
                "Not correct data per register.",
                errors,
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub user_id: String,
    pub token: String,
    pub message: String,
}
