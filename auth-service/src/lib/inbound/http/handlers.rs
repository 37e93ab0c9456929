use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::user::models::AuthResult;
use crate::domain::user::models::UserId;

pub mod login;
pub mod register;
pub mod verify;

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
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity {
        message: String,
        errors: Vec<FieldError>,
    },
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    pub fn validation(message: &str, errors: Vec<FieldError>) -> Self {
        ApiError::UnprocessableEntity {
            message: message.to_string(),
            errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg, Vec::new())
            }
            ApiError::UnprocessableEntity { message, errors } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, errors)
            }
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, Vec::new()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, Vec::new()),
        };

        (
            status,
            Json(ApiResponseBody::new_error(status, message, errors)),
        )
            .into_response()
    }
}

/// Split an auth outcome into the issued credentials or the error to answer with.
pub fn issued_token(result: AuthResult) -> Result<(UserId, String), ApiError> {
    match result {
        AuthResult::Success { user_id, token } => Ok((user_id, token)),
        AuthResult::Rejected(rejection) => {
            Err(ApiError::Unauthorized(rejection.message().to_string()))
        }
        AuthResult::Conflict(message) => Err(ApiError::Conflict(message)),
        AuthResult::SystemError => Err(ApiError::InternalServerError(
            AuthResult::SYSTEM_ERROR_MESSAGE.to_string(),
        )),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String, errors: Vec<FieldError>) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message, errors },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// One failed input rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, error: impl ToString) -> Self {
        Self {
            field: field.to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::RejectionPolicy;
    use crate::domain::user::models::RejectionReason;

    #[test]
    fn test_issued_token_maps_outcomes() {
        let user_id = UserId::new();
        assert_eq!(
            issued_token(AuthResult::Success {
                user_id,
                token: "token".to_string()
            }),
            Ok((user_id, "token".to_string()))
        );

        assert_eq!(
            issued_token(AuthResult::conflict()),
            Err(ApiError::Conflict(
                "User with that email already exists.".to_string()
            ))
        );

        let rejection = RejectionPolicy::Uniform.reject(RejectionReason::BadCredentials);
        assert_eq!(
            issued_token(AuthResult::Rejected(rejection)),
            Err(ApiError::Unauthorized("Invalid credentials.".to_string()))
        );

        assert_eq!(
            issued_token(AuthResult::SystemError),
            Err(ApiError::InternalServerError(
                "Something went wrong".to_string()
            ))
        );
    }

    #[test]
    fn test_error_body_lists_field_errors() {
        let body = ApiResponseBody::new_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Not correct data per register.".to_string(),
            vec![FieldError::new("name", "Name too short")],
        );

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status_code"], 422);
        assert_eq!(json["data"]["errors"][0]["field"], "name");
    }

    #[test]
    fn test_error_body_omits_empty_errors() {
        let body = ApiResponseBody::new_error(
            StatusCode::CONFLICT,
            "exists".to_string(),
            Vec::new(),
        );

        let json = serde_json::to_value(&body).unwrap();
        assert!(json["data"].get("errors").is_none());
    }
}
