use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Why an operation was refused even though its target exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    AttemptLimitReached,
    AttemptAlreadyOpen,
    AttemptAlreadyCompleted,
    ChallengeNotInContest,
    NotAttemptOwner,
    EmailTaken,
    InvalidCredentials,
}

impl Precondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Precondition::AttemptLimitReached => "attempt_limit_reached",
            Precondition::AttemptAlreadyOpen => "attempt_already_open",
            Precondition::AttemptAlreadyCompleted => "attempt_already_completed",
            Precondition::ChallengeNotInContest => "challenge_not_in_contest",
            Precondition::NotAttemptOwner => "not_attempt_owner",
            Precondition::EmailTaken => "email_taken",
            Precondition::InvalidCredentials => "invalid_credentials",
        }
    }
}

impl std::fmt::Display for Precondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ClubError {
    #[error("Authentication required")]
    NotAuthenticated,

    #[error("Admin role required")]
    AdminRequired,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(Precondition),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClubError {
    pub fn kind(&self) -> &'static str {
        match self {
            ClubError::NotAuthenticated => "not_authenticated",
            ClubError::AdminRequired => "admin_required",
            ClubError::NotFound(_) => "not_found",
            ClubError::PreconditionFailed(p) => p.as_str(),
            ClubError::Validation(_) => "validation",
            ClubError::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ClubError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            ClubError::AdminRequired => StatusCode::FORBIDDEN,
            ClubError::NotFound(_) => StatusCode::NOT_FOUND,
            ClubError::PreconditionFailed(Precondition::InvalidCredentials) => {
                StatusCode::UNAUTHORIZED
            }
            ClubError::PreconditionFailed(Precondition::NotAttemptOwner) => StatusCode::FORBIDDEN,
            ClubError::PreconditionFailed(_) => StatusCode::CONFLICT,
            ClubError::Validation(_) => StatusCode::BAD_REQUEST,
            ClubError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for ClubError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClubError::Validation(errors.to_string())
    }
}

impl IntoResponse for ClubError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request refused: {}", self);
        }

        let body = json!({
            "error": self.kind(),
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

pub type ClubResult<T> = Result<T, ClubError>;
