use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use serde::Serialize;
use thiserror::Error;

use std::sync::PoisonError;

/// Failures caused by what the user asked for. These are never fatal and
/// always carry a message meant to be shown back to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Missing {0}")]
    MissingField(&'static str),
    #[error("Invalid deadline: {0}")]
    InvalidDeadline(String),
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
    #[error("User already exists")]
    UserExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Not logged in")]
    NotLoggedIn,
}

impl Rejection {
    fn status(&self) -> Status {
        match self {
            Rejection::MissingField(_)
            | Rejection::InvalidDeadline(_)
            | Rejection::UnknownTheme(_) => Status::BadRequest,
            Rejection::UserExists => Status::Conflict,
            Rejection::InvalidCredentials | Rejection::NotLoggedIn => Status::Unauthorized,
        }
    }
}

#[derive(Debug, Error)]
pub enum InternalError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("lock poisoned: {0}")]
    Poisoned(String),
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::Poisoned(e.to_string())
    }
}

impl InternalError {
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            InternalError::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = match self.rejection() {
            Some(rejection) => rejection.status(),
            None => {
                tracing::error!(error = %self, uri = %request.uri(), "request failed");
                Status::InternalServerError
            }
        };

        let body = Json(ErrorBody {
            message: self.to_string(),
        });

        response::Response::build_from(body.respond_to(request)?)
            .status(status)
            .ok()
    }
}

pub type InternalResult<T> = Result<T, InternalError>;
