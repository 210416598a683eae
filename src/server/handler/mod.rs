//! This module holds the handler of passdraw

use std::fmt::{Display, Formatter};

use actix_web::body::BoxBody;
use actix_web::HttpResponse;
use log::{debug, error};
use serde::Serialize;
use serde_repr::Serialize_repr;
use utoipa::ToSchema;

pub use crate::server::handler::drawings::*;
pub use crate::server::handler::games::*;
pub use crate::server::handler::health::*;

pub mod drawings;
pub mod games;
pub mod health;

/// The result that is used throughout the complete api.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize_repr, ToSchema, Debug)]
#[repr(u16)]
pub(crate) enum ApiStatusCode {
    InvalidJson = 1000,
    EmptyJson = 1001,
    InvalidGameCode = 1002,
    InvalidPlayerName = 1003,
    InvalidPartName = 1004,

    GameNotFound = 1100,
    DrawingNotFound = 1101,
    NotFound = 1102,

    DatabaseError = 2000,
}

#[derive(Serialize, ToSchema)]
pub(crate) struct ApiErrorResponse {
    #[schema(example = "Error message is here")]
    message: String,
    #[schema(example = 1000)]
    status_code: ApiStatusCode,
}

impl ApiErrorResponse {
    pub(crate) fn new(status_code: ApiStatusCode, message: String) -> Self {
        Self {
            message,
            status_code,
        }
    }
}

/// This enum holds all possible error types that can occur in the API
#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be parsed
    InvalidJson(String),
    /// None of the optional fields of the request were set
    EmptyJson,
    /// The game code is empty or too long
    InvalidGameCode,
    /// The player name is empty or too long
    InvalidPlayerName,
    /// The part name is empty or too long
    InvalidPartName,

    /// No game exists with the requested code
    GameNotFound,
    /// No drawing matches the request
    DrawingNotFound,

    /// All errors that are thrown by the database
    DatabaseError(rorm::Error),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::InvalidJson(err) => write!(f, "Invalid json: {err}"),
            ApiError::EmptyJson => write!(f, "At least one field must be set"),
            ApiError::InvalidGameCode => {
                write!(f, "The game code must be 1 to {MAX_NAME_LENGTH} characters long")
            }
            ApiError::InvalidPlayerName => {
                write!(f, "The player name must be 1 to {MAX_NAME_LENGTH} characters long")
            }
            ApiError::InvalidPartName => {
                write!(f, "The part name must be 1 to {MAX_NAME_LENGTH} characters long")
            }
            ApiError::GameNotFound => write!(f, "Game not found"),
            ApiError::DrawingNotFound => write!(f, "Drawing not found"),
            ApiError::DatabaseError(_) => write!(f, "Database error occurred"),
        }
    }
}

impl actix_web::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        let (mut builder, status_code) = match self {
            ApiError::InvalidJson(err) => {
                debug!("Received invalid json: {err}");
                (HttpResponse::BadRequest(), ApiStatusCode::InvalidJson)
            }
            ApiError::EmptyJson => {
                debug!("Received empty json");
                (HttpResponse::BadRequest(), ApiStatusCode::EmptyJson)
            }
            ApiError::InvalidGameCode => {
                debug!("Received invalid game code");
                (HttpResponse::BadRequest(), ApiStatusCode::InvalidGameCode)
            }
            ApiError::InvalidPlayerName => {
                debug!("Received invalid player name");
                (HttpResponse::BadRequest(), ApiStatusCode::InvalidPlayerName)
            }
            ApiError::InvalidPartName => {
                debug!("Received invalid part name");
                (HttpResponse::BadRequest(), ApiStatusCode::InvalidPartName)
            }
            ApiError::GameNotFound => {
                debug!("Game not found");
                (HttpResponse::NotFound(), ApiStatusCode::GameNotFound)
            }
            ApiError::DrawingNotFound => {
                debug!("Drawing not found");
                (HttpResponse::NotFound(), ApiStatusCode::DrawingNotFound)
            }
            ApiError::DatabaseError(err) => {
                error!("Database error: {err}");
                (
                    HttpResponse::InternalServerError(),
                    ApiStatusCode::DatabaseError,
                )
            }
        };

        builder.json(ApiErrorResponse::new(status_code, self.to_string()))
    }
}

impl From<rorm::Error> for ApiError {
    fn from(value: rorm::Error) -> Self {
        Self::DatabaseError(value)
    }
}

/// The maximum length of codes and names, matches the column size in the database
pub(crate) const MAX_NAME_LENGTH: usize = 255;

/// Checks that a code or name of a request is neither empty nor too long to be stored
pub(crate) fn validate_name(value: &str, err: ApiError) -> ApiResult<()> {
    if value.trim().is_empty() || value.chars().count() > MAX_NAME_LENGTH {
        Err(err)
    } else {
        Ok(())
    }
}
