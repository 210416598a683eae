use actix_web::error::JsonPayloadError;
use actix_web::HttpRequest;

use crate::server::handler::ApiError;

/// Converts errors of the json extractor to [ApiError::InvalidJson]
///
/// This covers syntax errors, missing required fields and unknown fields.
pub(crate) fn json_extractor_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidJson(err.to_string()).into()
}
