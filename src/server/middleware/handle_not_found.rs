use actix_web::HttpResponse;

use crate::server::handler::{ApiErrorResponse, ApiStatusCode};

/// Fallback for requests that don't match any route
pub(crate) async fn handle_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiErrorResponse::new(
        ApiStatusCode::NotFound,
        "Not found".to_string(),
    ))
}
