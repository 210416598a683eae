//! The health endpoint used by deployment probes

use actix_web::get;
use actix_web::web::{Data, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::server::handler::{ApiErrorResponse, ApiResult};
use crate::storage::Storage;

/// The health data of this server
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct HealthResponse {
    /// Count of stored games
    #[schema(example = 1337)]
    pub games: u64,
    /// Count of stored drawing submissions
    #[schema(example = 31337)]
    pub drawings: u64,
}

/// Request health data from this server.
///
/// `games` and `drawings` are the counts of stored records.
#[utoipa::path(
    tag = "Server status",
    context_path = "/api",
    responses(
        (status = 200, description = "Health data of this server", body = HealthResponse),
        (status = 500, description = "Server error", body = ApiErrorResponse),
    ),
)]
#[get("/health")]
pub async fn health(storage: Data<Storage>) -> ApiResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        games: storage.count_games().await?,
        drawings: storage.count_drawings().await?,
    }))
}
