use chrono::{DateTime, Utc};
use rorm::fields::types::Json;
use rorm::{Model, Patch};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A single submission of strokes for one part of one player's character
///
/// Submissions are never updated in place, every submission is a new row.
#[derive(Model)]
pub struct Drawing {
    /// Primary key of the drawing
    #[rorm(primary_key)]
    pub uuid: Uuid,

    /// The code of the game this drawing belongs to
    #[rorm(max_length = 255, index)]
    pub game_code: String,

    /// The player whose character this part belongs to
    #[rorm(max_length = 255)]
    pub player_name: String,

    /// The body part that is drawn
    #[rorm(max_length = 255)]
    pub player_part: String,

    /// The raw strokes
    pub drawing_points: Json<Vec<DrawingPoint>>,

    /// The rendered image of this part
    #[rorm(max_length = 10485760)]
    pub player_drawing: String,

    /// Set by the client once the part is finished
    pub is_completed: bool,

    /// Denormalized reference to the player
    pub player_id: Option<i64>,

    /// The point in time the drawing was submitted
    #[rorm(auto_create_time)]
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Patch)]
#[rorm(model = "Drawing")]
pub(crate) struct DrawingInsert {
    pub(crate) uuid: Uuid,
    pub(crate) game_code: String,
    pub(crate) player_name: String,
    pub(crate) player_part: String,
    pub(crate) drawing_points: Json<Vec<DrawingPoint>>,
    pub(crate) player_drawing: String,
    pub(crate) is_completed: bool,
    pub(crate) player_id: Option<i64>,
}

/// A single pen sample
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DrawingPoint {
    /// Horizontal position on the canvas
    #[schema(example = 12.5)]
    pub offset_dx: f64,
    /// Vertical position on the canvas
    #[schema(example = 48.0)]
    pub offset_dy: f64,
    /// The kind of pointer input that produced the sample
    #[schema(example = 0)]
    pub point_type: i64,
    /// Pen pressure
    #[schema(example = 1.0)]
    pub pressure: f64,
}

/// A drawing as it is sent to clients
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct DrawingDocument {
    /// The identifier of the drawing
    #[serde(rename = "_id")]
    pub uuid: Uuid,
    /// The code of the game this drawing belongs to
    #[schema(example = "1000")]
    pub game_code: String,
    /// The player whose character this part belongs to
    #[schema(example = "test")]
    pub player_name: String,
    /// The body part that is drawn
    #[schema(example = "Hat")]
    pub player_part: String,
    /// The raw strokes
    pub drawing_points: Vec<DrawingPoint>,
    /// The rendered image of this part
    pub player_drawing: String,
    /// Whether the part is finished
    pub is_completed: bool,
    /// Denormalized reference to the player
    pub player_id: Option<i64>,
    /// The point in time the drawing was submitted
    pub created_at: DateTime<Utc>,
}

impl From<Drawing> for DrawingDocument {
    fn from(drawing: Drawing) -> Self {
        Self {
            uuid: drawing.uuid,
            game_code: drawing.game_code,
            player_name: drawing.player_name,
            player_part: drawing.player_part,
            drawing_points: drawing.drawing_points.0,
            player_drawing: drawing.player_drawing,
            is_completed: drawing.is_completed,
            player_id: drawing.player_id,
            created_at: DateTime::from_naive_utc_and_offset(drawing.created_at, Utc),
        }
    }
}
