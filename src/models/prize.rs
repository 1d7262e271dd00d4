use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::prize_entity;

/// Payload for creating a single prize
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreatePrizeRequest {
    /// Prize display name
    pub name: String,
    /// First ticket number covered by this prize (1..=500)
    pub range_start: i32,
    /// Last ticket number covered by this prize (1..=500)
    pub range_end: i32,
}

/// Batch insert of pre-validated rows (CSV upload collaborator)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BulkCreatePrizesRequest {
    pub prizes: Vec<CreatePrizeRequest>,
}

/// Partial update of an undrawn prize
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdatePrizeRequest {
    pub name: Option<String>,
    pub range_start: Option<i32>,
    pub range_end: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    pub id: i64,
    pub name: String,
    pub range_start: i32,
    pub range_end: i32,
    /// Whether a winner has been recorded for this prize
    pub drawn: bool,
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        PrizeResponse {
            id: m.id,
            name: m.name,
            range_start: m.range_start,
            range_end: m.range_end,
            drawn: m.drawn,
        }
    }
}
