use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::winner_entity;

/// Winner history entry. Name/ticket/prize fields are the snapshots taken
/// at draw time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WinnerResponse {
    pub id: i64,
    pub prize_id: i64,
    pub participant_id: i64,
    pub participant_name: String,
    pub ticket_number: String,
    pub prize_name: String,
    pub draw_date: DateTime<Utc>,
}

impl From<winner_entity::Model> for WinnerResponse {
    fn from(m: winner_entity::Model) -> Self {
        WinnerResponse {
            id: m.id,
            prize_id: m.prize_id,
            participant_id: m.participant_id,
            participant_name: m.participant_name,
            ticket_number: m.ticket_number,
            prize_name: m.prize_name,
            draw_date: m.draw_date,
        }
    }
}
