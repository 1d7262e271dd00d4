use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::participant_entity;

/// Payload for registering a single participant
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateParticipantRequest {
    /// Full name, letters and spaces only
    pub name: String,
    /// 10-digit identity number, unique
    pub cedula: String,
    /// Optional 3-digit ticket number; assigning one makes the
    /// participant eligible for draws
    pub ticket_number: Option<String>,
}

/// Batch insert of pre-validated rows (CSV upload collaborator)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BulkCreateParticipantsRequest {
    pub participants: Vec<CreateParticipantRequest>,
}

/// Assign or replace a participant's raffle ticket
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RegisterTicketRequest {
    pub ticket_number: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParticipantResponse {
    pub id: i64,
    pub name: String,
    pub cedula: String,
    pub ticket_number: Option<String>,
    /// Eligible to be drawn
    pub active: bool,
}

impl From<participant_entity::Model> for ParticipantResponse {
    fn from(m: participant_entity::Model) -> Self {
        ParticipantResponse {
            id: m.id,
            name: m.name,
            cedula: m.cedula,
            ticket_number: m.ticket_number,
            active: m.active,
        }
    }
}
