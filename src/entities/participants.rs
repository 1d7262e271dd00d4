use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Participant entity
/// - cedula: 10-digit identity string, unique
/// - ticket_number: 3-digit raffle ticket as a zero-padded string
///   (NULL until the participant registers one)
/// - active: eligible to be drawn; false when no ticket has been assigned
///   yet or the participant already won a prize
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "participants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub cedula: String,
    pub ticket_number: Option<String>,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// Numeric value of the assigned ticket. None when no ticket is
    /// assigned or the stored string does not parse.
    pub fn ticket_value(&self) -> Option<i32> {
        self.ticket_number.as_deref().and_then(|t| t.parse().ok())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
