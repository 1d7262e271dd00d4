use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Prize entity
/// - range_start/range_end: inclusive ticket-number range this prize draws
///   from (3-digit tickets, 1..=500)
/// - drawn: set once a winner has been recorded, cleared by a reversal
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub range_start: i32,
    pub range_end: i32,
    pub drawn: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// Whether a ticket number falls inside this prize's range.
    pub fn covers_ticket(&self, ticket: i32) -> bool {
        self.range_start <= ticket && ticket <= self.range_end
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
