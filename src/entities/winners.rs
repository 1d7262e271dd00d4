use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Winner entity
/// - one row per committed draw, binding a prize to a participant
/// - participant_name / ticket_number / prize_name are snapshots taken at
///   draw time so the history stays intact even if the referenced rows are
///   edited later
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "winners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub prize_id: i64,
    pub participant_id: i64,
    pub participant_name: String,
    pub ticket_number: String,
    pub prize_name: String,
    pub draw_date: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
