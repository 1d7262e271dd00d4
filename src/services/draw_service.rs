use crate::entities::{
    participant_entity as participants, prize_entity as prizes, winner_entity as winners,
};
use crate::error::{AppError, AppResult};
use crate::models::{DrawNextResponse, WinnerResponse};
use chrono::Utc;
use rand::Rng;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, UpdateResult,
};
use std::sync::Arc;

/// All participants allowed to win the given prize: active, holding a
/// ticket whose numeric value falls inside the prize's range. Participants
/// without a parseable ticket are simply not candidates.
pub fn eligible_participants<'a>(
    prize: &prizes::Model,
    participants: &'a [participants::Model],
) -> Vec<&'a participants::Model> {
    participants
        .iter()
        .filter(|p| p.active)
        .filter(|p| p.ticket_value().is_some_and(|n| prize.covers_ticket(n)))
        .collect()
}

#[derive(Clone)]
pub struct DrawService {
    pool: Arc<DatabaseConnection>,
}

impl DrawService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Draw a winner for one prize.
    ///
    /// Runs as a single transaction:
    /// 1. Load the prize; refuse if unknown or already drawn
    /// 2. Collect active participants and filter by ticket range
    /// 3. Pick one uniformly at random
    /// 4. Flip prize -> drawn and participant -> inactive with optimistic
    ///    guards (update .. where drawn = false / active = true), so two
    ///    overlapping draws cannot double-award
    /// 5. Insert the winner record last, then commit
    ///
    /// Any failed step rolls the whole draw back; no partial state
    /// survives.
    pub async fn draw_prize(&self, prize_id: i64) -> AppResult<WinnerResponse> {
        let txn = self.pool.begin().await?;

        let prize = prizes::Entity::find_by_id(prize_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {prize_id} not found")))?;

        if prize.drawn {
            return Err(AppError::ValidationError(format!(
                "Prize \"{}\" has already been drawn",
                prize.name
            )));
        }

        let candidates = participants::Entity::find()
            .filter(participants::Column::Active.eq(true))
            .order_by_asc(participants::Column::Id)
            .all(&txn)
            .await?;

        let eligible = eligible_participants(&prize, &candidates);
        if eligible.is_empty() {
            return Err(AppError::NoEligibleParticipants(format!(
                "No eligible participants in range {:03} - {:03} for prize \"{}\"",
                prize.range_start, prize.range_end, prize.name
            )));
        }

        // Uniform pick over the eligible set; the rng handle must not live
        // across an await
        let index = {
            let mut rng = rand::rng();
            rng.random_range(0..eligible.len())
        };
        let selected = eligible[index].clone();

        let update_result: UpdateResult = prizes::Entity::update_many()
            .col_expr(prizes::Column::Drawn, Expr::value(true))
            .filter(prizes::Column::Id.eq(prize.id))
            .filter(prizes::Column::Drawn.eq(false))
            .exec(&txn)
            .await?;
        if update_result.rows_affected != 1 {
            return Err(AppError::Conflict(format!(
                "Prize \"{}\" was drawn by a concurrent request",
                prize.name
            )));
        }

        let update_result: UpdateResult = participants::Entity::update_many()
            .col_expr(participants::Column::Active, Expr::value(false))
            .filter(participants::Column::Id.eq(selected.id))
            .filter(participants::Column::Active.eq(true))
            .exec(&txn)
            .await?;
        if update_result.rows_affected != 1 {
            return Err(AppError::Conflict(format!(
                "Participant \"{}\" won a concurrent draw",
                selected.name
            )));
        }

        let winner = winners::ActiveModel {
            prize_id: Set(prize.id),
            participant_id: Set(selected.id),
            participant_name: Set(selected.name.clone()),
            ticket_number: Set(selected.ticket_number.clone().unwrap_or_default()),
            prize_name: Set(prize.name.clone()),
            draw_date: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        log::info!(
            "Prize \"{}\" won by \"{}\" (ticket {})",
            winner.prize_name,
            winner.participant_name,
            winner.ticket_number
        );

        Ok(winner.into())
    }

    /// Draw the first pending prize, in insertion order. When every prize
    /// has been drawn, reports the terminal all-drawn state instead of an
    /// error.
    pub async fn draw_next(&self) -> AppResult<DrawNextResponse> {
        let next = prizes::Entity::find()
            .filter(prizes::Column::Drawn.eq(false))
            .order_by_asc(prizes::Column::Id)
            .one(&*self.pool)
            .await?;

        match next {
            Some(prize) => {
                let winner = self.draw_prize(prize.id).await?;
                Ok(DrawNextResponse {
                    all_drawn: false,
                    winner: Some(winner),
                })
            }
            None => Ok(DrawNextResponse {
                all_drawn: true,
                winner: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn prize(id: i64, range_start: i32, range_end: i32, drawn: bool) -> prizes::Model {
        prizes::Model {
            id,
            name: format!("Prize {id}"),
            range_start,
            range_end,
            drawn,
            created_at: None,
            updated_at: None,
        }
    }

    fn participant(id: i64, ticket: Option<&str>, active: bool) -> participants::Model {
        participants::Model {
            id,
            name: format!("Participant {id}"),
            cedula: format!("{id:010}"),
            ticket_number: ticket.map(|t| t.to_string()),
            active,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn eligible_participants_filters_by_status_and_range() {
        let prize = prize(1, 100, 200, false);
        let list = vec![
            participant(1, Some("150"), true),
            participant(2, Some("250"), true),
            participant(3, Some("120"), false),
            participant(4, None, true),
            participant(5, Some("15x"), true),
        ];

        let eligible = eligible_participants(&prize, &list);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, 1);
    }

    #[test]
    fn eligible_participants_range_is_inclusive() {
        let prize = prize(1, 100, 200, false);
        let list = vec![
            participant(1, Some("100"), true),
            participant(2, Some("200"), true),
            participant(3, Some("099"), true),
            participant(4, Some("201"), true),
        ];

        let eligible = eligible_participants(&prize, &list);
        let ids: Vec<i64> = eligible.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn eligible_participants_may_be_empty() {
        let prize = prize(1, 1, 50, false);
        let list = vec![participant(1, Some("060"), true)];
        assert!(eligible_participants(&prize, &list).is_empty());
    }

    #[tokio::test]
    async fn draw_prize_commits_winner_and_flips_both_sides() {
        let committed = winners::Model {
            id: 1,
            prize_id: 1,
            participant_id: 1,
            participant_name: "Participant 1".to_string(),
            ticket_number: "150".to_string(),
            prize_name: "Prize 1".to_string(),
            draw_date: Utc::now(),
            created_at: None,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![prize(1, 100, 200, false)]])
            .append_query_results([vec![
                participant(1, Some("150"), true),
                participant(2, Some("250"), true),
            ]])
            .append_query_results([vec![committed]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let service = DrawService::new(db);
        let winner = service.draw_prize(1).await.unwrap();

        assert_eq!(winner.prize_id, 1);
        assert_eq!(winner.participant_id, 1);
        assert_eq!(winner.ticket_number, "150");
    }

    #[tokio::test]
    async fn draw_prize_without_candidates_creates_nothing() {
        // No exec results are queued: any attempted write would error out
        // with a database error instead of the expected variant
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![prize(1, 1, 50, false)]])
            .append_query_results([vec![participant(1, Some("060"), true)]])
            .into_connection();

        let service = DrawService::new(db);
        let err = service.draw_prize(1).await.unwrap_err();
        assert!(matches!(err, AppError::NoEligibleParticipants(_)));
    }

    #[tokio::test]
    async fn draw_prize_rejects_already_drawn_prize() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![prize(1, 100, 200, true)]])
            .into_connection();

        let service = DrawService::new(db);
        let err = service.draw_prize(1).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn draw_prize_rejects_unknown_prize() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<prizes::Model>::new()])
            .into_connection();

        let service = DrawService::new(db);
        let err = service.draw_prize(7).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn draw_prize_loses_race_when_prize_flip_misses() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![prize(1, 100, 200, false)]])
            .append_query_results([vec![participant(1, Some("150"), true)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let service = DrawService::new(db);
        let err = service.draw_prize(1).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn draw_next_reports_all_drawn_as_normal_completion() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<prizes::Model>::new()])
            .into_connection();

        let service = DrawService::new(db);
        let outcome = service.draw_next().await.unwrap();
        assert!(outcome.all_drawn);
        assert!(outcome.winner.is_none());
    }
}
