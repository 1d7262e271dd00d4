use crate::entities::{
    participant_entity as participants, prize_entity as prizes, winner_entity as winners,
};
use crate::error::{AppError, AppResult};
use crate::models::WinnerResponse;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::sync::Arc;

/// Literal the caller must echo before a full reset is executed. Matches
/// the confirmation keyword the admin UI asks the operator to type.
pub const RESET_KEYWORD: &str = "REINICIAR_TODO";

#[derive(Clone)]
pub struct WinnerService {
    pool: Arc<DatabaseConnection>,
}

impl WinnerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Winner history in draw order.
    pub async fn list_winners(&self) -> AppResult<Vec<WinnerResponse>> {
        let list = winners::Entity::find()
            .order_by_asc(winners::Column::Id)
            .all(&*self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// Undo one draw: delete the winner record, clear the prize's drawn
    /// flag and reactivate the participant. All three changes land in one
    /// transaction so the history can never disagree with the flags.
    pub async fn undo_winner(&self, winner_id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        let winner = winners::Entity::find_by_id(winner_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Winner {winner_id} not found")))?;

        winners::Entity::delete_by_id(winner.id).exec(&txn).await?;

        prizes::Entity::update_many()
            .col_expr(prizes::Column::Drawn, Expr::value(false))
            .filter(prizes::Column::Id.eq(winner.prize_id))
            .exec(&txn)
            .await?;

        participants::Entity::update_many()
            .col_expr(participants::Column::Active, Expr::value(true))
            .filter(participants::Column::Id.eq(winner.participant_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        log::info!(
            "Winner {} undone; prize \"{}\" and participant \"{}\" restored",
            winner.id,
            winner.prize_name,
            winner.participant_name
        );

        Ok(())
    }

    /// Clear the whole winner history and restore the pre-draw world:
    /// exactly the participants referenced by winner rows become active
    /// again (never-ticketed participants keep their state) and every
    /// prize goes back to undrawn. Idempotent.
    pub async fn clear_all_winners(&self) -> AppResult<u64> {
        let txn = self.pool.begin().await?;

        let all = winners::Entity::find().all(&txn).await?;
        let cleared = all.len() as u64;

        if cleared > 0 {
            let participant_ids: Vec<i64> = all.iter().map(|w| w.participant_id).collect();
            participants::Entity::update_many()
                .col_expr(participants::Column::Active, Expr::value(true))
                .filter(participants::Column::Id.is_in(participant_ids))
                .exec(&txn)
                .await?;

            winners::Entity::delete_many().exec(&txn).await?;
        }

        prizes::Entity::update_many()
            .col_expr(prizes::Column::Drawn, Expr::value(false))
            .filter(prizes::Column::Drawn.eq(true))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        log::info!("Winner history cleared ({cleared} records)");

        Ok(cleared)
    }

    /// Wipe prizes, participants and winners. Destructive and
    /// irreversible, so it refuses to run unless the caller passes the
    /// exact confirmation keyword.
    pub async fn reset_all(&self, keyword: &str) -> AppResult<()> {
        if keyword != RESET_KEYWORD {
            return Err(AppError::ValidationError(format!(
                "Incorrect confirmation keyword; expected \"{RESET_KEYWORD}\""
            )));
        }

        let txn = self.pool.begin().await?;

        // Winners first, they reference the other two tables
        winners::Entity::delete_many().exec(&txn).await?;
        participants::Entity::delete_many().exec(&txn).await?;
        prizes::Entity::delete_many().exec(&txn).await?;

        txn.commit().await?;

        log::warn!("Full reset executed: prizes, participants and winners wiped");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn winner(id: i64, prize_id: i64, participant_id: i64) -> winners::Model {
        winners::Model {
            id,
            prize_id,
            participant_id,
            participant_name: format!("Participant {participant_id}"),
            ticket_number: "150".to_string(),
            prize_name: format!("Prize {prize_id}"),
            draw_date: Utc::now(),
            created_at: None,
        }
    }

    fn exec_ok(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn undo_winner_restores_prize_and_participant() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![winner(5, 2, 3)]])
            .append_exec_results([exec_ok(1), exec_ok(1), exec_ok(1)])
            .into_connection();

        let service = WinnerService::new(db);
        assert!(service.undo_winner(5).await.is_ok());
    }

    #[tokio::test]
    async fn undo_unknown_winner_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<winners::Model>::new()])
            .into_connection();

        let service = WinnerService::new(db);
        let err = service.undo_winner(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn clear_all_winners_restores_every_draw() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![winner(1, 1, 10), winner(2, 2, 20)]])
            .append_exec_results([exec_ok(2), exec_ok(2), exec_ok(2)])
            .into_connection();

        let service = WinnerService::new(db);
        assert_eq!(service.clear_all_winners().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn clear_all_winners_with_empty_history_is_a_noop() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<winners::Model>::new()])
            .append_exec_results([exec_ok(0)])
            .into_connection();

        let service = WinnerService::new(db);
        assert_eq!(service.clear_all_winners().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn reset_all_refuses_without_the_exact_keyword() {
        // No results are queued: any attempted deletion would surface as a
        // database error instead of the expected validation failure
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let service = WinnerService::new(db);
        let err = service.reset_all("reiniciar_todo").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn reset_all_wipes_everything_with_the_keyword() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec_ok(3), exec_ok(7), exec_ok(4)])
            .into_connection();

        let service = WinnerService::new(db);
        assert!(service.reset_all(RESET_KEYWORD).await.is_ok());
    }
}
