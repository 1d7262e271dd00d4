use crate::entities::prize_entity as prizes;
use crate::error::{AppError, AppResult};
use crate::models::{
    BulkCreatePrizesRequest, CreatePrizeRequest, PrizeResponse, UpdatePrizeRequest,
};
use crate::utils::{validate_prize_name, validate_ticket_range};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
    TransactionTrait,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct PrizeService {
    pool: Arc<DatabaseConnection>,
}

impl PrizeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// List all prizes in insertion order.
    pub async fn list_prizes(&self) -> AppResult<Vec<PrizeResponse>> {
        let list = prizes::Entity::find()
            .order_by_asc(prizes::Column::Id)
            .all(&*self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// Create one prize. The ticket range is validated before any write.
    pub async fn create_prize(&self, req: CreatePrizeRequest) -> AppResult<PrizeResponse> {
        validate_prize_name(&req.name)?;
        validate_ticket_range(req.range_start, req.range_end)?;

        let model = prizes::ActiveModel {
            name: Set(req.name.trim().to_string()),
            range_start: Set(req.range_start),
            range_end: Set(req.range_end),
            drawn: Set(false),
            ..Default::default()
        }
        .insert(&*self.pool)
        .await?;

        Ok(model.into())
    }

    /// Insert a batch of prizes. Rows arrive pre-validated by the CSV
    /// collaborator but are re-validated here; the whole batch lands in one
    /// transaction or not at all.
    pub async fn bulk_create_prizes(
        &self,
        req: BulkCreatePrizesRequest,
    ) -> AppResult<Vec<PrizeResponse>> {
        if req.prizes.is_empty() {
            return Err(AppError::ValidationError(
                "No prizes to insert".to_string(),
            ));
        }

        for prize in &req.prizes {
            validate_prize_name(&prize.name)?;
            validate_ticket_range(prize.range_start, prize.range_end)?;
        }

        let txn = self.pool.begin().await?;
        let mut created = Vec::with_capacity(req.prizes.len());
        for prize in req.prizes {
            let model = prizes::ActiveModel {
                name: Set(prize.name.trim().to_string()),
                range_start: Set(prize.range_start),
                range_end: Set(prize.range_end),
                drawn: Set(false),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            created.push(model.into());
        }
        txn.commit().await?;

        Ok(created)
    }

    /// Edit name and/or range of an undrawn prize.
    pub async fn update_prize(
        &self,
        prize_id: i64,
        req: UpdatePrizeRequest,
    ) -> AppResult<PrizeResponse> {
        if req.name.is_none() && req.range_start.is_none() && req.range_end.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }

        let model = prizes::Entity::find_by_id(prize_id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {prize_id} not found")))?;

        if model.drawn {
            return Err(AppError::ValidationError(
                "Cannot modify a prize that has already been drawn".to_string(),
            ));
        }

        if let Some(name) = &req.name {
            validate_prize_name(name)?;
        }
        let range_start = req.range_start.unwrap_or(model.range_start);
        let range_end = req.range_end.unwrap_or(model.range_end);
        validate_ticket_range(range_start, range_end)?;

        let mut am = model.into_active_model();
        if let Some(name) = req.name {
            am.name = Set(name.trim().to_string());
        }
        am.range_start = Set(range_start);
        am.range_end = Set(range_end);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&*self.pool).await?;

        Ok(updated.into())
    }

    /// Delete a prize. Drawn prizes are protected; undo the winner first.
    pub async fn delete_prize(&self, prize_id: i64) -> AppResult<()> {
        let prize = prizes::Entity::find_by_id(prize_id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prize {prize_id} not found")))?;

        if prize.drawn {
            return Err(AppError::ValidationError(
                "Cannot delete a prize that has already been drawn".to_string(),
            ));
        }

        prizes::Entity::delete_by_id(prize.id)
            .exec(&*self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn drawn_prize(id: i64) -> prizes::Model {
        prizes::Model {
            id,
            name: format!("Prize {id}"),
            range_start: 1,
            range_end: 100,
            drawn: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn create_prize_rejects_inverted_range_before_any_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = PrizeService::new(db);

        let err = service
            .create_prize(CreatePrizeRequest {
                name: "Smart TV".to_string(),
                range_start: 200,
                range_end: 100,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn delete_prize_rejects_drawn_prize() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![drawn_prize(1)]])
            .into_connection();

        let service = PrizeService::new(db);
        let err = service.delete_prize(1).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn update_prize_rejects_drawn_prize() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![drawn_prize(1)]])
            .into_connection();

        let service = PrizeService::new(db);
        let err = service
            .update_prize(
                1,
                UpdatePrizeRequest {
                    name: Some("Renamed".to_string()),
                    range_start: None,
                    range_end: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
