use crate::entities::{participant_entity as participants, winner_entity as winners};
use crate::error::{AppError, AppResult};
use crate::models::{
    BulkCreateParticipantsRequest, CreateParticipantRequest, ParticipantResponse,
    RegisterTicketRequest,
};
use crate::utils::{validate_cedula, validate_participant_name, validate_ticket_number};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct ParticipantService {
    pool: Arc<DatabaseConnection>,
}

impl ParticipantService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// List all participants in insertion order.
    pub async fn list_participants(&self) -> AppResult<Vec<ParticipantResponse>> {
        let list = participants::Entity::find()
            .order_by_asc(participants::Column::Id)
            .all(&*self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// Register one participant.
    ///
    /// Validation happens before any write: name (letters/spaces), cedula
    /// (10 digits, unique), optional ticket (3 digits in [1, 500], unique).
    /// A participant starts active only when a ticket is assigned.
    pub async fn create_participant(
        &self,
        req: CreateParticipantRequest,
    ) -> AppResult<ParticipantResponse> {
        validate_participant_name(&req.name)?;
        validate_cedula(&req.cedula)?;
        if let Some(ticket) = &req.ticket_number {
            validate_ticket_number(ticket)?;
        }

        if participants::Entity::find()
            .filter(participants::Column::Cedula.eq(req.cedula.clone()))
            .one(&*self.pool)
            .await?
            .is_some()
        {
            return Err(AppError::ValidationError(
                "A participant with this cedula already exists".to_string(),
            ));
        }

        if let Some(ticket) = &req.ticket_number {
            if participants::Entity::find()
                .filter(participants::Column::TicketNumber.eq(ticket.clone()))
                .one(&*self.pool)
                .await?
                .is_some()
            {
                return Err(AppError::ValidationError(
                    "Ticket number is already in use by another participant".to_string(),
                ));
            }
        }

        let active = req.ticket_number.is_some();
        let model = participants::ActiveModel {
            name: Set(req.name.trim().to_string()),
            cedula: Set(req.cedula.clone()),
            ticket_number: Set(req.ticket_number.clone()),
            active: Set(active),
            ..Default::default()
        }
        .insert(&*self.pool)
        .await?;

        Ok(model.into())
    }

    /// Insert a batch of participants (CSV upload path).
    ///
    /// Every row is validated, duplicates are checked both inside the batch
    /// and against the database, and only then does the transaction start.
    pub async fn bulk_create_participants(
        &self,
        req: BulkCreateParticipantsRequest,
    ) -> AppResult<Vec<ParticipantResponse>> {
        if req.participants.is_empty() {
            return Err(AppError::ValidationError(
                "No participants to insert".to_string(),
            ));
        }

        let mut batch_cedulas = HashSet::new();
        let mut batch_tickets = HashSet::new();
        for row in &req.participants {
            validate_participant_name(&row.name)?;
            validate_cedula(&row.cedula)?;
            if !batch_cedulas.insert(row.cedula.clone()) {
                return Err(AppError::ValidationError(format!(
                    "Duplicate cedula {} in batch",
                    row.cedula
                )));
            }
            if let Some(ticket) = &row.ticket_number {
                validate_ticket_number(ticket)?;
                if !batch_tickets.insert(ticket.clone()) {
                    return Err(AppError::ValidationError(format!(
                        "Duplicate ticket number {ticket} in batch"
                    )));
                }
            }
        }

        let cedulas: Vec<String> = batch_cedulas.into_iter().collect();
        if let Some(existing) = participants::Entity::find()
            .filter(participants::Column::Cedula.is_in(cedulas))
            .one(&*self.pool)
            .await?
        {
            return Err(AppError::ValidationError(format!(
                "A participant with cedula {} already exists",
                existing.cedula
            )));
        }

        if !batch_tickets.is_empty() {
            let tickets: Vec<String> = batch_tickets.into_iter().collect();
            if let Some(existing) = participants::Entity::find()
                .filter(participants::Column::TicketNumber.is_in(tickets))
                .one(&*self.pool)
                .await?
            {
                return Err(AppError::ValidationError(format!(
                    "Ticket number {} is already in use",
                    existing.ticket_number.unwrap_or_default()
                )));
            }
        }

        let txn = self.pool.begin().await?;
        let mut created = Vec::with_capacity(req.participants.len());
        for row in req.participants {
            let active = row.ticket_number.is_some();
            let model = participants::ActiveModel {
                name: Set(row.name.trim().to_string()),
                cedula: Set(row.cedula.clone()),
                ticket_number: Set(row.ticket_number.clone()),
                active: Set(active),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            created.push(model.into());
        }
        txn.commit().await?;

        Ok(created)
    }

    /// Assign or replace a participant's raffle ticket and mark them
    /// eligible. Refused once the participant appears in the winner
    /// history; undo the winner first.
    pub async fn register_ticket(
        &self,
        participant_id: i64,
        req: RegisterTicketRequest,
    ) -> AppResult<ParticipantResponse> {
        validate_ticket_number(&req.ticket_number)?;

        let participant = participants::Entity::find_by_id(participant_id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Participant {participant_id} not found")))?;

        let wins = winners::Entity::find()
            .filter(winners::Column::ParticipantId.eq(participant_id))
            .count(&*self.pool)
            .await?;
        if wins > 0 {
            return Err(AppError::ValidationError(
                "Cannot change the ticket of a participant who has already won".to_string(),
            ));
        }

        if participants::Entity::find()
            .filter(participants::Column::TicketNumber.eq(req.ticket_number.clone()))
            .filter(participants::Column::Id.ne(participant_id))
            .one(&*self.pool)
            .await?
            .is_some()
        {
            return Err(AppError::ValidationError(
                "Ticket number is already in use by another participant".to_string(),
            ));
        }

        let mut am = participant.into_active_model();
        am.ticket_number = Set(Some(req.ticket_number.clone()));
        am.active = Set(true);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&*self.pool).await?;

        Ok(updated.into())
    }

    /// Delete a participant. Refused while a winner record references them,
    /// mirroring the drawn-prize rule.
    pub async fn delete_participant(&self, participant_id: i64) -> AppResult<()> {
        let participant = participants::Entity::find_by_id(participant_id)
            .one(&*self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Participant {participant_id} not found")))?;

        let wins = winners::Entity::find()
            .filter(winners::Column::ParticipantId.eq(participant_id))
            .count(&*self.pool)
            .await?;
        if wins > 0 {
            return Err(AppError::ValidationError(
                "Cannot delete a participant that has won a prize".to_string(),
            ));
        }

        participants::Entity::delete_by_id(participant.id)
            .exec(&*self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn existing(id: i64, cedula: &str, ticket: Option<&str>) -> participants::Model {
        participants::Model {
            id,
            name: format!("Participant {id}"),
            cedula: cedula.to_string(),
            ticket_number: ticket.map(|t| t.to_string()),
            active: ticket.is_some(),
            created_at: None,
            updated_at: None,
        }
    }

    fn request(name: &str, cedula: &str, ticket: Option<&str>) -> CreateParticipantRequest {
        CreateParticipantRequest {
            name: name.to_string(),
            cedula: cedula.to_string(),
            ticket_number: ticket.map(|t| t.to_string()),
        }
    }

    #[tokio::test]
    async fn create_participant_rejects_malformed_input_before_any_query() {
        // Nothing is queued on the mock: a database roundtrip would fail
        // the test with a database error instead of a validation error
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = ParticipantService::new(db);

        let err = service
            .create_participant(request("Maria99", "1234567890", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = service
            .create_participant(request("Maria Lopez", "12345", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn create_participant_rejects_duplicate_cedula() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing(1, "1234567890", None)]])
            .into_connection();

        let service = ParticipantService::new(db);
        let err = service
            .create_participant(request("Maria Lopez", "1234567890", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn create_participant_rejects_duplicate_ticket() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<participants::Model>::new()])
            .append_query_results([vec![existing(1, "0987654321", Some("150"))]])
            .into_connection();

        let service = ParticipantService::new(db);
        let err = service
            .create_participant(request("Maria Lopez", "1234567890", Some("150")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn bulk_create_rejects_duplicates_inside_the_batch() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = ParticipantService::new(db);

        let err = service
            .bulk_create_participants(BulkCreateParticipantsRequest {
                participants: vec![
                    request("Maria Lopez", "1234567890", None),
                    request("Ana Torres", "1234567890", None),
                ],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
