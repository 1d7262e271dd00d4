use crate::models::*;
use crate::services::ParticipantService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/participants",
    tag = "participants",
    responses(
        (status = 200, description = "All participants in insertion order", body = [ParticipantResponse])
    )
)]
/// List every registered participant
pub async fn get_participants(service: web::Data<ParticipantService>) -> Result<HttpResponse> {
    match service.list_participants().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/participants",
    tag = "participants",
    request_body = CreateParticipantRequest,
    responses(
        (status = 200, description = "Participant registered", body = ParticipantResponse),
        (status = 400, description = "Invalid or duplicate name/cedula/ticket")
    )
)]
/// Register a participant; becomes eligible once a ticket is assigned
pub async fn create_participant(
    service: web::Data<ParticipantService>,
    body: web::Json<CreateParticipantRequest>,
) -> Result<HttpResponse> {
    match service.create_participant(body.into_inner()).await {
        Ok(participant) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": participant })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/participants/bulk",
    tag = "participants",
    request_body = BulkCreateParticipantsRequest,
    responses(
        (status = 200, description = "All rows inserted", body = [ParticipantResponse]),
        (status = 400, description = "A row failed validation; nothing inserted")
    )
)]
/// Batch insert participants from the CSV upload collaborator
pub async fn bulk_create_participants(
    service: web::Data<ParticipantService>,
    body: web::Json<BulkCreateParticipantsRequest>,
) -> Result<HttpResponse> {
    match service.bulk_create_participants(body.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/participants/{id}/ticket",
    tag = "participants",
    params(
        ("id" = i64, Path, description = "Participant id")
    ),
    request_body = RegisterTicketRequest,
    responses(
        (status = 200, description = "Ticket assigned, participant active", body = ParticipantResponse),
        (status = 400, description = "Invalid/duplicate ticket or participant already won"),
        (status = 404, description = "Unknown participant")
    )
)]
/// Assign a raffle ticket to a participant
pub async fn register_ticket(
    service: web::Data<ParticipantService>,
    path: web::Path<i64>,
    body: web::Json<RegisterTicketRequest>,
) -> Result<HttpResponse> {
    match service
        .register_ticket(path.into_inner(), body.into_inner())
        .await
    {
        Ok(participant) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": participant })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/participants/{id}",
    tag = "participants",
    params(
        ("id" = i64, Path, description = "Participant id")
    ),
    responses(
        (status = 200, description = "Participant deleted"),
        (status = 400, description = "Participant has a recorded win"),
        (status = 404, description = "Unknown participant")
    )
)]
/// Delete a participant without a recorded win
pub async fn delete_participant(
    service: web::Data<ParticipantService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete_participant(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok()
            .json(json!({ "success": true, "message": "Participant deleted" }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Route configuration
pub fn participant_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/participants")
            .route("", web::get().to(get_participants))
            .route("", web::post().to(create_participant))
            .route("/bulk", web::post().to(bulk_create_participants))
            .route("/{id}/ticket", web::put().to(register_ticket))
            .route("/{id}", web::delete().to(delete_participant)),
    );
}
