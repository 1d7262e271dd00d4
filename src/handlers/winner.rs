use crate::models::*;
use crate::services::WinnerService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/winners",
    tag = "winners",
    responses(
        (status = 200, description = "Winner history in draw order", body = [WinnerResponse])
    )
)]
/// Winner history with name/ticket/prize snapshots taken at draw time
pub async fn get_winners(service: web::Data<WinnerService>) -> Result<HttpResponse> {
    match service.list_winners().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/winners/{id}",
    tag = "winners",
    params(
        ("id" = i64, Path, description = "Winner id")
    ),
    responses(
        (status = 200, description = "Winner removed, prize and participant restored"),
        (status = 404, description = "Unknown winner")
    )
)]
/// Undo one draw: removes the winner and restores its prize and participant
pub async fn undo_winner(
    service: web::Data<WinnerService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.undo_winner(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(
            json!({ "success": true, "message": "Winner removed; prize and participant restored" }),
        )),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/winners",
    tag = "winners",
    responses(
        (status = 200, description = "History cleared, all draws restored", body = ClearWinnersResponse)
    )
)]
/// Clear the whole winner history, restoring every drawn prize and winning
/// participant to their pre-draw state
pub async fn clear_winners(service: web::Data<WinnerService>) -> Result<HttpResponse> {
    match service.clear_all_winners().await {
        Ok(cleared) => Ok(HttpResponse::Ok()
            .json(json!({ "success": true, "data": ClearWinnersResponse { cleared } }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Route configuration
pub fn winner_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/winners")
            .route("", web::get().to(get_winners))
            .route("", web::delete().to(clear_winners))
            .route("/{id}", web::delete().to(undo_winner)),
    );
}
