use crate::models::*;
use crate::services::{DrawService, WinnerService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/sorteo/draw/{prize_id}",
    tag = "sorteo",
    params(
        ("prize_id" = i64, Path, description = "Prize to draw")
    ),
    responses(
        (status = 200, description = "Winner selected and committed", body = WinnerResponse),
        (status = 400, description = "Prize already drawn"),
        (status = 404, description = "Unknown prize"),
        (status = 409, description = "No eligible participants, or a concurrent draw won the race")
    )
)]
/// Draw a winner for one prize:
/// 1. Filter active participants whose ticket falls in the prize's range
/// 2. Pick one uniformly at random
/// 3. Commit winner record + prize/participant flips as one transaction
pub async fn draw_prize(
    service: web::Data<DrawService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.draw_prize(path.into_inner()).await {
        Ok(winner) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": winner }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/sorteo/draw-next",
    tag = "sorteo",
    responses(
        (status = 200, description = "Winner for the first pending prize, or all_drawn when the raffle is finished", body = DrawNextResponse),
        (status = 409, description = "No eligible participants for the next prize")
    )
)]
/// Draw the first pending prize in insertion order; reports a normal
/// all_drawn completion once no prizes remain
pub async fn draw_next(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.draw_next().await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": outcome }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/sorteo/clean",
    tag = "sorteo",
    request_body = ResetRequest,
    responses(
        (status = 200, description = "Everything wiped"),
        (status = 400, description = "Confirmation keyword does not match; nothing deleted")
    )
)]
/// Full reset: wipes prizes, participants and winners. Requires the
/// confirmation keyword in the body.
pub async fn reset_all(
    service: web::Data<WinnerService>,
    body: web::Json<ResetRequest>,
) -> Result<HttpResponse> {
    match service.reset_all(&body.keyword).await {
        Ok(()) => Ok(HttpResponse::Ok()
            .json(json!({ "success": true, "message": "All data has been removed" }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Route configuration
pub fn sorteo_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sorteo")
            .route("/draw/{prize_id}", web::post().to(draw_prize))
            .route("/draw-next", web::post().to(draw_next))
            .route("/clean", web::delete().to(reset_all)),
    );
}
