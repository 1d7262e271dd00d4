use crate::models::*;
use crate::services::PrizeService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/prizes",
    tag = "prizes",
    responses(
        (status = 200, description = "All prizes in insertion order", body = [PrizeResponse])
    )
)]
/// List every prize with its ticket range and drawn flag
pub async fn get_prizes(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.list_prizes().await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/prizes",
    tag = "prizes",
    request_body = CreatePrizeRequest,
    responses(
        (status = 200, description = "Prize created", body = PrizeResponse),
        (status = 400, description = "Invalid name or ticket range")
    )
)]
/// Create a prize with an inclusive 3-digit ticket range
pub async fn create_prize(
    service: web::Data<PrizeService>,
    body: web::Json<CreatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.create_prize(body.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/prizes/bulk",
    tag = "prizes",
    request_body = BulkCreatePrizesRequest,
    responses(
        (status = 200, description = "All rows inserted", body = [PrizeResponse]),
        (status = 400, description = "A row failed validation; nothing inserted")
    )
)]
/// Batch insert prizes from the CSV upload collaborator
pub async fn bulk_create_prizes(
    service: web::Data<PrizeService>,
    body: web::Json<BulkCreatePrizesRequest>,
) -> Result<HttpResponse> {
    match service.bulk_create_prizes(body.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/prizes/{id}",
    tag = "prizes",
    params(
        ("id" = i64, Path, description = "Prize id")
    ),
    request_body = UpdatePrizeRequest,
    responses(
        (status = 200, description = "Prize updated", body = PrizeResponse),
        (status = 400, description = "Prize already drawn or invalid fields"),
        (status = 404, description = "Unknown prize")
    )
)]
/// Edit name/range of an undrawn prize
pub async fn update_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
    body: web::Json<UpdatePrizeRequest>,
) -> Result<HttpResponse> {
    match service
        .update_prize(path.into_inner(), body.into_inner())
        .await
    {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/prizes/{id}",
    tag = "prizes",
    params(
        ("id" = i64, Path, description = "Prize id")
    ),
    responses(
        (status = 200, description = "Prize deleted"),
        (status = 400, description = "Prize already drawn"),
        (status = 404, description = "Unknown prize")
    )
)]
/// Delete an undrawn prize
pub async fn delete_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete_prize(path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true, "message": "Prize deleted" }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// Route configuration
pub fn prize_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/prizes")
            .route("", web::get().to(get_prizes))
            .route("", web::post().to(create_prize))
            .route("/bulk", web::post().to(bulk_create_prizes))
            .route("/{id}", web::put().to(update_prize))
            .route("/{id}", web::delete().to(delete_prize)),
    );
}
