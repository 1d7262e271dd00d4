use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::prize::get_prizes,
        handlers::prize::create_prize,
        handlers::prize::bulk_create_prizes,
        handlers::prize::update_prize,
        handlers::prize::delete_prize,
        handlers::participant::get_participants,
        handlers::participant::create_participant,
        handlers::participant::bulk_create_participants,
        handlers::participant::register_ticket,
        handlers::participant::delete_participant,
        handlers::winner::get_winners,
        handlers::winner::undo_winner,
        handlers::winner::clear_winners,
        handlers::draw::draw_prize,
        handlers::draw::draw_next,
        handlers::draw::reset_all,
    ),
    components(
        schemas(
            PrizeResponse,
            CreatePrizeRequest,
            BulkCreatePrizesRequest,
            UpdatePrizeRequest,
            ParticipantResponse,
            CreateParticipantRequest,
            BulkCreateParticipantsRequest,
            RegisterTicketRequest,
            WinnerResponse,
            DrawNextResponse,
            ClearWinnersResponse,
            ResetRequest,
        )
    ),
    tags(
        (name = "prizes", description = "Prize management"),
        (name = "participants", description = "Participant management"),
        (name = "winners", description = "Winner history and reversal"),
        (name = "sorteo", description = "Draw engine and full reset")
    )
)]
struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
