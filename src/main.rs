use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use sorteo_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // Load configuration
    let config = Config::from_toml().expect("Failed to load configuration file");

    // Database pool
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // Schema migrations
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // Services
    let prize_service = PrizeService::new(pool.clone());
    let participant_service = ParticipantService::new(pool.clone());
    let draw_service = DrawService::new(pool.clone());
    let winner_service = WinnerService::new(pool.clone());

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(prize_service.clone()))
            .app_data(web::Data::new(participant_service.clone()))
            .app_data(web::Data::new(draw_service.clone()))
            .app_data(web::Data::new(winner_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::prize_config)
                    .configure(handlers::participant_config)
                    .configure(handlers::winner_config)
                    .configure(handlers::sorteo_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
