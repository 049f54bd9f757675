use actix_cors::Cors;
use actix_web::{
    middleware::Logger,
    web::{self, Data},
    App, HttpServer,
};
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::{middleware::jwt_middleware::ExtractSession, services::gemini::GeminiClient};

mod errors;
mod handlers;
mod models;
mod repository;
mod services;
mod utils;

mod middleware;
mod routes;

pub struct AppState {
    db: Pool<Postgres>,
    jwt_secret: String,
    gemini: GeminiClient,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    dotenv::from_filename(".env")
        .or_else(|_| dotenv::dotenv())
        .ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Error building a connection pool");

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let gemini_api_key = std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set");
    let gemini_base_url = std::env::var("GEMINI_BASE_URL")
        .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());

    let app_data = Data::new(AppState {
        db: pool.clone(),
        jwt_secret,
        gemini: GeminiClient::new(gemini_base_url, gemini_api_key),
    });

    let session_middleware = ExtractSession::new(app_data.clone());

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .app_data(app_data.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .service(
                web::scope("/api")
                    .configure(routes::snippet_routes::config)
                    .configure(routes::ai_routes::config)
                    .configure(routes::user_routes::config)
                    .wrap(session_middleware.clone()),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
