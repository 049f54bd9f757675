use actix_web::web;

use crate::handlers::ai_handler;

pub fn config(config: &mut web::ServiceConfig) {
    config.service(web::scope("/ai").service(ai_handler::generate_snippet));
}
