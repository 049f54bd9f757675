use actix_web::web;

use crate::handlers::user_handler;

pub fn config(config: &mut web::ServiceConfig) {
    config.service(web::scope("/user").service(user_handler::update_profile));
}
