use actix_web::web;

use crate::handlers::snippet_handler;

pub fn config(config: &mut web::ServiceConfig) {
    config.service(
        web::scope("/snippets")
            // `/my` must register ahead of `/{snippetId}` so the literal wins.
            .service(snippet_handler::my_snippets)
            .service(snippet_handler::list_snippets)
            .service(snippet_handler::create_snippet)
            .service(snippet_handler::get_snippet)
            .service(snippet_handler::create_comment),
    );
}
