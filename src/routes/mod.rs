pub mod ai_routes;
pub mod snippet_routes;
pub mod user_routes;
