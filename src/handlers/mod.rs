pub mod ai_handler;
pub mod snippet_handler;
pub mod user_handler;

#[cfg(test)]
pub mod test_support;
