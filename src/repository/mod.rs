pub mod comments;
pub mod filter;
pub mod snippets;
pub mod users;
