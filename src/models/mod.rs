#![allow(unused)]

mod claims;
pub use claims::{Claims, SessionUser};

mod user;
pub use user::{AuthorSummary, PublicUser, User};

mod comment;
pub use comment::{Comment, CommentWithAuthor};

pub mod snippets;
pub use snippets::{Bookmark, Like, Snippet, SnippetDetail, SnippetWithAuthor};
