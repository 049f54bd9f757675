use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{AuthorSummary, CommentWithAuthor};

// ______________________________________ Snippets ______________________________________
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: String,
    pub framework: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub author_id: Uuid,
    pub likes: i32,
    pub views: i32,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing and creation shape: the snippet plus its author summary.
#[derive(Debug, Clone, Serialize)]
pub struct SnippetWithAuthor {
    #[serde(flatten)]
    pub snippet: Snippet,
    pub author: AuthorSummary,
}

/// Detail shape: adds the comment list, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct SnippetDetail {
    #[serde(flatten)]
    pub snippet: Snippet,
    pub author: AuthorSummary,
    pub comments: Vec<CommentWithAuthor>,
}

// ______________________________________ Bookmarks & Likes ______________________________________
// Join records owned by the schema; no routes are wired to these yet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: Uuid,
    pub user_id: Uuid,
    pub snippet_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub snippet_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snippet() -> Snippet {
        Snippet {
            id: Uuid::new_v4(),
            title: "Debounce helper".into(),
            description: "Delays a callback until input settles".into(),
            code: "function debounce(fn, ms) {}".into(),
            language: "JavaScript".into(),
            framework: None,
            category: "Utility Functions".into(),
            tags: vec!["debounce".into()],
            author_id: Uuid::new_v4(),
            likes: 0,
            views: 0,
            is_public: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn serializes_camel_case_with_flattened_author() {
        let snippet = sample_snippet();
        let body = SnippetWithAuthor {
            author: AuthorSummary {
                id: snippet.author_id,
                name: Some("Ada".into()),
                image: None,
            },
            snippet,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("authorId").is_some());
        assert!(json.get("isPublic").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["author"]["name"], "Ada");
        assert!(json.get("author_id").is_none());
    }
}
