use chrono::{DateTime, Utc};
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use crate::models::{AuthorSummary, Comment, CommentWithAuthor};

#[derive(Debug, FromRow)]
struct CommentRow {
    id: Uuid,
    content: String,
    snippet_id: Uuid,
    author_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: Option<String>,
    author_image: Option<String>,
}

impl CommentRow {
    fn into_with_author(self) -> CommentWithAuthor {
        CommentWithAuthor {
            author: AuthorSummary {
                id: self.author_id,
                name: self.author_name,
                image: self.author_image,
            },
            comment: Comment {
                id: self.id,
                content: self.content,
                snippet_id: self.snippet_id,
                author_id: self.author_id,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}

/// Comments for one snippet, newest first, each with its author summary.
pub async fn list_for_snippet(
    pool: &Pool<Postgres>,
    snippet_id: Uuid,
) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
    let rows: Vec<CommentRow> = sqlx::query_as(
        r#"
        SELECT
            c.id, c.content, c.snippet_id, c.author_id, c.created_at,
            c.updated_at,
            u.name  AS author_name,
            u.image AS author_image
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.snippet_id = $1
        ORDER BY c.created_at DESC
        "#,
    )
    .bind(snippet_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(CommentRow::into_with_author).collect())
}

pub async fn create(
    pool: &Pool<Postgres>,
    snippet_id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<CommentWithAuthor, sqlx::Error> {
    let row: CommentRow = sqlx::query_as(
        r#"
        WITH inserted AS (
            INSERT INTO comments (content, snippet_id, author_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, snippet_id, author_id, created_at, updated_at
        )
        SELECT
            i.id, i.content, i.snippet_id, i.author_id, i.created_at,
            i.updated_at,
            u.name  AS author_name,
            u.image AS author_image
        FROM inserted i
        JOIN users u ON u.id = i.author_id
        "#,
    )
    .bind(content)
    .bind(snippet_id)
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(row.into_with_author())
}
