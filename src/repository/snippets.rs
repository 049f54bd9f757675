use chrono::{DateTime, Utc};
use sqlx::{FromRow, Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{
    snippets::{Snippet, SnippetDetail, SnippetWithAuthor},
    AuthorSummary,
};

use super::{comments, filter::SnippetFilter};

/// Fields persisted for a new snippet; everything else (id, counters,
/// timestamps) is defaulted by the schema.
#[derive(Debug, Clone)]
pub struct NewSnippet {
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: String,
    pub framework: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub is_public: bool,
}

// Flat row shape: the author summary rides along as author_* columns and is
// folded into the nested response shape afterwards.
#[derive(Debug, FromRow)]
struct SnippetRow {
    id: Uuid,
    title: String,
    description: String,
    code: String,
    language: String,
    framework: Option<String>,
    category: String,
    tags: Vec<String>,
    author_id: Uuid,
    likes: i32,
    views: i32,
    is_public: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: Option<String>,
    author_image: Option<String>,
}

impl SnippetRow {
    fn into_with_author(self) -> SnippetWithAuthor {
        SnippetWithAuthor {
            author: AuthorSummary {
                id: self.author_id,
                name: self.author_name,
                image: self.author_image,
            },
            snippet: Snippet {
                id: self.id,
                title: self.title,
                description: self.description,
                code: self.code,
                language: self.language,
                framework: self.framework,
                category: self.category,
                tags: self.tags,
                author_id: self.author_id,
                likes: self.likes,
                views: self.views,
                is_public: self.is_public,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}

const SELECT_WITH_AUTHOR: &str = r#"
    SELECT
        s.id, s.title, s.description, s.code, s.language, s.framework,
        s.category, s.tags, s.author_id, s.likes, s.views, s.is_public,
        s.created_at, s.updated_at,
        u.name  AS author_name,
        u.image AS author_image
    FROM snippets s
    JOIN users u ON u.id = s.author_id
"#;

pub async fn list(
    pool: &Pool<Postgres>,
    filter: &SnippetFilter,
) -> Result<Vec<SnippetWithAuthor>, sqlx::Error> {
    let mut qb = QueryBuilder::new(SELECT_WITH_AUTHOR);
    filter.push_where(&mut qb);
    qb.push(" ORDER BY s.created_at DESC");

    let rows: Vec<SnippetRow> = qb.build_query_as().fetch_all(pool).await?;
    Ok(rows.into_iter().map(SnippetRow::into_with_author).collect())
}

/// One snippet with its author summary and full comment list, or `None`
/// when the id has no matching record.
pub async fn get_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<SnippetDetail>, sqlx::Error> {
    let mut qb = QueryBuilder::new(SELECT_WITH_AUTHOR);
    qb.push(" WHERE s.id = ").push_bind(id);

    let row: Option<SnippetRow> = qb.build_query_as().fetch_optional(pool).await?;
    let Some(row) = row else {
        return Ok(None);
    };

    let comments = comments::list_for_snippet(pool, id).await?;
    let with_author = row.into_with_author();
    Ok(Some(SnippetDetail {
        snippet: with_author.snippet,
        author: with_author.author,
        comments,
    }))
}

pub async fn create(
    pool: &Pool<Postgres>,
    payload: NewSnippet,
    author_id: Uuid,
) -> Result<SnippetWithAuthor, sqlx::Error> {
    let row: SnippetRow = sqlx::query_as(
        r#"
        WITH inserted AS (
            INSERT INTO snippets
                (title, description, code, language, framework, category,
                 tags, author_id, is_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, code, language, framework,
                      category, tags, author_id, likes, views, is_public,
                      created_at, updated_at
        )
        SELECT
            i.id, i.title, i.description, i.code, i.language, i.framework,
            i.category, i.tags, i.author_id, i.likes, i.views, i.is_public,
            i.created_at, i.updated_at,
            u.name  AS author_name,
            u.image AS author_image
        FROM inserted i
        JOIN users u ON u.id = i.author_id
        "#,
    )
    .bind(&payload.title)
    .bind(&payload.description)
    .bind(&payload.code)
    .bind(&payload.language)
    .bind(&payload.framework)
    .bind(&payload.category)
    .bind(&payload.tags)
    .bind(author_id)
    .bind(payload.is_public)
    .fetch_one(pool)
    .await?;

    Ok(row.into_with_author())
}

pub async fn exists(pool: &Pool<Postgres>, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM snippets WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}
