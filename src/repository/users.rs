use sqlx::{Pool, Postgres};

use crate::models::{PublicUser, User};

pub async fn find_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, name, email, image, created_at, updated_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Persist a profile name change and return the public user fields. A
/// vanished row surfaces as `RowNotFound`, which the boundary reports as a
/// generic failure.
pub async fn update_name(
    pool: &Pool<Postgres>,
    email: &str,
    name: &str,
) -> Result<PublicUser, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE users
        SET name = $1, updated_at = NOW()
        WHERE email = $2
        RETURNING id, name, email, image
        "#,
    )
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await
}
