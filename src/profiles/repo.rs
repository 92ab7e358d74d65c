use anyhow::Context;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use super::repo_types::{NewProfile, Profile, ProfileChanges};

pub async fn insert(db: &SqlitePool, p: &NewProfile) -> anyhow::Result<Profile> {
    let now = OffsetDateTime::now_utc();
    let row = sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO profile (user_id, first_name, last_name, email, phone, avatar, exp, skills,
                             created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id, user_id, first_name, last_name, email, phone, avatar, exp, skills,
                  created_at, updated_at, deleted_at
        "#,
    )
    .bind(p.user_id)
    .bind(&p.first_name)
    .bind(&p.last_name)
    .bind(&p.email)
    .bind(&p.phone)
    .bind(&p.avatar)
    .bind(&p.exp)
    .bind(&p.skills)
    .bind(now)
    .bind(now)
    .fetch_one(db)
    .await
    .context("insert profile")?;
    Ok(row)
}

pub async fn list_all(db: &SqlitePool) -> anyhow::Result<Vec<Profile>> {
    let rows = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, user_id, first_name, last_name, email, phone, avatar, exp, skills,
               created_at, updated_at, deleted_at
          FROM profile
         WHERE deleted_at IS NULL
         ORDER BY id ASC
        "#,
    )
    .fetch_all(db)
    .await
    .context("list profiles")?;
    Ok(rows)
}

pub async fn find_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<Profile>> {
    let row = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, user_id, first_name, last_name, email, phone, avatar, exp, skills,
               created_at, updated_at, deleted_at
          FROM profile
         WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("find profile by id")?;
    Ok(row)
}

/// Overwrite email, phone, exp and skills. Returns the updated row, or
/// `None` when no live profile has this id.
pub async fn update(
    db: &SqlitePool,
    id: i64,
    changes: &ProfileChanges,
) -> anyhow::Result<Option<Profile>> {
    let row = sqlx::query_as::<_, Profile>(
        r#"
        UPDATE profile
           SET email = ?, phone = ?, exp = ?, skills = ?, updated_at = ?
         WHERE id = ? AND deleted_at IS NULL
        RETURNING id, user_id, first_name, last_name, email, phone, avatar, exp, skills,
                  created_at, updated_at, deleted_at
        "#,
    )
    .bind(&changes.email)
    .bind(&changes.phone)
    .bind(&changes.exp)
    .bind(&changes.skills)
    .bind(OffsetDateTime::now_utc())
    .bind(id)
    .fetch_optional(db)
    .await
    .context("update profile")?;
    Ok(row)
}
