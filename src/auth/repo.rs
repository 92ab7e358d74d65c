use crate::auth::repo_types::User;
use sqlx::SqlitePool;
use time::OffsetDateTime;

impl User {
    /// Find a live user by exact username.
    pub async fn find_by_username(db: &SqlitePool, username: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, role, created_at, updated_at, deleted_at
            FROM "user"
            WHERE username = ? AND deleted_at IS NULL
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &SqlitePool, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, role, created_at, updated_at, deleted_at
            FROM "user"
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a user whose password is already hashed.
    pub async fn create(
        db: &SqlitePool,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> anyhow::Result<User> {
        let now = OffsetDateTime::now_utc();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "user" (username, password, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, username, password, role, created_at, updated_at, deleted_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(now)
        .bind(now)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Overwrite the stored hash. Returns false when no live row matched.
    pub async fn update_password(
        db: &SqlitePool,
        id: i64,
        password_hash: &str,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE "user"
               SET password = ?, updated_at = ?
             WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(password_hash)
        .bind(OffsetDateTime::now_utc())
        .bind(id)
        .execute(db)
        .await?;
        Ok(res.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;

    #[tokio::test]
    async fn create_then_find_by_username_and_id() {
        let state = AppState::fake().await;
        let created = User::create(&state.db, "alice", "$hash", "user").await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);
        assert!(created.deleted_at.is_none());

        let by_name = User::find_by_username(&state.db, "alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
        let by_id = User::find_by_id(&state.db, created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");
        assert!(User::find_by_username(&state.db, "Alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_store_error() {
        let state = AppState::fake().await;
        User::create(&state.db, "bob", "$h1", "user").await.unwrap();
        let err = User::create(&state.db, "bob", "$h2", "admin").await.unwrap_err();
        assert!(err.to_string().to_lowercase().contains("unique"));
    }

    #[tokio::test]
    async fn soft_deleted_users_are_invisible() {
        let state = AppState::fake().await;
        let u = User::create(&state.db, "carol", "$h", "user").await.unwrap();
        sqlx::query(r#"UPDATE "user" SET deleted_at = ? WHERE id = ?"#)
            .bind(OffsetDateTime::now_utc())
            .bind(u.id)
            .execute(&state.db)
            .await
            .unwrap();

        assert!(User::find_by_id(&state.db, u.id).await.unwrap().is_none());
        assert!(User::find_by_username(&state.db, "carol").await.unwrap().is_none());
        assert!(!User::update_password(&state.db, u.id, "$new").await.unwrap());
    }

    #[tokio::test]
    async fn update_password_refreshes_updated_at() {
        let state = AppState::fake().await;
        let u = User::create(&state.db, "dave", "$old", "user").await.unwrap();
        assert!(User::update_password(&state.db, u.id, "$new").await.unwrap());
        let after = User::find_by_id(&state.db, u.id).await.unwrap().unwrap();
        assert_eq!(after.password, "$new");
        assert_eq!(after.created_at, u.created_at);
        assert!(after.updated_at >= u.updated_at);
        assert!(!User::update_password(&state.db, 9999, "$x").await.unwrap());
    }
}
