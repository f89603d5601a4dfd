use crate::domain::users::{DuplicateUser, NewUser, User, UserRepository};
use crate::infrastructure::db::models::users::{USER_COLUMNS, UserDbModel};
use crate::infrastructure::db::{DbPool, is_unique_violation, violated_constraint};
use async_trait::async_trait;
use time::OffsetDateTime;

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: DbPool,
}

impl PostgresUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch_optional(
        &self,
        query: sqlx::query::QueryAs<'_, sqlx::Postgres, UserDbModel, sqlx::postgres::PgArguments>,
    ) -> Result<Option<User>, anyhow::Error> {
        query
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error> {
        let sql = format!(
            r#"
            INSERT INTO users (email, username, password_hash, role, email_verification_token)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        );

        let result = sqlx::query_as::<_, UserDbModel>(&sql)
            .bind(new_user.email)
            .bind(new_user.username)
            .bind(new_user.password_hash)
            .bind(new_user.role.as_str())
            .bind(new_user.email_verification_token)
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(model) => User::try_from(model),
            Err(e) if is_unique_violation(&e) => {
                let field = match violated_constraint(&e).as_deref() {
                    Some("users_username_key") => "Username",
                    _ => "Email",
                };
                Err(DuplicateUser { field }.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, anyhow::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        self.fetch_optional(sqlx::query_as(&sql).bind(id)).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        self.fetch_optional(sqlx::query_as(&sql).bind(email)).await
    }

    async fn count_all(&self) -> Result<i64, anyhow::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_by_username(&self, username: &str) -> Result<i64, anyhow::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = $1")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn mark_verified(
        &self,
        id: i64,
        verified_at: OffsetDateTime,
    ) -> Result<User, anyhow::Error> {
        let sql = format!(
            r#"
            UPDATE users
            SET is_verified = TRUE, verified_at = $2, email_verification_token = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let model = sqlx::query_as::<_, UserDbModel>(&sql)
            .bind(id)
            .bind(verified_at)
            .fetch_one(&self.pool)
            .await?;
        User::try_from(model)
    }

    async fn update_refresh_token_hash(
        &self,
        id: i64,
        token_hash: Option<String>,
    ) -> Result<(), anyhow::Error> {
        sqlx::query(
            "UPDATE users SET refresh_token_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(token_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn store_password_reset(
        &self,
        id: i64,
        token_hash: String,
        expires_at: OffsetDateTime,
    ) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET password_reset_token_hash = $2, password_reset_token_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn clear_password_reset(
        &self,
        id: i64,
        expected_reset_hash: &str,
    ) -> Result<bool, anyhow::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_reset_token_hash = NULL, password_reset_token_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1 AND password_reset_token_hash = $2
            "#,
        )
        .bind(id)
        .bind(expected_reset_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn reset_password(
        &self,
        id: i64,
        expected_reset_hash: &str,
        new_password_hash: String,
        now: OffsetDateTime,
    ) -> Result<bool, anyhow::Error> {
        // Single conditional UPDATE: a concurrent reset that already consumed the
        // token leaves nothing to match.
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $3,
                password_reset_token_hash = NULL,
                password_reset_token_expires_at = NULL,
                refresh_token_hash = NULL,
                updated_at = NOW()
            WHERE id = $1
              AND password_reset_token_hash = $2
              AND password_reset_token_expires_at > $4
            "#,
        )
        .bind(id)
        .bind(expected_reset_hash)
        .bind(new_password_hash)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_image(&self, id: i64, image_url: &str) -> Result<User, anyhow::Error> {
        let sql = format!(
            "UPDATE users SET image = $2, updated_at = NOW() WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let model = sqlx::query_as::<_, UserDbModel>(&sql)
            .bind(id)
            .bind(image_url)
            .fetch_one(&self.pool)
            .await?;
        User::try_from(model)
    }

    async fn delete(&self, id: i64) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), anyhow::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
