/// UserStore implementation for PostgreSQL

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::user::{CreateUser, User};
use crate::store::{StoreError, UserStore};

use super::PgStore;

const USER_COLUMNS: &str = "id, email, name, initials, password_hash, avatar_url, \
                            handle, wallet_address, created_at, updated_at, last_login_at";

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError> {
        if self.find_user_by_email(&data.email).await?.is_some() {
            return Err(StoreError::Conflict(format!(
                "Email {} is already registered",
                data.email
            )));
        }

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, name, initials, password_hash, avatar_url, handle, wallet_address)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.initials)
        .bind(&data.password_hash)
        .bind(&data.avatar_url)
        .bind(&data.handle)
        .bind(&data.wallet_address)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY name",
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        // email is CITEXT, the comparison is case-insensitive
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1",
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(name) = LOWER($1) LIMIT 1",
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn set_user_credentials(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn record_login(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
