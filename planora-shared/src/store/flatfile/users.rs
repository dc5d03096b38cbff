/// UserStore implementation for the flat-file backend

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::user::{CreateUser, User};
use crate::store::{StoreError, UserStore};

use super::{FileStore, USERS};

#[async_trait]
impl UserStore for FileStore {
    async fn create_user(&self, data: CreateUser) -> Result<User, StoreError> {
        let _guard = self.lock_writes().await;
        let mut users: Vec<User> = self.read_collection(USERS).await?;

        if users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&data.email))
        {
            return Err(StoreError::Conflict(format!(
                "Email {} is already registered",
                data.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email,
            name: data.name,
            initials: data.initials,
            password_hash: data.password_hash,
            avatar_url: data.avatar_url,
            handle: data.handle,
            wallet_address: data.wallet_address,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };

        users.push(user.clone());
        self.write_collection(USERS, &users).await?;

        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users: Vec<User> = self.read_collection(USERS).await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self.read_collection(USERS).await?;
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users: Vec<User> = self.read_collection(USERS).await?;
        Ok(users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>, StoreError> {
        let users: Vec<User> = self.read_collection(USERS).await?;
        Ok(users
            .into_iter()
            .find(|u| u.name.eq_ignore_ascii_case(name)))
    }

    async fn set_user_credentials(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let _guard = self.lock_writes().await;
        let mut users: Vec<User> = self.read_collection(USERS).await?;

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.password_hash = Some(password_hash.to_string());
        user.updated_at = Utc::now();
        let updated = user.clone();

        self.write_collection(USERS, &users).await?;
        Ok(Some(updated))
    }

    async fn record_login(&self, id: Uuid) -> Result<(), StoreError> {
        let _guard = self.lock_writes().await;
        let mut users: Vec<User> = self.read_collection(USERS).await?;

        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.last_login_at = Some(Utc::now());
            self.write_collection(USERS, &users).await?;
        }
        Ok(())
    }
}
