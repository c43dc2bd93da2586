//! # ユーザー登録ユースケース

use std::sync::Arc;

use async_trait::async_trait;
use userdesk_domain::{
    password::{PasswordHash, PlainPassword},
    user::{NewUser, RegistrationFields, User},
};
use userdesk_infra::{PasswordHasher, repository::UserRepository};

use super::UserRegistrar;
use crate::error::RegistrationError;

/// ユーザー登録ユースケースの実装
pub struct UserRegistrarImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl UserRegistrarImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    async fn hash(&self, password: PlainPassword) -> Result<PasswordHash, RegistrationError> {
        let hasher = Arc::clone(&self.password_hasher);
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| RegistrationError::Internal(format!("ハッシュ化タスクが失敗: {e}")))??;
        Ok(hash)
    }
}

#[async_trait]
impl UserRegistrar for UserRegistrarImpl {
    async fn create(&self, fields: RegistrationFields) -> Result<User, RegistrationError> {
        let new_user = NewUser::try_from_fields(fields)?;

        let password_hash = self.hash(new_user.password().clone()).await?;
        let user = self
            .user_repository
            .insert(&new_user, &password_hash)
            .await?;

        tracing::info!(user_id = %user.id(), email = %user.email(), "ユーザーを登録しました");
        Ok(user)
    }
}
