//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! userdesk-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use userdesk_domain::{
    password::PasswordHash,
    user::{Email, NewUser, User, UserId},
};
use uuid::Uuid;

use crate::{
    InfraError,
    repository::{StoredCredential, UserRepository},
};

/// 一意制約名（PostgreSQL 実装のマイグレーションと揃える）
const EMAIL_CONSTRAINT: &str = "users_email_key";

// ===== MockUserRepository =====

/// インメモリの UserRepository
///
/// `clone()` したインスタンス同士はストアを共有する。
/// テストから件数を検査するため、ユースケースに渡す前に clone しておく。
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users:   Arc<Mutex<Vec<(User, PasswordHash)>>>,
    failing: Arc<AtomicBool>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以降のすべての操作をデータベースエラーにする
    pub fn fail_with_database_error(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// 保存済みユーザー数
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), InfraError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn insert(
        &self,
        new_user: &NewUser,
        password_hash: &PasswordHash,
    ) -> Result<User, InfraError> {
        self.check_available()?;

        let mut users = self.users.lock().unwrap();
        if users.iter().any(|(u, _)| u.email() == new_user.email()) {
            return Err(InfraError::unique_violation(EMAIL_CONSTRAINT));
        }

        let user = User::from_db(
            UserId::from_uuid(Uuid::now_v7()),
            new_user.first_name().clone(),
            new_user.last_name().clone(),
            new_user.email().clone(),
            new_user.contact().clone(),
            Utc::now(),
        );
        users.push((user.clone(), password_hash.clone()));

        Ok(user)
    }

    async fn find_credential_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredential>, InfraError> {
        self.check_available()?;

        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.email() == email)
            .map(|(u, hash)| StoredCredential {
                user_id:       *u.id(),
                email:         u.email().clone(),
                password_hash: hash.clone(),
            }))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        self.check_available()?;

        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| u.id() == id)
            .map(|(u, _)| u.clone()))
    }
}
