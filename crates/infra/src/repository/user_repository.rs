//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **1 操作 1 ステートメント**: 登録は `INSERT ... RETURNING` の単一文で行い、
//!   採番された ID と作成日時をそのまま返す
//! - **重複検出は DB に委ねる**: `users_email_key` 一意制約の違反は
//!   [`InfraError`] への変換時に `UniqueViolation` として分類される
//! - **ハッシュの分離**: [`User`] はパスワードハッシュを持たない。
//!   認証時のみ [`StoredCredential`] として取得する

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use userdesk_domain::{
    password::PasswordHash,
    user::{Contact, Email, FirstName, LastName, NewUser, User, UserId},
};
use uuid::Uuid;

use crate::InfraError;

/// 認証用に取得する保存済み認証情報
#[derive(Debug, Clone)]
pub struct StoredCredential {
    pub user_id:       UserId,
    pub email:         Email,
    pub password_hash: PasswordHash,
}

/// ユーザーリポジトリトレイト
///
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを挿入し、保存されたレコードを返す
    ///
    /// # エラー
    ///
    /// - メールアドレスが既に登録されている場合は `UniqueViolation`
    /// - その他のデータベースエラー
    async fn insert(
        &self,
        new_user: &NewUser,
        password_hash: &PasswordHash,
    ) -> Result<User, InfraError>;

    /// メールアドレスで認証情報を検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(credential))`: ユーザーが見つかった場合
    /// - `Ok(None)`: ユーザーが見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_credential_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredential>, InfraError>;

    /// ID でユーザーを検索する
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError>;
}

/// `users` テーブルの行（パスワードハッシュを除く）
#[derive(sqlx::FromRow)]
struct UserRow {
    id:         Uuid,
    first_name: String,
    last_name:  String,
    email:      String,
    contact:    String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = InfraError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let invalid = |e: userdesk_domain::DomainError| InfraError::unexpected(e.to_string());

        Ok(User::from_db(
            UserId::from_uuid(row.id),
            FirstName::new(row.first_name).map_err(invalid)?,
            LastName::new(row.last_name).map_err(invalid)?,
            Email::new(row.email).map_err(invalid)?,
            Contact::new(row.contact).map_err(invalid)?,
            row.created_at,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id:            Uuid,
    email:         String,
    password_hash: String,
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(
        &self,
        new_user: &NewUser,
        password_hash: &PasswordHash,
    ) -> Result<User, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (first_name, last_name, email, contact, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, email, contact, created_at
            "#,
        )
        .bind(new_user.first_name().as_str())
        .bind(new_user.last_name().as_str())
        .bind(new_user.email().as_str())
        .bind(new_user.contact().as_str())
        .bind(password_hash.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%email))]
    async fn find_credential_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredential>, InfraError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(StoredCredential {
            user_id:       UserId::from_uuid(row.id),
            email:         Email::new(row.email)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            password_hash: PasswordHash::new(row.password_hash),
        }))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, last_name, email, contact, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresUserRepository>();
    }

    #[test]
    fn test_空のカラムを持つ行は変換エラーになる() {
        let row = UserRow {
            id:         Uuid::now_v7(),
            first_name: "Ada".to_string(),
            last_name:  "Lovelace".to_string(),
            email:      "ada@x.com".to_string(),
            contact:    String::new(),
            created_at: Utc::now(),
        };

        let result = User::try_from(row);

        assert!(result.is_err());
    }

    #[test]
    fn test_行からユーザーへ変換できる() {
        let id = Uuid::now_v7();
        let created_at = Utc::now();
        let row = UserRow {
            id,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            contact: "123".to_string(),
            created_at,
        };

        let user = User::try_from(row).unwrap();

        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.email().as_str(), "ada@x.com");
        assert_eq!(user.created_at(), created_at);
    }
}
