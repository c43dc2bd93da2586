//! # Userdesk インフラ層
//!
//! 外部システム（PostgreSQL）との接続と、パスワードハッシュの具体実装を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: [`repository::UserRepository`] の PostgreSQL 実装
//! - **パスワードハッシュ**: Argon2id によるハッシュ化と検証
//!
//! ## 依存関係
//!
//! ```text
//! auth-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - Argon2id パスワードハッシュ
//! - [`repository`] - リポジトリ実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use userdesk_infra::{db, repository::PostgresUserRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/userdesk", 10).await?;
//!     db::run_migrations(&pool).await?;
//!     let repo = PostgresUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
pub use password::{Argon2PasswordHasher, PasswordHasher};
