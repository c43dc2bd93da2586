//! # リポジトリ実装
//!
//! ユーザーの永続化を担当するリポジトリトレイトと PostgreSQL 実装を提供する。
//!
//! ユースケース層はトレイト経由で利用するため、テストでは
//! [`crate::mock`] のインメモリ実装に差し替えられる。

pub mod user_repository;

pub use user_repository::{PostgresUserRepository, StoredCredential, UserRepository};
