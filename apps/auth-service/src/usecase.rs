//! # ユースケース層
//!
//! ユーザー登録とログイン検証のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラはトレイト経由で呼び出し、テストではスタブに差し替える
//! - **依存性注入**: リポジトリとパスワードハッシュを外部から注入
//! - **ブロッキング処理の分離**: Argon2id の計算は `spawn_blocking` で実行する

pub mod registrar;
pub mod verifier;

use async_trait::async_trait;
pub use registrar::UserRegistrarImpl;
use userdesk_domain::user::{Email, RegistrationFields, User, UserId};
pub use verifier::CredentialVerifierImpl;

use crate::error::{AuthError, RegistrationError};

/// ユーザー登録ユースケース
#[async_trait]
pub trait UserRegistrar: Send + Sync {
    /// 登録入力を検証し、ユーザーを作成する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(User)`: 採番された ID を含む保存済みのユーザー
    /// - `Err(RegistrationError::Validation)`: 欠落項目あり（書き込みは行わない）
    /// - `Err(RegistrationError::DuplicateIdentifier)`: メールアドレスが登録済み
    async fn create(&self, fields: RegistrationFields) -> Result<User, RegistrationError>;
}

/// ログイン検証の結果として得られる本人情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub user_id: UserId,
    pub email:   Email,
}

/// ログイン検証ユースケース
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// メールアドレスとパスワードを検証する
    ///
    /// 状態を持たないため、同じ入力には常に同じ結果を返す。
    async fn verify(&self, email: &str, password: &str) -> Result<VerifiedIdentity, AuthError>;
}
