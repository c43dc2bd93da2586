//! # Userdesk ドメイン層
//!
//! ユーザー登録とログインの中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 必須項目は生成時に検証し、空の値を型レベルで排除する
//! - **平文を残さない**: パスワードは [`password::PlainPassword`] として受け取り、
//!   永続化されるのは [`password::PasswordHash`] のみ
//! - **インフラ非依存**: DB や HTTP には一切依存しない
//!
//! ## 依存関係の方向
//!
//! ```text
//! auth-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`password`] - 平文パスワード・ハッシュ・検証結果
//! - [`user`] - ユーザーエンティティと登録入力
//!
//! ## 使用例
//!
//! ```rust
//! use userdesk_domain::{
//!     DomainError,
//!     user::{NewUser, RegistrationFields},
//! };
//!
//! let fields = RegistrationFields {
//!     first_name: Some("Ada".to_string()),
//!     last_name:  Some("Lovelace".to_string()),
//!     email:      Some("ada@x.com".to_string()),
//!     contact:    None,
//!     password:   Some("s3cret".to_string()),
//! };
//!
//! let error = NewUser::try_from_fields(fields).unwrap_err();
//! assert_eq!(error, DomainError::MissingFields(vec!["contact"]));
//! ```

#[macro_use]
mod macros;

pub mod error;
pub mod password;
pub mod user;

pub use error::DomainError;
