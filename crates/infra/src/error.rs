//! # インフラ層エラー定義
//!
//! データベースやパスワードハッシュ処理で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別
//!
//! `From<sqlx::Error>` で変換する時点で SQLSTATE `23505`（unique_violation）を
//! [`InfraErrorKind::UniqueViolation`] に振り分ける。ユースケース層は
//! sqlx のエラー型を覗かずに重複を判定できる。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// PostgreSQL の unique_violation を表す SQLSTATE
const UNIQUE_VIOLATION: &str = "23505";

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
/// `From<sqlx::Error>` や convenience constructor でエラーを生成すると、
/// その時点のスパン情報が自動的にキャプチャされる。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースエラー
    ///
    /// 接続失敗、タイムアウト、一意制約以外の制約違反など。
    #[error("{0}")]
    Database(#[source] sqlx::Error),

    /// 一意制約違反
    #[error("一意制約違反: {constraint}")]
    UniqueViolation {
        /// 違反した制約名（例: "users_email_key"）
        constraint: String,
    },

    /// 不正なパスワードハッシュ形式
    ///
    /// DB に保存された値が PHC 文字列として解釈できない場合。
    #[error("不正なハッシュ形式: {0}")]
    InvalidHash(String),

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// 一意制約違反かどうか
    pub fn is_unique_violation(&self) -> bool {
        matches!(self.kind, InfraErrorKind::UniqueViolation { .. })
    }

    fn with_kind(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    /// 一意制約違反エラーを生成する
    pub fn unique_violation(constraint: impl Into<String>) -> Self {
        Self::with_kind(InfraErrorKind::UniqueViolation {
            constraint: constraint.into(),
        })
    }

    /// 不正なハッシュ形式エラーを生成する
    pub fn invalid_hash(msg: impl Into<String>) -> Self {
        Self::with_kind(InfraErrorKind::InvalidHash(msg.into()))
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::with_kind(InfraErrorKind::Unexpected(msg.into()))
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        match &source {
            sqlx::Error::Database(db_err)
                if db_err
                    .code()
                    .is_some_and(|code| code.as_ref() == UNIQUE_VIOLATION) =>
            {
                Self::unique_violation(db_err.constraint().unwrap_or("unknown"))
            }
            _ => Self::with_kind(InfraErrorKind::Database(source)),
        }
    }
}
