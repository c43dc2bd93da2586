//! # Auth Service エラー定義
//!
//! ユースケースのエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | エラー | HTTP ステータス |
//! |-------|----------------|
//! | `Validation` / `InvalidCredentials` / 不正な JSON | 400 |
//! | `DuplicateIdentifier` | 409 |
//! | `Store` / `Internal` | 500（`error` に詳細を含める） |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use userdesk_domain::DomainError;
use userdesk_infra::{InfraError, InfraErrorKind};
use userdesk_shared::MessageResponse;

/// 登録失敗時のメッセージ
pub const MISSING_FIELDS_MESSAGE: &str =
    "All fields (first_name, last_name, email, contact, user_password) are required.";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "A user with this email already exists.";
pub const ADD_USER_FAILED_MESSAGE: &str = "An error occurred while adding the user.";

/// ログイン失敗時のメッセージ
pub const MISSING_CREDENTIALS_MESSAGE: &str = "Email and password are required.";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";
pub const LOGIN_FAILED_MESSAGE: &str = "An error occurred during login.";

/// ユーザー登録で発生するエラー
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// 必須項目の欠落
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// メールアドレスが既に登録されている
    #[error("メールアドレスが既に登録されています")]
    DuplicateIdentifier,

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Store(InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<InfraError> for RegistrationError {
    fn from(e: InfraError) -> Self {
        match e.kind() {
            InfraErrorKind::UniqueViolation { .. } => Self::DuplicateIdentifier,
            InfraErrorKind::Database(_) => Self::Store(e),
            InfraErrorKind::InvalidHash(_) | InfraErrorKind::Unexpected(_) => {
                Self::Internal(e.to_string())
            }
        }
    }
}

/// ログインで発生するエラー
#[derive(Debug, Error)]
pub enum AuthError {
    /// メールアドレスまたはパスワードが未入力
    #[error("メールアドレスとパスワードは必須です")]
    Validation,

    /// 認証失敗
    ///
    /// ユーザーが存在しない場合とパスワード不一致を区別しない。
    #[error("メールアドレスまたはパスワードが正しくありません")]
    InvalidCredentials,

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Store(InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<InfraError> for AuthError {
    fn from(e: InfraError) -> Self {
        match e.kind() {
            InfraErrorKind::Database(_) | InfraErrorKind::UniqueViolation { .. } => Self::Store(e),
            InfraErrorKind::InvalidHash(_) | InfraErrorKind::Unexpected(_) => {
                Self::Internal(e.to_string())
            }
        }
    }
}

/// ハンドラが返すエラー
///
/// リクエストボディの解析失敗と、各ユースケースのエラーをまとめる。
#[derive(Debug, Error)]
pub enum ApiError {
    /// JSON として解釈できないリクエストボディ
    #[error("不正なリクエストボディ: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MalformedBody(detail) => {
                tracing::debug!(%detail, "リクエストボディを解析できません");
                message(StatusCode::BAD_REQUEST, MessageResponse::new(detail))
            }
            ApiError::Registration(e) => e.into_response(),
            ApiError::Auth(e) => e.into_response(),
        }
    }
}

impl IntoResponse for RegistrationError {
    fn into_response(self) -> Response {
        match self {
            RegistrationError::Validation(e) => message(
                StatusCode::BAD_REQUEST,
                MessageResponse::new(MISSING_FIELDS_MESSAGE)
                    .with_missing_fields(e.missing_fields().iter().copied()),
            ),
            RegistrationError::DuplicateIdentifier => message(
                StatusCode::CONFLICT,
                MessageResponse::new(DUPLICATE_EMAIL_MESSAGE),
            ),
            RegistrationError::Store(e) => {
                tracing::error!(
                    error.kind = "database",
                    error.span_trace = %e.span_trace(),
                    "ユーザー登録中にデータベースエラー: {}",
                    e
                );
                message(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MessageResponse::new(ADD_USER_FAILED_MESSAGE).with_error(e.to_string()),
                )
            }
            RegistrationError::Internal(msg) => {
                tracing::error!(error.kind = "internal", "ユーザー登録中に内部エラー: {}", msg);
                message(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MessageResponse::new(ADD_USER_FAILED_MESSAGE).with_error(msg),
                )
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Validation => message(
                StatusCode::BAD_REQUEST,
                MessageResponse::new(MISSING_CREDENTIALS_MESSAGE),
            ),
            AuthError::InvalidCredentials => message(
                StatusCode::BAD_REQUEST,
                MessageResponse::new(INVALID_CREDENTIALS_MESSAGE),
            ),
            AuthError::Store(e) => {
                tracing::error!(
                    error.kind = "database",
                    error.span_trace = %e.span_trace(),
                    "ログイン中にデータベースエラー: {}",
                    e
                );
                message(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MessageResponse::new(LOGIN_FAILED_MESSAGE).with_error(e.to_string()),
                )
            }
            AuthError::Internal(msg) => {
                tracing::error!(error.kind = "internal", "ログイン中に内部エラー: {}", msg);
                message(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MessageResponse::new(LOGIN_FAILED_MESSAGE).with_error(msg),
                )
            }
        }
    }
}

fn message(status: StatusCode, body: MessageResponse) -> Response {
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    async fn into_parts(response: impl IntoResponse) -> (StatusCode, Value) {
        let response = response.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_欠落項目は400でmissing_fieldsを含む() {
        let err = RegistrationError::Validation(DomainError::MissingFields(vec![
            "first_name",
            "user_password",
        ]));

        let (status, body) = into_parts(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "message": MISSING_FIELDS_MESSAGE,
                "missing_fields": ["first_name", "user_password"],
            })
        );
    }

    #[tokio::test]
    async fn test_重複は409() {
        let (status, body) = into_parts(RegistrationError::DuplicateIdentifier).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "message": DUPLICATE_EMAIL_MESSAGE }));
    }

    #[tokio::test]
    async fn test_登録時のデータベースエラーは500で下位メッセージを含む() {
        let err: RegistrationError = InfraError::from(sqlx::Error::PoolTimedOut).into();

        let (status, body) = into_parts(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], ADD_USER_FAILED_MESSAGE);
        assert_eq!(body["error"], sqlx::Error::PoolTimedOut.to_string());
    }

    #[rstest]
    #[case::未入力(AuthError::Validation, MISSING_CREDENTIALS_MESSAGE)]
    #[case::認証失敗(AuthError::InvalidCredentials, INVALID_CREDENTIALS_MESSAGE)]
    #[tokio::test]
    async fn test_ログインの入力起因エラーは400(#[case] err: AuthError, #[case] expected: &str) {
        let (status, body) = into_parts(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": expected }));
    }

    #[tokio::test]
    async fn test_ログイン時の内部エラーは500() {
        let (status, body) = into_parts(AuthError::Internal("boom".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "message": LOGIN_FAILED_MESSAGE, "error": "boom" })
        );
    }

    #[test]
    fn test_一意制約違反は重複エラーに変換される() {
        let err: RegistrationError = InfraError::unique_violation("users_email_key").into();

        assert!(matches!(err, RegistrationError::DuplicateIdentifier));
    }

    #[test]
    fn test_不正なハッシュは内部エラーに変換される() {
        let err: AuthError = InfraError::invalid_hash("not a phc string").into();

        assert!(matches!(err, AuthError::Internal(_)));
    }
}
