//! # ログインハンドラ
//!
//! - `POST /login` - メールアドレスとパスワードによるログイン
//!
//! セッションやトークンは発行しない。検証結果のみを返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{error::ApiError, usecase::CredentialVerifier};

/// ログイン成功時のメッセージ
pub const LOGIN_SUCCEEDED_MESSAGE: &str = "Login successful.";

/// ログインハンドラの共有状態
pub struct AuthState {
    pub verifier: Arc<dyn CredentialVerifier>,
}

/// ログインリクエスト
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email:    Option<String>,
    pub password: Option<String>,
}

/// ログインレスポンス
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user:    LoginUserData,
}

#[derive(Debug, Serialize)]
pub struct LoginUserData {
    pub email: String,
}

/// POST /login
///
/// 認証に成功した場合のみ 200 を返す。未登録のメールアドレスと
/// パスワード不一致は同じレスポンスになる。
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AuthState>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req: LoginRequest = super::parse_object(payload)?;

    let identity = state
        .verifier
        .verify(
            req.email.as_deref().unwrap_or_default(),
            req.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(LoginResponse {
        message: LOGIN_SUCCEEDED_MESSAGE,
        user:    LoginUserData {
            email: identity.email.into_string(),
        },
    }))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
        routing::post,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use userdesk_domain::user::{Email, UserId};

    use super::*;
    use crate::{
        error::{
            AuthError,
            INVALID_CREDENTIALS_MESSAGE,
            LOGIN_FAILED_MESSAGE,
            MISSING_CREDENTIALS_MESSAGE,
        },
        usecase::VerifiedIdentity,
    };

    /// ada@x.com / s3cret のみを受け付けるスタブ
    struct StubCredentialVerifier {
        fail_internally: bool,
    }

    #[async_trait]
    impl CredentialVerifier for StubCredentialVerifier {
        async fn verify(&self, email: &str, password: &str) -> Result<VerifiedIdentity, AuthError> {
            if self.fail_internally {
                return Err(AuthError::Internal("connection refused".to_string()));
            }
            if email.is_empty() || password.is_empty() {
                return Err(AuthError::Validation);
            }
            if (email, password) != ("ada@x.com", "s3cret") {
                return Err(AuthError::InvalidCredentials);
            }
            Ok(VerifiedIdentity {
                user_id: UserId::generate(),
                email:   Email::new(email).unwrap(),
            })
        }
    }

    fn create_test_app(fail_internally: bool) -> Router {
        let state = Arc::new(AuthState {
            verifier: Arc::new(StubCredentialVerifier { fail_internally }),
        });

        Router::new().route("/login", post(login)).with_state(state)
    }

    async fn post_login(app: Router, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/login")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_login_成功() {
        // Given
        let sut = create_test_app(false);
        let body = json!({ "email": "ada@x.com", "password": "s3cret" });

        // When
        let (status, json) = post_login(sut, &body.to_string()).await;

        // Then
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "message": LOGIN_SUCCEEDED_MESSAGE,
                "user": { "email": "ada@x.com" },
            })
        );
    }

    #[rstest]
    #[case::パスワード不一致(json!({ "email": "ada@x.com", "password": "wrong" }), INVALID_CREDENTIALS_MESSAGE)]
    #[case::未登録(json!({ "email": "bob@x.com", "password": "s3cret" }), INVALID_CREDENTIALS_MESSAGE)]
    #[case::パスワードなし(json!({ "email": "ada@x.com" }), MISSING_CREDENTIALS_MESSAGE)]
    #[case::メールアドレスが空(json!({ "email": "", "password": "s3cret" }), MISSING_CREDENTIALS_MESSAGE)]
    #[tokio::test]
    async fn test_login_失敗は400(#[case] body: Value, #[case] expected: &str) {
        // Given
        let sut = create_test_app(false);

        // When
        let (status, json) = post_login(sut, &body.to_string()).await;

        // Then
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({ "message": expected }));
    }

    #[rstest]
    #[case::配列(json!(["ada@x.com", "s3cret"]))]
    #[case::null(json!(null))]
    #[tokio::test]
    async fn test_login_オブジェクト以外のボディは不正(#[case] body: Value) {
        // Given
        let sut = create_test_app(false);

        // When
        let (status, json) = post_login(sut, &body.to_string()).await;

        // Then
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].is_string());
        assert_ne!(json["message"], LOGIN_SUCCEEDED_MESSAGE);
        assert!(json.get("user").is_none());
    }

    #[tokio::test]
    async fn test_login_内部エラーは500() {
        // Given
        let sut = create_test_app(true);
        let body = json!({ "email": "ada@x.com", "password": "s3cret" });

        // When
        let (status, json) = post_login(sut, &body.to_string()).await;

        // Then
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json,
            json!({ "message": LOGIN_FAILED_MESSAGE, "error": "connection refused" })
        );
    }

    #[tokio::test]
    async fn test_login_不正なjson() {
        let sut = create_test_app(false);

        let (status, json) = post_login(sut, "not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].is_string());
    }
}
