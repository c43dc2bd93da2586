//! # アプリケーション構築
//!
//! DI（リポジトリ・パスワードハッシュ・State）の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use sqlx::PgPool;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use userdesk_infra::{
    Argon2PasswordHasher,
    InfraError,
    PasswordHasher,
    repository::{PostgresUserRepository, UserRepository},
};
use userdesk_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};

use crate::{
    handler::{
        AuthState,
        ReadinessState,
        UserState,
        add_user,
        health_check,
        login,
        readiness_check,
        root,
    },
    usecase::{CredentialVerifierImpl, UserRegistrarImpl},
};

/// ハンドラ群の State
pub struct AppStates {
    pub user:      Arc<UserState>,
    pub auth:      Arc<AuthState>,
    pub readiness: Arc<ReadinessState>,
}

impl AppStates {
    /// リポジトリとパスワードハッシュから State を組み立てる
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        pool: PgPool,
    ) -> Self {
        let registrar =
            UserRegistrarImpl::new(Arc::clone(&user_repository), Arc::clone(&password_hasher));
        let verifier = CredentialVerifierImpl::new(user_repository, password_hasher);

        Self {
            user:      Arc::new(UserState {
                registrar: Arc::new(registrar),
            }),
            auth:      Arc::new(AuthState {
                verifier: Arc::new(verifier),
            }),
            readiness: Arc::new(ReadinessState { pool }),
        }
    }
}

/// PostgreSQL 実装でアプリケーションを構築する
pub fn build_app(pool: PgPool) -> Result<Router, InfraError> {
    let user_repository: Arc<dyn UserRepository> =
        Arc::new(PostgresUserRepository::new(pool.clone()));
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new()?);

    Ok(build_router(AppStates::new(
        user_repository,
        password_hasher,
        pool,
    )))
}

/// ルーターを構築する
///
/// レイヤーは下に書いたものほど外側になる:
/// 1. SetRequestIdLayer: `x-request-id` がなければ UUID v7 を生成
/// 2. TraceLayer: request_id 付きのリクエストスパンを作成
/// 3. CanonicalLogLineLayer: 完了時に 1 行サマリログを出力
/// 4. PropagateRequestIdLayer: レスポンスヘッダーに `x-request-id` をコピー
/// 5. CorsLayer: 全オリジンを許可し、プリフライトに応答
pub fn build_router(states: AppStates) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(states.readiness),
        )
        .merge(
            Router::new()
                .route("/add-user", post(add_user))
                .with_state(states.user),
        )
        .merge(
            Router::new()
                .route("/login", post(login))
                .with_state(states.auth),
        )
        .layer(cors_layer())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}
