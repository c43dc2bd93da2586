//! # ヘルスチェックハンドラ
//!
//! - `/` — 疎通確認（固定テキスト）
//! - `/health` — Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` — Readiness Check（DB への接続を確認）

use std::{sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sqlx::PgPool;
use userdesk_infra::db;
use userdesk_shared::{CheckStatus, HealthResponse, ReadinessResponse};

/// 疎通確認のレスポンス本文
pub const ROOT_MESSAGE: &str = "Server is working!";

/// DB チェックのタイムアウト
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// GET /
pub async fn root() -> &'static str {
    ROOT_MESSAGE
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub pool: PgPool,
}

/// GET /health/ready
///
/// 全チェック OK → 200、1 つでも失敗 → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let response = ReadinessResponse::from_checks([("database", check_database(&state.pool).await)]);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// `SELECT 1` で DB への接続を確認する
async fn check_database(pool: &PgPool) -> CheckStatus {
    match tokio::time::timeout(CHECK_TIMEOUT, db::ping(pool)).await {
        Ok(result) => {
            if let Err(e) = &result {
                tracing::warn!(error = %e, "readiness check: database ping failed");
            }
            CheckStatus::from_result(&result)
        }
        Err(_) => {
            tracing::warn!("readiness check: database check timed out");
            CheckStatus::Error
        }
    }
}
