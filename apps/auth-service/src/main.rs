//! # Auth Service サーバー
//!
//! ユーザー登録とログイン検証を担当する HTTP サーバー。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 説明 |
//! |---------|------|------|
//! | GET | `/` | 疎通確認 |
//! | GET | `/health` | Liveness Check |
//! | GET | `/health/ready` | Readiness Check |
//! | POST | `/add-user` | ユーザー登録 |
//! | POST | `/login` | ログイン |
//!
//! 環境変数は [`userdesk_auth_service::config`] を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p userdesk-auth-service
//! ```

use anyhow::Context as _;
use tokio::net::TcpListener;
use userdesk_auth_service::{app_builder, config::AuthConfig};
use userdesk_infra::db;
use userdesk_shared::observability::{self, TracingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("auth-service");
    observability::init_tracing(&tracing_config);
    let _tracing_guard =
        tracing::info_span!("app", service = %tracing_config.service_name).entered();

    let config = AuthConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Auth Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    let app = app_builder::build_app(pool)?;

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("{}:{} にバインドできません", config.host, config.port))?;
    tracing::info!("Auth Service サーバーが起動しました: {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
