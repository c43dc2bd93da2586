//! # Userdesk 共有ユーティリティ
//!
//! サービス全体で使用する共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` 変換はサービス側の責務）
//! - tracing / tower 関連は `observability` feature の背後に置く

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod health;
pub mod observability;
pub mod response;

pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
pub use response::MessageResponse;
