//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//! ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲する。
//!
//! ## ハンドラ一覧
//!
//! - `health`: 疎通確認・ヘルスチェック
//! - `user`: ユーザー登録
//! - `auth`: ログイン

use axum::{Json, extract::rejection::JsonRejection};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;

pub mod auth;
pub mod health;
pub mod user;

pub use auth::{AuthState, login};
pub use health::{ReadinessState, health_check, readiness_check, root};
pub use user::{UserState, add_user};

/// JSON オブジェクトのボディをリクエスト型に変換する
///
/// 配列などオブジェクト以外のボディは項目の対応付けを行わず、不正なボディとして扱う。
fn parse_object<T: DeserializeOwned>(
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(object) = payload?;
    serde_json::from_value(Value::Object(object))
        .map_err(|e| ApiError::MalformedBody(e.to_string()))
}
