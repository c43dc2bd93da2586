//! # メッセージレスポンス
//!
//! `{ "message": ... }` 形式の JSON レスポンス本体。
//!
//! 失敗時は必要に応じて `error`（下位エラーの説明）や
//! `missing_fields`（欠落した入力項目）を付与する。値のないフィールドは出力しない。

use serde::{Deserialize, Serialize};

/// メッセージレスポンス
///
/// ```
/// use userdesk_shared::MessageResponse;
///
/// let body = MessageResponse::new("Email and password are required.");
/// assert_eq!(body.message, "Email and password are required.");
/// assert!(body.error.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message:        String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error:          Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message:        message.into(),
            error:          None,
            missing_fields: None,
        }
    }

    /// 下位エラーの説明を付与する
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// 欠落した入力項目を付与する
    pub fn with_missing_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}
