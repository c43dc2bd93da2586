//! # ドメイン層エラー定義
//!
//! 入力値がドメインの不変条件を満たさない場合のエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `MissingFields` | 400 Bad Request | 必須項目の欠落・空文字 |

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 必須項目が欠落している
    ///
    /// 欠落したすべての項目名（ワイヤー上のフィールド名）を宣言順に保持する。
    /// 1 つ目の欠落で打ち切らず、呼び出し元が一度に修正できるようにする。
    #[error("必須項目が入力されていません: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl DomainError {
    /// 単一項目の欠落エラーを生成する
    pub fn missing(field: &'static str) -> Self {
        Self::MissingFields(vec![field])
    }

    /// 欠落している項目名の一覧を返す
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            Self::MissingFields(fields) => fields,
        }
    }
}
