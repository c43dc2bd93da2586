/// UUID ベースの ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`Uuid` をラップ）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `from_uuid()`: 既存 UUID から復元
/// - `as_uuid()`: 内部 UUID への参照
///
/// ID の採番は DB（`DEFAULT gen_random_uuid()`）が担うため、`generate()` は
/// テスト用途に限定して UUID v7 を生成する。
///
/// # 使用例
///
/// ```rust
/// use userdesk_domain::user::UserId;
/// use uuid::Uuid;
///
/// let uuid = Uuid::now_v7();
/// let id = UserId::from_uuid(uuid);
/// assert_eq!(id.as_uuid(), &uuid);
/// ```
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        #[serde(transparent)]
        $vis struct $Name(uuid::Uuid);

        impl $Name {
            /// 既存の UUID から ID を作成する
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// 内部の UUID 参照を取得する
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }

            /// 新しい ID を生成する（UUID v7、テスト用）
            #[cfg(any(test, feature = "test-support"))]
            pub fn generate() -> Self {
                Self(uuid::Uuid::now_v7())
            }
        }
    };
}

/// 必須テキスト Newtype の共通メソッドを生成する内部マクロ
///
/// `define_required_text!` の PII / 非 PII 両アームで共有される
/// `new()`, `as_str()`, `into_string()` を一括生成する。
macro_rules! _required_text_common {
    ($Name:ident, $field:expr) => {
        impl $Name {
            /// ワイヤー上のフィールド名（欠落エラーに使用する）
            pub const FIELD: &'static str = $field;

            /// 値を検証して作成する
            ///
            /// 空文字列・空白のみの値は欠落とみなす。
            /// 受け取った値はトリムせずそのまま保持する。
            pub fn new(value: impl Into<String>) -> Result<Self, $crate::DomainError> {
                let value = value.into();

                if value.trim().is_empty() {
                    return Err($crate::DomainError::missing($field));
                }

                Ok(Self(value))
            }

            /// 文字列参照を取得する
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// 所有権を持つ文字列に変換する
            pub fn into_string(self) -> String {
                self.0
            }
        }
    };
}

/// 必須テキスト Newtype を定義する宣言型マクロ
///
/// # PII モード
///
/// `pii: true` を指定すると:
/// - `Debug` 出力を `[REDACTED]` にマスクする
/// - `Display` impl を生成しない（平文出力を防止）
///
/// 指定しない場合は `derive(Debug)` と `Display` を生成する。
///
/// # 引数
///
/// - `field`: 欠落エラーに使うフィールド名（例: `"first_name"`）
/// - `pii`: （任意）`true` を指定すると PII 保護モード
///
/// # 使用例
///
/// ```rust
/// use userdesk_domain::{DomainError, user::Contact};
///
/// let contact = Contact::new("123").unwrap();
/// assert_eq!(contact.as_str(), "123");
/// assert!(format!("{:?}", contact).contains("[REDACTED]"));
///
/// assert_eq!(Contact::new("  "), Err(DomainError::missing("contact")));
/// ```
macro_rules! define_required_text {
    // PII アーム: Debug をマスク、Display を生成しない
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            field: $field:expr,
            pii: true $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, PartialEq, Eq,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl std::fmt::Debug for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($Name)).field(&"[REDACTED]").finish()
            }
        }

        _required_text_common!($Name, $field);
    };
    // 非 PII アーム: derive(Debug) + Display 生成
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            field: $field:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        $vis struct $Name(String);

        _required_text_common!($Name, $field);

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
