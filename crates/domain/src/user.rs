//! # ユーザー
//!
//! ユーザーエンティティと登録入力を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`User`] | ユーザー | 永続化済みのレコード。ID と作成日時は DB が採番する |
//! | [`NewUser`] | 新規ユーザー | 検証済みの登録入力。パスワードは平文のまま保持する |
//! | [`RegistrationFields`] | 登録入力 | リクエストから受け取った未検証の値 |
//!
//! ## 不変条件
//!
//! - `first_name`, `last_name`, `email`, `contact` は空でない
//! - 値はトリムせず、入力どおりに保存される
//! - `email` はログイン識別子であり、DB の一意制約で重複を防ぐ

use chrono::{DateTime, Utc};

use crate::{DomainError, password::PlainPassword};

define_uuid_id! {
    /// ユーザー ID
    ///
    /// DB が挿入時に採番する。作成後は不変。
    pub struct UserId;
}

define_required_text! {
    /// 名
    pub struct FirstName {
        field: "first_name",
    }
}

define_required_text! {
    /// 姓
    pub struct LastName {
        field: "last_name",
    }
}

define_required_text! {
    /// メールアドレス（ログイン識別子）
    ///
    /// 形式の検証は行わない。大文字小文字も区別して保存・照合する。
    pub struct Email {
        field: "email",
    }
}

define_required_text! {
    /// 連絡先
    pub struct Contact {
        field: "contact",
        pii: true,
    }
}

/// 登録パスワードのワイヤー上のフィールド名
pub const USER_PASSWORD_FIELD: &str = "user_password";

/// 登録入力（未検証）
///
/// JSON で省略された項目は `None` になる。
#[derive(Debug, Clone, Default)]
pub struct RegistrationFields {
    pub first_name: Option<String>,
    pub last_name:  Option<String>,
    pub email:      Option<String>,
    pub contact:    Option<String>,
    pub password:   Option<String>,
}

/// 新規ユーザー（検証済みの登録入力）
#[derive(Debug, Clone)]
pub struct NewUser {
    first_name: FirstName,
    last_name:  LastName,
    email:      Email,
    contact:    Contact,
    password:   PlainPassword,
}

impl NewUser {
    /// 登録入力を検証して新規ユーザーを作成する
    ///
    /// # エラー
    ///
    /// 欠落・空の項目が 1 つでもあれば、該当するすべての項目名を
    /// 宣言順に含む `DomainError::MissingFields` を返す。
    pub fn try_from_fields(fields: RegistrationFields) -> Result<Self, DomainError> {
        let mut missing = Vec::new();

        let first_name = collect(
            parse(fields.first_name, FirstName::FIELD, FirstName::new),
            &mut missing,
        );
        let last_name = collect(
            parse(fields.last_name, LastName::FIELD, LastName::new),
            &mut missing,
        );
        let email = collect(parse(fields.email, Email::FIELD, Email::new), &mut missing);
        let contact = collect(
            parse(fields.contact, Contact::FIELD, Contact::new),
            &mut missing,
        );
        let password = collect(
            match fields.password.map(PlainPassword::new) {
                Some(password) if !password.is_empty() => Ok(password),
                _ => Err(DomainError::missing(USER_PASSWORD_FIELD)),
            },
            &mut missing,
        );

        match (first_name, last_name, email, contact, password) {
            (Some(first_name), Some(last_name), Some(email), Some(contact), Some(password))
                if missing.is_empty() =>
            {
                Ok(Self {
                    first_name,
                    last_name,
                    email,
                    contact,
                    password,
                })
            }
            _ => Err(DomainError::MissingFields(missing)),
        }
    }

    pub fn first_name(&self) -> &FirstName {
        &self.first_name
    }

    pub fn last_name(&self) -> &LastName {
        &self.last_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn password(&self) -> &PlainPassword {
        &self.password
    }
}

fn parse<T>(
    value: Option<String>,
    field: &'static str,
    new: impl FnOnce(String) -> Result<T, DomainError>,
) -> Result<T, DomainError> {
    value.map_or_else(|| Err(DomainError::missing(field)), new)
}

fn collect<T>(result: Result<T, DomainError>, missing: &mut Vec<&'static str>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(DomainError::MissingFields(fields)) => {
            missing.extend(fields);
            None
        }
    }
}

/// ユーザーエンティティ
///
/// DB に保存されたユーザーを表現する。パスワードハッシュは含まない
/// （認証時はリポジトリから別途取得する）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:         UserId,
    first_name: FirstName,
    last_name:  LastName,
    email:      Email,
    contact:    Contact,
    created_at: DateTime<Utc>,
}

impl User {
    /// 既存のデータからユーザーを復元する（データベースから取得時）
    pub fn from_db(
        id: UserId,
        first_name: FirstName,
        last_name: LastName,
        email: Email,
        contact: Contact,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            contact,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn first_name(&self) -> &FirstName {
        &self.first_name
    }

    pub fn last_name(&self) -> &LastName {
        &self.last_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn ada() -> RegistrationFields {
        RegistrationFields {
            first_name: Some("Ada".to_string()),
            last_name:  Some("Lovelace".to_string()),
            email:      Some("ada@x.com".to_string()),
            contact:    Some("123".to_string()),
            password:   Some("s3cret".to_string()),
        }
    }

    #[rstest]
    fn test_全項目が揃っていれば作成できる(ada: RegistrationFields) {
        let sut = NewUser::try_from_fields(ada).unwrap();

        assert_eq!(sut.first_name().as_str(), "Ada");
        assert_eq!(sut.last_name().as_str(), "Lovelace");
        assert_eq!(sut.email().as_str(), "ada@x.com");
        assert_eq!(sut.contact().as_str(), "123");
        assert_eq!(sut.password().as_str(), "s3cret");
    }

    #[rstest]
    fn test_値はトリムされずそのまま保持される(mut ada: RegistrationFields) {
        ada.first_name = Some("  Ada ".to_string());
        ada.email = Some("Ada@X.com".to_string());

        let sut = NewUser::try_from_fields(ada).unwrap();

        assert_eq!(sut.first_name().as_str(), "  Ada ");
        assert_eq!(sut.email().as_str(), "Ada@X.com");
    }

    #[rstest]
    fn test_空のfirst_nameは欠落として報告される(mut ada: RegistrationFields) {
        ada.first_name = Some(String::new());

        let result = NewUser::try_from_fields(ada);

        assert_eq!(
            result.unwrap_err(),
            DomainError::MissingFields(vec!["first_name"])
        );
    }

    #[rstest]
    #[case::空白のみ(Some("   "))]
    #[case::未指定(None)]
    fn test_contactの欠落パターン(mut ada: RegistrationFields, #[case] contact: Option<&str>) {
        ada.contact = contact.map(str::to_string);

        let result = NewUser::try_from_fields(ada);

        assert_eq!(result.unwrap_err().missing_fields(), &["contact"]);
    }

    #[rstest]
    fn test_空のパスワードはuser_passwordとして報告される(mut ada: RegistrationFields) {
        ada.password = Some(String::new());

        let result = NewUser::try_from_fields(ada);

        assert_eq!(result.unwrap_err().missing_fields(), &["user_password"]);
    }

    #[rstest]
    fn test_すべての欠落項目が宣言順に列挙される() {
        let result = NewUser::try_from_fields(RegistrationFields::default());

        assert_eq!(
            result.unwrap_err(),
            DomainError::MissingFields(vec![
                "first_name",
                "last_name",
                "email",
                "contact",
                "user_password",
            ])
        );
    }

    #[rstest]
    fn test_contactのdebug出力はマスクされる() {
        let contact = Contact::new("090-1234-5678").unwrap();
        assert!(!format!("{:?}", contact).contains("090"));
    }

    #[rstest]
    fn test_user_idはuuid文字列としてシリアライズされる() {
        let id = UserId::generate();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!(id.as_uuid().to_string()));
    }
}
