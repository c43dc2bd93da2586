//! # ユーザー登録ハンドラ
//!
//! - `POST /add-user` - ユーザー登録

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use userdesk_domain::{
    password::CredentialType,
    user::{RegistrationFields, User, UserId},
};

use crate::{error::ApiError, usecase::UserRegistrar};

/// 登録成功時のメッセージ
pub const USER_ADDED_MESSAGE: &str = "User added successfully.";

/// ユーザー登録ハンドラの共有状態
pub struct UserState {
    pub registrar: Arc<dyn UserRegistrar>,
}

/// ユーザー登録リクエスト
///
/// 欠落した項目もユースケースで一括して報告するため、すべて任意項目として受け取る。
#[derive(Deserialize)]
pub struct AddUserRequest {
    pub first_name:    Option<String>,
    pub last_name:     Option<String>,
    pub email:         Option<String>,
    pub contact:       Option<String>,
    pub user_password: Option<String>,
}

impl From<AddUserRequest> for RegistrationFields {
    fn from(req: AddUserRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name:  req.last_name,
            email:      req.email,
            contact:    req.contact,
            password:   req.user_password,
        }
    }
}

/// 登録されたユーザー（パスワードハッシュは含めない）
#[derive(Debug, Serialize)]
pub struct UserData {
    pub id:              UserId,
    pub first_name:      String,
    pub last_name:       String,
    pub email:           String,
    pub contact:         String,
    pub created_at:      DateTime<Utc>,
    pub credential_type: CredentialType,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id:              *user.id(),
            first_name:      user.first_name().as_str().to_string(),
            last_name:       user.last_name().as_str().to_string(),
            email:           user.email().as_str().to_string(),
            contact:         user.contact().as_str().to_string(),
            created_at:      user.created_at(),
            credential_type: CredentialType::Password,
        }
    }
}

/// ユーザー登録レスポンス
#[derive(Debug, Serialize)]
pub struct AddUserResponse {
    pub message: &'static str,
    pub user:    UserData,
}

/// POST /add-user
///
/// ユーザーを登録し、201 と保存されたレコードを返す。
#[tracing::instrument(skip_all)]
pub async fn add_user(
    State(state): State<Arc<UserState>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req: AddUserRequest = super::parse_object(payload)?;

    let user = state.registrar.create(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddUserResponse {
            message: USER_ADDED_MESSAGE,
            user:    UserData::from(&user),
        }),
    ))
}
