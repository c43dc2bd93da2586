//! # ログイン検証ユースケース
//!
//! ## タイミング攻撃対策
//!
//! ユーザーが存在しない場合もダミーハッシュで Argon2id 検証を実行し、
//! 「ユーザーなし」と「パスワード不一致」の処理時間を揃える。
//! どちらも同じ [`AuthError::InvalidCredentials`] を返す。

use std::sync::Arc;

use async_trait::async_trait;
use userdesk_domain::{
    password::{PasswordHash, PasswordVerifyResult, PlainPassword},
    user::Email,
};
use userdesk_infra::{PasswordHasher, repository::UserRepository};

use super::{CredentialVerifier, VerifiedIdentity};
use crate::error::AuthError;

/// ユーザーが存在しない場合の検証に使うハッシュ（有効な Argon2id 形式）
const DUMMY_HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// ログイン検証ユースケースの実装
pub struct CredentialVerifierImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl CredentialVerifierImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    async fn check(
        &self,
        password: PlainPassword,
        hash: PasswordHash,
    ) -> Result<PasswordVerifyResult, AuthError> {
        let hasher = Arc::clone(&self.password_hasher);
        let result = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("検証タスクが失敗: {e}")))??;
        Ok(result)
    }

    /// ダミーハッシュで検証を実行する（結果は使わない）
    async fn dummy_verification(&self, password: PlainPassword) {
        let _ = self.check(password, PasswordHash::new(DUMMY_HASH)).await;
    }
}

#[async_trait]
impl CredentialVerifier for CredentialVerifierImpl {
    async fn verify(&self, email: &str, password: &str) -> Result<VerifiedIdentity, AuthError> {
        let password = PlainPassword::new(password);
        let email = match Email::new(email) {
            Ok(email) if !password.is_empty() => email,
            _ => return Err(AuthError::Validation),
        };

        let Some(credential) = self
            .user_repository
            .find_credential_by_email(&email)
            .await?
        else {
            self.dummy_verification(password).await;
            tracing::info!(%email, "ログイン失敗: ユーザーが存在しません");
            return Err(AuthError::InvalidCredentials);
        };

        let result = self
            .check(password, credential.password_hash.clone())
            .await?;
        if !result.is_match() {
            tracing::info!(user_id = %credential.user_id, "ログイン失敗: パスワード不一致");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %credential.user_id, "ログインに成功しました");
        Ok(VerifiedIdentity {
            user_id: credential.user_id,
            email:   credential.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use userdesk_domain::user::{NewUser, RegistrationFields};
    use userdesk_infra::{InfraError, mock::MockUserRepository};

    use super::*;

    /// 検証回数を数えるスタブ
    ///
    /// 平文 "s3cret" に対するハッシュを "hash-of-s3cret" とみなす。
    #[derive(Default)]
    struct StubPasswordHasher {
        verify_calls: AtomicUsize,
    }

    impl PasswordHasher for StubPasswordHasher {
        fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
            Ok(PasswordHash::new(format!("hash-of-{}", password.as_str())))
        }

        fn verify(
            &self,
            password: &PlainPassword,
            hash: &PasswordHash,
        ) -> Result<PasswordVerifyResult, InfraError> {
            self.verify_calls.fetch_add(1, Ordering::SeqCst);
            Ok((hash.as_str() == format!("hash-of-{}", password.as_str())).into())
        }
    }

    async fn repo_with_ada() -> MockUserRepository {
        let repo = MockUserRepository::new();
        let new_user = NewUser::try_from_fields(RegistrationFields {
            first_name: Some("Ada".to_string()),
            last_name:  Some("Lovelace".to_string()),
            email:      Some("ada@x.com".to_string()),
            contact:    Some("123".to_string()),
            password:   Some("s3cret".to_string()),
        })
        .unwrap();
        repo.insert(&new_user, &PasswordHash::new("hash-of-s3cret"))
            .await
            .unwrap();
        repo
    }

    fn sut(repo: MockUserRepository, hasher: &Arc<StubPasswordHasher>) -> CredentialVerifierImpl {
        CredentialVerifierImpl::new(Arc::new(repo), hasher.clone())
    }

    #[tokio::test]
    async fn test_verify_成功() {
        // Given
        let hasher = Arc::new(StubPasswordHasher::default());
        let sut = sut(repo_with_ada().await, &hasher);

        // When
        let identity = sut.verify("ada@x.com", "s3cret").await.unwrap();

        // Then
        assert_eq!(identity.email.as_str(), "ada@x.com");
    }

    #[tokio::test]
    async fn test_verify_同じ入力で何度でも成功する() {
        let hasher = Arc::new(StubPasswordHasher::default());
        let sut = sut(repo_with_ada().await, &hasher);

        let first = sut.verify("ada@x.com", "s3cret").await.unwrap();
        let second = sut.verify("ada@x.com", "s3cret").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_verify_パスワード不一致() {
        // Given
        let hasher = Arc::new(StubPasswordHasher::default());
        let sut = sut(repo_with_ada().await, &hasher);

        // When
        let result = sut.verify("ada@x.com", "wrong").await;

        // Then
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_ユーザーなしでもダミー検証を実行する() {
        // Given
        let hasher = Arc::new(StubPasswordHasher::default());
        let sut = sut(MockUserRepository::new(), &hasher);

        // When
        let result = sut.verify("nobody@x.com", "s3cret").await;

        // Then
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert_eq!(hasher.verify_calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[case::メールアドレスが空("", "s3cret")]
    #[case::パスワードが空("ada@x.com", "")]
    #[case::両方空("", "")]
    #[tokio::test]
    async fn test_verify_未入力は検証エラー(#[case] email: &str, #[case] password: &str) {
        // Given
        let hasher = Arc::new(StubPasswordHasher::default());
        let sut = sut(repo_with_ada().await, &hasher);

        // When
        let result = sut.verify(email, password).await;

        // Then
        assert!(matches!(result, Err(AuthError::Validation)));
        assert_eq!(hasher.verify_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_verify_データベースエラー() {
        // Given
        let repo = repo_with_ada().await;
        repo.fail_with_database_error();
        let hasher = Arc::new(StubPasswordHasher::default());
        let sut = sut(repo, &hasher);

        // When
        let result = sut.verify("ada@x.com", "s3cret").await;

        // Then
        assert!(matches!(result, Err(AuthError::Store(_))));
    }

    #[tokio::test]
    async fn test_ダミーハッシュはargon2idとして解釈できる() {
        let hasher = userdesk_infra::Argon2PasswordHasher::new().unwrap();

        let result = hasher.verify(&PlainPassword::new("s3cret"), &PasswordHash::new(DUMMY_HASH));

        assert_eq!(result.unwrap(), PasswordVerifyResult::Mismatch);
    }
}
