//! Password check against the stored admin password setting.

use crate::config::{LoginConfig, SettingsConfig};
use crate::error::AppError;
use crate::service::SettingsService;
use crate::store::RecordStore;

pub struct LoginService;

impl LoginService {
    /// `Ok(())` when the password matches; `Unauthorized` on mismatch or when no password is stored.
    pub async fn verify(
        store: &dyn RecordStore,
        settings: &SettingsConfig,
        login: &LoginConfig,
        password: &str,
    ) -> Result<(), AppError> {
        let expected = SettingsService::get(store, settings, &login.password_key).await?;
        match expected {
            Some(expected) if !expected.is_empty() && constant_time_eq(expected.as_bytes(), password.as_bytes()) => {
                Ok(())
            }
            Some(_) => Err(AppError::Unauthorized),
            None => {
                tracing::warn!(key = %login.password_key, "login attempted with no stored password");
                Err(AppError::Unauthorized)
            }
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Record};
    use serde_json::json;

    async fn store_with_password(password: &str) -> MemoryStore {
        let store = MemoryStore::new();
        let row: Record = json!({ "key": "admin_password", "value": password }).as_object().cloned().unwrap();
        store.upsert("settings", &row, "key").await.unwrap();
        store
    }

    #[tokio::test]
    async fn accepts_matching_password() {
        let store = store_with_password("hunter2").await;
        let ok = LoginService::verify(&store, &SettingsConfig::default(), &LoginConfig::default(), "hunter2").await;
        assert!(ok.is_ok());
    }

    #[tokio::test]
    async fn rejects_wrong_or_missing_password() {
        let store = store_with_password("hunter2").await;
        let err = LoginService::verify(&store, &SettingsConfig::default(), &LoginConfig::default(), "hunter3")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        let empty = MemoryStore::new();
        let err = LoginService::verify(&empty, &SettingsConfig::default(), &LoginConfig::default(), "")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn constant_time_eq_compares_bytes() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
