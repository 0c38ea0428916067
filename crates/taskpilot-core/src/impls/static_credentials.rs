//! Credential provider with a fixed answer.

use async_trait::async_trait;

use crate::domain::TaskError;
use crate::ports::{AccessToken, CredentialProvider};

/// Either always hands out the same token, or always fails with `Auth` as
/// an unlinked account would.
pub struct StaticCredentials {
    token: Option<AccessToken>,
}

impl StaticCredentials {
    pub fn valid(secret: impl Into<String>) -> Self {
        Self {
            token: Some(AccessToken::new(secret)),
        }
    }

    pub fn unlinked() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn get_valid_credential(&self) -> Result<AccessToken, TaskError> {
        self.token.clone().ok_or_else(|| {
            TaskError::Auth("no linked calendar account; run the authorization flow first".into())
        })
    }
}
