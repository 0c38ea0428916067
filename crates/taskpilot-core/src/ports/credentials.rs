//! Credential port - externally managed calendar authorization.

use async_trait::async_trait;
use std::fmt;

use crate::domain::TaskError;

/// A currently-valid bearer token for the calendar provider.
///
/// Debug output is redacted so tokens never leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Hands out a currently-valid credential or fails with `Auth`.
///
/// The refresh/storage lifecycle (OAuth browser flow, cached token file,
/// silent refresh) is owned entirely by the implementation behind this
/// trait. The bridge never retries an `Auth` failure; recovery is
/// re-running the external authorization flow.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn get_valid_credential(&self) -> Result<AccessToken, TaskError>;
}
