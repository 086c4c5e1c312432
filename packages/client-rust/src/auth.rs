//! Access token sources.

use async_trait::async_trait;

/// Supplies the `Authorization` header value for requests that do not carry
/// an explicit token.
///
/// Implementations return the full header value, e.g. `Bearer ey...`.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> anyhow::Result<String>;
}

/// Provider returning the same token for every request.
#[derive(Clone)]
pub struct StaticAccessToken(String);

impl StaticAccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticAccessToken(..)")
    }
}

#[async_trait]
impl AccessTokenProvider for StaticAccessToken {
    async fn access_token(&self) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}
