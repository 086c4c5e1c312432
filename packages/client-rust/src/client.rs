//! Entry point bundling the operation groups over one transport.

use std::sync::Arc;

use crate::auth::AccessTokenProvider;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::operations::base::{OperationOptions, OperationsBase};
use crate::operations::{
    ResultOperations, RuleOperations, RunOperations, TemplateOperations, TestOperations,
    UrlFormatter,
};
use crate::rest::{ReqwestRestClient, RestClient};

/// Property Validation API client.
///
/// Cheap to clone; clones share the transport and token provider.
#[derive(Clone)]
pub struct PropertyValidationClient {
    options: Arc<OperationOptions>,
}

impl PropertyValidationClient {
    /// Creates a client using the `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let rest_client = ReqwestRestClient::new(config.request_timeout)?;
        Ok(Self::with_rest_client(config, Arc::new(rest_client)))
    }

    /// Creates a client sending requests through `rest_client`.
    #[must_use]
    pub fn with_rest_client(config: ClientConfig, rest_client: Arc<dyn RestClient>) -> Self {
        let urls = UrlFormatter::new(&config.base_url, &config.imodels_base_url);
        Self {
            options: Arc::new(OperationOptions {
                rest_client,
                token_provider: None,
                config,
                urls,
            }),
        }
    }

    /// Sets the token source used when an operation gets no explicit token.
    #[must_use]
    pub fn with_token_provider(mut self, provider: Arc<dyn AccessTokenProvider>) -> Self {
        Arc::make_mut(&mut self.options).token_provider = Some(provider);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.options.config
    }

    #[must_use]
    pub fn rules(&self) -> RuleOperations {
        RuleOperations::new(self.base())
    }

    #[must_use]
    pub fn tests(&self) -> TestOperations {
        TestOperations::new(self.base())
    }

    #[must_use]
    pub fn runs(&self) -> RunOperations {
        RunOperations::new(self.base())
    }

    #[must_use]
    pub fn templates(&self) -> TemplateOperations {
        TemplateOperations::new(self.base())
    }

    #[must_use]
    pub fn results(&self) -> ResultOperations {
        ResultOperations::new(self.base())
    }

    pub(crate) fn base(&self) -> OperationsBase {
        OperationsBase::new(Arc::clone(&self.options))
    }
}

impl std::fmt::Debug for PropertyValidationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyValidationClient")
            .field("config", &self.options.config)
            .field("has_token_provider", &self.options.token_provider.is_some())
            .finish_non_exhaustive()
    }
}
