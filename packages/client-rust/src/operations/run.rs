//! Validation run operations.

use std::time::Duration;

use propval_core::messages::{MinimalRun, RunDetails, RunListResponse, RunResponse};
use propval_core::{EntityListIterator, PreferReturn};
use tokio::time::Instant;
use tracing::debug;

use super::base::{OperationsBase, RequestOptions};
use super::ListParams;
use crate::error::ClientError;

#[derive(Clone)]
pub struct RunOperations {
    base: OperationsBase,
}

impl RunOperations {
    pub(crate) fn new(base: OperationsBase) -> Self {
        Self { base }
    }

    /// Lists runs in their minimal form. Pages are fetched on demand.
    #[must_use]
    pub fn get_minimal_list(&self, params: ListParams) -> EntityListIterator<MinimalRun, ClientError> {
        self.list(params, PreferReturn::Minimal)
    }

    /// Lists runs with status and result ids. Pages are fetched on demand.
    #[must_use]
    pub fn get_representation_list(
        &self,
        params: ListParams,
    ) -> EntityListIterator<RunDetails, ClientError> {
        self.list(params, PreferReturn::Representation)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with `ValidationRunNotFound` for unknown ids.
    pub async fn get_single(
        &self,
        run_id: &str,
        access_token: Option<&str>,
    ) -> Result<RunDetails, ClientError> {
        let url = self.base.urls().single_run_url(run_id);
        let response: RunResponse = self.base.get(url, RequestOptions::with_token(access_token)).await?;
        Ok(response.run)
    }

    /// # Errors
    ///
    /// Returns an error if the request is rejected or cannot be sent.
    pub async fn delete(&self, run_id: &str, access_token: Option<&str>) -> Result<(), ClientError> {
        self.base
            .delete(self.base.urls().single_run_url(run_id), access_token)
            .await
    }

    /// Polls the run until its status is terminal.
    ///
    /// The status is checked immediately and then every
    /// `run_poll_interval`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RunWaitTimeout`] if the run is still active
    /// after `timeout`, or the first error from a status check.
    pub async fn wait_for_completion(
        &self,
        run_id: &str,
        access_token: Option<&str>,
        timeout: Duration,
    ) -> Result<RunDetails, ClientError> {
        let deadline = Instant::now() + timeout;
        let interval = self.base.config().run_poll_interval;
        loop {
            let run = self.get_single(run_id, access_token).await?;
            if run.status.is_terminal() {
                return Ok(run);
            }
            debug!(run_id, status = ?run.status, "run still active");

            if Instant::now() + interval > deadline {
                return Err(ClientError::RunWaitTimeout {
                    run_id: run_id.to_string(),
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                });
            }
            tokio::time::sleep(interval).await;
        }
    }

    fn list<E>(&self, params: ListParams, prefer: PreferReturn) -> EntityListIterator<E, ClientError>
    where
        E: serde::de::DeserializeOwned + Send + 'static,
    {
        let url = self.base.urls().run_list_url(params.url_params.as_ref());
        self.base.list(
            url,
            RequestOptions::prefer(params.access_token, prefer),
            |response: RunListResponse<E>| response.runs,
        )
    }
}
