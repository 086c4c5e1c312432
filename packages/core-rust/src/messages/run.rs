//! Validation run types.

use serde::{Deserialize, Serialize};

use super::base::{CollectionLinks, CollectionResponse, Link};

/// Lifecycle status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunStatus {
    Queued,
    Started,
    #[serde(rename = "downloadingIModel")]
    DownloadingIModel,
    InProgress,
    StoringResults,
    Completed,
    CompletedToLimit,
    Failed,
    Cancelled,
    /// Status not known to this client.
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Returns `true` once the run will not change status any more.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::CompletedToLimit | Self::Failed | Self::Cancelled
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDetailLink {
    /// Result produced by the run.
    pub result: Link,
    /// Test the run executed.
    pub test: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalRun {
    pub id: String,
    pub display_name: String,
    #[serde(rename = "_links")]
    pub links: RunDetailLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunDetails {
    pub id: String,
    pub display_name: String,
    pub executed_date_time: String,
    /// Number of issues found, as reported by the API (a decimal string).
    pub count: String,
    /// User that started the run.
    pub user_name: String,
    pub status: RunStatus,
    pub result_id: String,
    #[serde(rename = "_links")]
    pub links: RunDetailLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResponse {
    pub run: RunDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunListResponse<E> {
    #[serde(rename = "_links")]
    pub links: CollectionLinks,
    pub runs: Vec<E>,
}

impl<E> CollectionResponse for RunListResponse<E>
where
    E: serde::de::DeserializeOwned + Send + 'static,
{
    fn links(&self) -> &CollectionLinks {
        &self.links
    }
}
