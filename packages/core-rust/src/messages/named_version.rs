//! Named versions from the iModels API.
//!
//! A run needs a named version. When the caller does not pick one, the newest
//! named version of the iModel is looked up here.

use serde::{Deserialize, Serialize};

use super::base::{CollectionLinks, CollectionResponse};

/// Minimal representation of an iModel named version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalNamedVersion {
    pub id: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub changeset_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub changeset_index: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedVersionListResponse {
    #[serde(rename = "_links")]
    pub links: CollectionLinks,
    pub named_versions: Vec<MinimalNamedVersion>,
}

impl CollectionResponse for NamedVersionListResponse {
    fn links(&self) -> &CollectionLinks {
        &self.links
    }
}
