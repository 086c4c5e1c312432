//! Endpoint URL construction.

use std::fmt::Write as _;

/// Query parameters accepted by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUrlParams {
    /// Project whose entities are listed.
    pub project_id: String,
    /// Page size (`$top`). The API defaults to 100 and rejects values above 1000.
    pub top: Option<u32>,
}

impl ListUrlParams {
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            top: None,
        }
    }

    #[must_use]
    pub fn with_top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    fn to_query(&self) -> String {
        form_query_string(&[
            ("projectId", Some(self.project_id.clone())),
            ("$top", self.top.map(|top| top.to_string())),
        ])
    }
}

/// Builds Property Validation and iModels API urls from configured bases.
#[derive(Debug, Clone)]
pub struct UrlFormatter {
    base_url: String,
    imodels_base_url: String,
}

impl UrlFormatter {
    #[must_use]
    pub fn new(base_url: &str, imodels_base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            imodels_base_url: imodels_base_url.trim_end_matches('/').to_string(),
        }
    }

    // ---- Rules ----

    #[must_use]
    pub fn rule_list_url(&self, params: Option<&ListUrlParams>) -> String {
        self.list_url("rules", params)
    }

    #[must_use]
    pub fn rules_url(&self) -> String {
        format!("{}/rules", self.base_url)
    }

    #[must_use]
    pub fn single_rule_url(&self, rule_id: &str) -> String {
        format!("{}/rules/{rule_id}", self.base_url)
    }

    // ---- Templates ----

    #[must_use]
    pub fn template_list_url(&self, params: Option<&ListUrlParams>) -> String {
        self.list_url("ruleTemplates", params)
    }

    // ---- Tests ----

    #[must_use]
    pub fn test_list_url(&self, params: Option<&ListUrlParams>) -> String {
        self.list_url("tests", params)
    }

    #[must_use]
    pub fn tests_url(&self) -> String {
        format!("{}/tests", self.base_url)
    }

    #[must_use]
    pub fn single_test_url(&self, test_id: &str) -> String {
        format!("{}/tests/{test_id}", self.base_url)
    }

    // ---- Runs ----

    #[must_use]
    pub fn run_list_url(&self, params: Option<&ListUrlParams>) -> String {
        self.list_url("runs", params)
    }

    /// `POST` target that starts a run.
    #[must_use]
    pub fn runs_url(&self) -> String {
        format!("{}/runs", self.base_url)
    }

    #[must_use]
    pub fn single_run_url(&self, run_id: &str) -> String {
        format!("{}/runs/{run_id}", self.base_url)
    }

    // ---- Results ----

    #[must_use]
    pub fn result_url(&self, result_id: &str) -> String {
        format!("{}/results/{result_id}", self.base_url)
    }

    // ---- iModels ----

    /// Named versions of an iModel, newest changeset first, one per page.
    #[must_use]
    pub fn latest_named_version_url(&self, imodel_id: &str) -> String {
        let query = form_query_string(&[
            ("$top", Some("1".to_string())),
            ("$orderBy", Some("changesetIndex desc".to_string())),
        ]);
        format!("{}/{imodel_id}/namedversions{query}", self.imodels_base_url)
    }

    fn list_url(&self, resource: &str, params: Option<&ListUrlParams>) -> String {
        let query = params.map(ListUrlParams::to_query).unwrap_or_default();
        format!("{}/{resource}{query}", self.base_url)
    }
}

/// Joins parameters into `?k=v&k=v`, skipping unset and blank values.
///
/// Values are not percent-encoded; the transport encodes what the URL
/// grammar requires.
fn form_query_string(params: &[(&str, Option<String>)]) -> String {
    let mut query = String::new();
    for (key, value) in params {
        let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        let separator = if query.is_empty() { '?' } else { '&' };
        let _ = write!(query, "{separator}{key}={value}");
    }
    query
}
