//! Operation groups, one per API resource.

pub(crate) mod base;
pub mod result;
pub mod rule;
pub mod run;
pub mod template;
pub mod url;

pub use result::ResultOperations;
pub use rule::RuleOperations;
pub use run::RunOperations;
pub use template::TemplateOperations;
pub use test::{RunTestParams, TestOperations};
pub use url::{ListUrlParams, UrlFormatter};

/// Parameters shared by every list operation.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Overrides the client's token provider for this listing.
    pub access_token: Option<String>,
    pub url_params: Option<ListUrlParams>,
}

impl ListParams {
    /// Lists entities of `project_id` with the API's default page size.
    #[must_use]
    pub fn for_project(project_id: impl Into<String>) -> Self {
        Self {
            access_token: None,
            url_params: Some(ListUrlParams::new(project_id)),
        }
    }

    /// Sets the page size. Has no effect without a project.
    #[must_use]
    pub fn with_top(mut self, top: u32) -> Self {
        self.url_params = self.url_params.map(|params| params.with_top(top));
        self
    }

    #[must_use]
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }
}
