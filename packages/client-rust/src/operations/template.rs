//! Rule template operations.

use propval_core::messages::{RuleTemplate, TemplateListResponse};
use propval_core::{EntityListIterator, PreferReturn};

use super::base::{OperationsBase, RequestOptions};
use super::ListParams;
use crate::error::ClientError;

#[derive(Clone)]
pub struct TemplateOperations {
    base: OperationsBase,
}

impl TemplateOperations {
    pub(crate) fn new(base: OperationsBase) -> Self {
        Self { base }
    }

    /// Lists the rule templates available to a project.
    #[must_use]
    pub fn get_list(&self, params: ListParams) -> EntityListIterator<RuleTemplate, ClientError> {
        let url = self.base.urls().template_list_url(params.url_params.as_ref());
        self.base.list(
            url,
            RequestOptions::prefer(params.access_token, PreferReturn::Representation),
            |response: TemplateListResponse| response.rule_templates,
        )
    }
}
