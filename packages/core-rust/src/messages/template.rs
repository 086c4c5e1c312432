//! Rule template types.

use serde::{Deserialize, Serialize};

use super::base::{CollectionLinks, CollectionResponse, FunctionParameters};

/// Template a rule is instantiated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTemplate {
    pub id: String,
    pub display_name: String,
    pub description: String,
    /// Prompt shown when filling in the template parameters.
    pub prompt: String,
    pub template_expression: FunctionParameters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListResponse {
    #[serde(rename = "_links")]
    pub links: CollectionLinks,
    pub rule_templates: Vec<RuleTemplate>,
}

impl CollectionResponse for TemplateListResponse {
    fn links(&self) -> &CollectionLinks {
        &self.links
    }
}
