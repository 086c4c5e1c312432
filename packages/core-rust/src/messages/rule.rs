//! Validation rule types.

use serde::{Deserialize, Serialize};

use super::base::{CollectionLinks, CollectionResponse, FunctionParameters, Link, SelfLink};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Severity reported for elements failing a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleSeverity {
    Low,
    Medium,
    High,
    VeryHigh,
}

/// Kind of property a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleDataType {
    Property,
    Aspect,
    TypeDefinition,
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDetailLink {
    /// Link to the full rule representation.
    pub rule: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleUserInfoLinks {
    pub created_by: Link,
    pub last_modified_by: Link,
}

/// Minimal representation of a rule (`Prefer: return=minimal`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalRule {
    pub id: String,
    pub display_name: String,
    #[serde(rename = "_links")]
    pub links: RuleDetailLink,
}

/// Full representation of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDetails {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub creation_date_time: String,
    pub modification_date_time: String,
    pub template_id: String,
    pub function_parameters: FunctionParameters,
    pub severity: RuleSeverity,
    pub ec_schema: String,
    pub ec_class: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub where_clause: Option<String>,
    pub function_name: String,
    pub data_type: RuleDataType,
    #[serde(rename = "_links")]
    pub links: RuleUserInfoLinks,
}

/// Rule as returned by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub template_id: String,
    pub function_parameters: FunctionParameters,
    pub severity: RuleSeverity,
    pub ec_schema: String,
    pub ec_class: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub where_clause: Option<String>,
    pub data_type: RuleDataType,
    #[serde(rename = "_links")]
    pub links: SelfLink,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /rules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    pub template_id: String,
    pub display_name: String,
    pub description: String,
    pub ec_class: String,
    pub ec_schema: String,
    pub where_clause: String,
    pub severity: RuleSeverity,
    pub data_type: RuleDataType,
    pub function_parameters: FunctionParameters,
}

/// Body of `PUT /rules/{id}`. Template, data type and parameters are fixed
/// at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRuleRequest {
    pub display_name: String,
    pub description: String,
    pub ec_class: String,
    pub ec_schema: String,
    pub where_clause: String,
    pub severity: RuleSeverity,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Single-rule envelope shared by get, create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResponse<R> {
    pub rule: R,
}

/// Rule collection page, minimal or full depending on `E`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleListResponse<E> {
    #[serde(rename = "_links")]
    pub links: CollectionLinks,
    pub rules: Vec<E>,
}

impl<E> CollectionResponse for RuleListResponse<E>
where
    E: serde::de::DeserializeOwned + Send + 'static,
{
    fn links(&self) -> &CollectionLinks {
        &self.links
    }
}
