//! Wire types for the Property Validation API.
//!
//! Every struct mirrors a JSON body of the API. Field names are converted with
//! `#[serde(rename_all = "camelCase")]`; the `_links` members are exposed as
//! `links`.
//!
//! - [`base`]: links, collection envelope, function parameters
//! - [`rule`], [`test`], [`run`], [`template`], [`result`]: per-resource types
//! - [`named_version`]: iModels API named versions used to start runs

pub mod base;
pub mod named_version;
pub mod result;
pub mod rule;
pub mod run;
pub mod template;

pub use base::{
    ClassList, CollectionLinks, CollectionResponse, FunctionParameters, Link, PropertyList,
    SchemaList, SelfLink,
};
pub use named_version::{MinimalNamedVersion, NamedVersionListResponse};
pub use result::{ResultDetails, ResultResponse, ResultRule};
pub use rule::{
    CreateRuleRequest, MinimalRule, Rule, RuleDataType, RuleDetails, RuleListResponse,
    RuleResponse, RuleSeverity, UpdateRuleRequest,
};
pub use run::{MinimalRun, RunDetails, RunListResponse, RunResponse, RunStatus};
pub use template::{RuleTemplate, TemplateListResponse};
pub use test::{
    CreateTestRequest, RunTestRequest, RunTestResponse, StartedRun, Test, TestDetails, TestItem,
    TestListResponse, TestResponse, UpdateTestRequest,
};
