//! Types shared across all resource domains.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// Link to a related entity or entity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// `_links` object holding only a link to the entity itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfLink {
    #[serde(rename = "self")]
    pub current: Link,
}

/// Links included in every collection page response.
///
/// `next` already carries the pagination query parameters of the original
/// request, so following it needs no bookkeeping on the client side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionLinks {
    /// Link to the current page.
    #[serde(rename = "self")]
    pub current: Link,
    /// Link to the next page. `null` (or absent) on the last page.
    #[serde(default)]
    pub next: Option<Link>,
}

/// A deserialized collection page response.
///
/// Entities are extracted by an accessor chosen by the operation, since each
/// resource nests them under a different field name.
pub trait CollectionResponse: DeserializeOwned + Send + 'static {
    fn links(&self) -> &CollectionLinks;

    /// Href of the following page, if any.
    fn next_href(&self) -> Option<&str> {
        self.links().next.as_ref().map(|link| link.href.as_str())
    }
}

// ---------------------------------------------------------------------------
// Rule function parameters
// ---------------------------------------------------------------------------

/// Function parameters of a rule or rule template.
///
/// Which fields are meaningful depends on the template the rule is based on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionParameters {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub property_name: Option<String>,
    /// Regex pattern.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub upper_bound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lower_bound: Option<String>,
    /// Nested template id (multi-property validation).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub template_id: Option<String>,
    /// Nested parameters (multi-property validation).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub function_parameters: Option<String>,
    /// Schemas, classes, and properties to process (multi-property validation).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schemas: Option<Vec<SchemaList>>,
}

/// Schema with the classes to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaList {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
    #[serde(default)]
    pub entities: Vec<ClassList>,
}

/// Class with the properties to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassList {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyList>,
    /// Aspect properties of the class.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aspects: Vec<PropertyList>,
    /// Type definition properties of the class.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_definitions: Vec<PropertyList>,
}

/// A single property to process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyList {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}
