//! Validation rule operations.

use propval_core::messages::{
    CreateRuleRequest, MinimalRule, Rule, RuleDetails, RuleListResponse, RuleResponse,
    UpdateRuleRequest,
};
use propval_core::{EntityListIterator, PreferReturn};

use super::base::{OperationsBase, RequestOptions};
use super::ListParams;
use crate::error::ClientError;

#[derive(Clone)]
pub struct RuleOperations {
    base: OperationsBase,
}

impl RuleOperations {
    pub(crate) fn new(base: OperationsBase) -> Self {
        Self { base }
    }

    /// Lists rules in their minimal form. Pages are fetched on demand.
    #[must_use]
    pub fn get_minimal_list(&self, params: ListParams) -> EntityListIterator<MinimalRule, ClientError> {
        self.list(params, PreferReturn::Minimal)
    }

    /// Lists rules with full details. Pages are fetched on demand.
    #[must_use]
    pub fn get_representation_list(
        &self,
        params: ListParams,
    ) -> EntityListIterator<RuleDetails, ClientError> {
        self.list(params, PreferReturn::Representation)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with `ValidationRuleNotFound` for unknown ids.
    pub async fn get_single(
        &self,
        rule_id: &str,
        access_token: Option<&str>,
    ) -> Result<RuleDetails, ClientError> {
        let url = self.base.urls().single_rule_url(rule_id);
        let response: RuleResponse<RuleDetails> =
            self.base.get(url, RequestOptions::with_token(access_token)).await?;
        Ok(response.rule)
    }

    /// # Errors
    ///
    /// Returns an error if the request is rejected or cannot be sent.
    pub async fn create(
        &self,
        request: &CreateRuleRequest,
        access_token: Option<&str>,
    ) -> Result<Rule, ClientError> {
        let response: RuleResponse<Rule> = self
            .base
            .post(self.base.urls().rules_url(), access_token, request)
            .await?;
        Ok(response.rule)
    }

    /// # Errors
    ///
    /// Returns an error if the request is rejected or cannot be sent.
    pub async fn update(
        &self,
        rule_id: &str,
        request: &UpdateRuleRequest,
        access_token: Option<&str>,
    ) -> Result<Rule, ClientError> {
        let response: RuleResponse<Rule> = self
            .base
            .put(self.base.urls().single_rule_url(rule_id), access_token, request)
            .await?;
        Ok(response.rule)
    }

    /// # Errors
    ///
    /// Returns an error if the request is rejected or cannot be sent.
    pub async fn delete(&self, rule_id: &str, access_token: Option<&str>) -> Result<(), ClientError> {
        self.base
            .delete(self.base.urls().single_rule_url(rule_id), access_token)
            .await
    }

    fn list<E>(&self, params: ListParams, prefer: PreferReturn) -> EntityListIterator<E, ClientError>
    where
        E: serde::de::DeserializeOwned + Send + 'static,
    {
        let url = self.base.urls().rule_list_url(params.url_params.as_ref());
        self.base.list(
            url,
            RequestOptions::prefer(params.access_token, prefer),
            |response: RuleListResponse<E>| response.rules,
        )
    }
}

#[cfg(test)]
mod tests {
    use propval_core::messages::{FunctionParameters, RuleDataType, RuleSeverity};
    use propval_core::{to_array, ValidationErrorCode};
    use serde_json::{json, Value};

    use super::*;
    use crate::testing::{client_for, MockApi};

    fn rule_details(id: &str) -> Value {
        json!({
            "id": id,
            "displayName": "Yaw range",
            "description": "yaw within bounds",
            "creationDateTime": "2023-01-01T00:00:00Z",
            "modificationDateTime": "2023-01-01T00:00:00Z",
            "templateId": "tmpl",
            "functionParameters": {"propertyName": "Yaw", "lowerBound": "0", "upperBound": "90"},
            "severity": "high",
            "ecSchema": "Generic",
            "ecClass": "PhysicalObject",
            "whereClause": "Yaw > 0",
            "functionName": "PropertyValueRange",
            "dataType": "property",
            "_links": {"createdBy": {"href": "u1"}, "lastModifiedBy": {"href": "u1"}}
        })
    }

    fn created_rule(id: &str) -> Value {
        json!({
            "rule": {
                "id": id,
                "displayName": "Yaw range",
                "description": "yaw within bounds",
                "templateId": "tmpl",
                "functionParameters": {"propertyName": "Yaw"},
                "severity": "high",
                "ecSchema": "Generic",
                "ecClass": "PhysicalObject",
                "dataType": "property",
                "_links": {"self": {"href": format!("rules/{id}")}}
            }
        })
    }

    #[tokio::test]
    async fn representation_list_sends_prefer_representation() {
        let api = MockApi::start().await;
        api.on(
            "GET",
            "/validation/rules?projectId=p&$top=2",
            200,
            json!({"_links": {"self": {"href": "x"}}, "rules": [rule_details("r1"), rule_details("r2")]}),
        );

        let client = client_for(&api);
        let rules = to_array(
            client
                .rules()
                .get_representation_list(ListParams::for_project("p").with_top(2)),
        )
        .await
        .unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].where_clause.as_deref(), Some("Yaw > 0"));
        assert_eq!(api.requests()[0].header("prefer"), Some("return=representation"));
    }

    #[tokio::test]
    async fn get_single_unwraps_rule() {
        let api = MockApi::start().await;
        api.on("GET", "/validation/rules/r1", 200, json!({"rule": rule_details("r1")}));

        let rule = client_for(&api).rules().get_single("r1", None).await.unwrap();

        assert_eq!(rule.id, "r1");
        assert_eq!(rule.severity, RuleSeverity::High);
        assert_eq!(api.requests()[0].header("prefer"), None);
    }

    #[tokio::test]
    async fn get_single_not_found() {
        let api = MockApi::start().await;
        api.on(
            "GET",
            "/validation/rules/nope",
            404,
            json!({"error": {"code": "ValidationRuleNotFound", "message": "Requested rule is not available."}}),
        );

        let err = client_for(&api).rules().get_single("nope", None).await.unwrap_err();

        assert_eq!(err.api_code(), Some(ValidationErrorCode::ValidationRuleNotFound));
    }

    #[tokio::test]
    async fn create_posts_json_body() {
        let api = MockApi::start().await;
        api.on("POST", "/validation/rules", 201, created_rule("r9"));

        let request = CreateRuleRequest {
            template_id: "tmpl".into(),
            display_name: "Yaw range".into(),
            description: "yaw within bounds".into(),
            ec_class: "PhysicalObject".into(),
            ec_schema: "Generic".into(),
            where_clause: String::new(),
            severity: RuleSeverity::High,
            data_type: RuleDataType::Property,
            function_parameters: FunctionParameters {
                property_name: Some("Yaw".into()),
                ..FunctionParameters::default()
            },
        };
        let rule = client_for(&api).rules().create(&request, None).await.unwrap();

        assert_eq!(rule.id, "r9");
        let recorded = &api.requests()[0];
        assert_eq!(recorded.header("content-type"), Some("application/json"));
        let body = recorded.body.as_ref().unwrap();
        assert_eq!(body["templateId"], "tmpl");
        assert_eq!(body["dataType"], "property");
        assert_eq!(body["functionParameters"], json!({"propertyName": "Yaw"}));
    }

    #[tokio::test]
    async fn update_puts_to_rule_url() {
        let api = MockApi::start().await;
        api.on("PUT", "/validation/rules/r9", 200, created_rule("r9"));

        let request = UpdateRuleRequest {
            display_name: "Yaw range".into(),
            description: String::new(),
            ec_class: "PhysicalObject".into(),
            ec_schema: "Generic".into(),
            where_clause: String::new(),
            severity: RuleSeverity::Low,
        };
        client_for(&api)
            .rules()
            .update("r9", &request, Some("Bearer explicit"))
            .await
            .unwrap();

        let recorded = &api.requests()[0];
        assert_eq!(recorded.method, "PUT");
        assert_eq!(recorded.header("authorization"), Some("Bearer explicit"));
        assert_eq!(recorded.body.as_ref().unwrap()["severity"], "low");
    }

    #[tokio::test]
    async fn delete_accepts_empty_response() {
        let api = MockApi::start().await;
        api.on_empty("DELETE", "/validation/rules/r9", 204);

        client_for(&api).rules().delete("r9", None).await.unwrap();

        assert_eq!(api.hits("/validation/rules/r9"), 1);
    }
}
