//! Validation result types.

use serde::{Deserialize, Serialize};

/// One element that failed a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDetails {
    pub element_id: String,
    pub element_label: String,
    /// Index into [`ResultResponse::rule_list`].
    pub rule_index: String,
    pub bad_value: String,
}

/// Rule referenced from [`ResultDetails::rule_index`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRule {
    pub id: String,
    pub display_name: String,
}

/// Body of `GET /results/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultResponse {
    pub result: Vec<ResultDetails>,
    pub rule_list: Vec<ResultRule>,
}

impl ResultResponse {
    /// Resolves the rule a result entry refers to.
    ///
    /// Returns `None` if the index is not a number or out of range.
    #[must_use]
    pub fn rule_for(&self, details: &ResultDetails) -> Option<&ResultRule> {
        let index: usize = details.rule_index.trim().parse().ok()?;
        self.rule_list.get(index)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn rule_index_resolves_into_rule_list() {
        let response: ResultResponse = serde_json::from_value(json!({
            "result": [
                {"elementId": "0x20000000abc", "elementLabel": "Beam [1]", "ruleIndex": "1", "badValue": "-3"},
                {"elementId": "0x20000000abd", "elementLabel": "Beam [2]", "ruleIndex": "7", "badValue": ""}
            ],
            "ruleList": [
                {"id": "r0", "displayName": "Length"},
                {"id": "r1", "displayName": "Yaw range"}
            ]
        }))
        .unwrap();

        assert_eq!(response.rule_for(&response.result[0]).map(|r| r.id.as_str()), Some("r1"));
        assert!(response.rule_for(&response.result[1]).is_none());
    }
}
