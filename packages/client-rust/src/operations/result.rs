//! Validation result operations.

use propval_core::messages::ResultResponse;

use super::base::{OperationsBase, RequestOptions};
use crate::error::ClientError;

#[derive(Clone)]
pub struct ResultOperations {
    base: OperationsBase,
}

impl ResultOperations {
    pub(crate) fn new(base: OperationsBase) -> Self {
        Self { base }
    }

    /// Fetches the failing elements of a finished run.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with `ValidationResultNotFound` for unknown ids.
    pub async fn get(
        &self,
        result_id: &str,
        access_token: Option<&str>,
    ) -> Result<ResultResponse, ClientError> {
        let url = self.base.urls().result_url(result_id);
        self.base.get(url, RequestOptions::with_token(access_token)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{client_for, MockApi};

    #[tokio::test]
    async fn get_result_with_rule_lookup() {
        let api = MockApi::start().await;
        api.on(
            "GET",
            "/validation/results/res-1",
            200,
            json!({
                "result": [{"elementId": "0x1", "elementLabel": "Beam", "ruleIndex": "0", "badValue": "95"}],
                "ruleList": [{"id": "r1", "displayName": "Yaw range"}]
            }),
        );

        let response = client_for(&api).results().get("res-1", None).await.unwrap();

        let failure = &response.result[0];
        assert_eq!(failure.bad_value, "95");
        assert_eq!(response.rule_for(failure).map(|r| r.id.as_str()), Some("r1"));
    }

    #[tokio::test]
    async fn unknown_result_is_api_error() {
        let api = MockApi::start().await;

        let err = client_for(&api).results().get("nope", None).await.unwrap_err();

        assert!(matches!(err, ClientError::Api(_)));
    }
}
