//! Structured errors reported by the Property Validation API.
//!
//! Non-2xx responses are translated into [`ValidationError`] by the transport
//! before they reach callers. The translation rules live here so that every
//! transport produces identical errors for identical responses.

use std::fmt;
use std::fmt::Write as _;

use serde::Deserialize;

/// Message used when the API does not supply one.
pub const DEFAULT_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Message for `401` responses, whose body is not reliable.
pub const UNAUTHORIZED_MESSAGE: &str =
    "The user is unauthorized. Please provide valid authentication credentials.";

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Error codes returned by the API.
///
/// `Unrecognized` covers codes missing from the response or not known to this
/// client. `Unknown` is used when no HTTP status is available at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    Unrecognized,
    Unknown,
    Unauthorized,
    InsufficientPermissions,
    RateLimitExceeded,
    TooManyRequests,
    InvalidValidationRequest,
    RequestTooLarge,
    ResourceQuotaExceeded,
    MutuallyExclusivePropertiesProvided,
    MissingRequiredProperty,
    MissingRequiredParameter,
    MissingRequiredHeader,
    InvalidValue,
    InvalidHeaderValue,
    InvalidRequestBody,
    MissingRequestBody,
    ProjectNotFound,
    IModelNotFound,
    NamedVersionNotFound,
    ValidationResultNotFound,
    ValidationRuleNotFound,
    ValidationRuleTemplateNotFound,
    ValidationRunNotFound,
    ValidationTestNotFound,
}

impl ValidationErrorCode {
    const ALL: [Self; 25] = [
        Self::Unrecognized,
        Self::Unknown,
        Self::Unauthorized,
        Self::InsufficientPermissions,
        Self::RateLimitExceeded,
        Self::TooManyRequests,
        Self::InvalidValidationRequest,
        Self::RequestTooLarge,
        Self::ResourceQuotaExceeded,
        Self::MutuallyExclusivePropertiesProvided,
        Self::MissingRequiredProperty,
        Self::MissingRequiredParameter,
        Self::MissingRequiredHeader,
        Self::InvalidValue,
        Self::InvalidHeaderValue,
        Self::InvalidRequestBody,
        Self::MissingRequestBody,
        Self::ProjectNotFound,
        Self::IModelNotFound,
        Self::NamedVersionNotFound,
        Self::ValidationResultNotFound,
        Self::ValidationRuleNotFound,
        Self::ValidationRuleTemplateNotFound,
        Self::ValidationRunNotFound,
        Self::ValidationTestNotFound,
    ];

    /// Wire representation of the code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unrecognized => "Unrecognized",
            Self::Unknown => "Unknown",
            Self::Unauthorized => "Unauthorized",
            Self::InsufficientPermissions => "InsufficientPermissions",
            Self::RateLimitExceeded => "RateLimitExceeded",
            Self::TooManyRequests => "TooManyRequests",
            Self::InvalidValidationRequest => "InvalidValidationRequest",
            Self::RequestTooLarge => "RequestTooLarge",
            Self::ResourceQuotaExceeded => "ResourceQuotaExceeded",
            Self::MutuallyExclusivePropertiesProvided => "MutuallyExclusivePropertiesProvided",
            Self::MissingRequiredProperty => "MissingRequiredProperty",
            Self::MissingRequiredParameter => "MissingRequiredParameter",
            Self::MissingRequiredHeader => "MissingRequiredHeader",
            Self::InvalidValue => "InvalidValue",
            Self::InvalidHeaderValue => "InvalidHeaderValue",
            Self::InvalidRequestBody => "InvalidRequestBody",
            Self::MissingRequestBody => "MissingRequestBody",
            Self::ProjectNotFound => "ProjectNotFound",
            Self::IModelNotFound => "iModelNotFound",
            Self::NamedVersionNotFound => "NamedVersionNotFound",
            Self::ValidationResultNotFound => "ValidationResultNotFound",
            Self::ValidationRuleNotFound => "ValidationRuleNotFound",
            Self::ValidationRuleTemplateNotFound => "ValidationRuleTemplateNotFound",
            Self::ValidationRunNotFound => "ValidationRunNotFound",
            Self::ValidationTestNotFound => "ValidationTestNotFound",
        }
    }

    /// Maps an API code onto a known variant, falling back to `Unrecognized`.
    ///
    /// A missing or empty code is also `Unrecognized`.
    #[must_use]
    pub fn from_api_code(code: Option<&str>) -> Self {
        let Some(code) = code.filter(|c| !c.is_empty()) else {
            return Self::Unrecognized;
        };
        Self::ALL
            .into_iter()
            .find(|known| known.as_str() == code || (*known == Self::IModelNotFound && code == "IModelNotFound"))
            .unwrap_or(Self::Unrecognized)
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// One entry of the API's error detail list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrorDetail {
    pub code: ValidationErrorCode,
    pub message: String,
    /// Property or parameter the detail refers to.
    pub target: Option<String>,
}

/// Error translated from a non-2xx API response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ValidationError {
    pub code: ValidationErrorCode,
    /// Human readable message. Details, if any, are already appended.
    pub message: String,
    pub details: Option<Vec<ValidationErrorDetail>>,
}

#[derive(Deserialize)]
struct ApiErrorWrapper {
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    code: Option<String>,
    message: Option<String>,
    details: Option<Vec<ApiErrorDetail>>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    target: Option<String>,
}

impl ValidationError {
    #[must_use]
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Translates an HTTP error response.
    ///
    /// `status` is `None` when the response never arrived. A `401` ignores the
    /// body and uses [`UNAUTHORIZED_MESSAGE`]. Any body that is not a
    /// `{ "error": { ... } }` envelope yields `Unrecognized` with the default
    /// message.
    #[must_use]
    pub fn from_response(status: Option<u16>, body: Option<&serde_json::Value>) -> Self {
        let Some(status) = status else {
            return Self::new(ValidationErrorCode::Unknown, DEFAULT_ERROR_MESSAGE);
        };
        if status == 401 {
            return Self::new(ValidationErrorCode::Unauthorized, UNAUTHORIZED_MESSAGE);
        }

        let api_error = body
            .and_then(|b| ApiErrorWrapper::deserialize(b).ok())
            .and_then(|w| w.error);
        let Some(api_error) = api_error else {
            return Self::new(ValidationErrorCode::Unrecognized, DEFAULT_ERROR_MESSAGE);
        };

        let details = api_error.details.map(|details| {
            details
                .into_iter()
                .map(|d| ValidationErrorDetail {
                    code: ValidationErrorCode::from_api_code(d.code.as_deref()),
                    message: d.message,
                    target: d.target,
                })
                .collect::<Vec<_>>()
        });

        Self {
            code: ValidationErrorCode::from_api_code(api_error.code.as_deref()),
            message: format_message(api_error.message.as_deref(), details.as_deref()),
            details,
        }
    }
}

fn format_message(message: Option<&str>, details: Option<&[ValidationErrorDetail]>) -> String {
    let mut result = message.unwrap_or(DEFAULT_ERROR_MESSAGE).to_string();
    let Some(details) = details.filter(|d| !d.is_empty()) else {
        return result;
    };

    result.push_str(" Details:\n");
    for (i, detail) in details.iter().enumerate() {
        let _ = write!(result, "{}. {}: {}", i + 1, detail.code, detail.message);
        if let Some(target) = detail.target.as_deref().filter(|t| !t.is_empty()) {
            let _ = write!(result, " Target: {target}.");
        }
        result.push('\n');
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_status_is_unknown() {
        let err = ValidationError::from_response(None, Some(&json!({"error": {"code": "InvalidValue"}})));
        assert_eq!(err.code, ValidationErrorCode::Unknown);
        assert_eq!(err.message, DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn unauthorized_ignores_body() {
        let body = json!({"statusCode": 401, "message": "Access denied due to invalid subscription key."});
        let err = ValidationError::from_response(Some(401), Some(&body));
        assert_eq!(err.code, ValidationErrorCode::Unauthorized);
        assert_eq!(err.message, UNAUTHORIZED_MESSAGE);
        assert!(err.details.is_none());
    }

    #[test]
    fn known_code_and_message_are_kept() {
        let body = json!({"error": {"code": "ValidationRuleNotFound", "message": "Requested rule is not available."}});
        let err = ValidationError::from_response(Some(404), Some(&body));
        assert_eq!(err.code, ValidationErrorCode::ValidationRuleNotFound);
        assert_eq!(err.message, "Requested rule is not available.");
        assert_eq!(err.to_string(), "ValidationRuleNotFound: Requested rule is not available.");
    }

    #[test]
    fn unknown_code_is_unrecognized() {
        let body = json!({"error": {"code": "SomethingNew", "message": "m"}});
        let err = ValidationError::from_response(Some(400), Some(&body));
        assert_eq!(err.code, ValidationErrorCode::Unrecognized);
    }

    #[test]
    fn non_envelope_body_is_unrecognized_with_default_message() {
        for body in [json!(null), json!("oops"), json!({"unexpected": true})] {
            let err = ValidationError::from_response(Some(500), Some(&body));
            assert_eq!(err.code, ValidationErrorCode::Unrecognized);
            assert_eq!(err.message, DEFAULT_ERROR_MESSAGE);
        }
        let err = ValidationError::from_response(Some(500), None);
        assert_eq!(err.code, ValidationErrorCode::Unrecognized);
    }

    #[test]
    fn details_are_appended_to_message() {
        let body = json!({
            "error": {
                "code": "InvalidValidationRequest",
                "message": "Cannot create rule.",
                "details": [
                    {"code": "MissingRequiredProperty", "message": "Required property is missing.", "target": "displayName"},
                    {"code": "InvalidValue", "message": "Bad severity.", "target": ""}
                ]
            }
        });
        let err = ValidationError::from_response(Some(422), Some(&body));

        assert_eq!(err.code, ValidationErrorCode::InvalidValidationRequest);
        assert_eq!(
            err.message,
            "Cannot create rule. Details:\n\
             1. MissingRequiredProperty: Required property is missing. Target: displayName.\n\
             2. InvalidValue: Bad severity.\n"
        );
        let details = err.details.expect("details");
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].target.as_deref(), Some("displayName"));
        assert_eq!(details[1].code, ValidationErrorCode::InvalidValue);
    }

    #[test]
    fn empty_details_leave_message_untouched() {
        let body = json!({"error": {"code": "InvalidValue", "details": []}});
        let err = ValidationError::from_response(Some(400), Some(&body));
        assert_eq!(err.message, DEFAULT_ERROR_MESSAGE);
        assert_eq!(err.details, Some(vec![]));
    }

    #[test]
    fn imodel_not_found_accepts_both_spellings() {
        assert_eq!(
            ValidationErrorCode::from_api_code(Some("iModelNotFound")),
            ValidationErrorCode::IModelNotFound
        );
        assert_eq!(
            ValidationErrorCode::from_api_code(Some("IModelNotFound")),
            ValidationErrorCode::IModelNotFound
        );
    }

    #[test]
    fn every_code_round_trips_through_its_wire_name() {
        for code in ValidationErrorCode::ALL {
            assert_eq!(ValidationErrorCode::from_api_code(Some(code.as_str())), code);
        }
        assert_eq!(ValidationErrorCode::from_api_code(None), ValidationErrorCode::Unrecognized);
        assert_eq!(ValidationErrorCode::from_api_code(Some("")), ValidationErrorCode::Unrecognized);
    }
}
