use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity verbosity requested through the `Prefer` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferReturn {
    /// Only ids, display names and links.
    Minimal,
    /// Full entity representation.
    Representation,
}

impl PreferReturn {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Representation => "representation",
        }
    }

    /// Value of the `Prefer` header, e.g. `return=minimal`.
    #[must_use]
    pub fn header_value(self) -> String {
        format!("return={}", self.as_str())
    }
}

impl fmt::Display for PreferReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefer_header_values() {
        assert_eq!(PreferReturn::Minimal.header_value(), "return=minimal");
        assert_eq!(PreferReturn::Representation.header_value(), "return=representation");
    }
}
