//! Property Validation API client: typed operations over rules, tests, runs,
//! templates and results, with lazily paginated listings.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod operations;
pub mod rest;

#[cfg(test)]
mod testing;

pub use auth::{AccessTokenProvider, StaticAccessToken};
pub use client::PropertyValidationClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use operations::{ListParams, ListUrlParams, RunTestParams};
pub use rest::{ReqwestRestClient, RestClient, RestRequest};

pub use propval_core::{take, to_array, EntityListIterator};

#[cfg(test)]
mod tests {
    #[test]
    fn crate_loads() {
        // Empty body: if this test runs, the crate compiles and loads.
    }
}
