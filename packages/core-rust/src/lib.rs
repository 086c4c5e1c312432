//! Property Validation core: paginated entity iteration, API wire types, and
//! API error translation. Transport-free; HTTP lives in `propval-client`.

pub mod error;
pub mod iterator;
pub mod messages;
pub mod types;

pub use error::{ValidationError, ValidationErrorCode, ValidationErrorDetail};
pub use iterator::{take, to_array, EntityListIterator, EntityPage, PageFetcher, PageFuture};
pub use messages::{CollectionLinks, CollectionResponse, Link};
pub use types::PreferReturn;

#[cfg(test)]
mod tests {
    #[test]
    fn crate_loads() {
        // Empty body: if this test runs, the crate compiles and loads.
    }
}
