//! Request plumbing shared by all operation groups: header formation, typed
//! send helpers, and the HTTP page fetcher behind every list operation.

use std::sync::Arc;

use http::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, Method};
use propval_core::{
    CollectionResponse, EntityListIterator, EntityPage, PageFetcher, PageFuture, PreferReturn,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::url::UrlFormatter;
use crate::auth::AccessTokenProvider;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::rest::{RestClient, RestRequest};

const PREFER: &str = "prefer";
const JSON_CONTENT_TYPE: &str = "application/json";

// ---------------------------------------------------------------------------
// Request options
// ---------------------------------------------------------------------------

/// API a request is addressed to. Selects the version in the `Accept` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Api {
    #[default]
    Validation,
    IModels,
}

/// Header options recognised by [`OperationsBase::form_headers`].
#[derive(Debug, Clone, Default)]
pub(crate) struct RequestOptions {
    /// Overrides the provider-derived token.
    pub access_token: Option<String>,
    /// Adds `Prefer: return=<value>`.
    pub prefer_return: Option<PreferReturn>,
    /// Adds `Content-Type: application/json`.
    pub contains_body: bool,
    pub api: Api,
}

impl RequestOptions {
    pub fn with_token(access_token: Option<&str>) -> Self {
        Self {
            access_token: access_token.map(str::to_owned),
            ..Self::default()
        }
    }

    pub fn prefer(access_token: Option<String>, prefer_return: PreferReturn) -> Self {
        Self {
            access_token,
            prefer_return: Some(prefer_return),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// OperationsBase
// ---------------------------------------------------------------------------

/// State shared by every operation group of one client.
#[derive(Clone)]
pub(crate) struct OperationOptions {
    pub rest_client: Arc<dyn RestClient>,
    pub token_provider: Option<Arc<dyn AccessTokenProvider>>,
    pub config: ClientConfig,
    pub urls: UrlFormatter,
}

#[derive(Clone)]
pub(crate) struct OperationsBase {
    options: Arc<OperationOptions>,
}

impl OperationsBase {
    pub fn new(options: Arc<OperationOptions>) -> Self {
        Self { options }
    }

    pub fn urls(&self) -> &UrlFormatter {
        &self.options.urls
    }

    pub fn config(&self) -> &ClientConfig {
        &self.options.config
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        url: String,
        options: RequestOptions,
    ) -> Result<R, ClientError> {
        let body = self.send(Method::GET, url, &options, None).await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn post<B, R>(
        &self,
        url: String,
        access_token: Option<&str>,
        body: &B,
    ) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_with_body(Method::POST, url, access_token, body).await
    }

    pub async fn put<B, R>(
        &self,
        url: String,
        access_token: Option<&str>,
        body: &B,
    ) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.send_with_body(Method::PUT, url, access_token, body).await
    }

    pub async fn delete(&self, url: String, access_token: Option<&str>) -> Result<(), ClientError> {
        self.send(Method::DELETE, url, &RequestOptions::with_token(access_token), None)
            .await?;
        Ok(())
    }

    /// Builds a lazy iterator over a collection endpoint.
    ///
    /// The token is resolved when the first page is requested and reused,
    /// together with every other header, for all following pages.
    pub fn list<R, T>(
        &self,
        url: String,
        options: RequestOptions,
        accessor: fn(R) -> Vec<T>,
    ) -> EntityListIterator<T, ClientError>
    where
        R: CollectionResponse,
        T: Send + 'static,
    {
        let base = self.clone();
        EntityListIterator::new(move || async move {
            let headers = base.form_headers(&options).await?;
            let pages = PageRequest {
                rest_client: Arc::clone(&base.options.rest_client),
                headers,
                accessor,
            };
            pages.fetch(url).await
        })
    }

    /// Forms request headers.
    ///
    /// An explicit token wins over the token provider. Without either the
    /// request is refused before anything is sent.
    pub async fn form_headers(&self, options: &RequestOptions) -> Result<HeaderMap, ClientError> {
        let access_token = match (&options.access_token, &self.options.token_provider) {
            (Some(token), _) => token.clone(),
            (None, Some(provider)) => provider.access_token().await?,
            (None, None) => return Err(ClientError::MissingAccessToken),
        };

        let api_version = match options.api {
            Api::Validation => &self.options.config.api_version,
            Api::IModels => &self.options.config.imodels_api_version,
        };

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value("authorization", &access_token)?);
        headers.insert(
            ACCEPT,
            header_value("accept", &format!("application/vnd.bentley.{api_version}+json"))?,
        );
        if let Some(prefer) = options.prefer_return {
            headers.insert(PREFER, header_value("prefer", &prefer.header_value())?);
        }
        if options.contains_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }
        Ok(headers)
    }

    async fn send_with_body<B, R>(
        &self,
        method: Method,
        url: String,
        access_token: Option<&str>,
        body: &B,
    ) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let options = RequestOptions {
            contains_body: true,
            ..RequestOptions::with_token(access_token)
        };
        let body = serde_json::to_value(body)?;
        let response = self.send(method, url, &options, Some(body)).await?;
        Ok(serde_json::from_value(response)?)
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        options: &RequestOptions,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let headers = self.form_headers(options).await?;
        let mut request = RestRequest::new(method, url, headers);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        self.options.rest_client.send(request).await
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::from_str(value).map_err(|_| ClientError::InvalidHeader { name })
}

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

/// Fixed part of a paginated request: transport, headers, entity accessor.
///
/// Only the URL changes from page to page; it is taken from the previous
/// page's `_links.next.href`.
struct PageRequest<R, T> {
    rest_client: Arc<dyn RestClient>,
    headers: HeaderMap,
    accessor: fn(R) -> Vec<T>,
}

impl<R, T> PageRequest<R, T>
where
    R: CollectionResponse,
    T: Send + 'static,
{
    fn fetch(self, url: String) -> PageFuture<T, ClientError> {
        Box::pin(async move {
            debug!(%url, "fetching entity page");
            let request = RestRequest::new(Method::GET, url, self.headers.clone());
            let body = self.rest_client.send(request).await?;
            let response: R = serde_json::from_value(body)?;

            let next_url = response.next_href().map(str::to_owned);
            let entities = (self.accessor)(response);
            let next = next_url.map(|url| -> PageFetcher<T, ClientError> {
                Box::new(move || self.fetch(url))
            });
            Ok(EntityPage { entities, next })
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
