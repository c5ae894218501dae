//! The request builder: credential validation, parameter handling, and the
//! three provider operations (max-date, row-count, data retrieval with
//! optional pagination).
//!
//! Operations are stateless request/response round trips. The only mutable
//! state is the parameter mapping, which every operation re-reads when it
//! serializes the outgoing request. One builder instance is single-writer;
//! concurrent use from multiple threads must be serialized by the caller.

use crate::ati::auth::AuthCredential;
use crate::ati::format::{ResponseFormat, Route};
use crate::ati::params::{ParamsInput, QueryParameters};
use crate::ati::responses::{MaxDateReply, ResponseBatch, RowCountReply};
use crate::ati::transport::{HttpTransport, Transport};
use crate::error::{ApiError, ParamsError, Result};
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Production endpoint of the AT Internet v2 data API.
pub const DEFAULT_BASE_URL: &str = "https://apirest.atinternet-solutions.com/data/v2";

/// Records requested per page when fetching all rows.
///
/// 10000 is the provider's maximum `max-results` value. Overridable through
/// [`RequestOptions::page_size`].
pub const DEFAULT_PAGE_SIZE: u64 = 10_000;

/// Immutable-after-construction request configuration.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Fetch every row for the period, paging as needed
    pub fetch_all_rows: bool,
    /// Payload format for data retrieval
    pub format: ResponseFormat,
    /// Page size used when `fetch_all_rows` is set
    pub page_size: u64,
    /// Base endpoint, overridable for proxies and tests
    pub base_url: String,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            fetch_all_rows: false,
            format: ResponseFormat::Json,
            page_size: DEFAULT_PAGE_SIZE,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// An authenticated request setup against the AT Internet API.
pub struct RequestBuilder {
    params: QueryParameters,
    auth: AuthCredential,
    options: RequestOptions,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder").finish_non_exhaustive()
    }
}

impl RequestBuilder {
    /// Creates a builder with the default reqwest-backed transport.
    ///
    /// `params` is either a `&`-delimited string or an already built
    /// [`QueryParameters`]; `auth` must carry a `header:` or `apikey:`
    /// prefix. Both are validated here; operations never re-validate.
    pub fn new(
        params: impl Into<ParamsInput>,
        auth: &str,
        options: RequestOptions,
    ) -> Result<Self> {
        Self::with_transport(params, auth, options, Arc::new(HttpTransport::new()))
    }

    /// Creates a builder with an injected transport.
    pub fn with_transport(
        params: impl Into<ParamsInput>,
        auth: &str,
        options: RequestOptions,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        if options.page_size == 0 {
            return Err(ParamsError::ZeroPageSize.into());
        }
        let params = params.into().resolve()?;
        let auth: AuthCredential = auth.parse()?;
        Ok(Self {
            params,
            auth,
            options,
            transport,
        })
    }

    /// Current parameter mapping.
    pub fn params(&self) -> &QueryParameters {
        &self.params
    }

    /// Mutable access for in-place parameter edits between operations.
    pub fn params_mut(&mut self) -> &mut QueryParameters {
        &mut self.params
    }

    /// The validated credential.
    pub fn auth(&self) -> &AuthCredential {
        &self.auth
    }

    /// The request configuration.
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Retrieves the most recent timestamp for which data is available.
    ///
    /// Only the `space` parameter is sent; the provider rejects anything
    /// more on this route.
    pub async fn get_maxdate(&self) -> Result<NaiveDateTime> {
        let space = self
            .params
            .get("space")
            .ok_or_else(|| ApiError::MissingParameter("space".to_string()))?;
        let mut params = QueryParameters::new();
        params.set("space", space);

        let body = self
            .call(Route::GetMaxDate, ResponseFormat::Json, &params)
            .await?;
        Ok(MaxDateReply::parse(&body)?)
    }

    /// Retrieves the total number of rows matching the current parameters.
    pub async fn get_rows(&self) -> Result<u64> {
        let mut params = self.params.clone();
        params.set("max-results", "1");
        params.set("page-num", "1");

        let body = self
            .call(Route::GetRowCount, ResponseFormat::Json, &params)
            .await?;
        Ok(RowCountReply::parse(&body)?)
    }

    /// Retrieves the data matching the current parameters.
    ///
    /// Without `fetch_all_rows` this is exactly one call, honoring any
    /// `max-results`/`page-num` already present in the mapping. With it,
    /// the total row count is fetched first, then one call per page with a
    /// strictly increasing `page-num`, accumulated in page order. A JSON
    /// page shorter than the page size ends the loop early.
    ///
    /// Any page failure aborts the whole operation; no partial result is
    /// returned.
    pub async fn get_data(&self) -> Result<Vec<ResponseBatch>> {
        let format = self.options.format;

        if !self.options.fetch_all_rows {
            let body = self.call(Route::GetData, format, &self.params).await?;
            return Ok(vec![ResponseBatch::decode(format, body)?]);
        }

        let rows = self.get_rows().await?;
        let page_size = self.options.page_size;
        let pages = rows.div_ceil(page_size);
        tracing::debug!(rows, page_size, pages, "fetching all rows");

        let mut batches = Vec::new();
        let mut params = self.params.clone();
        params.set("max-results", page_size.to_string());

        for page in 1..=pages {
            params.set("page-num", page.to_string());
            let body = self.call(Route::GetData, format, &params).await?;
            let batch = ResponseBatch::decode(format, body)?;
            let short_page = batch
                .record_count()
                .is_some_and(|count| (count as u64) < page_size);
            batches.push(batch);
            if short_page {
                tracing::debug!(page, "short page, ending pagination");
                break;
            }
        }

        Ok(batches)
    }

    /// One GET round trip: URL assembly, credential placement, status
    /// check. Returns the raw body on success.
    async fn call(
        &self,
        route: Route,
        format: ResponseFormat,
        params: &QueryParameters,
    ) -> Result<String, ApiError> {
        let format = route.narrow_format(format);
        let url = format!("{}/{}/{}", self.options.base_url, format, route);

        let mut pairs = params.to_pairs();
        let mut headers = Vec::new();
        match &self.auth {
            AuthCredential::Header(encoded) => {
                headers.push(("authorization".to_string(), format!("Basic {}", encoded)));
            }
            AuthCredential::ApiKey(key) => {
                pairs.push(("apikey".to_string(), key.clone()));
            }
        }

        let response = self.transport.get(&url, &pairs, &headers).await?;
        if response.is_success() {
            Ok(response.body)
        } else {
            tracing::warn!(status = response.status, %route, "upstream request failed");
            Err(ApiError::upstream(response.status, response.body))
        }
    }
}
