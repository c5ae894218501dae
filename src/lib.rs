//! Client library for the AT Internet RESTful analytics API.
//!
//! The central type is [`RequestBuilder`]: it validates a prefixed
//! credential string and a query parameter set at construction, then
//! exposes the three provider operations as async methods.
//!
//! # Example
//!
//! ```no_run
//! use atinternet_client::{RequestBuilder, RequestOptions};
//!
//! # async fn run() -> atinternet_client::Result<()> {
//! let mut request = RequestBuilder::new(
//!     "columns={d_visit_id}&space={s:1}&period={D:{start:'2020-01-01',end:'2020-01-01'}}",
//!     "apikey:your-key",
//!     RequestOptions::default(),
//! )?;
//!
//! let available_until = request.get_maxdate().await?;
//! let rows = request.get_rows().await?;
//! let batches = request.get_data().await?;
//!
//! // The parameter mapping stays editable between operations
//! request.params_mut().set("space", "{s:2}");
//! let other_site = request.get_data().await?;
//! # Ok(())
//! # }
//! ```
//!
//! A builder instance is single-writer: share it across threads only behind
//! external synchronization.

mod ati;
pub mod config;
pub mod error;

pub use ati::{
    basic_credential, AuthCredential, HttpTransport, ParamsInput, QueryParameters, RawResponse,
    RequestBuilder, RequestOptions, ResponseBatch, ResponseFormat, Route, Transport,
    DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE,
};
pub use error::{ApiError, AuthError, Error, ParamsError, Result};
