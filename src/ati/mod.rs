mod auth;
mod client;
mod format;
mod params;
mod responses;
mod transport;

pub use auth::{basic_credential, AuthCredential};
pub use client::{RequestBuilder, RequestOptions, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
pub use format::{ResponseFormat, Route};
pub use params::{ParamsInput, QueryParameters};
pub use responses::ResponseBatch;
pub use transport::{HttpTransport, RawResponse, Transport};
