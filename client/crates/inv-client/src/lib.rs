//! HTTP plumbing for the inventory client.
//!
//! [`ApiClient`] runs every outbound request through an ordered list of
//! [`RequestInterceptor`]s and implements the backend collaborators the
//! tenant-context core depends on.

pub mod api_client;
pub mod collaborators;
pub mod endpoint_matcher;
pub mod error;
pub mod interceptor;

pub use api_client::ApiClient;
pub use collaborators::company_directory::CompanyDirectory;
pub use collaborators::context_switcher::ContextSwitcher;
pub use collaborators::identity_exchange::{IdentityExchange, TokenResponse};
pub use endpoint_matcher::EndpointMatcher;
pub use error::{ClientError, Result as ClientResult};
pub use interceptor::RequestInterceptor;
