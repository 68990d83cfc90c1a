use reqwest::{Request, StatusCode, Url};

/// A hook run by [`crate::ApiClient`] around every outbound request.
///
/// `on_request` runs in registration order once the request is fully built.
/// `on_response` runs, again in registration order, as soon as a status line
/// arrives and before the client hands any error back to its caller.
pub trait RequestInterceptor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn on_request(&self, request: &mut Request);

    fn on_response(&self, _url: &Url, _status: StatusCode) {}
}
