use crate::IdentityStore;

use inv_client::{EndpointMatcher, RequestInterceptor};
use inv_config::Config;

use std::sync::Arc;

use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Request, StatusCode, Url};

/// Attaches the bearer credential to non-public requests and forces a logout
/// when the backend rejects it.
pub struct IdentityAugmenter {
    identity: Arc<IdentityStore>,
    public_endpoints: EndpointMatcher,
}

impl IdentityAugmenter {
    pub fn new(identity: Arc<IdentityStore>, public_endpoints: EndpointMatcher) -> Self {
        Self {
            identity,
            public_endpoints,
        }
    }

    pub fn from_config(identity: Arc<IdentityStore>, config: &Config) -> Self {
        Self::new(
            identity,
            EndpointMatcher::new(&config.api.base_url, config.endpoints.public_endpoints()),
        )
    }
}

impl RequestInterceptor for IdentityAugmenter {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn on_request(&self, request: &mut Request) {
        if self.public_endpoints.matches(request.url()) {
            debug!("Public endpoint {}, no credential", request.url().path());
            return;
        }

        let Some(credential) = self.identity.credential() else {
            return;
        };

        match HeaderValue::from_str(&credential.bearer()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("Stored credential is not a valid header value, not attached"),
        }
    }

    fn on_response(&self, url: &Url, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!("{} rejected the credential ({status}), signing out", url.path());
            self.identity.logout();
        }
    }
}
