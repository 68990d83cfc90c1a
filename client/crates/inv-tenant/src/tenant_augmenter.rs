use crate::{Result as TenantErrorResult, TenantContextStore, TenantError};

use inv_client::{EndpointMatcher, RequestInterceptor};
use inv_config::Config;

use std::sync::Arc;

use log::{debug, warn};
use reqwest::Request;
use reqwest::header::{HeaderName, HeaderValue};

/// Adds the tenant header to tenant-scoped requests.
pub struct TenantAugmenter {
    tenant: Arc<TenantContextStore>,
    header_name: HeaderName,
    tenant_agnostic: EndpointMatcher,
}

impl TenantAugmenter {
    pub fn new(
        tenant: Arc<TenantContextStore>,
        header_name: HeaderName,
        tenant_agnostic: EndpointMatcher,
    ) -> Self {
        Self {
            tenant,
            header_name,
            tenant_agnostic,
        }
    }

    pub fn from_config(
        tenant: Arc<TenantContextStore>,
        config: &Config,
    ) -> TenantErrorResult<Self> {
        let header_name = HeaderName::from_bytes(config.tenant.header_name.as_bytes())
            .map_err(|_| TenantError::invalid_header(&config.tenant.header_name))?;

        Ok(Self::new(
            tenant,
            header_name,
            EndpointMatcher::new(
                &config.api.base_url,
                config.endpoints.tenant_agnostic_endpoints(),
            ),
        ))
    }

    pub fn header_name(&self) -> &HeaderName {
        &self.header_name
    }
}

impl RequestInterceptor for TenantAugmenter {
    fn name(&self) -> &'static str {
        "tenant"
    }

    fn on_request(&self, request: &mut Request) {
        if self.tenant_agnostic.matches(request.url()) {
            debug!("Tenant-agnostic endpoint {}", request.url().path());
            return;
        }

        let Some(tenant_id) = self.tenant.current_tenant() else {
            return;
        };

        match HeaderValue::from_str(&tenant_id) {
            Ok(value) => {
                request.headers_mut().insert(self.header_name.clone(), value);
            }
            Err(_) => warn!("Tenant id '{tenant_id}' is not a valid header value, not attached"),
        }
    }
}
