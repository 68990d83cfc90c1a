use crate::{ApiClient, ClientResult};

use inv_core::SwitchedContext;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

/// Re-issues the session credential for another tenant.
#[async_trait]
pub trait ContextSwitcher: Send + Sync {
    async fn switch_context(&self, tenant_id: &str) -> ClientResult<SwitchedContext>;
}

#[async_trait]
impl ContextSwitcher for ApiClient {
    async fn switch_context(&self, tenant_id: &str) -> ClientResult<SwitchedContext> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct SwitchRequest<'a> {
            tenant_id: &'a str,
        }

        let req = self
            .request(Method::PUT, &self.endpoints().switch_context)
            .json(&SwitchRequest { tenant_id });
        self.send(req).await
    }
}
