use crate::{ApiClient, ClientResult};

use std::fmt;

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Trades a federated identity assertion for an application credential.
#[async_trait]
pub trait IdentityExchange: Send + Sync {
    async fn exchange_identity(
        &self,
        identity_assertion: &str,
        tenant_id: Option<&str>,
    ) -> ClientResult<TokenResponse>;
}

#[async_trait]
impl IdentityExchange for ApiClient {
    async fn exchange_identity(
        &self,
        identity_assertion: &str,
        tenant_id: Option<&str>,
    ) -> ClientResult<TokenResponse> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ExchangeRequest<'a> {
            identity_assertion: &'a str,
            tenant_id: Option<&'a str>,
        }

        let body = ExchangeRequest {
            identity_assertion,
            tenant_id,
        };
        let req = self
            .request(Method::POST, &self.endpoints().identity_exchange)
            .json(&body);
        self.send(req).await
    }
}
