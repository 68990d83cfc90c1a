use crate::{ApiClient, ClientResult};

use inv_core::CompanyMembership;

use async_trait::async_trait;
use reqwest::Method;

/// Lists the companies the signed-in user belongs to.
#[async_trait]
pub trait CompanyDirectory: Send + Sync {
    async fn my_companies(&self) -> ClientResult<Vec<CompanyMembership>>;
}

#[async_trait]
impl CompanyDirectory for ApiClient {
    async fn my_companies(&self) -> ClientResult<Vec<CompanyMembership>> {
        let req = self.request(Method::GET, &self.endpoints().my_companies);
        self.send(req).await
    }
}
