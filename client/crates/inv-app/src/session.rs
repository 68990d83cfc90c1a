use crate::error::Result as AppErrorResult;

use inv_auth::{Credential, IdentityAugmenter, IdentityStore};
use inv_client::ApiClient;
use inv_config::{Config, StorageBackend};
use inv_core::{
    FileStore, KeyValueStore, MemoryStore, NavigationQueue, Navigator, Route, RouteTable,
    SwitchedContext,
};
use inv_tenant::{
    ContextChangeNotifier, GuardOutcome, RouteEntryGuard, TenantAugmenter, TenantContextStore,
};

use std::sync::Arc;

use log::info;
use tokio::sync::mpsc;

/// Composition root: one signed-in (or signed-out) user of the client.
///
/// Holds the stores, the HTTP client with both request augmenters installed
/// (identity first, then tenant) and the route entry guard.
pub struct Session {
    client: Arc<ApiClient>,
    identity: Arc<IdentityStore>,
    tenant: Arc<TenantContextStore>,
    notifier: ContextChangeNotifier,
    guard: RouteEntryGuard,
    routes: RouteTable,
}

impl Session {
    /// Build from config with the configured storage backend. Navigation
    /// requests (sign-in after logout) arrive on the returned receiver.
    pub fn from_config(config: &Config) -> AppErrorResult<(Self, mpsc::UnboundedReceiver<Route>)> {
        let storage: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => {
                let store = FileStore::open(config.storage_dir()?)?;
                info!("Session storage: {}", store.dir().display());
                Arc::new(store)
            }
        };
        let (navigator, receiver) = NavigationQueue::new();

        let session = Self::new(config, storage, Arc::new(navigator))?;
        Ok((session, receiver))
    }

    pub fn new(
        config: &Config,
        storage: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> AppErrorResult<Self> {
        let identity = Arc::new(IdentityStore::new(
            storage.clone(),
            &config.storage.credential_key,
            navigator,
        ));
        let tenant = Arc::new(TenantContextStore::new(
            storage,
            &config.storage.tenant_key,
        ));
        identity.on_sign_out(tenant.clone());

        let client = Arc::new(
            ApiClient::from_config(config)?
                .with_interceptor(Arc::new(IdentityAugmenter::from_config(
                    identity.clone(),
                    config,
                )))
                .with_interceptor(Arc::new(TenantAugmenter::from_config(
                    tenant.clone(),
                    config,
                )?)),
        );

        let guard = RouteEntryGuard::new(identity.clone(), tenant.clone(), client.clone())
            .with_lookup_failure_route(config.guard.lookup_failure_route);

        info!(
            "Session ready (authenticated: {}, tenant: {})",
            identity.is_authenticated(),
            tenant.current_tenant().as_deref().unwrap_or("none")
        );

        Ok(Self {
            notifier: tenant.notifier(),
            client,
            identity,
            tenant,
            guard,
            routes: config.routes.route_table(),
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn identity(&self) -> &IdentityStore {
        &self.identity
    }

    pub fn tenant(&self) -> &TenantContextStore {
        &self.tenant
    }

    pub fn notifier(&self) -> &ContextChangeNotifier {
        &self.notifier
    }

    pub fn route_table(&self) -> &RouteTable {
        &self.routes
    }

    pub async fn login(
        &self,
        identity_assertion: &str,
        tenant_id: Option<&str>,
    ) -> AppErrorResult<Credential> {
        let credential = self
            .identity
            .login(self.client.as_ref(), identity_assertion, tenant_id)
            .await?;
        Ok(credential)
    }

    /// Clears credential and tenant context, then requests the sign-in route.
    pub fn logout(&self) {
        self.identity.logout();
    }

    pub async fn switch_context(&self, tenant_id: &str) -> AppErrorResult<SwitchedContext> {
        let switched = self
            .tenant
            .switch_context(self.client.as_ref(), &self.identity, tenant_id)
            .await?;
        Ok(switched)
    }

    pub async fn evaluate_guard(&self) -> GuardOutcome {
        self.guard.evaluate().await
    }

    /// Router path for a guard outcome's redirect, if any.
    pub fn redirect_path(&self, outcome: &GuardOutcome) -> Option<&str> {
        outcome.redirect_target().map(|route| self.routes.path(route))
    }
}
