use crate::context_change_notifier::ContextChannel;
use crate::{ContextChangeNotifier, Result as TenantErrorResult, TenantError};

use inv_auth::{IdentityStore, SignOutListener};
use inv_client::ContextSwitcher;
use inv_core::{KeyValueStore, SwitchedContext};

use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info, warn};

/// Holds the selected tenant id, persisted under its own storage key and
/// mirrored into a reactive value for [`ContextChangeNotifier`].
pub struct TenantContextStore {
    storage: Arc<dyn KeyValueStore>,
    tenant_key: String,
    channel: Arc<ContextChannel>,
    /// Tenant a sign-out failed to delete from storage; reported as absent.
    stale: RwLock<Option<String>>,
}

impl TenantContextStore {
    /// Rehydrates the last selected tenant from storage.
    pub fn new(storage: Arc<dyn KeyValueStore>, tenant_key: impl Into<String>) -> Self {
        let tenant_key = tenant_key.into();

        let restored = match storage.get(&tenant_key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to restore tenant context: {e}");
                None
            }
        };
        if let Some(tenant_id) = &restored {
            info!("Restored tenant context {tenant_id}");
        }

        Self {
            storage,
            tenant_key,
            channel: Arc::new(ContextChannel::new(restored)),
            stale: RwLock::new(None),
        }
    }

    pub fn current_tenant(&self) -> Option<String> {
        match self.storage.get(&self.tenant_key) {
            Ok(value) => value.filter(|tenant_id| !self.is_stale(tenant_id)),
            Err(e) => {
                warn!("Failed to read tenant context, using last known value: {e}");
                self.channel.get()
            }
        }
    }

    pub fn has_tenant_context(&self) -> bool {
        self.current_tenant().is_some()
    }

    /// Persist, then publish. Subscribers are only woken if the id changed.
    pub fn set_current_tenant(&self, tenant_id: &str) -> TenantErrorResult<()> {
        self.storage.set(&self.tenant_key, tenant_id)?;
        self.set_stale(None);
        self.channel.publish(Some(tenant_id.to_string()));
        debug!("Tenant context set to {tenant_id}");
        Ok(())
    }

    pub fn clear_tenant_context(&self) -> TenantErrorResult<()> {
        self.storage.remove(&self.tenant_key)?;
        self.set_stale(None);
        self.channel.publish(None);
        debug!("Tenant context cleared");
        Ok(())
    }

    /// Move the session to another tenant.
    ///
    /// Nothing is written until the backend answers. On success the new
    /// credential is stored before the tenant id, so anyone reacting to the
    /// tenant change already sees the roles held in the new tenant.
    pub async fn switch_context(
        &self,
        switcher: &dyn ContextSwitcher,
        identity: &IdentityStore,
        tenant_id: &str,
    ) -> TenantErrorResult<SwitchedContext> {
        let switched = switcher
            .switch_context(tenant_id)
            .await
            .map_err(TenantError::switch)?;

        let target = if switched.tenant_id.is_empty() {
            tenant_id
        } else {
            switched.tenant_id.as_str()
        };

        identity.set_credential(&switched.token)?;
        self.set_current_tenant(target)?;

        info!(
            "Switched context to {target} ({}) with roles {:?}",
            switched.company_name, switched.roles
        );
        Ok(switched)
    }

    /// Change stream over this store's reactive value.
    pub fn notifier(&self) -> ContextChangeNotifier {
        ContextChangeNotifier::new(self.channel.clone())
    }

    fn set_stale(&self, tenant_id: Option<String>) {
        let mut stale = self.stale.write().unwrap_or_else(PoisonError::into_inner);
        *stale = tenant_id;
    }

    fn is_stale(&self, tenant_id: &str) -> bool {
        let stale = self.stale.read().unwrap_or_else(PoisonError::into_inner);
        stale.as_deref() == Some(tenant_id)
    }
}

impl SignOutListener for TenantContextStore {
    fn on_signed_out(&self) {
        if let Err(e) = self.clear_tenant_context() {
            warn!("Failed to clear tenant context on sign-out, dropping it in memory: {e}");
            self.set_stale(self.storage.get(&self.tenant_key).ok().flatten());
            self.channel.publish(None);
        }
    }
}
