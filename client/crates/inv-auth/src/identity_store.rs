use crate::{AuthError, Claims, Credential, Result as AuthErrorResult, SignOutListener};

use inv_client::IdentityExchange;
use inv_core::{KeyValueStore, Navigator, Route};

use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info, warn};
use tokio::sync::watch;

/// Owns the session credential.
///
/// Reads go straight to storage so a credential written by a previous run is
/// picked up without a reload step. Decoding is best-effort: a corrupt or
/// expired credential is purged and reported as absent, never as an error.
pub struct IdentityStore {
    storage: Arc<dyn KeyValueStore>,
    credential_key: String,
    navigator: Arc<dyn Navigator>,
    authenticated: watch::Sender<bool>,
    sign_out_listeners: RwLock<Vec<Arc<dyn SignOutListener>>>,
    /// Token a sign-out failed to delete from storage; never trusted again.
    revoked: RwLock<Option<String>>,
}

impl IdentityStore {
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        credential_key: impl Into<String>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let store = Self {
            storage,
            credential_key: credential_key.into(),
            navigator,
            authenticated: watch::Sender::new(false),
            sign_out_listeners: RwLock::new(Vec::new()),
            revoked: RwLock::new(None),
        };

        if store.is_authenticated() {
            info!("Restored session credential from storage");
        }

        store
    }

    /// Raw read of the stored credential, valid or not.
    pub fn credential(&self) -> Option<Credential> {
        let token = match self.storage.get(&self.credential_key) {
            Ok(token) => token?,
            Err(e) => {
                warn!("Failed to read credential: {e}");
                return None;
            }
        };

        if self.is_revoked(&token) {
            return None;
        }
        Some(Credential::new(token))
    }

    /// True iff a credential is stored, decodes, and expires strictly in the future.
    pub fn is_authenticated(&self) -> bool {
        self.trusted_claims().is_some()
    }

    pub fn set_credential(&self, token: &str) -> AuthErrorResult<()> {
        self.storage.set(&self.credential_key, token)?;
        self.set_revoked(None);

        let valid = Credential::new(token)
            .claims()
            .is_some_and(|claims| !claims.is_expired());
        self.set_authenticated(valid);

        debug!("Credential stored (valid: {valid})");
        Ok(())
    }

    pub fn clear_credential(&self) -> AuthErrorResult<()> {
        self.storage.remove(&self.credential_key)?;
        self.set_revoked(None);
        self.set_authenticated(false);
        debug!("Credential cleared");
        Ok(())
    }

    /// Exchange a federated identity assertion for a session credential.
    pub async fn login(
        &self,
        exchange: &dyn IdentityExchange,
        identity_assertion: &str,
        tenant_id: Option<&str>,
    ) -> AuthErrorResult<Credential> {
        let response = exchange
            .exchange_identity(identity_assertion, tenant_id)
            .await
            .map_err(AuthError::exchange)?;

        self.set_credential(&response.token)?;

        info!("Signed in");
        Ok(Credential::new(response.token))
    }

    /// Clear the session and send the user to sign-in.
    ///
    /// Order: credential cleared, sign-out listeners notified, navigation
    /// requested. Storage failures are logged, never returned, so a forced
    /// logout always completes; a credential that cannot be deleted is
    /// revoked in memory instead.
    pub fn logout(&self) {
        if let Err(e) = self.storage.remove(&self.credential_key) {
            warn!("Failed to remove credential during logout, revoking in memory: {e}");
            self.revoke_stored();
        }
        self.set_authenticated(false);

        let listeners = self
            .sign_out_listeners
            .read()
            .map(|l| l.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone());
        for listener in listeners {
            listener.on_signed_out();
        }

        info!("Signed out");
        self.navigator.navigate(Route::SignIn);
    }

    /// Decoded claims of a currently valid credential.
    pub fn claims(&self) -> Option<Claims> {
        self.trusted_claims()
    }

    pub fn roles(&self) -> Vec<String> {
        self.trusted_claims()
            .map(|claims| claims.roles)
            .unwrap_or_default()
    }

    pub fn user_id(&self) -> Option<String> {
        self.trusted_claims().map(|claims| claims.sub)
    }

    pub fn tenant_id(&self) -> Option<String> {
        self.trusted_claims().and_then(|claims| claims.tenant_id)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.trusted_claims()
            .is_some_and(|claims| claims.has_role(role))
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        self.trusted_claims()
            .is_some_and(|claims| roles.iter().any(|role| claims.has_role(role)))
    }

    /// Reactive authenticated flag; the receiver sees the current value immediately.
    pub fn subscribe_authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    pub fn on_sign_out(&self, listener: Arc<dyn SignOutListener>) {
        match self.sign_out_listeners.write() {
            Ok(mut listeners) => listeners.push(listener),
            Err(poisoned) => poisoned.into_inner().push(listener),
        }
    }

    fn trusted_claims(&self) -> Option<Claims> {
        let credential = self.credential()?;

        let claims = match credential.decode() {
            Ok(claims) => claims,
            Err(e) => {
                warn!("Discarding undecodable credential: {e}");
                self.purge();
                return None;
            }
        };

        if claims.is_expired() {
            info!("Discarding expired credential for {}", claims.sub);
            self.purge();
            return None;
        }

        self.set_authenticated(true);
        Some(claims)
    }

    fn purge(&self) {
        if let Err(e) = self.clear_credential() {
            warn!("Failed to purge credential: {e}");
            self.revoke_stored();
            self.set_authenticated(false);
        }
    }

    fn revoke_stored(&self) {
        let stored = self.storage.get(&self.credential_key).ok().flatten();
        self.set_revoked(stored);
    }

    fn set_revoked(&self, token: Option<String>) {
        let mut revoked = self
            .revoked
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *revoked = token;
    }

    fn is_revoked(&self, token: &str) -> bool {
        let revoked = self.revoked.read().unwrap_or_else(PoisonError::into_inner);
        revoked.as_deref() == Some(token)
    }

    fn set_authenticated(&self, value: bool) {
        self.authenticated.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }
}
