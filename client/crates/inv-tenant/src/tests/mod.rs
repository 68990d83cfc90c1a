mod context_change_notifier;

use crate::TenantContextStore;

use inv_auth::IdentityStore;
use inv_client::{ClientError, ClientResult, CompanyDirectory, ContextSwitcher};
use inv_core::{
    CompanyMembership, CoreError, KeyValueStore, MemoryStore, NavigationQueue, Route,
    SwitchedContext,
};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use tokio::sync::mpsc;

pub(crate) const CREDENTIAL_KEY: &str = "credential";
pub(crate) const TENANT_KEY: &str = "tenant-context";

/// Mint a token valid for an hour carrying `roles` in `tenant_id`.
pub(crate) fn token(tenant_id: &str, roles: &[&str]) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs() as i64;
    let claims = json!({
        "sub": "user-1",
        "tenantId": tenant_id,
        "roles": roles,
        "exp": now + 3600,
        "iat": now,
    });

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("Failed to encode JWT")
}

pub(crate) struct Harness {
    pub storage: Arc<RecordingStore>,
    pub identity: Arc<IdentityStore>,
    pub tenant: Arc<TenantContextStore>,
    pub routes: mpsc::UnboundedReceiver<Route>,
}

/// Stores wired the way a session wires them, over a recording in-memory store.
pub(crate) fn harness(entries: &[(&str, &str)]) -> Harness {
    let storage = Arc::new(RecordingStore::with_entries(entries));
    let (navigator, routes) = NavigationQueue::new();
    let identity = Arc::new(IdentityStore::new(
        storage.clone(),
        CREDENTIAL_KEY,
        Arc::new(navigator),
    ));
    let tenant = Arc::new(TenantContextStore::new(storage.clone(), TENANT_KEY));
    identity.on_sign_out(tenant.clone());

    Harness {
        storage,
        identity,
        tenant,
        routes,
    }
}

pub(crate) fn signed_in(entries: &[(&str, &str)]) -> Harness {
    let credential = token("t1", &["USER"]);
    let mut all = vec![(CREDENTIAL_KEY, credential.as_str())];
    all.extend_from_slice(entries);
    harness(&all)
}

// =========================================================================
// Recording store
// =========================================================================

/// In-memory store that logs every write and can be told to fail writes.
#[derive(Default)]
pub(crate) struct RecordingStore {
    inner: MemoryStore,
    writes: Mutex<Vec<String>>,
    /// Credential value present at the moment the tenant key was written.
    credential_at_tenant_write: Mutex<Vec<Option<String>>>,
    fail_writes: Mutex<bool>,
}

impl RecordingStore {
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self {
            inner: MemoryStore::with_entries(entries.iter().copied()),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn credential_at_tenant_write(&self) -> Vec<Option<String>> {
        self.credential_at_tenant_write.lock().unwrap().clone()
    }

    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    fn check_writable(&self, key: &str) -> inv_core::Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(CoreError::invalid_key(key, "writes disabled"));
        }
        Ok(())
    }
}

impl KeyValueStore for RecordingStore {
    fn get(&self, key: &str) -> inv_core::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> inv_core::Result<()> {
        self.check_writable(key)?;
        if key == TENANT_KEY {
            let credential = self.inner.get(CREDENTIAL_KEY)?;
            self.credential_at_tenant_write.lock().unwrap().push(credential);
        }
        self.writes.lock().unwrap().push(format!("set {key}"));
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> inv_core::Result<()> {
        self.check_writable(key)?;
        self.writes.lock().unwrap().push(format!("remove {key}"));
        self.inner.remove(key)
    }
}

// =========================================================================
// Collaborator fakes
// =========================================================================

pub(crate) struct FakeDirectory {
    /// Companies to return, or the HTTP status to fail with.
    response: Result<Vec<CompanyMembership>, u16>,
    calls: AtomicUsize,
}

impl FakeDirectory {
    pub fn returning(companies: Vec<CompanyMembership>) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(companies),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            response: Err(status),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompanyDirectory for FakeDirectory {
    async fn my_companies(&self) -> ClientResult<Vec<CompanyMembership>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(companies) => Ok(companies.clone()),
            Err(status) => Err(ClientError::api_error(
                *status,
                format!("HTTP_{status}"),
                "lookup failed".into(),
            )),
        }
    }
}

pub(crate) struct FakeSwitcher {
    response: Mutex<Option<ClientResult<SwitchedContext>>>,
    pub requested: Mutex<Vec<String>>,
}

impl FakeSwitcher {
    pub fn returning(response: ClientResult<SwitchedContext>) -> Self {
        Self {
            response: Mutex::new(Some(response)),
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ContextSwitcher for FakeSwitcher {
    async fn switch_context(&self, tenant_id: &str) -> ClientResult<SwitchedContext> {
        self.requested.lock().unwrap().push(tenant_id.to_string());
        self.response
            .lock()
            .unwrap()
            .take()
            .expect("switch called more than once")
    }
}

pub(crate) fn switched(tenant_id: &str, roles: &[&str]) -> SwitchedContext {
    SwitchedContext {
        token: token(tenant_id, roles),
        tenant_id: tenant_id.to_string(),
        company_name: format!("Company {tenant_id}"),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}
