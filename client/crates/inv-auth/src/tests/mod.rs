
use crate::IdentityStore;

use inv_core::{MemoryStore, NavigationQueue, Route};

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use tokio::sync::mpsc;

pub(crate) const CREDENTIAL_KEY: &str = "credential";

#[derive(Serialize)]
struct TestClaims<'a> {
    sub: &'a str,
    #[serde(rename = "tenantId", skip_serializing_if = "Option::is_none")]
    tenant_id: Option<&'a str>,
    roles: Vec<&'a str>,
    exp: i64,
    iat: i64,
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs() as i64
}

/// Mint a signed token whose expiry is `expires_in_secs` from now (negative = past).
pub(crate) fn token(tenant_id: Option<&str>, roles: &[&str], expires_in_secs: i64) -> String {
    let issued = now();
    let claims = TestClaims {
        sub: "user-1",
        tenant_id,
        roles: roles.to_vec(),
        exp: issued + expires_in_secs,
        iat: issued,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("Failed to encode JWT")
}

pub(crate) fn valid_token(roles: &[&str]) -> String {
    token(Some("t1"), roles, 3600)
}

pub(crate) fn expired_token() -> String {
    token(Some("t1"), &["ADMIN"], -3600)
}

pub(crate) fn identity_with(
    entries: &[(&str, &str)],
) -> (Arc<IdentityStore>, Arc<MemoryStore>, mpsc::UnboundedReceiver<Route>) {
    let storage = Arc::new(MemoryStore::with_entries(entries.iter().copied()));
    let (navigator, routes) = NavigationQueue::new();
    let identity = Arc::new(IdentityStore::new(
        storage.clone(),
        CREDENTIAL_KEY,
        Arc::new(navigator),
    ));
    (identity, storage, routes)
}
