//! Tenant store, augmenters and guard wired to a real ApiClient against wiremock

use inv_auth::{IdentityAugmenter, IdentityStore};
use inv_client::ApiClient;
use inv_config::Config;
use inv_core::{KeyValueStore, MemoryStore, NavigationQueue, Route};
use inv_tenant::{GuardState, RouteEntryGuard, TenantAugmenter, TenantContextStore, TenantError};

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use tokio::sync::mpsc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, header_exists, method, path},
};

fn token(tenant_id: &str, roles: &[&str]) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs();

    encode(
        &Header::default(),
        &json!({
            "sub": "user-1",
            "tenantId": tenant_id,
            "roles": roles,
            "exp": now + 3600,
            "iat": now,
        }),
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("Failed to encode JWT")
}

struct Wired {
    client: Arc<ApiClient>,
    storage: Arc<MemoryStore>,
    identity: Arc<IdentityStore>,
    tenant: Arc<TenantContextStore>,
    routes: mpsc::UnboundedReceiver<Route>,
}

fn wire(server: &MockServer, tenant_id: Option<&str>) -> Wired {
    let storage = Arc::new(MemoryStore::new());
    let (navigator, routes) = NavigationQueue::new();
    let identity = Arc::new(IdentityStore::new(
        storage.clone(),
        "credential",
        Arc::new(navigator),
    ));
    identity.set_credential(&token("t1", &["USER"])).unwrap();

    let tenant = Arc::new(TenantContextStore::new(storage.clone(), "tenant-context"));
    if let Some(tenant_id) = tenant_id {
        tenant.set_current_tenant(tenant_id).unwrap();
    }
    identity.on_sign_out(tenant.clone());

    let mut config = Config::default();
    config.api.base_url = server.uri();
    let client = ApiClient::from_config(&config)
        .unwrap()
        .with_interceptor(Arc::new(IdentityAugmenter::from_config(
            identity.clone(),
            &config,
        )))
        .with_interceptor(Arc::new(
            TenantAugmenter::from_config(tenant.clone(), &config).unwrap(),
        ));

    Wired {
        client: Arc::new(client),
        storage,
        identity,
        tenant,
        routes,
    }
}

#[tokio::test]
async fn test_scoped_request_carries_tenant_and_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("X-Tenant-ID", "t1"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let w = wire(&server, Some("t1"));

    w.client.get_json("/products").await.unwrap();
}

#[tokio::test]
async fn test_membership_listing_is_tenant_agnostic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me/companies"))
        .and(header_exists("X-Tenant-ID"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me/companies"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let w = wire(&server, Some("t1"));

    w.client.get_json("/users/me/companies").await.unwrap();
}

#[tokio::test]
async fn test_guard_auto_selects_single_company_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "tenantId": "t1", "displayName": "Acme", "cnpj": "00.000.000/0001-00" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let w = wire(&server, None);
    let guard = RouteEntryGuard::new(w.identity.clone(), w.tenant.clone(), w.client.clone());

    let outcome = guard.evaluate().await;

    assert_eq!(outcome.state, GuardState::OneCompany);
    assert_eq!(outcome.redirect_target(), Some(Route::Dashboard));
    assert_eq!(w.tenant.current_tenant().as_deref(), Some("t1"));
}

#[tokio::test]
async fn test_guard_with_cached_context_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let w = wire(&server, Some("t1"));
    let guard = RouteEntryGuard::new(w.identity.clone(), w.tenant.clone(), w.client.clone());

    assert!(guard.evaluate().await.is_allowed());
}

#[tokio::test]
async fn test_guard_lookup_server_error_redirects_to_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me/companies"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let w = wire(&server, None);
    let guard = RouteEntryGuard::new(w.identity.clone(), w.tenant.clone(), w.client.clone());

    let outcome = guard.evaluate().await;

    assert_eq!(outcome.state, GuardState::Error);
    assert_eq!(outcome.redirect_target(), Some(Route::CompanyCreation));
    assert!(w.identity.is_authenticated());
}

#[tokio::test]
async fn test_guard_lookup_401_signs_out_and_redirects() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/me/companies"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut w = wire(&server, None);
    let guard = RouteEntryGuard::new(w.identity.clone(), w.tenant.clone(), w.client.clone());

    let outcome = guard.evaluate().await;

    assert_eq!(outcome.state, GuardState::Error);
    assert!(!w.identity.is_authenticated());
    assert_eq!(w.routes.recv().await, Some(Route::SignIn));
}

#[tokio::test]
async fn test_switch_context_over_http_updates_credential_and_tenant() {
    let server = MockServer::start().await;
    let admin_token = token("t2", &["ADMIN"]);

    Mock::given(method("PUT"))
        .and(path("/users/me/context"))
        .and(body_json(json!({ "tenantId": "t2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": admin_token,
            "tenantId": "t2",
            "companyName": "Beta",
            "roles": ["ADMIN"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(header("X-Tenant-ID", "t2"))
        .and(header("Authorization", format!("Bearer {admin_token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let w = wire(&server, Some("t1"));
    let mut sub = w.tenant.notifier().subscribe();
    sub.next().await;

    let switched = w
        .tenant
        .switch_context(w.client.as_ref(), &w.identity, "t2")
        .await
        .unwrap();

    assert_eq!(switched.company_name, "Beta");
    assert_eq!(sub.next().await.unwrap().tenant_id.as_deref(), Some("t2"));
    assert!(w.identity.has_role("ADMIN"));
    w.client.get_json("/orders").await.unwrap();
}

#[tokio::test]
async fn test_switch_context_rejected_leaves_state_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/users/me/context"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": "NOT_FOUND", "message": "Company not found" }
        })))
        .mount(&server)
        .await;

    let w = wire(&server, Some("t1"));
    let credential_before = w.storage.get("credential").unwrap();

    let err = w
        .tenant
        .switch_context(w.client.as_ref(), &w.identity, "t9")
        .await
        .unwrap_err();

    assert!(matches!(err, TenantError::Switch { .. }));
    assert_eq!(err.client_error().and_then(|e| e.status()), Some(404));
    assert_eq!(w.storage.get("credential").unwrap(), credential_before);
    assert_eq!(w.tenant.current_tenant().as_deref(), Some("t1"));
}
