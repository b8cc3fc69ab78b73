//! Integration tests for `CredentialChain`: caching, laziness, and failure
//! propagation across the three stages.
//!
//! Every platform service is a mock that counts its calls, so each test can
//! assert exactly which stages went to the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use codeword_auth::{
    AccountCredentials, AccountLogin, AccountLoginRequest, AccountService, AppAuthRequest,
    AppAuthService, ApplicationToken, AuthError, AuthStage, ChainInputs, CredentialChain,
    CredentialSource, DeviceAuthService, DeviceToken, IdentityCredentials, ServiceError,
};
use codeword_cache::{CacheStore, CachedValue, Codec, JsonCodec, MemoryStore};
use codeword_protocol::{DeviceIdentity, InstallTicket};
use serde::Serialize;

const HOUR: Duration = Duration::from_secs(3600);

// =========================================================================
// Mock services
// =========================================================================

#[derive(Default)]
struct MockDevice {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl DeviceAuthService for MockDevice {
    async fn device_token(
        &self,
        _identity: &DeviceIdentity,
        _system_version: u32,
    ) -> Result<String, ServiceError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err("device certificate revoked".into());
        }
        Ok(format!("device-{n}"))
    }
}

#[derive(Default)]
struct MockApp {
    calls: Arc<AtomicUsize>,
    seen_device_tokens: Arc<Mutex<Vec<String>>>,
}

impl AppAuthService for MockApp {
    async fn application_token(&self, request: AppAuthRequest<'_>) -> Result<String, ServiceError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        assert_eq!(request.title_id, 0x0100_dead_beef_0000);
        assert_eq!(request.ticket.as_bytes(), b"ticket");
        self.seen_device_tokens
            .lock()
            .unwrap()
            .push(request.device_token.0.clone());
        Ok(format!("app-{n}"))
    }
}

#[derive(Default)]
struct MockAccount {
    calls: Arc<AtomicUsize>,
    user_id: Option<String>,
    seen_tokens: Arc<Mutex<Vec<(String, String)>>>,
}

impl AccountService for MockAccount {
    async fn login(&self, request: AccountLoginRequest<'_>) -> Result<AccountLogin, ServiceError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        assert_eq!(request.account.username, "villager");
        self.seen_tokens.lock().unwrap().push((
            request.device_token.0.clone(),
            request.application_token.0.clone(),
        ));
        Ok(AccountLogin {
            user_id: self.user_id.clone().unwrap_or_else(|| "00ff".into()),
            id_token: format!("id-{n}"),
        })
    }
}

// =========================================================================
// Helpers
// =========================================================================

type Chain = CredentialChain<MockDevice, MockApp, MockAccount, MemoryStore>;

struct Counters {
    device: Arc<AtomicUsize>,
    app: Arc<AtomicUsize>,
    account: Arc<AtomicUsize>,
}

impl Counters {
    fn snapshot(&self) -> (usize, usize, usize) {
        (
            self.device.load(Ordering::SeqCst),
            self.app.load(Ordering::SeqCst),
            self.account.load(Ordering::SeqCst),
        )
    }
}

fn inputs() -> ChainInputs {
    ChainInputs {
        identity: Arc::new(DeviceIdentity::new(b"cert".to_vec(), b"key".to_vec())),
        ticket: InstallTicket::new(b"ticket".to_vec()),
        title_id: 0x0100_dead_beef_0000,
        title_version: 1,
        account: AccountCredentials {
            username: "villager".into(),
            password: "hunter2".into(),
        },
        system_version: 1003,
    }
}

fn build(device: MockDevice, app: MockApp, account: MockAccount) -> (Chain, Counters) {
    let counters = Counters {
        device: Arc::clone(&device.calls),
        app: Arc::clone(&app.calls),
        account: Arc::clone(&account.calls),
    };
    let chain = CredentialChain::new(device, app, account, MemoryStore::new(), inputs());
    (chain, counters)
}

fn default_chain() -> (Chain, Counters) {
    build(MockDevice::default(), MockApp::default(), MockAccount::default())
}

/// Stores `value` in `stage`'s slot as if it were produced `age` ago.
async fn seed<T: Serialize>(chain: &Chain, stage: AuthStage, value: &T, age: Duration) {
    let payload = JsonCodec.encode(value).unwrap();
    let entry =
        CachedValue::with_created_at(stage.cache_key(), payload, SystemTime::now() - age);
    chain.cache().store().save(&entry).await.unwrap();
}

fn cached_identity() -> IdentityCredentials {
    IdentityCredentials {
        user_id: 0x1234,
        identity_token: "cached-id".into(),
    }
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_identity_empty_cache_runs_every_stage_once() {
    let (chain, counters) = default_chain();

    let creds = chain.identity().await.expect("chain should resolve");

    assert_eq!(creds.user_id, 0xff);
    assert_eq!(creds.identity_token, "id-1");
    assert_eq!(counters.snapshot(), (1, 1, 1));
}

#[tokio::test]
async fn test_identity_passes_each_token_to_the_next_stage() {
    let app = MockApp::default();
    let account = MockAccount::default();
    let seen_device = Arc::clone(&app.seen_device_tokens);
    let seen_login = Arc::clone(&account.seen_tokens);
    let (chain, _) = build(MockDevice::default(), app, account);

    chain.identity().await.unwrap();

    assert_eq!(*seen_device.lock().unwrap(), vec!["device-1".to_string()]);
    assert_eq!(
        *seen_login.lock().unwrap(),
        vec![("device-1".to_string(), "app-1".to_string())]
    );
}

#[tokio::test]
async fn test_identity_second_call_hits_cache() {
    let (chain, counters) = default_chain();

    let first = chain.identity().await.unwrap();
    let second = chain.identity().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(counters.snapshot(), (1, 1, 1));
}

#[tokio::test]
async fn test_identity_fresh_bundle_never_touches_earlier_stages() {
    let (chain, counters) = default_chain();
    seed(&chain, AuthStage::AccountAuth, &cached_identity(), HOUR).await;

    let creds = chain.credentials().await.unwrap();

    assert_eq!(creds, cached_identity());
    assert_eq!(counters.snapshot(), (0, 0, 0));
}

#[tokio::test]
async fn test_identity_stale_bundle_with_fresh_tokens_only_logs_in() {
    let (chain, counters) = default_chain();
    seed(&chain, AuthStage::DeviceAuth, &DeviceToken("d".into()), HOUR).await;
    seed(&chain, AuthStage::AppAuth, &ApplicationToken("a".into()), HOUR).await;
    // Older than the 3-hour identity TTL.
    seed(&chain, AuthStage::AccountAuth, &cached_identity(), 4 * HOUR).await;

    let creds = chain.identity().await.unwrap();

    assert_eq!(creds.identity_token, "id-1");
    assert_eq!(counters.snapshot(), (0, 0, 1));
}

#[tokio::test]
async fn test_application_token_stale_refreshes_without_device_call() {
    let (chain, counters) = default_chain();
    seed(&chain, AuthStage::DeviceAuth, &DeviceToken("d".into()), HOUR).await;
    seed(&chain, AuthStage::AppAuth, &ApplicationToken("a".into()), 25 * HOUR).await;

    let token = chain.application_token().await.unwrap();

    assert_eq!(token, ApplicationToken("app-1".into()));
    assert_eq!(counters.snapshot(), (0, 1, 0));
}

#[tokio::test]
async fn test_application_token_fresh_skips_device() {
    let (chain, counters) = default_chain();
    seed(&chain, AuthStage::AppAuth, &ApplicationToken("a".into()), HOUR).await;

    let token = chain.application_token().await.unwrap();

    assert_eq!(token, ApplicationToken("a".into()));
    assert_eq!(counters.snapshot(), (0, 0, 0));
}

#[tokio::test]
async fn test_device_failure_surfaces_stage_and_caches_nothing() {
    let device = MockDevice {
        fail: true,
        ..MockDevice::default()
    };
    let (chain, counters) = build(device, MockApp::default(), MockAccount::default());

    let err = chain.identity().await.expect_err("device auth should fail");

    assert!(matches!(err, AuthError::Stage { stage: AuthStage::DeviceAuth, .. }));
    assert_eq!(err.stage(), Some(AuthStage::DeviceAuth));
    assert_eq!(counters.snapshot(), (1, 0, 0));
    for stage in AuthStage::ALL {
        assert!(chain.cache().store().entry(stage.cache_key()).await.is_none());
    }
}

#[tokio::test]
async fn test_malformed_user_id_is_rejected_and_not_cached() {
    let account = MockAccount {
        user_id: Some("not-hex".into()),
        ..MockAccount::default()
    };
    let (chain, _) = build(MockDevice::default(), MockApp::default(), account);

    let err = chain.identity().await.expect_err("user id should not parse");

    assert!(matches!(err, AuthError::MalformedUserId(ref id) if id == "not-hex"));
    assert!(
        chain
            .cache()
            .store()
            .entry(AuthStage::AccountAuth.cache_key())
            .await
            .is_none()
    );
    // The earlier stages succeeded and stay cached.
    assert!(
        chain
            .cache()
            .store()
            .entry(AuthStage::AppAuth.cache_key())
            .await
            .is_some()
    );
}

#[tokio::test]
async fn test_user_id_parsed_as_hex() {
    let account = MockAccount {
        user_id: Some("8f3a2b1c0d9e7f65".into()),
        ..MockAccount::default()
    };
    let (chain, _) = build(MockDevice::default(), MockApp::default(), account);

    let creds = chain.identity().await.unwrap();

    assert_eq!(creds.user_id, 0x8f3a_2b1c_0d9e_7f65);
}

#[tokio::test]
async fn test_with_ttl_overrides_stage_window() {
    let (chain, counters) = default_chain();
    let chain = chain.with_ttl(AuthStage::AccountAuth, Duration::from_secs(60));
    assert_eq!(chain.ttl(AuthStage::AccountAuth), Duration::from_secs(60));
    assert_eq!(chain.ttl(AuthStage::DeviceAuth), AuthStage::DeviceAuth.default_ttl());

    // Fresh under the default 3 hours, stale under the 60-second override.
    seed(&chain, AuthStage::AccountAuth, &cached_identity(), Duration::from_secs(120)).await;

    chain.identity().await.unwrap();
    assert_eq!(counters.snapshot().2, 1);
}
