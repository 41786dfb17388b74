use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use parlor_types::JoinRequest;
use parlor_voice::{
    parse_suffix, AgentDispatcher, DispatchReceipt, DispatchRequest, LiveKitConfig,
    LiveKitCredentials, VoiceError, VoiceService, PARTICIPANT_PREFIX, ROOM_PREFIX,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const DEFAULT_URL: &str = "wss://media.example.com";
const DEFAULT_KEY: &str = "devkey";
const DEFAULT_SECRET: &str = "secret";

/// Records every dispatch and optionally fails.
#[derive(Debug, Default)]
struct RecordingDispatcher {
    calls: Mutex<Vec<DispatchRequest>>,
    fail_with: Option<String>,
}

#[async_trait]
impl AgentDispatcher for RecordingDispatcher {
    async fn create_dispatch(
        &self,
        _credentials: LiveKitCredentials<'_>,
        request: &DispatchRequest,
    ) -> Result<DispatchReceipt, VoiceError> {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(message) = &self.fail_with {
            return Err(VoiceError::Dispatch(message.clone()));
        }
        Ok(DispatchReceipt {
            dispatch_id: "AD_test".to_string(),
            agent_name: request.agent_name.clone(),
            room_name: request.room_name.clone(),
        })
    }
}

#[derive(Deserialize)]
struct Claims {
    sub: String,
    name: String,
    nbf: u64,
    exp: u64,
    metadata: String,
    attributes: HashMap<String, String>,
    video: VideoClaims,
}

#[derive(Deserialize)]
struct VideoClaims {
    room: String,
    #[serde(rename = "roomJoin")]
    room_join: bool,
    #[serde(rename = "canPublish")]
    can_publish: bool,
    #[serde(rename = "canPublishData")]
    can_publish_data: bool,
    #[serde(rename = "canSubscribe")]
    can_subscribe: bool,
}

fn decode_claims(token: &str) -> Claims {
    let validation = Validation::new(Algorithm::HS256);
    let key = DecodingKey::from_secret(DEFAULT_SECRET.as_bytes());
    decode::<Claims>(token, &key, &validation)
        .expect("Failed to decode token")
        .claims
}

fn join() -> JoinRequest {
    JoinRequest::new("Dr. John A. Zoidberg", "agentId_1234567", "userId_123456789")
}

fn service_with(dispatcher: Arc<RecordingDispatcher>) -> VoiceService {
    let config = LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET);
    VoiceService::with_dispatcher(config, dispatcher)
}

#[tokio::test]
async fn test_bootstrap_returns_descriptor() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let service = service_with(dispatcher.clone());

    let descriptor = service.bootstrap(&join()).await.expect("bootstrap");

    assert_eq!(descriptor.server_url, DEFAULT_URL);
    assert!(parse_suffix(&descriptor.room_name, ROOM_PREFIX).is_some());
    assert!(parse_suffix(&descriptor.participant_name, PARTICIPANT_PREFIX).is_some());

    let calls = dispatcher.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].room_name, descriptor.room_name);
    assert_eq!(calls[0].agent_name, "inbound-agent");
    assert_eq!(calls[0].metadata, r#"{"customData": "example"}"#);
}

#[tokio::test]
async fn test_token_permissions() {
    let service = service_with(Arc::new(RecordingDispatcher::default()));
    let descriptor = service.bootstrap(&join()).await.expect("bootstrap");

    let claims = decode_claims(&descriptor.participant_token);

    assert_eq!(claims.sub, descriptor.participant_name);
    assert_eq!(claims.name, "Dr. John A. Zoidberg");
    assert_eq!(claims.metadata, "this-is-metadata");
    assert_eq!(claims.attributes["agentId"], "agentId_1234567");
    assert_eq!(claims.attributes["userId"], "userId_123456789");

    assert_eq!(claims.video.room, descriptor.room_name);
    assert!(claims.video.room_join, "roomJoin should be true");
    assert!(claims.video.can_publish, "canPublish should be true");
    assert!(claims.video.can_publish_data, "canPublishData should be true");
    assert!(claims.video.can_subscribe, "canSubscribe should be true");
}

#[tokio::test]
async fn test_token_expires_after_fifteen_minutes() {
    let service = service_with(Arc::new(RecordingDispatcher::default()));
    let descriptor = service.bootstrap(&join()).await.expect("bootstrap");

    let claims = decode_claims(&descriptor.participant_token);
    assert_eq!(claims.exp - claims.nbf, 15 * 60);
}

#[tokio::test]
async fn test_missing_secret_skips_dispatch() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let config = LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, "");
    let service = VoiceService::with_dispatcher(config, dispatcher.clone());

    assert!(!service.is_enabled());
    let err = service.bootstrap(&join()).await.unwrap_err();
    assert!(err.is_config());
    assert_eq!(err.to_string(), "LIVEKIT_API_SECRET is not defined");
    assert!(dispatcher.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_dispatch_failure_is_surfaced() {
    let dispatcher = Arc::new(RecordingDispatcher {
        fail_with: Some("twirp error unavailable".to_string()),
        ..Default::default()
    });
    let service = service_with(dispatcher.clone());

    let err = service.bootstrap(&join()).await.unwrap_err();
    assert!(!err.is_config());
    assert!(err.to_string().contains("twirp error unavailable"));
    assert_eq!(dispatcher.calls.lock().unwrap().len(), 1, "no retry");
}

#[tokio::test]
async fn test_sequential_bootstraps_draw_new_rooms() {
    let service = service_with(Arc::new(RecordingDispatcher::default()));

    let mut rooms = std::collections::HashSet::new();
    for _ in 0..5 {
        rooms.insert(service.bootstrap(&join()).await.expect("bootstrap").room_name);
    }
    assert!(rooms.len() > 1, "five draws from 10 000 names should not all collide");
}

#[tokio::test]
async fn test_zero_ttl_fails_before_dispatch() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let mut config = LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET);
    config.token_ttl_seconds = 0;
    let service = VoiceService::with_dispatcher(config, dispatcher.clone());

    assert!(!service.is_enabled());
    let err = service.bootstrap(&join()).await.unwrap_err();
    assert!(err.is_config());
    assert!(dispatcher.calls.lock().unwrap().is_empty());
}

#[test]
fn test_zero_ttl_token_is_rejected() {
    let mut config = LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET);
    config.token_ttl_seconds = 0;
    let service = VoiceService::with_dispatcher(config, Arc::new(RecordingDispatcher::default()));

    let credentials = LiveKitCredentials {
        url: DEFAULT_URL,
        api_key: DEFAULT_KEY,
        api_secret: DEFAULT_SECRET,
    };
    let err = service
        .generate_join_token(credentials, "room", "user", &join())
        .unwrap_err();
    assert!(matches!(err, VoiceError::Config(_)));
}

#[test]
fn test_livekit_config_toml_defaults() {
    let toml_str = r#"
        url = "ws://localhost:7880"
        api_key = "key"
        api_secret = "secret"
    "#;

    let config: LiveKitConfig = toml::from_str(toml_str).expect("parse TOML");
    assert_eq!(config.token_ttl_seconds, 900);
    assert_eq!(config.agent_name, "inbound-agent");
    assert!(config.is_complete());
}

#[test]
fn test_livekit_config_serialization_skips_secret() {
    let config = LiveKitConfig::new(DEFAULT_URL, DEFAULT_KEY, DEFAULT_SECRET);
    let json = serde_json::to_value(&config).expect("serialize");
    assert_eq!(json["api_key"], DEFAULT_KEY);
    assert!(json.get("api_secret").is_none());
}
