#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, Response},
    Router,
};
use parlor_server::{app, config::Config, AppState};
use parlor_voice::{
    AgentDispatcher, DispatchReceipt, DispatchRequest, LiveKitConfig, LiveKitCredentials,
    VoiceError, VoiceService,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const TEST_URL: &str = "wss://media.example.com";
pub const TEST_KEY: &str = "devkey";
pub const TEST_SECRET: &str = "devsecret";

/// Stands in for the media service's dispatch API.
#[derive(Debug, Default)]
pub struct FakeDispatcher {
    pub rooms: Mutex<Vec<String>>,
    pub fail_with: Option<String>,
}

#[async_trait]
impl AgentDispatcher for FakeDispatcher {
    async fn create_dispatch(
        &self,
        _credentials: LiveKitCredentials<'_>,
        request: &DispatchRequest,
    ) -> Result<DispatchReceipt, VoiceError> {
        self.rooms.lock().unwrap().push(request.room_name.clone());
        if let Some(message) = &self.fail_with {
            return Err(VoiceError::Dispatch(message.clone()));
        }
        Ok(DispatchReceipt {
            dispatch_id: format!("AD_{}", request.room_name),
            agent_name: request.agent_name.clone(),
            room_name: request.room_name.clone(),
        })
    }
}

pub fn livekit_config() -> LiveKitConfig {
    LiveKitConfig::new(TEST_URL, TEST_KEY, TEST_SECRET)
}

pub fn setup_app_with(livekit: LiveKitConfig, dispatcher: Arc<FakeDispatcher>) -> Router {
    setup_app_with_limit(livekit, dispatcher, 1000)
}

pub fn setup_app_with_limit(
    livekit: LiveKitConfig,
    dispatcher: Arc<FakeDispatcher>,
    requests_per_minute: u32,
) -> Router {
    let mut config = Config::default();
    config.rate_limit.requests_per_minute = requests_per_minute;
    config.client.dir = "/nonexistent/parlor-client".to_string();
    config.livekit = livekit.clone();

    let voice_service = VoiceService::with_dispatcher(livekit, dispatcher);
    app(AppState::new(voice_service, &config))
}

pub fn setup_app() -> (Router, Arc<FakeDispatcher>) {
    let dispatcher = Arc::new(FakeDispatcher::default());
    (setup_app_with(livekit_config(), dispatcher.clone()), dispatcher)
}

pub fn join_body() -> Value {
    serde_json::json!({
        "userName": "Dr. John A. Zoidberg",
        "agentId": "agentId_1234567",
        "userId": "userId_123456789"
    })
}

pub fn join_request(body: String) -> Request<Body> {
    let addr = SocketAddr::from(([127, 0, 0, 1], 12345));
    let mut request = Request::builder()
        .uri("/api/connection-details")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
