//! Shared helpers for the e2e tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use pizza_agent::backend::{create_handlers, PizzaApiClient};
use pizza_agent::factory::build_registry;
use pizza_agent::llm::{ChatBackend, ChatMessage, FunctionTool, LlmError};
use pizza_agent::openapi::DuplicatePolicy;
use pizza_agent::tools::ToolRegistry;
use pizza_api::AppState;

/// Start the backend on 127.0.0.1 with a random port; returns its base URL
pub async fn start_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        if let Err(e) = pizza_api::serve_listener(listener, AppState::default()).await {
            eprintln!("backend stopped: {:#}", e);
        }
    });

    format!("http://{}", addr)
}

/// Registry built from the bundled document, pointed at `base_url`
pub fn registry_for(base_url: &str) -> ToolRegistry {
    let document: serde_json::Value =
        serde_json::from_str(pizza_api::OPENAPI_SPEC).expect("Bundled OpenAPI document is JSON");
    let client = PizzaApiClient::new(base_url).expect("Valid base url");
    build_registry(&document, &create_handlers(client), DuplicatePolicy::Override)
        .expect("Bundled document transforms")
}

/// Chat backend replaying canned replies
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<ChatMessage>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<ChatMessage>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _tools: &[FunctionTool],
    ) -> Result<ChatMessage, LlmError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyResponse)
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
