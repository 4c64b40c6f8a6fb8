//! Test doubles shared by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::clients::{BoxApiConnection, HttpError, HttpResponse, PreparedRequest, Transport};
use crate::config::{AccessToken, BoxConfig};

/// Replays queued responses in order and records every request.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<(u16, String)>>,
    seen: Mutex<Vec<PreparedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, code: u16, body: serde_json::Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back((code, body.to_string()));
    }

    pub fn push_empty(&self, code: u16) {
        self.responses
            .lock()
            .unwrap()
            .push_back((code, String::new()));
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> PreparedRequest {
        self.seen
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

impl Transport for ScriptedTransport {
    fn execute(&self, request: PreparedRequest) -> Result<HttpResponse, HttpError> {
        self.seen.lock().unwrap().push(request);
        let (code, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request: no scripted response left");
        HttpResponse::from_raw(code, HashMap::new(), &body)
    }
}

pub fn test_config() -> BoxConfig {
    BoxConfig::builder()
        .access_token(AccessToken::new("test-token").unwrap())
        .build()
        .unwrap()
}

/// A connection whose transport answers each request from the script.
pub fn scripted_connection() -> (BoxApiConnection, Arc<ScriptedTransport>) {
    let transport = ScriptedTransport::new();
    let api = BoxApiConnection::with_transport(test_config(), transport.clone());
    (api, transport)
}

/// A connection for tests that must not send anything.
pub fn offline_connection() -> BoxApiConnection {
    scripted_connection().0
}
