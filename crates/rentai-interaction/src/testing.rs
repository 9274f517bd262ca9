//! Scripted transport for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use rentai_core::{RentaiError, Result};
use serde_json::Value;
use tokio::sync::Notify;

use crate::transport::{ApiRequest, ApiResponse, HttpTransport};

enum Scripted {
    Response(ApiResponse),
    NetworkError(String),
}

/// Replays queued responses in order and records every request it sees.
///
/// With nothing queued it answers `200 null`. [`FakeTransport::hold`] parks
/// requests until [`FakeTransport::release`] so tests can observe in-flight
/// state.
#[derive(Default)]
pub struct FakeTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
    held: Mutex<bool>,
    gate: Notify,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push_raw(status, body.to_string());
    }

    pub fn push_raw(&self, status: u16, body: impl Into<String>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Scripted::Response(ApiResponse::new(status, body)));
    }

    pub fn push_network_error(&self, message: impl Into<String>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Scripted::NetworkError(message.into()));
    }

    pub fn hold(&self) {
        *self.held.lock().unwrap_or_else(PoisonError::into_inner) = true;
    }

    pub fn release(&self) {
        *self.held.lock().unwrap_or_else(PoisonError::into_inner) = false;
        self.gate.notify_waiters();
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);

        loop {
            let released = self.gate.notified();
            if !*self.held.lock().unwrap_or_else(PoisonError::into_inner) {
                break;
            }
            released.await;
        }

        match self.script.lock().unwrap_or_else(PoisonError::into_inner).pop_front() {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::NetworkError(message)) => Err(RentaiError::network(message)),
            None => Ok(ApiResponse::new(200, "null")),
        }
    }
}
