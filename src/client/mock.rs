//! Scripted in-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::{Error, Result};

use super::transport::{FormFields, Transport, TransportResponse};

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub url: String,
    pub form: FormFields,
}

impl RecordedRequest {
    /// Last path segment pair, e.g. `authenticate/coblogin`.
    pub fn endpoint(&self) -> &str {
        self.url
            .strip_prefix("https://mock.test/v1.0/")
            .unwrap_or(&self.url)
    }
}

/// Replays queued responses in order and records every request.
///
/// Running out of responses is a test bug, reported as a transport error.
#[derive(Default)]
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Result<TransportResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, body: Value) {
        self.push_raw(&body.to_string());
    }

    pub fn push_raw(&self, body: &str) {
        self.push_status_raw(200, body);
    }

    pub fn push_status(&self, status: u16, body: Value) {
        self.push_status_raw(status, &body.to_string());
    }

    pub fn push_status_raw(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse::new(status, body)));
    }

    pub fn push_transport_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(Error::Transport(message.to_string())));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.endpoint().to_string())
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_form(&self, url: &str, form: &FormFields) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            form: form.clone(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport(format!("no scripted response for {}", url))))
    }
}

/// A client whose tokens are valid for ten more minutes, so tests start
/// with no login traffic.
pub(crate) async fn seeded_client(mock: &std::sync::Arc<MockTransport>) -> super::YodleeClient {
    use chrono::{Duration, Utc};

    let later = Utc::now() + Duration::minutes(10);
    let options = crate::InitOptions::new("cob", "cob-pass").with_tokens(crate::SessionTokens {
        cob_session_token: "cob-tok".into(),
        user_session_token: "user-tok".into(),
        cob_session_expires: later,
        user_session_expires: later,
    });
    let config = super::ClientConfig::default().with_base_url("https://mock.test/v1.0/");

    super::YodleeClient::initialize_with_transport(options, config, mock.clone())
        .await
        .expect("seeded client")
}
