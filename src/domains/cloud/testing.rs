//! Recording fake connector for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::api::{ApiRequest, ApiResponse, Transport};
use super::client::Connector;
use super::credentials::Credentials;
use super::error::{CloudError, CloudResult};

#[derive(Debug, Clone)]
enum Behavior {
    Respond(u16, String),
    Fail,
    Hang,
}

#[derive(Default)]
struct Recorded {
    connects: Vec<Credentials>,
    requests: Vec<ApiRequest>,
}

/// Connector whose transports record every request and answer with a canned outcome.
pub struct RecordingConnector {
    behavior: Behavior,
    recorded: Arc<Mutex<Recorded>>,
}

impl RecordingConnector {
    /// Answer every request with the given status and body.
    pub fn respond(status: u16, body: &str) -> Arc<Self> {
        Self::with(Behavior::Respond(status, body.to_string()))
    }

    /// Fail every request as a transport error.
    pub fn fail() -> Arc<Self> {
        Self::with(Behavior::Fail)
    }

    /// Never answer.
    pub fn hang() -> Arc<Self> {
        Self::with(Behavior::Hang)
    }

    fn with(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            recorded: Arc::new(Mutex::new(Recorded::default())),
        })
    }

    pub fn connects(&self) -> Vec<Credentials> {
        self.recorded.lock().unwrap().connects.clone()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.recorded.lock().unwrap().requests.clone()
    }
}

impl Connector for RecordingConnector {
    fn connect(&self, credentials: &Credentials) -> CloudResult<Arc<dyn Transport>> {
        self.recorded
            .lock()
            .unwrap()
            .connects
            .push(credentials.clone());

        Ok(Arc::new(RecordingTransport {
            behavior: self.behavior.clone(),
            recorded: self.recorded.clone(),
        }))
    }
}

struct RecordingTransport {
    behavior: Behavior,
    recorded: Arc<Mutex<Recorded>>,
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: ApiRequest) -> CloudResult<ApiResponse> {
        self.recorded.lock().unwrap().requests.push(request);

        match &self.behavior {
            Behavior::Respond(status, body) => Ok(ApiResponse {
                status: *status,
                body: body.clone(),
            }),
            Behavior::Fail => Err(CloudError::digest("connection reset")),
            Behavior::Hang => std::future::pending().await,
        }
    }
}
