use crate::fixture::Fixture;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::sync::{Arc, Mutex};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Destination for operator-facing reports. Shared between the runner and
/// the responses it hands out; locked only for synchronous writes.
pub type ReportSink = Arc<Mutex<dyn Write + Send>>;

/// Stand-in for an inbound request. Inert data, getters only.
#[derive(Debug, Clone)]
pub struct MockRequest {
    method: String,
    body: Value,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

impl MockRequest {
    pub fn from_fixture(fixture: &Fixture) -> Self {
        Self {
            method: fixture.method.clone(),
            body: fixture.body.clone(),
            headers: fixture.headers.clone().unwrap_or_default(),
            query: fixture.query.clone().unwrap_or_default(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

#[derive(Debug)]
struct ResponseState {
    status: u16,
    body: Option<Value>,
}

/// Recorder standing in for a response writer.
///
/// Cloning shares the captured state, so the handler writes through its
/// clone while the runner keeps a handle for readback. Status defaults to
/// 200; the code is recorded as given, not checked against the HTTP
/// status registry.
#[derive(Clone)]
pub struct MockResponse {
    state: Arc<Mutex<ResponseState>>,
    out: ReportSink,
}

impl MockResponse {
    pub fn new(out: ReportSink) -> Self {
        Self {
            state: Arc::new(Mutex::new(ResponseState {
                status: 200,
                body: None,
            })),
            out,
        }
    }

    /// Records `code` as the current status. Last write wins.
    pub fn status(&self, code: u16) -> &Self {
        self.state.lock().expect("lock poisoned").status = code;
        self
    }

    /// Records `value` as the captured body and immediately writes the
    /// report block to the sink. Serialization failures propagate to the
    /// caller; nothing is captured from a failed call.
    pub fn json<T: Serialize>(&self, value: T) -> Result<&Self> {
        let value = serde_json::to_value(value)?;
        let pretty = serde_json::to_string_pretty(&value)?;

        let status = {
            let mut state = self.state.lock().expect("lock poisoned");
            state.body = Some(value);
            state.status
        };

        let mut out = self.out.lock().expect("lock poisoned");
        writeln!(out, "--- STATUS CODE ---")?;
        writeln!(out, "{status}")?;
        writeln!(out, "--- RESPONSE BODY ---")?;
        writeln!(out, "{pretty}")?;

        Ok(self)
    }

    pub fn status_code(&self) -> u16 {
        self.state.lock().expect("lock poisoned").status
    }

    pub fn captured_body(&self) -> Option<Value> {
        self.state.lock().expect("lock poisoned").body.clone()
    }
}
