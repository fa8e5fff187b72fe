use crate::fixture::Fixture;
use crate::mock::{MockRequest, MockResponse, ReportSink};
use futures_util::future::BoxFuture;
use log::debug;
use serde_json::Value;
use std::future::Future;
use std::io::Write;
use std::sync::{Arc, Mutex};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// The function under exercise. Implemented for any async fn or closure
/// taking the mock pair and resolving to `Result<()>`; `Err` covers both
/// synchronous failure and asynchronous rejection.
pub trait Handler {
    fn call(&self, req: MockRequest, res: MockResponse) -> BoxFuture<'static, Result<()>>;
}

impl<F, Fut> Handler for F
where
    F: Fn(MockRequest, MockResponse) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    fn call(&self, req: MockRequest, res: MockResponse) -> BoxFuture<'static, Result<()>> {
        Box::pin(self(req, res))
    }
}

/// What one exercise of the handler captured.
#[derive(Debug)]
pub struct RunOutcome {
    pub status: u16,
    pub body: Option<Value>,
    pub error: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// Drives one handler invocation per `run` call: fresh mocks each time,
/// report written to the sink as the run progresses.
pub struct Runner {
    fixture: Fixture,
    out: ReportSink,
}

impl Runner {
    pub fn new(fixture: Fixture) -> Self {
        Self::with_output(fixture, Arc::new(Mutex::new(std::io::stdout())))
    }

    pub fn with_output(fixture: Fixture, out: ReportSink) -> Self {
        Self { fixture, out }
    }

    /// Exercises `handler` once against the fixture and reports the result.
    ///
    /// A handler failure is captured in the outcome and reported as a
    /// crash marker; it never propagates out of the runner. The errors
    /// `run` itself returns are report-sink write failures.
    pub async fn run<H: Handler>(&self, handler: &H) -> Result<RunOutcome> {
        writeln!(self.out.lock().expect("lock poisoned"), "Running test...")?;

        let req = MockRequest::from_fixture(&self.fixture);
        let res = MockResponse::new(self.out.clone());

        debug!("dispatching {} request to handler", req.method());

        let result = handler.call(req, res.clone()).await;

        let mut out = self.out.lock().expect("lock poisoned");
        match &result {
            Ok(()) => writeln!(out, "Test complete.")?,
            Err(err) => writeln!(out, "Test crashed: {err}")?,
        }

        Ok(RunOutcome {
            status: res.status_code(),
            body: res.captured_body(),
            error: result.err(),
        })
    }
}
