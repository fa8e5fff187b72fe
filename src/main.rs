mod fixture;
mod mock;
mod runner;

use fixture::Fixture;
use log::debug;
use mock::{MockRequest, MockResponse};
use runner::Runner;
use serde_json::{json, Value};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

const FIXTURE_PATH: &str = "fixtures/generate.json";

// Stand-in for the generate endpoint: acknowledges the submitted spec
// without doing any generation work.
async fn generate(req: MockRequest, res: MockResponse) -> Result<()> {
    let spec = req.body().get("spec").cloned().unwrap_or(Value::Null);

    res.status(200).json(json!({ "received": true, "spec": spec }))?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let fixture = Fixture::from_file(FIXTURE_PATH)?;
    debug!("loaded fixture: {} {}", fixture.method, FIXTURE_PATH);

    Runner::new(fixture).run(&generate).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use crate::mock::ReportSink;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn generate_echoes_submitted_spec() {
        let fixture = Fixture {
            method: "POST".to_string(),
            body: json!({
                "spec": {
                    "product_name": "Test Product",
                    "description": "A simple landing page"
                },
                "shadow": false
            }),
            headers: None,
            query: None,
        };

        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink: ReportSink = buf.clone();

        let outcome = Runner::with_output(fixture, sink)
            .run(&generate)
            .await
            .unwrap();

        assert_eq!(outcome.status, 200);
        assert_json_eq!(
            outcome.body.unwrap(),
            json!({
                "received": true,
                "spec": {
                    "product_name": "Test Product",
                    "description": "A simple landing page"
                }
            })
        );
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn generate_answers_null_spec_when_absent() {
        let fixture = Fixture {
            method: "POST".to_string(),
            body: json!({"shadow": true}),
            headers: None,
            query: None,
        };

        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink: ReportSink = buf.clone();

        let outcome = Runner::with_output(fixture, sink)
            .run(&generate)
            .await
            .unwrap();

        assert_eq!(outcome.status, 200);
        assert_json_eq!(
            outcome.body.unwrap(),
            json!({"received": true, "spec": null})
        );
    }
}
