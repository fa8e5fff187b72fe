use serde::Deserialize;
use serde_json::Value;
use std::fs::read_to_string;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Operator-authored request payload, loaded from a JSON file.
///
/// The method string is passed through as-is; the harness trusts the
/// fixture and performs no validation.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    pub method: String,
    pub body: Value,
    #[serde(default)]
    pub headers: Option<Vec<(String, String)>>,
    #[serde(default)]
    pub query: Option<Vec<(String, String)>>,
}

impl Fixture {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = read_to_string(path)?;

        Ok(serde_json::from_str(&content)?)
    }
}
