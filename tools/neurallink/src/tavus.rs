//! Tavus persona listing

use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://tavusapi.com";
pub const ENV_API_KEY: &str = "TAVUS_API_KEY";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Persona {
    #[serde(default)]
    pub persona_id: Option<String>,
    #[serde(default)]
    pub persona_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PersonaList {
    #[serde(default)]
    data: Vec<Persona>,
}

#[derive(Debug, thiserror::Error)]
pub enum TavusError {
    #[error("HTTP Error: {status}\nResponse: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct TavusClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TavusClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// GET /v2/personas
    pub async fn list_personas(&self) -> Result<Vec<Persona>, TavusError> {
        let url = format!("{}/v2/personas", self.base_url.trim_end_matches('/'));
        tracing::debug!("Listing personas from {}", url);

        let response = self
            .http
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TavusError::Status { status, body });
        }

        let list: PersonaList = serde_json::from_str(&body)?;
        Ok(list.data)
    }
}

/// Report printed by `neurallink personas`
pub fn format_personas(personas: &[Persona]) -> String {
    let mut out = format!("Found {} personas:\n", personas.len());
    for persona in personas {
        out.push_str(&format!(
            "ID: {} | Name: {}\n",
            persona.persona_id.as_deref().unwrap_or("None"),
            persona.persona_name.as_deref().unwrap_or("None"),
        ));
    }
    out
}
