//! Client for a running token server

use neurallink_token_server::api::{token::TokenResponse, TOKEN_PATH};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Token server returned {status}: {message}")]
    Server {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// GET the token endpoint of `server`, forwarding room and username when given
pub async fn fetch_token(
    server: &str,
    room: Option<&str>,
    username: Option<&str>,
) -> Result<TokenResponse, FetchError> {
    let url = format!("{}{}", server.trim_end_matches('/'), TOKEN_PATH);
    let query: Vec<(&str, &str)> = [("room", room), ("username", username)]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect();

    tracing::debug!("Requesting token from {}", url);
    let response = reqwest::Client::new().get(&url).query(&query).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let message = body["error"].as_str().unwrap_or("unknown error").to_string();
        return Err(FetchError::Server { status, message });
    }

    Ok(response.json().await?)
}
