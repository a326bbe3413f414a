//! Token endpoint
//!
//! `GET /api/token?room=<room>&username=<identity>` returns
//! `{"token": "<jwt>", "roomName": "<room>"}`. A repeated parameter takes
//! its first value.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::names::{resolve_participant, resolve_room};
use crate::token::{AccessToken, AccessTokenOptions, TokenError, VideoGrant};

/// Query parameters, both optional
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TokenQuery {
    pub room: Option<String>,
    pub username: Option<String>,
}

impl TokenQuery {
    /// Picks the first `room` and `username` out of the decoded pairs
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.clone())
        };

        Self {
            room: first("room"),
            username: first("username"),
        }
    }
}

/// Response body for a minted token
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub room_name: String,
}

/// Mint an access token
///
/// GET /api/token
pub async fn issue_token(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<TokenResponse>, ApiError> {
    let query = TokenQuery::from_pairs(&pairs);
    let room_name = resolve_room(query.room.as_deref());
    let participant = resolve_participant(query.username.as_deref());

    let livekit = &state.config.livekit;
    let credentials = livekit.credentials().map_err(|e| {
        tracing::error!("Cannot issue token: {}", e);
        ApiError::Misconfigured
    })?;

    let ttl = i64::try_from(livekit.token_ttl_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .ok_or_else(|| {
            tracing::error!("Token TTL {} out of range", livekit.token_ttl_seconds);
            ApiError::Misconfigured
        })?;
    let options = AccessTokenOptions::new(participant.clone()).with_ttl(ttl);

    let token = AccessToken::new(credentials.api_key, credentials.api_secret, options)
        .with_grant(VideoGrant::join(room_name.clone()))
        .to_jwt()
        .map_err(|e| match e {
            TokenError::InvalidTtl => {
                tracing::error!("Token TTL {} out of range", livekit.token_ttl_seconds);
                ApiError::Misconfigured
            }
            e => {
                tracing::error!("Cannot sign token for {}: {}", participant, e);
                ApiError::TokenGeneration
            }
        })?;

    tracing::info!(room = %room_name, identity = %participant, "Issued access token");

    Ok(Json(TokenResponse { token, room_name }))
}
