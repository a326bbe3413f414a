//! Connection status indicator

use serde::{Deserialize, Serialize};
use std::fmt;

/// Room connection state, spelled the way the client SDK reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    SignalReconnecting,
}

/// Dot colour for states without a dedicated one
pub const FALLBACK_INDICATOR_CLASS: &str = "bg-gray-500";

impl ConnectionState {
    pub const ALL: [ConnectionState; 5] = [
        ConnectionState::Disconnected,
        ConnectionState::Connecting,
        ConnectionState::Connected,
        ConnectionState::Reconnecting,
        ConnectionState::SignalReconnecting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Reconnecting => "reconnecting",
            ConnectionState::SignalReconnecting => "signalReconnecting",
        }
    }

    /// Tailwind background class of the status dot
    pub fn indicator_class(&self) -> &'static str {
        match self {
            ConnectionState::Connected => "bg-emerald-500",
            ConnectionState::Connecting => "bg-yellow-500",
            ConnectionState::Disconnected => "bg-red-500",
            _ => FALLBACK_INDICATOR_CLASS,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
