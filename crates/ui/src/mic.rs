//! Microphone toggle button

use serde::Serialize;

/// Local microphone state as shown on the button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MicState {
    #[default]
    Live,
    Muted,
}

const LIVE_CLASS: &str = "bg-gradient-to-r from-red-500 to-pink-600 hover:shadow-[0_0_20px_rgba(239,68,68,0.5)]";
const MUTED_CLASS: &str = "bg-gradient-to-r from-emerald-500 to-teal-600 hover:shadow-[0_0_20px_rgba(16,185,129,0.5)]";

// Heroicons outline paths
const MICROPHONE_PATH: &str = "M12 18.75a6 6 0 0 0 6-6v-1.5m-6 7.5a6 6 0 0 1-6-6v-1.5m6 7.5v3.75m-3.75 0h7.5M12 15.75a3 3 0 0 1-3-3V4.5a3 3 0 1 1 6 0v8.25a3 3 0 0 1-3 3Z";
const SPEAKER_PATH: &str = "M19.114 5.636a9 9 0 0 1 0 12.728M16.463 8.288a5.25 5.25 0 0 1 6.787 0M12 18.75a9 9 0 1 0-9-9 9 9 0 0 0 9 9Z";

impl MicState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, MicState::Live)
    }

    pub fn button_class(&self) -> &'static str {
        match self {
            MicState::Live => LIVE_CLASS,
            MicState::Muted => MUTED_CLASS,
        }
    }

    pub fn icon_path(&self) -> &'static str {
        match self {
            MicState::Live => MICROPHONE_PATH,
            MicState::Muted => SPEAKER_PATH,
        }
    }

    /// Whether the icon pulses
    pub fn animated(&self) -> bool {
        self.is_enabled()
    }

    pub fn look(&self) -> MicLook {
        MicLook {
            button_class: self.button_class(),
            icon_path: self.icon_path(),
            animated: self.animated(),
        }
    }
}

/// Rendering of one mic state, as handed to the page script
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MicLook {
    pub button_class: &'static str,
    pub icon_path: &'static str,
    pub animated: bool,
}
