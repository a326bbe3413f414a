//! Neural Link token server
//!
//! Issues short-lived LiveKit access tokens and hosts the single-room page
//! that uses them.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                   neurallink-token-server                     │
//! ├───────────────────────────────────────────────────────────────┤
//! │                                                               │
//! │  ┌──────────────────┐                                         │
//! │  │  HTTP API Server │ ← GET /api/token?room=&username=        │
//! │  │  (axum)          │ ← GET /health                           │
//! │  └────────┬─────────┘ ← GET /          (room page, ui crate)  │
//! │           │ resolves                                          │
//! │           ▼                                                   │
//! │  ┌──────────────────┐   ┌──────────────────┐                  │
//! │  │  Name resolver   │──▶│  AccessToken     │──▶ { token,      │
//! │  │  (room, user)    │   │  (jsonwebtoken)  │      roomName }  │
//! │  └──────────────────┘   └──────────────────┘                  │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod names;
pub mod token;
