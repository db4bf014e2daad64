//! Sidekick Core - Conversational State Engine
//!
//! This crate provides the local, offline decision layer for the Divergify
//! sidekick: rule-based cognitive state classification, guarded response
//! composition with persona handoffs, and the session overwhelm-to-support
//! mapping that tunes coaching intensity.

pub mod classifier;
pub mod composer;
pub mod config;
pub mod error;
pub mod handoff;
pub mod orchestrator;
pub mod session;
pub mod support;
pub mod text;

pub use classifier::{CognitiveState, StateClassifier};
pub use composer::{ResponseComposer, ResponseStyle};
pub use config::{Lexicon, OverwhelmPersistence, SidekickConfig};
pub use error::{Result, SidekickError};
pub use handoff::{Handoff, SidekickId};
pub use orchestrator::{ConversationTurn, SidekickEngine, SidekickResponse};
pub use session::{Clock, FileStore, MemoryStore, SessionManager, SessionState, SessionStore, SystemClock};
pub use support::{SupportLevel, SupportProfile, clamp_overwhelm, map_to_support_level, snap_overwhelm, support_profile};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Clock, CognitiveState, ConversationTurn, Handoff, Lexicon, MemoryStore,
        OverwhelmPersistence, ResponseComposer, ResponseStyle, Result, SessionManager,
        SessionState, SessionStore, SidekickConfig, SidekickEngine, SidekickError, SidekickId,
        SidekickResponse, StateClassifier, SupportLevel, SupportProfile, SystemClock,
    };
}
