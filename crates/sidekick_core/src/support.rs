//! Overwhelm-to-support-level mapping
//!
//! Pure functions from the self-reported 0-100 overwhelm score to the
//! coarse support tier and its derived tuning profile. No state lives
//! here; the session manager owns persistence.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Coarse support tier driving focus defaults and UI adaptation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SupportLevel {
    Normal,
    Gentle,
    Overloaded,
}

impl SupportLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportLevel::Normal => "normal",
            SupportLevel::Gentle => "gentle",
            SupportLevel::Overloaded => "overloaded",
        }
    }
}

impl fmt::Display for SupportLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived, read-only tuning record for a support level. Recomputed on
/// demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct SupportProfile {
    pub level: SupportLevel,
    pub label: &'static str,
    pub focus_minutes_default: u32,
    pub focus_duration_options: &'static [u32],
    pub nudge_interval_seconds: u32,
    pub auto_enable_shades: bool,
    pub auto_reduce_motion: bool,
}

impl SupportProfile {
    pub fn for_level(level: SupportLevel) -> SupportProfile {
        match level {
            SupportLevel::Overloaded => SupportProfile {
                level,
                label: "High support",
                focus_minutes_default: 5,
                focus_duration_options: &[5, 10, 15],
                nudge_interval_seconds: 75,
                auto_enable_shades: true,
                auto_reduce_motion: true,
            },
            SupportLevel::Gentle => SupportProfile {
                level,
                label: "Gentle support",
                focus_minutes_default: 10,
                focus_duration_options: &[5, 10, 15, 25],
                nudge_interval_seconds: 120,
                auto_enable_shades: false,
                auto_reduce_motion: false,
            },
            SupportLevel::Normal => SupportProfile {
                level,
                label: "Baseline",
                focus_minutes_default: 15,
                focus_duration_options: &[10, 15, 25],
                nudge_interval_seconds: 180,
                auto_enable_shades: false,
                auto_reduce_motion: false,
            },
        }
    }
}

/// Clamp an overwhelm value into [0, 100]. Non-finite input defaults to
/// the midpoint 50 rather than being rejected.
pub fn clamp_overwhelm(value: f64) -> u8 {
    if !value.is_finite() {
        return 50;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Clamp, then round to the nearest multiple of 25 (the check-in
/// slider's coarse mode).
pub fn snap_overwhelm(value: f64) -> u8 {
    let clamped = clamp_overwhelm(value) as f64;
    ((clamped / 25.0).round() * 25.0) as u8
}

/// Map an overwhelm score to its support level. Thresholds are
/// half-open: `>= 75` is overloaded, `>= 25` is gentle, below that
/// normal.
pub fn map_to_support_level(value: f64) -> SupportLevel {
    let clamped = clamp_overwhelm(value);
    if clamped >= 75 {
        SupportLevel::Overloaded
    } else if clamped >= 25 {
        SupportLevel::Gentle
    } else {
        SupportLevel::Normal
    }
}

/// Derive the full tuning profile for an overwhelm score.
pub fn support_profile(value: f64) -> SupportProfile {
    SupportProfile::for_level(map_to_support_level(value))
}
