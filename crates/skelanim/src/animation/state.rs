//! Playback configuration and state for animation clips

/// How the cursor behaves once it runs past the last keyframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum LoopMode {
    /// Jump back to time zero, dropping any overshoot
    #[default]
    HardReset,
    /// Carry the overshoot into the next loop (modulo the clip length)
    Wrap,
}

/// Options fixed at clip construction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct PlaybackOptions {
    /// Looping policy applied when the cursor passes the last keyframe
    pub loop_mode: LoopMode,
    /// Multiplier applied to every frame delta
    pub time_scale: f32,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            loop_mode: LoopMode::HardReset,
            time_scale: 1.0,
        }
    }
}

/// Lifecycle of a clip's cursor
///
/// There is no paused or stopped state; a caller that wants to pause simply
/// stops sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Cursor at zero, never advanced
    #[default]
    Idle,
    /// Cursor advanced at least once; loops indefinitely
    Playing,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}
