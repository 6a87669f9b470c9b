//! Keyframe clip with a looping play-time cursor

use log::{debug, trace};

use super::interpolation::{SamplePoint, locate, wrap_time};
use super::state::{PlaybackOptions, PlaybackState};
use crate::error::{AnimError, Result};
use crate::keyframe::KeyFrame;

/// Keyframes sampled at a fixed interval plus a play-time cursor
///
/// The cursor belongs to this clip alone. Clone the clip to play the same
/// keyframes from an independent cursor.
#[derive(Debug, Clone)]
pub struct Animation {
    keyframes: Vec<KeyFrame>,
    /// Seconds between consecutive keyframes
    interval: f32,
    /// Current time within the clip (seconds)
    play_time: f32,
    state: PlaybackState,
    options: PlaybackOptions,
}

impl Animation {
    /// Create an empty clip with the given keyframe interval (seconds)
    pub fn new(interval: f32) -> Result<Self> {
        Self::with_options(interval, PlaybackOptions::default())
    }

    pub fn with_options(interval: f32, options: PlaybackOptions) -> Result<Self> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(AnimError::InvalidInterval(interval));
        }
        if !options.time_scale.is_finite() || options.time_scale < 0.0 {
            return Err(AnimError::InvalidInput(format!(
                "time scale must be finite and non-negative, got {}",
                options.time_scale
            )));
        }
        Ok(Self {
            keyframes: Vec::new(),
            interval,
            play_time: 0.0,
            state: PlaybackState::Idle,
            options,
        })
    }

    /// Create a clip from a non-empty list of keyframes
    pub fn from_keyframes(
        interval: f32,
        options: PlaybackOptions,
        keyframes: Vec<KeyFrame>,
    ) -> Result<Self> {
        if keyframes.is_empty() {
            return Err(AnimError::EmptyAnimation);
        }
        let mut animation = Self::with_options(interval, options)?;
        for key in keyframes {
            animation.add_key(key)?;
        }
        debug!(
            "Built animation: {} keyframes, {} bones, {:.3}s long",
            animation.key_count(),
            animation.bone_count().unwrap_or(0),
            animation.last_time()
        );
        Ok(animation)
    }

    /// Append a keyframe; all keyframes must describe the same number of bones
    pub fn add_key(&mut self, key: KeyFrame) -> Result<()> {
        if let Some(first) = self.keyframes.first()
            && first.bone_count() != key.bone_count()
        {
            return Err(AnimError::LengthMismatch {
                context: "keyframe bones",
                expected: first.bone_count(),
                actual: key.bone_count(),
            });
        }
        self.keyframes.push(key);
        Ok(())
    }

    pub fn keyframes(&self) -> &[KeyFrame] {
        &self.keyframes
    }

    pub fn keyframe(&self, index: usize) -> Option<&KeyFrame> {
        self.keyframes.get(index)
    }

    pub fn key_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Bones per keyframe, `None` before the first keyframe is added
    pub fn bone_count(&self) -> Option<usize> {
        self.keyframes.first().map(KeyFrame::bone_count)
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn options(&self) -> &PlaybackOptions {
        &self.options
    }

    /// Time of the last keyframe; zero for zero or one keyframes
    pub fn last_time(&self) -> f32 {
        if self.keyframes.is_empty() {
            0.0
        } else {
            (self.keyframes.len() - 1) as f32 * self.interval
        }
    }

    /// Current cursor position (seconds)
    pub fn cursor(&self) -> f32 {
        self.play_time
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Rewind the cursor to zero and return to [`PlaybackState::Idle`]
    pub fn reset(&mut self) {
        self.play_time = 0.0;
        self.state = PlaybackState::Idle;
    }

    /// Move the cursor forward by `delta` seconds, looping past the last keyframe
    ///
    /// Returns the new cursor. Negative or non-finite deltas, and deltas whose
    /// scaled step overflows, are rejected without touching the cursor.
    pub fn advance(&mut self, delta: f32) -> Result<f32> {
        check_time("delta", delta)?;
        if self.keyframes.is_empty() {
            return Err(AnimError::EmptyAnimation);
        }

        let last_time = self.last_time();
        let advanced = self.play_time + delta * self.options.time_scale;
        if !advanced.is_finite() {
            return Err(AnimError::InvalidInput(format!(
                "delta {delta} scaled by {} overflows the cursor",
                self.options.time_scale
            )));
        }
        let wrapped = wrap_time(advanced, last_time, self.options.loop_mode);
        if wrapped != advanced {
            trace!(
                "Cursor {advanced:.4}s passed clip end {last_time:.4}s, looping to {wrapped:.4}s"
            );
        }

        self.play_time = wrapped;
        self.state = PlaybackState::Playing;
        Ok(self.play_time)
    }

    /// Advance by `delta` and return the interpolated pose at the new cursor
    pub fn sample(&mut self, delta: f32) -> Result<KeyFrame> {
        let mut out = KeyFrame::default();
        self.sample_into(delta, &mut out)?;
        Ok(out)
    }

    /// Like [`Animation::sample`], reusing `out`'s storage
    pub fn sample_into(&mut self, delta: f32, out: &mut KeyFrame) -> Result<()> {
        let time = self.advance(delta)?;
        self.pose_at_into(time, out)
    }

    /// Interpolated pose at an absolute clip time, without moving the cursor
    ///
    /// Times past the last keyframe are looped with the clip's loop mode.
    pub fn pose_at(&self, time: f32) -> Result<KeyFrame> {
        let mut out = KeyFrame::default();
        self.pose_at_into(time, &mut out)?;
        Ok(out)
    }

    /// Like [`Animation::pose_at`], reusing `out`'s storage
    pub fn pose_at_into(&self, time: f32, out: &mut KeyFrame) -> Result<()> {
        check_time("time", time)?;
        let time = wrap_time(time, self.last_time(), self.options.loop_mode);

        match locate(time, self.interval, self.keyframes.len()) {
            None => Err(AnimError::EmptyAnimation),
            Some(SamplePoint::Key(index)) => {
                out.copy_from(&self.keyframes[index]);
                Ok(())
            }
            Some(SamplePoint::Between { segment, t }) => {
                out.blend_into(&self.keyframes[segment], &self.keyframes[segment + 1], t);
                Ok(())
            }
        }
    }
}

fn check_time(what: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AnimError::InvalidInput(format!(
            "{what} must be finite and non-negative, got {value}"
        )))
    }
}
