//! Segment lookup for fixed-interval keyframes

use super::state::LoopMode;

/// Where a time falls within a keyframe sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplePoint {
    /// Exactly on a stored keyframe
    Key(usize),
    /// Between keyframe `segment` and `segment + 1`, `t` in `(0, 1)`
    Between { segment: usize, t: f32 },
}

/// Locate `time` within `key_count` keyframes spaced `interval` apart
///
/// `time` is expected to be wrapped into `[0, last_time]` already. Returns
/// `None` when there are no keyframes. A single keyframe always maps to
/// `Key(0)`, and any time at or past the last keyframe maps to the last one,
/// so `segment + 1` never leaves the sequence.
pub fn locate(time: f32, interval: f32, key_count: usize) -> Option<SamplePoint> {
    if key_count == 0 {
        return None;
    }
    if key_count == 1 {
        return Some(SamplePoint::Key(0));
    }

    let last_index = key_count - 1;
    let last_time = last_index as f32 * interval;

    if time >= last_time {
        return Some(SamplePoint::Key(last_index));
    }
    if time <= 0.0 {
        return Some(SamplePoint::Key(0));
    }

    let segment = ((time / interval).floor() as usize).min(last_index - 1);
    let t = ((time - segment as f32 * interval) / interval).clamp(0.0, 1.0);

    if t <= 0.0 {
        Some(SamplePoint::Key(segment))
    } else if t >= 1.0 {
        Some(SamplePoint::Key(segment + 1))
    } else {
        Some(SamplePoint::Between { segment, t })
    }
}

/// Bring a running time back into `[0, last_time]`
///
/// With [`LoopMode::HardReset`] any time strictly past `last_time` becomes
/// zero, so a cursor slightly over the end restarts at the first keyframe.
pub fn wrap_time(time: f32, last_time: f32, mode: LoopMode) -> f32 {
    if time <= last_time {
        return time;
    }
    match mode {
        LoopMode::HardReset => 0.0,
        LoopMode::Wrap if last_time > 0.0 => time.rem_euclid(last_time),
        LoopMode::Wrap => 0.0,
    }
}
