//! Animation clips
//!
//! This module provides keyframe playback for a skeleton, including:
//! - A play-time cursor that advances by frame deltas and loops
//! - Segment lookup for fixed-interval keyframes
//! - Per-bone interpolation (lerp for translation, slerp for rotation)
//!
//! # Example
//!
//! ```rust
//! use skelanim::{Animation, KeyFrame};
//! use glam::{Quat, Vec3};
//!
//! let mut clip = Animation::new(1.0)?;
//! clip.add_key(KeyFrame::new(vec![Vec3::ZERO], vec![Quat::IDENTITY])?)?;
//! clip.add_key(KeyFrame::new(vec![Vec3::X], vec![Quat::IDENTITY])?)?;
//!
//! let pose = clip.sample(0.5)?;
//! assert!((pose.translations()[0].x - 0.5).abs() < 1e-6);
//! # Ok::<(), skelanim::AnimError>(())
//! ```

mod clip;
mod interpolation;
mod state;

pub use clip::Animation;
pub use interpolation::{SamplePoint, locate, wrap_time};
pub use state::{LoopMode, PlaybackOptions, PlaybackState};
