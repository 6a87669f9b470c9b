//! Skeletal animation evaluation
//!
//! This crate turns a bone hierarchy, its bind pose, and a looping sequence of
//! keyframes into the per-bone skinning matrices a renderer uploads each frame:
//! - Bone hierarchy with inverse bind (offset) matrices
//! - Skin parts bound to bones
//! - Keyframe interpolation (lerp for translation, slerp for rotation)
//! - Looping play-time cursor
//! - Pose evaluation into root-space skinning matrices
//!
//! # Example
//!
//! ```rust
//! use skelanim::{Animation, KeyFrame, PoseEvaluator, Skeleton};
//! use glam::{Quat, Vec3};
//!
//! let rest = KeyFrame::new(
//!     vec![Vec3::ZERO, Vec3::Y],
//!     vec![Quat::IDENTITY, Quat::IDENTITY],
//! )?;
//! let skeleton = Skeleton::from_rest_pose(&[None, Some(0)], &rest)?;
//!
//! let mut animation = Animation::new(1.0)?;
//! animation.add_key(rest.clone())?;
//! animation.add_key(rest)?;
//!
//! let mut evaluator = PoseEvaluator::new(&skeleton);
//! let pose = animation.sample(0.016)?;
//! let finals = evaluator.evaluate(&skeleton, &pose)?;
//! assert_eq!(finals.len(), 2);
//! # Ok::<(), skelanim::AnimError>(())
//! ```

pub mod animation;
pub mod convention;
pub mod demo;
#[cfg(feature = "serde-support")]
pub mod description;
pub mod error;
pub mod keyframe;
pub mod pose;
pub mod rig;
pub mod skeleton;
pub mod skin;

// Re-export common types
pub use animation::{Animation, LoopMode, PlaybackOptions, PlaybackState};
pub use error::{AnimError, Result};
pub use keyframe::KeyFrame;
pub use pose::PoseEvaluator;
pub use rig::Rig;
pub use skeleton::{Bone, Skeleton, SkeletonBuilder};
pub use skin::{Skin, SkinPart};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
