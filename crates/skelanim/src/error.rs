use std::io;
use thiserror::Error;

/// Error types for building and evaluating skeletal animation
#[derive(Error, Debug)]
pub enum AnimError {
    /// I/O error while reading a rig description
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Rig description could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Caller passed a time or delta outside the accepted domain
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Two index-aligned sequences disagree in length
    #[error("Length mismatch in {context}: expected {expected}, got {actual}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Parent index breaks the topological order of the hierarchy
    #[error(
        "Invalid parent for bone {bone}: parent index {parent} must be lower than the bone index"
    )]
    InvalidParent { bone: usize, parent: i64 },

    /// Sampling requested from a clip without keyframes
    #[error("Animation has no keyframes")]
    EmptyAnimation,

    /// Keyframe interval is zero, negative, or not finite
    #[error("Invalid keyframe interval: {0}")]
    InvalidInterval(f32),

    /// Rotation quaternion is not unit length
    #[error("Rotation for bone {bone} is not normalized (length {length})")]
    NonUnitRotation { bone: usize, length: f32 },

    /// NaN or infinite value in transform data
    #[error("Non-finite value in {0}")]
    NonFinite(String),

    /// Bind pose cannot be inverted into an offset matrix
    #[error("Bind pose of bone {0} is not invertible")]
    SingularBindPose(usize),

    /// Skin part references a bone that does not exist
    #[error("Skin part '{part}' references bone {bone}, but the skeleton has {bone_count} bones")]
    InvalidBoneReference {
        part: String,
        bone: usize,
        bone_count: usize,
    },

    /// Skin without parts
    #[error("Skin has no parts")]
    EmptySkin,

    /// Structural validation failure
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Result type using AnimError
pub type Result<T> = std::result::Result<T, AnimError>;
