//! Matrix convention shared by every transform in the crate
//!
//! All matrices are glam `Mat4` (f32, column-major storage) acting on column
//! vectors: a point is transformed as `m * p`, so in a product `a * b` the
//! right-hand matrix is applied first. Angles are radians.
//!
//! | Quantity | Formula |
//! |----------|---------|
//! | local-to-parent | `T(translation) * R(rotation)` (rotate, then translate) |
//! | to-root | `to_root(parent) * local` (root bones: `local`) |
//! | offset | `to_root(bind pose)^-1` |
//! | skinning | `to_root * offset` |
//! | skin part placement | `skinning * bind` |
//!
//! Written with row vectors (the DirectX reading) the same chain is
//! `offset * local * to_root(parent)`; both describe the same transform.
//! Only the functions below compose matrices, so offsets computed at build time
//! and poses evaluated per tick cannot drift apart.

use glam::{Mat4, Quat, Vec3};

/// Determinant magnitude below which a bind pose is treated as singular
pub const SINGULAR_EPSILON: f32 = 1e-6;

/// Storage order used when flattening matrices for a consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(rename_all = "snake_case"))]
pub enum MatrixLayout {
    /// Columns stored contiguously (OpenGL, glam native)
    #[default]
    ColumnMajor,
    /// Rows stored contiguously (transposed upload, HLSL default packing)
    RowMajor,
}

/// Local-to-parent matrix: rotation applied before translation
#[inline]
pub fn local_transform(translation: Vec3, rotation: Quat) -> Mat4 {
    Mat4::from_rotation_translation(rotation, translation)
}

/// Accumulate a child's local transform onto its parent's root-space transform
#[inline]
pub fn compose_to_root(parent_to_root: &Mat4, local: &Mat4) -> Mat4 {
    *parent_to_root * *local
}

/// Final skinning matrix: cancel the bind pose, then apply the current pose
#[inline]
pub fn skinning_matrix(offset: &Mat4, to_root: &Mat4) -> Mat4 {
    *to_root * *offset
}

/// Placement of a skin part under the current pose
#[inline]
pub fn part_transform(skinning: &Mat4, bind: &Mat4) -> Mat4 {
    *skinning * *bind
}

/// Invert a bind-pose-to-root transform into an offset matrix
///
/// Returns `None` for singular or non-finite input.
pub fn offset_from_bind(bind_to_root: &Mat4) -> Option<Mat4> {
    if !bind_to_root.is_finite() {
        return None;
    }
    if bind_to_root.determinant().abs() < SINGULAR_EPSILON {
        return None;
    }
    let offset = bind_to_root.inverse();
    offset.is_finite().then_some(offset)
}

/// Flatten matrices into a contiguous `f32` buffer in the requested layout
pub fn pack_matrices(matrices: &[Mat4], layout: MatrixLayout) -> Vec<f32> {
    let mut data = Vec::with_capacity(matrices.len() * 16);
    for m in matrices {
        match layout {
            MatrixLayout::ColumnMajor => data.extend_from_slice(&m.to_cols_array()),
            MatrixLayout::RowMajor => data.extend_from_slice(&m.transpose().to_cols_array()),
        }
    }
    data
}

/// Column-major flat buffer
pub fn to_column_major(matrices: &[Mat4]) -> Vec<f32> {
    pack_matrices(matrices, MatrixLayout::ColumnMajor)
}

/// Row-major flat buffer
pub fn to_row_major(matrices: &[Mat4]) -> Vec<f32> {
    pack_matrices(matrices, MatrixLayout::RowMajor)
}
