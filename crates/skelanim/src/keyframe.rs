//! Per-bone pose snapshots

use glam::{Mat4, Quat, Vec3};

use crate::convention;
use crate::error::{AnimError, Result};

/// Tolerance on `|q|^2 - 1` accepted for keyframe rotations
pub const UNIT_TOLERANCE: f32 = 1e-3;

/// Pose of every bone at one sample time
///
/// `translations[i]` and `rotations[i]` describe bone `i` relative to its
/// parent. Both sequences always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyFrame {
    translations: Vec<Vec3>,
    rotations: Vec<Quat>,
}

impl KeyFrame {
    /// Create a keyframe from index-aligned translations and unit rotations
    pub fn new(translations: Vec<Vec3>, rotations: Vec<Quat>) -> Result<Self> {
        let key = Self {
            translations,
            rotations,
        };
        key.validate()?;
        Ok(key)
    }

    /// Like [`KeyFrame::new`], but normalizes rotations instead of rejecting them
    pub fn new_normalized(translations: Vec<Vec3>, rotations: Vec<Quat>) -> Result<Self> {
        let mut rotations = rotations;
        for (bone, q) in rotations.iter_mut().enumerate() {
            if !q.is_finite() {
                return Err(AnimError::NonFinite(format!("rotation of bone {bone}")));
            }
            if q.length_squared() <= f32::EPSILON {
                return Err(AnimError::NonUnitRotation { bone, length: 0.0 });
            }
            *q = q.normalize();
        }
        Self::new(translations, rotations)
    }

    /// Keyframe from data already known to be valid
    pub(crate) fn from_parts_unchecked(translations: Vec<Vec3>, rotations: Vec<Quat>) -> Self {
        let key = Self {
            translations,
            rotations,
        };
        debug_assert!(key.validate().is_ok());
        key
    }

    /// Rest pose: every bone at its parent's origin with no rotation
    pub fn identity(bone_count: usize) -> Self {
        Self {
            translations: vec![Vec3::ZERO; bone_count],
            rotations: vec![Quat::IDENTITY; bone_count],
        }
    }

    fn validate(&self) -> Result<()> {
        if self.translations.len() != self.rotations.len() {
            return Err(AnimError::LengthMismatch {
                context: "keyframe rotations",
                expected: self.translations.len(),
                actual: self.rotations.len(),
            });
        }
        for (bone, t) in self.translations.iter().enumerate() {
            if !t.is_finite() {
                return Err(AnimError::NonFinite(format!("translation of bone {bone}")));
            }
        }
        for (bone, q) in self.rotations.iter().enumerate() {
            if !q.is_finite() {
                return Err(AnimError::NonFinite(format!("rotation of bone {bone}")));
            }
            if (q.length_squared() - 1.0).abs() > UNIT_TOLERANCE {
                return Err(AnimError::NonUnitRotation {
                    bone,
                    length: q.length(),
                });
            }
        }
        Ok(())
    }

    /// Number of bones this keyframe describes
    pub fn bone_count(&self) -> usize {
        self.translations.len()
    }

    pub fn translations(&self) -> &[Vec3] {
        &self.translations
    }

    pub fn rotations(&self) -> &[Quat] {
        &self.rotations
    }

    /// Translation of one bone relative to its parent
    pub fn translation(&self, bone: usize) -> Option<Vec3> {
        self.translations.get(bone).copied()
    }

    /// Rotation of one bone relative to its parent
    pub fn rotation(&self, bone: usize) -> Option<Quat> {
        self.rotations.get(bone).copied()
    }

    /// Local-to-parent matrix of a bone, `None` when the bone is out of range
    pub fn to_parent(&self, bone: usize) -> Option<Mat4> {
        Some(convention::local_transform(
            self.translation(bone)?,
            self.rotation(bone)?,
        ))
    }

    /// Local-to-parent matrices of every bone, in bone order
    pub fn local_transforms(&self) -> impl Iterator<Item = Mat4> + '_ {
        self.translations
            .iter()
            .zip(&self.rotations)
            .map(|(t, r)| convention::local_transform(*t, *r))
    }

    /// Overwrite this keyframe with the blend of `a` and `b` at `t`
    ///
    /// Reuses the existing storage. `a` and `b` must describe the same bones.
    pub(crate) fn blend_into(&mut self, a: &Self, b: &Self, t: f32) {
        self.translations.clear();
        self.rotations.clear();
        self.translations.extend(
            a.translations
                .iter()
                .zip(&b.translations)
                .map(|(from, to)| from.lerp(*to, t)),
        );
        self.rotations.extend(
            a.rotations
                .iter()
                .zip(&b.rotations)
                .map(|(from, to)| from.slerp(*to, t)),
        );
    }

    /// Overwrite this keyframe with a copy of `other`, reusing storage
    pub(crate) fn copy_from(&mut self, other: &Self) {
        self.translations.clone_from(&other.translations);
        self.rotations.clone_from(&other.rotations);
    }
}

impl Default for KeyFrame {
    fn default() -> Self {
        Self::identity(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_keyframe_length_mismatch() {
        let err = KeyFrame::new(vec![Vec3::ZERO, Vec3::Y], vec![Quat::IDENTITY]).unwrap_err();
        assert!(matches!(
            err,
            AnimError::LengthMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_keyframe_rejects_non_unit_rotation() {
        let err = KeyFrame::new(vec![Vec3::ZERO], vec![Quat::from_xyzw(0.0, 0.0, 0.0, 2.0)])
            .unwrap_err();
        assert!(matches!(err, AnimError::NonUnitRotation { bone: 0, .. }));
    }

    #[test]
    fn test_keyframe_rejects_nan() {
        let err = KeyFrame::new(vec![Vec3::new(f32::NAN, 0.0, 0.0)], vec![Quat::IDENTITY])
            .unwrap_err();
        assert!(matches!(err, AnimError::NonFinite(_)));
    }

    #[test]
    fn test_keyframe_normalized_constructor() {
        let key =
            KeyFrame::new_normalized(vec![Vec3::ZERO], vec![Quat::from_xyzw(0.0, 0.0, 0.0, 2.0)])
                .unwrap();
        assert_eq!(key.rotation(0), Some(Quat::IDENTITY));

        let err =
            KeyFrame::new_normalized(vec![Vec3::ZERO], vec![Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)])
                .unwrap_err();
        assert!(matches!(err, AnimError::NonUnitRotation { .. }));
    }

    #[test]
    fn test_to_parent_matches_convention() {
        let key = KeyFrame::new(
            vec![Vec3::new(0.0, 1.0, 0.0)],
            vec![Quat::from_rotation_z(FRAC_PI_2)],
        )
        .unwrap();
        let p = key.to_parent(0).unwrap().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 2.0, 0.0), 1e-5));
        assert_eq!(key.to_parent(7), None);
    }

    #[test]
    fn test_identity_keyframe() {
        let key = KeyFrame::identity(3);
        assert_eq!(key.bone_count(), 3);
        assert_eq!(key.to_parent(2), Some(Mat4::IDENTITY));
        assert_eq!(key.local_transforms().count(), 3);
    }
}
