//! Mesh parts bound to skeleton bones

use glam::Mat4;

use crate::convention;
use crate::error::{AnimError, Result};
use crate::skeleton::Skeleton;

/// A renderable mesh placed relative to its owning bone at rest
#[derive(Debug, Clone, PartialEq)]
pub struct SkinPart {
    /// Name of the mesh the renderer draws for this part
    pub mesh_name: String,
    /// Bone this part is bound to
    pub bone: usize,
    /// Placement of the mesh at rest, in the same space as the bone's bind pose
    pub bind: Mat4,
}

impl SkinPart {
    pub fn new(mesh_name: impl Into<String>, bone: usize, bind: Mat4) -> Self {
        Self {
            mesh_name: mesh_name.into(),
            bone,
            bind,
        }
    }
}

/// Ordered collection of skin parts
#[derive(Debug, Clone, PartialEq)]
pub struct Skin {
    parts: Vec<SkinPart>,
}

impl Skin {
    pub fn new(parts: Vec<SkinPart>) -> Result<Self> {
        if parts.is_empty() {
            return Err(AnimError::EmptySkin);
        }
        for part in &parts {
            if !part.bind.is_finite() {
                return Err(AnimError::NonFinite(format!(
                    "bind matrix of skin part '{}'",
                    part.mesh_name
                )));
            }
        }
        Ok(Self { parts })
    }

    /// One part per bone, part `i` bound to bone `i`, all drawing the same mesh
    pub fn one_part_per_bone(mesh_name: &str, binds: Vec<Mat4>) -> Result<Self> {
        Self::new(
            binds
                .into_iter()
                .enumerate()
                .map(|(bone, bind)| SkinPart::new(mesh_name, bone, bind))
                .collect(),
        )
    }

    /// Check that every part references a bone of `skeleton`
    pub fn validate_against(&self, skeleton: &Skeleton) -> Result<()> {
        let bone_count = skeleton.bone_count();
        for part in &self.parts {
            if part.bone >= bone_count {
                return Err(AnimError::InvalidBoneReference {
                    part: part.mesh_name.clone(),
                    bone: part.bone,
                    bone_count,
                });
            }
        }
        Ok(())
    }

    pub fn parts(&self) -> &[SkinPart] {
        &self.parts
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Bind matrices in part order
    pub fn bind_matrices(&self) -> Vec<Mat4> {
        self.parts.iter().map(|p| p.bind).collect()
    }

    /// Current placement of every part given the frame's skinning matrices
    pub fn part_transforms(&self, finals: &[Mat4]) -> Result<Vec<Mat4>> {
        let mut out = Vec::with_capacity(self.parts.len());
        self.part_transforms_into(finals, &mut out)?;
        Ok(out)
    }

    /// Like [`Skin::part_transforms`], writing into a reusable buffer
    ///
    /// `out` is left untouched when a part references a missing matrix.
    pub fn part_transforms_into(&self, finals: &[Mat4], out: &mut Vec<Mat4>) -> Result<()> {
        if let Some(part) = self.parts.iter().find(|p| p.bone >= finals.len()) {
            return Err(AnimError::InvalidBoneReference {
                part: part.mesh_name.clone(),
                bone: part.bone,
                bone_count: finals.len(),
            });
        }
        out.clear();
        out.extend(
            self.parts
                .iter()
                .map(|p| convention::part_transform(&finals[p.bone], &p.bind)),
        );
        Ok(())
    }
}
