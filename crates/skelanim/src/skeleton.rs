//! Bone hierarchy with inverse bind matrices

use glam::Mat4;
use log::debug;

use crate::convention;
use crate::error::{AnimError, Result};
use crate::keyframe::KeyFrame;

/// A single bone of the hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    /// Optional display name
    pub name: Option<String>,
    /// Inverse of the bone's bind-pose-to-root transform
    pub offset: Mat4,
}

impl Bone {
    pub fn new(offset: Mat4) -> Self {
        Self { name: None, offset }
    }

    pub fn named(name: impl Into<String>, offset: Mat4) -> Self {
        Self {
            name: Some(name.into()),
            offset,
        }
    }
}

/// Immutable bone hierarchy stored in topological order
///
/// The parent of bone `i` is always a bone with a lower index, so a single
/// forward pass over the bones visits every parent before its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    bones: Vec<Bone>,
    parents: Vec<Option<usize>>,
}

impl Skeleton {
    /// Build a skeleton from bones and parallel parent indices
    pub fn new(bones: Vec<Bone>, parents: Vec<Option<usize>>) -> Result<Self> {
        validate_hierarchy(bones.len(), &parents)?;

        for (i, bone) in bones.iter().enumerate() {
            if !bone.offset.is_finite() {
                return Err(AnimError::NonFinite(format!("offset of bone {i}")));
            }
        }

        debug!(
            "Built skeleton with {} bones ({} roots)",
            bones.len(),
            parents.iter().filter(|p| p.is_none()).count()
        );

        Ok(Self { bones, parents })
    }

    /// Build a skeleton from offsets and signed parent indices, `-1` marking a root
    pub fn from_parent_indices(offsets: Vec<Mat4>, parents: &[i32]) -> Result<Self> {
        let parents = parents_from_signed(parents)?;
        Self::new(offsets.into_iter().map(Bone::new).collect(), parents)
    }

    /// Derive offsets from a rest pose
    ///
    /// The rest pose's local transforms are accumulated into root space and
    /// each bone's offset becomes the inverse of that transform, so evaluating
    /// `rest` later yields identity skinning matrices.
    pub fn from_rest_pose(parents: &[Option<usize>], rest: &KeyFrame) -> Result<Self> {
        validate_hierarchy(parents.len(), parents)?;
        if rest.bone_count() != parents.len() {
            return Err(AnimError::LengthMismatch {
                context: "rest pose bones",
                expected: parents.len(),
                actual: rest.bone_count(),
            });
        }

        let mut to_root: Vec<Mat4> = Vec::with_capacity(parents.len());
        let mut bones = Vec::with_capacity(parents.len());

        for (i, (parent, local)) in parents.iter().zip(rest.local_transforms()).enumerate() {
            let bind = match parent {
                Some(p) => convention::compose_to_root(&to_root[*p], &local),
                None => local,
            };
            let offset = convention::offset_from_bind(&bind).ok_or(AnimError::SingularBindPose(i))?;
            to_root.push(bind);
            bones.push(Bone::new(offset));
        }

        Self::new(bones, parents.to_vec())
    }

    /// Copy of this skeleton with bone names attached
    pub fn with_names<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.bones.len() {
            return Err(AnimError::LengthMismatch {
                context: "bone names",
                expected: self.bones.len(),
                actual: names.len(),
            });
        }
        for (bone, name) in self.bones.iter_mut().zip(names) {
            bone.name = Some(name);
        }
        Ok(self)
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    /// Offset (inverse bind) matrix of a bone
    pub fn offset(&self, index: usize) -> Option<&Mat4> {
        self.bones.get(index).map(|b| &b.offset)
    }

    /// Parent of a bone, `None` for roots and out-of-range indices
    pub fn parent(&self, index: usize) -> Option<usize> {
        self.parents.get(index).copied().flatten()
    }

    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// Parent indices in the signed form, `-1` for roots
    pub fn parent_indices(&self) -> Vec<i32> {
        self.parents
            .iter()
            .map(|p| p.map_or(-1, |i| i as i32))
            .collect()
    }

    pub fn is_root(&self, index: usize) -> bool {
        index < self.parents.len() && self.parents[index].is_none()
    }

    /// Indices of all root bones
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.is_none().then_some(i))
    }

    /// Direct children of a bone, in index order
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter_map(move |(i, p)| (*p == Some(index)).then_some(i))
    }

    /// Number of ancestors of a bone
    pub fn depth(&self, index: usize) -> usize {
        let mut depth = 0;
        let mut current = self.parent(index);
        while let Some(p) = current {
            depth += 1;
            current = self.parent(p);
        }
        depth
    }

    /// Find a bone by name
    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bones
            .iter()
            .position(|b| b.name.as_deref() == Some(name))
    }

    /// Bind-pose-to-root transform of a bone (inverse of its offset)
    pub fn bind_to_root(&self, index: usize) -> Option<Mat4> {
        self.offset(index).map(Mat4::inverse)
    }
}

/// Incremental construction of a [`Skeleton`]
#[derive(Debug, Default)]
pub struct SkeletonBuilder {
    bones: Vec<Bone>,
    parents: Vec<Option<usize>>,
}

impl SkeletonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bone given its offset matrix; returns the new bone's index
    pub fn add_bone(&mut self, offset: Mat4, parent: Option<usize>) -> usize {
        self.push(Bone::new(offset), parent)
    }

    /// Append a named bone; returns the new bone's index
    pub fn add_named_bone(
        &mut self,
        name: impl Into<String>,
        offset: Mat4,
        parent: Option<usize>,
    ) -> usize {
        self.push(Bone::named(name, offset), parent)
    }

    /// Append a bone given its bind-pose-to-root transform instead of its offset
    pub fn add_bone_from_bind(
        &mut self,
        bind_to_root: Mat4,
        parent: Option<usize>,
    ) -> Result<usize> {
        let index = self.bones.len();
        let offset =
            convention::offset_from_bind(&bind_to_root).ok_or(AnimError::SingularBindPose(index))?;
        Ok(self.add_bone(offset, parent))
    }

    fn push(&mut self, bone: Bone, parent: Option<usize>) -> usize {
        self.bones.push(bone);
        self.parents.push(parent);
        self.bones.len() - 1
    }

    pub fn build(self) -> Result<Skeleton> {
        Skeleton::new(self.bones, self.parents)
    }
}

fn validate_hierarchy(bone_count: usize, parents: &[Option<usize>]) -> Result<()> {
    if bone_count == 0 {
        return Err(AnimError::ValidationError(
            "skeleton must contain at least one bone".to_string(),
        ));
    }
    if parents.len() != bone_count {
        return Err(AnimError::LengthMismatch {
            context: "parent indices",
            expected: bone_count,
            actual: parents.len(),
        });
    }
    for (bone, parent) in parents.iter().enumerate() {
        if let Some(p) = *parent
            && p >= bone
        {
            return Err(AnimError::InvalidParent {
                bone,
                parent: p as i64,
            });
        }
    }
    Ok(())
}

fn parents_from_signed(parents: &[i32]) -> Result<Vec<Option<usize>>> {
    parents
        .iter()
        .enumerate()
        .map(|(bone, &p)| match p {
            -1 => Ok(None),
            p if p >= 0 => Ok(Some(p as usize)),
            p => Err(AnimError::InvalidParent {
                bone,
                parent: p as i64,
            }),
        })
        .collect()
}
