//! Rig description files (JSON or YAML)
//!
//! A description lists bones with their parents, an optional rest pose, the
//! skin parts, and the keyframes of the clip. Bone offsets are not stored:
//! they are derived from the rest pose, or from the first keyframe when no
//! rest pose is given.
//!
//! ```yaml
//! name: chain
//! bones:
//!   - name: root
//!   - name: tip
//!     parent: 0
//! skin:
//!   - mesh: cylinder
//!     bone: 1
//!     bind:
//!       translation: [0.0, 0.5, 0.0]
//! animation:
//!   interval: 1.0
//!   keyframes:
//!     - translations: [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
//!       rotations: [[0.0, 0.0, 0.0, 1.0], [0.0, 0.0, 0.0, 1.0]]
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use glam::{Mat4, Quat, Vec3};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::animation::{Animation, PlaybackOptions};
use crate::convention;
use crate::error::{AnimError, Result};
use crate::keyframe::{KeyFrame, UNIT_TOLERANCE};
use crate::rig::Rig;
use crate::skeleton::Skeleton;
use crate::skin::{Skin, SkinPart};

/// Serialization format of a description file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigFormat {
    Json,
    Yaml,
}

impl RigFormat {
    /// Pick the format from a file extension (`.json`, `.yaml`, `.yml`)
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            other => Err(AnimError::ParseError(format!(
                "unsupported rig file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

/// Bone entry of a description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneDescription {
    pub name: String,
    /// Index of the parent bone; omitted for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
}

/// Rotation followed by translation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformDescription {
    pub translation: Vec3,
    /// Quaternion as `[x, y, z, w]`
    pub rotation: Quat,
}

impl Default for TransformDescription {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl TransformDescription {
    pub fn to_matrix(&self) -> Mat4 {
        convention::local_transform(self.translation, self.rotation.normalize())
    }

    /// Split a rigid matrix back into rotation and translation
    pub fn from_matrix(m: &Mat4) -> Self {
        let (_, rotation, translation) = m.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
        }
    }
}

/// Per-bone translations and rotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseDescription {
    pub translations: Vec<Vec3>,
    pub rotations: Vec<Quat>,
}

impl PoseDescription {
    fn to_keyframe(&self, what: &str) -> Result<KeyFrame> {
        for (bone, q) in self.rotations.iter().enumerate() {
            if q.is_finite() && (q.length_squared() - 1.0).abs() > UNIT_TOLERANCE {
                warn!("{what}: rotation of bone {bone} has length {}, normalizing", q.length());
            }
        }
        KeyFrame::new_normalized(self.translations.clone(), self.rotations.clone())
    }

    fn from_keyframe(key: &KeyFrame) -> Self {
        Self {
            translations: key.translations().to_vec(),
            rotations: key.rotations().to_vec(),
        }
    }
}

/// Skin part entry of a description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinPartDescription {
    pub mesh: String,
    pub bone: usize,
    #[serde(default)]
    pub bind: TransformDescription,
}

/// Clip entry of a description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDescription {
    /// Seconds between keyframes
    pub interval: f32,
    #[serde(default)]
    pub options: PlaybackOptions,
    pub keyframes: Vec<PoseDescription>,
}

/// Complete rig description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigDescription {
    pub name: String,
    pub bones: Vec<BoneDescription>,
    /// Bind pose; the first keyframe is used when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<PoseDescription>,
    pub skin: Vec<SkinPartDescription>,
    pub animation: AnimationDescription,
}

impl RigDescription {
    /// Load a description, choosing the format from the file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = RigFormat::from_path(path)?;
        let reader = BufReader::new(File::open(path)?);
        let description: Self = match format {
            RigFormat::Json => {
                serde_json::from_reader(reader).map_err(|e| AnimError::ParseError(e.to_string()))?
            }
            RigFormat::Yaml => serde_yaml_ng::from_reader(reader)
                .map_err(|e| AnimError::ParseError(e.to_string()))?,
        };
        debug!("Loaded rig description '{}' from {}", description.name, path.display());
        Ok(description)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AnimError::ParseError(e.to_string()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| AnimError::ParseError(e.to_string()))
    }

    pub fn to_text(&self, format: RigFormat) -> Result<String> {
        match format {
            RigFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| AnimError::ParseError(e.to_string()))
            }
            RigFormat::Yaml => {
                serde_yaml_ng::to_string(self).map_err(|e| AnimError::ParseError(e.to_string()))
            }
        }
    }

    /// Build and validate the rig this description describes
    pub fn to_rig(&self) -> Result<Rig> {
        let parents: Vec<Option<usize>> = self.bones.iter().map(|b| b.parent).collect();

        let rest = match &self.rest {
            Some(rest) => rest.to_keyframe("rest pose")?,
            None => self
                .animation
                .keyframes
                .first()
                .ok_or(AnimError::EmptyAnimation)?
                .to_keyframe("keyframe 0")?,
        };

        let skeleton = Skeleton::from_rest_pose(&parents, &rest)?
            .with_names(self.bones.iter().map(|b| b.name.clone()))?;

        let skin = Skin::new(
            self.skin
                .iter()
                .map(|p| SkinPart::new(p.mesh.clone(), p.bone, p.bind.to_matrix()))
                .collect(),
        )?;

        let keyframes = self
            .animation
            .keyframes
            .iter()
            .enumerate()
            .map(|(i, k)| k.to_keyframe(&format!("keyframe {i}")))
            .collect::<Result<Vec<_>>>()?;
        let animation =
            Animation::from_keyframes(self.animation.interval, self.animation.options, keyframes)?;

        Rig::new(self.name.clone(), skeleton, skin, animation)
    }

    /// Describe an existing rig; the rest pose is recovered from the bone offsets
    pub fn from_rig(rig: &Rig) -> Self {
        let skeleton = rig.skeleton();
        let mut rest = PoseDescription {
            translations: Vec::with_capacity(skeleton.bone_count()),
            rotations: Vec::with_capacity(skeleton.bone_count()),
        };
        for i in 0..skeleton.bone_count() {
            let bind = skeleton.bind_to_root(i).unwrap_or(Mat4::IDENTITY);
            let local = match skeleton.parent(i).and_then(|p| skeleton.offset(p)) {
                Some(parent_offset) => *parent_offset * bind,
                None => bind,
            };
            let local = TransformDescription::from_matrix(&local);
            rest.translations.push(local.translation);
            rest.rotations.push(local.rotation);
        }

        let animation = rig.animation();
        Self {
            name: rig.name().to_string(),
            bones: skeleton
                .bones()
                .iter()
                .enumerate()
                .map(|(i, b)| BoneDescription {
                    name: b.name.clone().unwrap_or_else(|| format!("bone_{i}")),
                    parent: skeleton.parent(i),
                })
                .collect(),
            rest: Some(rest),
            skin: rig
                .skin()
                .parts()
                .iter()
                .map(|p| SkinPartDescription {
                    mesh: p.mesh_name.clone(),
                    bone: p.bone,
                    bind: TransformDescription::from_matrix(&p.bind),
                })
                .collect(),
            animation: AnimationDescription {
                interval: animation.interval(),
                options: *animation.options(),
                keyframes: animation
                    .keyframes()
                    .iter()
                    .map(PoseDescription::from_keyframe)
                    .collect(),
            },
        }
    }
}
