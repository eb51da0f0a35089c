//! Scene description for the culling demo
//!
//! A scene is a camera plus a list of named bounding volumes, loadable
//! from RON or TOML (picked by file extension).

use bounding_volumes::prelude::*;
use serde::{Deserialize, Serialize};

/// Scene loading errors
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Camera parameters the view-projection matrix is built from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up direction
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Width / height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl CameraConfig {
    /// The combined view-projection matrix for this camera
    pub fn view_projection(&self) -> Mat4 {
        let view = Mat4::look_at(self.position, self.target, self.up);
        let projection = Mat4::perspective(
            bounding_volumes::foundation::math::utils::deg_to_rad(self.fov_degrees),
            self.aspect,
            self.near,
            self.far,
        );
        projection * view
    }
}

/// A named object in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    /// Display name used in the log output
    pub name: String,
    /// The object's bounding volume
    pub volume: Volume,
}

/// A bounding volume in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Volume {
    /// A bounding sphere
    Sphere {
        /// Sphere center
        center: Vec3,
        /// Sphere radius
        radius: f32,
    },
    /// An axis-aligned bounding box
    Box {
        /// Minimum corner
        min: Vec3,
        /// Maximum corner
        max: Vec3,
    },
}

impl Volume {
    /// Tests this volume against a frustum
    pub fn is_visible(&self, frustum: &Frustum) -> bool {
        match self {
            Self::Sphere { center, radius } => {
                frustum.intersects_sphere(&BoundingSphere::new(*center, *radius))
            }
            Self::Box { min, max } => frustum.intersects_box(&BoundingBox::new(*min, *max)),
        }
    }
}

/// A complete demo scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// The camera the frustum is derived from
    pub camera: CameraConfig,
    /// The objects to cull
    pub objects: Vec<SceneObject>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            camera: CameraConfig {
                position: Vec3::new(0.0, 5.0, 20.0),
                target: Vec3::zeros(),
                up: Vec3::new(0.0, 1.0, 0.0),
                fov_degrees: 60.0,
                aspect: 16.0 / 9.0,
                near: 0.5,
                far: 200.0,
            },
            objects: vec![
                SceneObject {
                    name: "player".into(),
                    volume: Volume::Sphere {
                        center: Vec3::zeros(),
                        radius: 1.0,
                    },
                },
                SceneObject {
                    name: "terrain-chunk".into(),
                    volume: Volume::Box {
                        min: Vec3::new(-10.0, -1.0, -10.0),
                        max: Vec3::new(10.0, 0.0, 10.0),
                    },
                },
                SceneObject {
                    name: "distant-tower".into(),
                    volume: Volume::Box {
                        min: Vec3::new(-2.0, 0.0, -300.0),
                        max: Vec3::new(2.0, 30.0, -296.0),
                    },
                },
                SceneObject {
                    name: "behind-camera".into(),
                    volume: Volume::Sphere {
                        center: Vec3::new(0.0, 5.0, 40.0),
                        radius: 2.0,
                    },
                },
            ],
        }
    }
}

impl Scene {
    /// Loads a scene from a `.ron` or `.toml` file
    pub fn load_from_file(path: &str) -> Result<Self, SceneError> {
        if !path.ends_with(".toml") && !path.ends_with(".ron") {
            return Err(SceneError::UnsupportedFormat(path.to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| SceneError::Parse(e.to_string()))
        } else {
            ron::from_str(&contents).map_err(|e| SceneError::Parse(e.to_string()))
        }
    }
}
