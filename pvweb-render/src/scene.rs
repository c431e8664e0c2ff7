//! Scene description JSON as written by the WebGL exporter.
//!
//! ```json
//! {
//!   "Renderers": [
//!     { "size": [1, 1], "origin": [0, 0],
//!       "LookAt": [30, 0,0,0, 0,1,0, 0,0,10],
//!       "Background1": [0.3, 0.3, 0.4] }
//!   ],
//!   "Objects": [ { "id": "1", "data": "<base64>", "layer": 0 } ]
//! }
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SceneResult;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// One entry per layer, indexed by layer number.
    #[serde(rename = "Renderers")]
    pub renderers: Vec<LayerDescription>,
    #[serde(rename = "Objects", default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<EncodedObject>,
}

impl SceneDescription {
    pub fn from_json(text: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn layer(&self, layer: usize) -> Option<&LayerDescription> {
        self.renderers.get(layer)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerDescription {
    /// Normalized upper corner of the viewport.
    pub size: [f32; 2],
    /// Normalized lower corner of the viewport.
    pub origin: [f32; 2],
    #[serde(rename = "LookAt")]
    pub look_at: LookAt,
    /// RGB, only honored on layer 0.
    #[serde(rename = "Background1", default, skip_serializing_if = "Option::is_none")]
    pub background: Option<[f32; 3]>,
}

/// The ten-float camera tuple: view angle, focal point, view up, position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 10]", into = "[f32; 10]")]
pub struct LookAt {
    pub view_angle_degrees: f32,
    pub focal_point: Vec3,
    pub view_up: Vec3,
    pub position: Vec3,
}

impl From<[f32; 10]> for LookAt {
    fn from(v: [f32; 10]) -> Self {
        Self {
            view_angle_degrees: v[0],
            focal_point: Vec3::new(v[1], v[2], v[3]),
            view_up: Vec3::new(v[4], v[5], v[6]),
            position: Vec3::new(v[7], v[8], v[9]),
        }
    }
}

impl From<LookAt> for [f32; 10] {
    fn from(l: LookAt) -> Self {
        let (f, u, p) = (l.focal_point, l.view_up, l.position);
        [l.view_angle_degrees, f.x, f.y, f.z, u.x, u.y, u.z, p.x, p.y, p.z]
    }
}

/// One exported object: a base64 record plus display flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub data: String,
    #[serde(rename = "hasTransparency", default)]
    pub has_transparency: bool,
    #[serde(default = "full_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub layer: usize,
}

fn full_opacity() -> f32 {
    1.0
}

impl EncodedObject {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            id: None,
            data: data.into(),
            has_transparency: false,
            opacity: 1.0,
            layer: 0,
        }
    }

    pub fn on_layer(mut self, layer: usize) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.has_transparency = true;
        self.opacity = opacity;
        self
    }
}
