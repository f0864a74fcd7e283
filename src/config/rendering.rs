use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::render::QuadPositions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub clear_color: [f32; 4],
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Window".into(),
            width: 640,
            height: 480,
            vsync: true,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
    /// Name of the `vec4` uniform driven by the demos.
    pub color_uniform: String,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from("vert.shader"),
            fragment: PathBuf::from("frag.shader"),
            color_uniform: "u_Color".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadConfig {
    pub base: QuadPositions,
    pub count: usize,
    pub shrink_step: f32,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            base: [-0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, 0.5],
            count: 30,
            shrink_step: 0.01,
        }
    }
}
