pub mod config;
pub mod render;
pub mod scene;
pub mod window;

// Re-export commonly used types
pub use config::{DemoConfig, DEFAULT_CONFIG_FILE};
pub use render::{
    AnimationCursor, AnimationSettings, GlDevice, GraphicsDevice, QuadAnimator, QuadCollection,
    QuadGeometry, ShaderError, ShaderProgram, ShaderSourcePair, ShaderStage,
};
pub use scene::{BasicQuad, ResizingQuads, Scene};
pub use window::GlHost;
