pub mod animation;
pub mod device;
pub mod gl_device;
pub mod mesh;
pub mod shaders;

// In-memory device for tests (no GPU required)
#[cfg(test)]
pub mod mock_device;

pub use animation::{AnimationCursor, AnimationSettings, Direction, FrameSelection, QuadAnimator};
pub use device::{GraphicsDevice, ShaderStage, UniformLocation};
pub use gl_device::GlDevice;
pub use mesh::{QuadCollection, QuadGeometry, QuadPositions};
pub use shaders::{ShaderError, ShaderProgram, ShaderSourcePair};
