pub mod core;
pub mod rendering;

pub use self::core::{ConfigError, DemoConfig, DEFAULT_CONFIG_FILE};
pub use self::rendering::{QuadConfig, ShaderPaths, WindowConfig};
