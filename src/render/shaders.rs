// shaders.rs - Shader program construction from source files

use log::{debug, error, warn};
use std::ffi::{CString, NulError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::device::{GraphicsDevice, ProgramId, ShaderId, ShaderStage, UniformLocation};

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Failed to read shader source {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Null byte error: {0}")]
    Nul(#[from] NulError),
    #[error("Failed to compile {stage} shader: {diagnostic}")]
    Compile {
        stage: ShaderStage,
        diagnostic: String,
    },
    #[error("Program linking failed: {diagnostic}")]
    Link { diagnostic: String },
    #[error("Uniform not found: {0}")]
    UniformNotFound(String),
}

/// Vertex and fragment source text, as read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSourcePair {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSourcePair {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    let text = fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut source = String::with_capacity(text.len() + 1);
    for line in text.lines() {
        source.push_str(line);
        source.push('\n');
    }
    Ok(source)
}

/// Reads both shader files. Every line of the result ends with `\n`,
/// including the last one.
pub fn load_source_pair(
    vertex_path: impl AsRef<Path>,
    fragment_path: impl AsRef<Path>,
) -> Result<ShaderSourcePair, ShaderError> {
    Ok(ShaderSourcePair {
        vertex: read_source(vertex_path.as_ref())?,
        fragment: read_source(fragment_path.as_ref())?,
    })
}

/// Compiles one stage. A stage that fails to compile is deleted before the
/// error is returned, so the caller never holds a dead handle.
pub fn compile_stage<D: GraphicsDevice + ?Sized>(
    device: &mut D,
    stage: ShaderStage,
    source: &str,
) -> Result<ShaderId, ShaderError> {
    let source = CString::new(source)?;

    debug!("Compiling {} shader", stage);
    let shader = device.create_shader(stage);
    device.compile_shader(shader, &source);

    if !device.shader_compiled(shader) {
        let diagnostic = device.shader_info_log(shader);
        error!("Failed to compile {} shader:\n{}", stage, diagnostic);
        device.delete_shader(shader);
        return Err(ShaderError::Compile { stage, diagnostic });
    }

    Ok(shader)
}

/// Compiles both stages and links them into a program.
///
/// The stage objects are deleted once linking has been attempted, whatever
/// the outcome. A program that fails to link is deleted as well.
pub fn link_program<D: GraphicsDevice + ?Sized>(
    device: &mut D,
    sources: &ShaderSourcePair,
) -> Result<ShaderProgram, ShaderError> {
    let vertex = compile_stage(device, ShaderStage::Vertex, &sources.vertex)?;
    let fragment = match compile_stage(device, ShaderStage::Fragment, &sources.fragment) {
        Ok(fragment) => fragment,
        Err(err) => {
            device.delete_shader(vertex);
            return Err(err);
        }
    };

    let program = device.create_program();
    device.attach_shader(program, vertex);
    device.attach_shader(program, fragment);
    device.link_program(program);
    device.validate_program(program);

    device.delete_shader(vertex);
    device.delete_shader(fragment);

    if !device.program_linked(program) {
        let diagnostic = device.program_info_log(program);
        error!("Failed to link shader program:\n{}", diagnostic);
        device.delete_program(program);
        return Err(ShaderError::Link { diagnostic });
    }

    // Validation is judged against whatever state is bound right now, so a
    // failure here is not proof the program is unusable.
    if !device.program_validated(program) {
        warn!(
            "Shader program {} did not validate: {}",
            program.0,
            device.program_info_log(program)
        );
    }

    debug!("Linked shader program {}", program.0);
    Ok(ShaderProgram { id: program })
}

/// A successfully linked vertex + fragment program.
#[derive(Debug)]
pub struct ShaderProgram {
    id: ProgramId,
}

impl ShaderProgram {
    pub fn from_files<D: GraphicsDevice + ?Sized>(
        device: &mut D,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let sources = load_source_pair(vertex_path, fragment_path)?;
        link_program(device, &sources)
    }

    pub fn id(&self) -> ProgramId {
        self.id
    }

    pub fn activate<D: GraphicsDevice + ?Sized>(&self, device: &mut D) {
        device.use_program(self.id);
    }

    pub fn uniform_location<D: GraphicsDevice + ?Sized>(
        &self,
        device: &D,
        name: &str,
    ) -> Result<UniformLocation, ShaderError> {
        let c_name = CString::new(name)?;
        device
            .uniform_location(self.id, &c_name)
            .ok_or_else(|| ShaderError::UniformNotFound(name.to_string()))
    }

    pub fn destroy<D: GraphicsDevice + ?Sized>(self, device: &mut D) {
        device.delete_program(self.id);
    }
}
