//! The slice of the graphics API the demos need.
//!
//! Everything that talks to the GPU goes through [`GraphicsDevice`], so the
//! shader builder and the quad animator can run against [`super::GlDevice`]
//! in the binaries and against an in-memory device in tests.

use std::ffi::CStr;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// A resolved uniform slot. Never negative: a missing uniform is `None`
/// at lookup time instead of the `-1` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Per-vertex attribute data.
    Array,
    /// Triangle indices.
    ElementArray,
}

pub trait GraphicsDevice {
    // Shader stages
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderId;
    fn compile_shader(&mut self, shader: ShaderId, source: &CStr);
    fn shader_compiled(&self, shader: ShaderId) -> bool;
    fn shader_info_log(&self, shader: ShaderId) -> String;
    fn delete_shader(&mut self, shader: ShaderId);

    // Programs
    fn create_program(&mut self) -> ProgramId;
    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId);
    fn link_program(&mut self, program: ProgramId);
    fn validate_program(&mut self, program: ProgramId);
    fn program_linked(&self, program: ProgramId) -> bool;
    fn program_validated(&self, program: ProgramId) -> bool;
    fn program_info_log(&self, program: ProgramId) -> String;
    fn use_program(&mut self, program: ProgramId);
    fn delete_program(&mut self, program: ProgramId);

    // Uniforms
    fn uniform_location(&self, program: ProgramId, name: &CStr) -> Option<UniformLocation>;
    fn set_uniform_vec4(&mut self, location: UniformLocation, value: [f32; 4]);

    // Geometry
    fn create_vertex_array(&mut self) -> VertexArrayId;
    fn bind_vertex_array(&mut self, vertex_array: VertexArrayId);
    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId);
    fn create_buffer(&mut self) -> BufferId;
    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferId);
    /// Uploads `data` into the buffer currently bound to `target` (static draw).
    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&mut self, buffer: BufferId);
    /// Describes attribute `index` as `components` tightly packed floats
    /// read from the bound array buffer, and enables it.
    fn vertex_attrib_f32(&mut self, index: u32, components: i32);

    // Frame
    fn set_viewport(&mut self, width: i32, height: i32);
    fn set_clear_color(&mut self, rgba: [f32; 4]);
    fn clear_color_buffer(&mut self);
    fn draw_indexed_triangles(&mut self, index_count: i32);
}
