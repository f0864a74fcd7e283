use gl::types::*;
use std::ffi::{c_void, CStr};
use std::marker::PhantomData;
use std::ptr;

use super::device::{
    BufferId, BufferTarget, GraphicsDevice, ProgramId, ShaderId, ShaderStage, UniformLocation,
    VertexArrayId,
};

/// [`GraphicsDevice`] backed by the loaded OpenGL function pointers of the
/// current context.
///
/// The value is tied to the thread that made the context current and is
/// therefore neither `Send` nor `Sync`.
pub struct GlDevice {
    _not_send: PhantomData<*const ()>,
}

impl GlDevice {
    /// Loads the GL entry points through `loader`.
    ///
    /// # Safety
    ///
    /// A GL 3.3+ context must be current on this thread and stay current for
    /// as long as the returned device is used.
    pub unsafe fn load_with<F>(loader: F) -> Self
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);
        Self {
            _not_send: PhantomData,
        }
    }
}

fn gl_stage(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

fn gl_target(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Array => gl::ARRAY_BUFFER,
        BufferTarget::ElementArray => gl::ELEMENT_ARRAY_BUFFER,
    }
}

fn log_to_string(mut buffer: Vec<u8>, written: GLsizei) -> String {
    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).trim_end().to_string()
}

impl GraphicsDevice for GlDevice {
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderId {
        ShaderId(unsafe { gl::CreateShader(gl_stage(stage)) })
    }

    fn compile_shader(&mut self, shader: ShaderId, source: &CStr) {
        unsafe {
            gl::ShaderSource(shader.0, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(shader.0);
        }
    }

    fn shader_compiled(&self, shader: ShaderId) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetShaderiv(shader.0, gl::COMPILE_STATUS, &mut status);
        }
        status == gl::TRUE as GLint
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        let mut len = 0;
        unsafe {
            gl::GetShaderiv(shader.0, gl::INFO_LOG_LENGTH, &mut len);
        }
        let mut buffer = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        unsafe {
            gl::GetShaderInfoLog(
                shader.0,
                buffer.len() as GLsizei,
                &mut written,
                buffer.as_mut_ptr() as *mut GLchar,
            );
        }
        log_to_string(buffer, written)
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        unsafe { gl::DeleteShader(shader.0) };
    }

    fn create_program(&mut self) -> ProgramId {
        ProgramId(unsafe { gl::CreateProgram() })
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        unsafe { gl::AttachShader(program.0, shader.0) };
    }

    fn link_program(&mut self, program: ProgramId) {
        unsafe { gl::LinkProgram(program.0) };
    }

    fn validate_program(&mut self, program: ProgramId) {
        unsafe { gl::ValidateProgram(program.0) };
    }

    fn program_linked(&self, program: ProgramId) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetProgramiv(program.0, gl::LINK_STATUS, &mut status);
        }
        status == gl::TRUE as GLint
    }

    fn program_validated(&self, program: ProgramId) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetProgramiv(program.0, gl::VALIDATE_STATUS, &mut status);
        }
        status == gl::TRUE as GLint
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        let mut len = 0;
        unsafe {
            gl::GetProgramiv(program.0, gl::INFO_LOG_LENGTH, &mut len);
        }
        let mut buffer = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program.0,
                buffer.len() as GLsizei,
                &mut written,
                buffer.as_mut_ptr() as *mut GLchar,
            );
        }
        log_to_string(buffer, written)
    }

    fn use_program(&mut self, program: ProgramId) {
        unsafe { gl::UseProgram(program.0) };
    }

    fn delete_program(&mut self, program: ProgramId) {
        unsafe { gl::DeleteProgram(program.0) };
    }

    fn uniform_location(&self, program: ProgramId, name: &CStr) -> Option<UniformLocation> {
        let location = unsafe { gl::GetUniformLocation(program.0, name.as_ptr()) };
        (location >= 0).then_some(UniformLocation(location))
    }

    fn set_uniform_vec4(&mut self, location: UniformLocation, value: [f32; 4]) {
        unsafe { gl::Uniform4f(location.0, value[0], value[1], value[2], value[3]) };
    }

    fn create_vertex_array(&mut self) -> VertexArrayId {
        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        VertexArrayId(vao)
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayId) {
        unsafe { gl::BindVertexArray(vertex_array.0) };
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) {
        unsafe { gl::DeleteVertexArrays(1, &vertex_array.0) };
    }

    fn create_buffer(&mut self) -> BufferId {
        let mut buffer = 0;
        unsafe { gl::GenBuffers(1, &mut buffer) };
        BufferId(buffer)
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferId) {
        unsafe { gl::BindBuffer(gl_target(target), buffer.0) };
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]) {
        unsafe {
            gl::BufferData(
                gl_target(target),
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        unsafe { gl::DeleteBuffers(1, &buffer.0) };
    }

    fn vertex_attrib_f32(&mut self, index: u32, components: i32) {
        unsafe {
            gl::EnableVertexAttribArray(index);
            gl::VertexAttribPointer(
                index,
                components,
                gl::FLOAT,
                gl::FALSE,
                components * std::mem::size_of::<GLfloat>() as GLsizei,
                ptr::null(),
            );
        }
    }

    fn set_viewport(&mut self, width: i32, height: i32) {
        unsafe { gl::Viewport(0, 0, width, height) };
    }

    fn set_clear_color(&mut self, rgba: [f32; 4]) {
        unsafe { gl::ClearColor(rgba[0], rgba[1], rgba[2], rgba[3]) };
    }

    fn clear_color_buffer(&mut self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
    }

    fn draw_indexed_triangles(&mut self, index_count: i32) {
        unsafe {
            gl::DrawElements(gl::TRIANGLES, index_count, gl::UNSIGNED_INT, ptr::null());
        }
    }
}
