//! In-memory [`GraphicsDevice`] for tests (no GPU required).
//!
//! Compilation, linking and validation succeed unless a failure was scripted, and a
//! uniform is "active" when its name appears in the source of a shader
//! attached to the linked program.

use std::collections::{HashMap, HashSet};
use std::ffi::CStr;

use super::device::{
    BufferId, BufferTarget, GraphicsDevice, ProgramId, ShaderId, ShaderStage, UniformLocation,
    VertexArrayId,
};

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    UseProgram(ProgramId),
    BindVertexArray(VertexArrayId),
    BindBuffer(BufferTarget, BufferId),
    SetUniform(UniformLocation, [f32; 4]),
    Draw(i32),
}

#[derive(Debug, Default)]
struct MockShader {
    stage: Option<ShaderStage>,
    source: String,
    compiled: bool,
}

#[derive(Debug, Default)]
struct MockProgram {
    attached: Vec<ShaderId>,
    sources: Vec<String>,
    linked: bool,
    validated: bool,
}

#[derive(Debug, Default)]
pub struct MockDevice {
    next_id: u32,
    shaders: HashMap<ShaderId, MockShader>,
    programs: HashMap<ProgramId, MockProgram>,
    vertex_arrays: HashSet<VertexArrayId>,
    buffers: HashMap<BufferId, Vec<u8>>,
    bound_array: Option<BufferId>,
    bound_element_array: Option<BufferId>,
    compile_failures: HashMap<ShaderStage, String>,
    link_failure: Option<String>,
    validate_failure: Option<String>,
    pub calls: Vec<MockCall>,
    pub deleted_shaders: Vec<ShaderId>,
    pub deleted_programs: Vec<ProgramId>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later compile of `stage` fail with `log`.
    pub fn fail_compile(&mut self, stage: ShaderStage, log: &str) {
        self.compile_failures.insert(stage, log.to_string());
    }

    /// Makes every later link fail with `log`.
    pub fn fail_link(&mut self, log: &str) {
        self.link_failure = Some(log.to_string());
    }

    /// Makes every later validation fail with `log`. Linking still succeeds.
    pub fn fail_validate(&mut self, log: &str) {
        self.validate_failure = Some(log.to_string());
    }

    pub fn live_shaders(&self) -> usize {
        self.shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    pub fn live_vertex_arrays(&self) -> usize {
        self.vertex_arrays.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn buffer_contents(&self, buffer: BufferId) -> Option<&[u8]> {
        self.buffers.get(&buffer).map(Vec::as_slice)
    }

    pub fn is_linked(&self, program: ProgramId) -> bool {
        self.programs.get(&program).is_some_and(|p| p.linked)
    }

    pub fn draw_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, MockCall::Draw(_)))
            .count()
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl GraphicsDevice for MockDevice {
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderId {
        let id = ShaderId(self.next());
        self.shaders.insert(
            id,
            MockShader {
                stage: Some(stage),
                ..Default::default()
            },
        );
        id
    }

    fn compile_shader(&mut self, shader: ShaderId, source: &CStr) {
        let failures = &self.compile_failures;
        if let Some(entry) = self.shaders.get_mut(&shader) {
            entry.source = source.to_string_lossy().into_owned();
            entry.compiled = entry
                .stage
                .map_or(false, |stage| !failures.contains_key(&stage));
        }
    }

    fn shader_compiled(&self, shader: ShaderId) -> bool {
        self.shaders.get(&shader).is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: ShaderId) -> String {
        self.shaders
            .get(&shader)
            .and_then(|s| s.stage)
            .and_then(|stage| self.compile_failures.get(&stage))
            .cloned()
            .unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        if self.shaders.remove(&shader).is_some() {
            self.deleted_shaders.push(shader);
        }
    }

    fn create_program(&mut self) -> ProgramId {
        let id = ProgramId(self.next());
        self.programs.insert(id, MockProgram::default());
        id
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        if let Some(entry) = self.programs.get_mut(&program) {
            entry.attached.push(shader);
        }
    }

    fn link_program(&mut self, program: ProgramId) {
        let Some(entry) = self.programs.get(&program) else {
            return;
        };
        let attached: Vec<&MockShader> = entry
            .attached
            .iter()
            .filter_map(|id| self.shaders.get(id))
            .collect();
        let has_stage = |stage| {
            attached
                .iter()
                .any(|s| s.compiled && s.stage == Some(stage))
        };
        let linked = self.link_failure.is_none()
            && has_stage(ShaderStage::Vertex)
            && has_stage(ShaderStage::Fragment);
        let sources = attached.iter().map(|s| s.source.clone()).collect();

        if let Some(entry) = self.programs.get_mut(&program) {
            entry.linked = linked;
            entry.sources = sources;
        }
    }

    fn validate_program(&mut self, program: ProgramId) {
        if let Some(entry) = self.programs.get_mut(&program) {
            entry.validated = entry.linked && self.validate_failure.is_none();
        }
    }

    fn program_linked(&self, program: ProgramId) -> bool {
        self.is_linked(program)
    }

    fn program_validated(&self, program: ProgramId) -> bool {
        self.programs.get(&program).is_some_and(|p| p.validated)
    }

    fn program_info_log(&self, program: ProgramId) -> String {
        if self.is_linked(program) {
            return match &self.validate_failure {
                Some(log) if !self.program_validated(program) => log.clone(),
                _ => String::new(),
            };
        }
        self.link_failure
            .clone()
            .unwrap_or_else(|| "program has no compiled vertex and fragment stage".to_string())
    }

    fn use_program(&mut self, program: ProgramId) {
        self.calls.push(MockCall::UseProgram(program));
    }

    fn delete_program(&mut self, program: ProgramId) {
        if self.programs.remove(&program).is_some() {
            self.deleted_programs.push(program);
        }
    }

    fn uniform_location(&self, program: ProgramId, name: &CStr) -> Option<UniformLocation> {
        let entry = self.programs.get(&program).filter(|p| p.linked)?;
        let name = name.to_str().ok()?;
        let declared = entry.sources.iter().any(|source| {
            source.lines().any(|line| {
                let line = line.trim_start();
                line.starts_with("uniform ")
                    && line
                        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
                        .any(|word| word == name)
            })
        });
        declared.then_some(UniformLocation(0))
    }

    fn set_uniform_vec4(&mut self, location: UniformLocation, value: [f32; 4]) {
        self.calls.push(MockCall::SetUniform(location, value));
    }

    fn create_vertex_array(&mut self) -> VertexArrayId {
        let id = VertexArrayId(self.next());
        self.vertex_arrays.insert(id);
        id
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayId) {
        self.calls.push(MockCall::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) {
        self.vertex_arrays.remove(&vertex_array);
    }

    fn create_buffer(&mut self) -> BufferId {
        let id = BufferId(self.next());
        self.buffers.insert(id, Vec::new());
        id
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferId) {
        match target {
            BufferTarget::Array => self.bound_array = Some(buffer),
            BufferTarget::ElementArray => self.bound_element_array = Some(buffer),
        }
        self.calls.push(MockCall::BindBuffer(target, buffer));
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]) {
        let bound = match target {
            BufferTarget::Array => self.bound_array,
            BufferTarget::ElementArray => self.bound_element_array,
        };
        if let Some(contents) = bound.and_then(|id| self.buffers.get_mut(&id)) {
            *contents = data.to_vec();
        }
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.buffers.remove(&buffer);
    }

    fn vertex_attrib_f32(&mut self, _index: u32, _components: i32) {}

    fn set_viewport(&mut self, _width: i32, _height: i32) {}

    fn set_clear_color(&mut self, _rgba: [f32; 4]) {}

    fn clear_color_buffer(&mut self) {}

    fn draw_indexed_triangles(&mut self, index_count: i32) {
        self.calls.push(MockCall::Draw(index_count));
    }
}
