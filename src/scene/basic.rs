use log::{info, warn};

use super::Scene;
use crate::config::DemoConfig;
use crate::render::{GraphicsDevice, QuadGeometry, ShaderError, ShaderProgram};

/// Fill used when the fragment shader exposes the color uniform.
const QUAD_COLOR: [f32; 4] = [0.0, 0.3, 0.8, 1.0];

/// A single static quad.
pub struct BasicQuad {
    quad: QuadGeometry,
    program: ShaderProgram,
}

impl BasicQuad {
    pub fn setup<D: GraphicsDevice + ?Sized>(
        device: &mut D,
        config: &DemoConfig,
    ) -> Result<Self, ShaderError> {
        let quad = QuadGeometry::upload(device, config.quads.base);

        let program = match ShaderProgram::from_files(
            device,
            &config.shaders.vertex,
            &config.shaders.fragment,
        ) {
            Ok(program) => program,
            Err(err) => {
                quad.release(device);
                return Err(err);
            }
        };
        program.activate(device);

        match program.uniform_location(device, &config.shaders.color_uniform) {
            Ok(location) => device.set_uniform_vec4(location, QUAD_COLOR),
            Err(err) => warn!("Drawing with the shader's own color: {}", err),
        }

        info!("Basic quad ready");
        Ok(Self { quad, program })
    }
}

impl Scene for BasicQuad {
    fn render<D: GraphicsDevice + ?Sized>(&mut self, device: &mut D) {
        self.program.activate(device);
        self.quad.bind(device);
        self.quad.draw(device);
    }

    fn release<D: GraphicsDevice + ?Sized>(self, device: &mut D) {
        self.quad.release(device);
        self.program.destroy(device);
    }
}
