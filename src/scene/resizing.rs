use log::info;

use super::Scene;
use crate::config::DemoConfig;
use crate::render::{GraphicsDevice, QuadAnimator, QuadCollection, ShaderError, ShaderProgram};

/// Shrinking quads cycled every few frames under a pulsing color.
pub struct ResizingQuads {
    animator: QuadAnimator,
    program: ShaderProgram,
}

impl ResizingQuads {
    pub fn setup<D: GraphicsDevice + ?Sized>(
        device: &mut D,
        config: &DemoConfig,
    ) -> Result<Self, ShaderError> {
        let program =
            ShaderProgram::from_files(device, &config.shaders.vertex, &config.shaders.fragment)?;
        let color_location = match program.uniform_location(device, &config.shaders.color_uniform)
        {
            Ok(location) => location,
            Err(err) => {
                program.destroy(device);
                return Err(err);
            }
        };

        let collection = QuadCollection::build(
            device,
            config.quads.base,
            config.quads.count,
            config.quads.shrink_step,
        );
        let animator = QuadAnimator::new(collection, config.animation.clone(), color_location);

        info!(
            "Resizing quads ready: {} quads, {} frames per quad",
            animator.collection().len(),
            config.animation.frames_per_step
        );
        Ok(Self { animator, program })
    }

    pub fn animator(&self) -> &QuadAnimator {
        &self.animator
    }
}

impl Scene for ResizingQuads {
    fn render<D: GraphicsDevice + ?Sized>(&mut self, device: &mut D) {
        self.animator.render(device, &self.program);
    }

    fn release<D: GraphicsDevice + ?Sized>(self, device: &mut D) {
        self.animator.release(device);
        self.program.destroy(device);
    }
}
