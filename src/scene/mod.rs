//! The two demos, each as a [`Scene`] driven by the window host.

pub mod basic;
pub mod resizing;

pub use basic::BasicQuad;
pub use resizing::ResizingQuads;

use crate::render::GraphicsDevice;

pub trait Scene {
    /// Draws one frame. The color buffer has already been cleared.
    fn render<D: GraphicsDevice + ?Sized>(&mut self, device: &mut D);

    /// Frees every GPU object the scene created.
    fn release<D: GraphicsDevice + ?Sized>(self, device: &mut D);
}
