use log::{debug, warn};

use super::device::{BufferId, BufferTarget, GraphicsDevice, VertexArrayId};

/// Two triangles covering the quad, counter-clockwise.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Corner positions as `x, y` pairs: bottom-left, bottom-right, top-right,
/// top-left.
pub type QuadPositions = [f32; 8];

/// Moves every corner `step` toward the center on both axes.
///
/// Nothing stops the corners from crossing over once the quad is smaller
/// than `2 * step`.
pub fn shrink_positions(positions: &mut QuadPositions, step: f32) {
    // bottom-left
    positions[0] += step;
    positions[1] += step;
    // bottom-right
    positions[2] -= step;
    positions[3] += step;
    // top-right
    positions[4] -= step;
    positions[5] -= step;
    // top-left
    positions[6] += step;
    positions[7] -= step;
}

/// One quad living in its own vertex array with its own vertex and index
/// buffers.
#[derive(Debug)]
pub struct QuadGeometry {
    positions: QuadPositions,
    vertex_array: VertexArrayId,
    vertex_buffer: BufferId,
    index_buffer: BufferId,
}

impl QuadGeometry {
    pub fn upload<D: GraphicsDevice + ?Sized>(device: &mut D, positions: QuadPositions) -> Self {
        let vertex_array = device.create_vertex_array();
        device.bind_vertex_array(vertex_array);

        let vertex_buffer = device.create_buffer();
        device.bind_buffer(BufferTarget::Array, vertex_buffer);
        device.buffer_data(BufferTarget::Array, bytemuck::cast_slice(&positions));
        device.vertex_attrib_f32(0, 2);

        let index_buffer = device.create_buffer();
        device.bind_buffer(BufferTarget::ElementArray, index_buffer);
        device.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(&QUAD_INDICES));

        Self {
            positions,
            vertex_array,
            vertex_buffer,
            index_buffer,
        }
    }

    /// Makes this quad the drawing source.
    pub fn bind<D: GraphicsDevice + ?Sized>(&self, device: &mut D) {
        device.bind_vertex_array(self.vertex_array);
        device.bind_buffer(BufferTarget::Array, self.vertex_buffer);
        device.bind_buffer(BufferTarget::ElementArray, self.index_buffer);
    }

    pub fn draw<D: GraphicsDevice + ?Sized>(&self, device: &mut D) {
        device.draw_indexed_triangles(QUAD_INDICES.len() as i32);
    }

    pub fn release<D: GraphicsDevice + ?Sized>(self, device: &mut D) {
        device.delete_vertex_array(self.vertex_array);
        device.delete_buffer(self.vertex_buffer);
        device.delete_buffer(self.index_buffer);
    }

    pub fn positions(&self) -> &QuadPositions {
        &self.positions
    }

    pub fn width(&self) -> f32 {
        self.positions[2] - self.positions[0]
    }

    pub fn height(&self) -> f32 {
        self.positions[7] - self.positions[1]
    }

    pub fn vertex_array(&self) -> VertexArrayId {
        self.vertex_array
    }

    pub fn vertex_buffer(&self) -> BufferId {
        self.vertex_buffer
    }

    pub fn index_buffer(&self) -> BufferId {
        self.index_buffer
    }
}

/// Quads of decreasing size, each uploaded once at build time.
#[derive(Debug, Default)]
pub struct QuadCollection {
    geometries: Vec<QuadGeometry>,
}

impl QuadCollection {
    /// Uploads `count` quads. Quad 0 is `base`; every following quad is the
    /// previous one shrunk by `shrink_step` on each side.
    pub fn build<D: GraphicsDevice + ?Sized>(
        device: &mut D,
        base: QuadPositions,
        count: usize,
        shrink_step: f32,
    ) -> Self {
        let mut working = base;
        let mut geometries = Vec::with_capacity(count);

        for _ in 0..count {
            geometries.push(QuadGeometry::upload(device, working));
            shrink_positions(&mut working, shrink_step);
        }

        if let Some(last) = geometries.last() {
            if last.width() <= 0.0 || last.height() <= 0.0 {
                warn!(
                    "Quad collection shrinks past zero size ({} x {} after {} steps of {})",
                    last.width(),
                    last.height(),
                    count - 1,
                    shrink_step
                );
            }
        }
        debug!("Uploaded {} quads", geometries.len());

        Self { geometries }
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuadGeometry> {
        self.geometries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuadGeometry> {
        self.geometries.iter()
    }

    pub fn release<D: GraphicsDevice + ?Sized>(self, device: &mut D) {
        let count = self.geometries.len();
        for geometry in self.geometries {
            geometry.release(device);
        }
        debug!("Released {} quads", count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::mock_device::MockDevice;

    const BASE: QuadPositions = [-0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, 0.5];

    #[test]
    fn test_shrink_moves_corners_inward() {
        let mut positions = BASE;
        shrink_positions(&mut positions, 0.1);
        let expected = [-0.4, -0.4, 0.4, -0.4, 0.4, 0.4, -0.4, 0.4];
        for (got, want) in positions.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn test_build_thirty_quads() {
        let mut device = MockDevice::new();
        let collection = QuadCollection::build(&mut device, BASE, 30, 0.01);

        assert_eq!(collection.len(), 30);
        assert_eq!(collection.get(0).unwrap().positions(), &BASE);

        for (i, quad) in collection.iter().enumerate() {
            let expected = 1.0 - 0.02 * i as f32;
            assert!((quad.width() - expected).abs() < 1e-4, "width of quad {}", i);
            assert!((quad.height() - expected).abs() < 1e-4, "height of quad {}", i);
        }

        assert_eq!(device.live_vertex_arrays(), 30);
        assert_eq!(device.live_buffers(), 60);
    }

    #[test]
    fn test_upload_writes_positions_and_indices() {
        let mut device = MockDevice::new();
        let quad = QuadGeometry::upload(&mut device, BASE);

        let vertices = device.buffer_contents(quad.vertex_buffer()).unwrap();
        assert_eq!(vertices, bytemuck::cast_slice::<f32, u8>(&BASE));

        let indices = device.buffer_contents(quad.index_buffer()).unwrap();
        assert_eq!(indices, bytemuck::cast_slice::<u32, u8>(&QUAD_INDICES));
    }

    #[test]
    fn test_each_quad_gets_its_own_index_buffer() {
        let mut device = MockDevice::new();
        let collection = QuadCollection::build(&mut device, BASE, 3, 0.01);

        let first = collection.get(0).unwrap().index_buffer();
        assert!(collection.iter().skip(1).all(|q| q.index_buffer() != first));
    }

    #[test]
    fn test_overshrinking_inverts_without_clamping() {
        let mut device = MockDevice::new();
        let collection = QuadCollection::build(&mut device, BASE, 60, 0.01);
        assert!(collection.get(59).unwrap().width() < 0.0);
    }

    #[test]
    fn test_release_frees_every_buffer() {
        let mut device = MockDevice::new();
        let collection = QuadCollection::build(&mut device, BASE, 30, 0.01);
        collection.release(&mut device);

        assert_eq!(device.live_vertex_arrays(), 0);
        assert_eq!(device.live_buffers(), 0);
    }
}
