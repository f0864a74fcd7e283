use glam::Vec4;
use serde::{Deserialize, Serialize};

use super::device::{GraphicsDevice, UniformLocation};
use super::mesh::QuadCollection;
use super::shaders::ShaderProgram;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Red channel change per frame.
    pub color_step: f32,
    /// Frames spent on each quad before moving to the next one.
    pub frames_per_step: u32,
    /// Green, blue and alpha of the uploaded color.
    pub tint: [f32; 3],
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            color_step: 0.001,
            frames_per_step: 20,
            tint: [0.3, 0.8, 1.0],
        }
    }
}

impl AnimationSettings {
    pub fn color(&self, red: f32) -> Vec4 {
        Vec4::new(red, self.tint[0], self.tint[1], self.tint[2])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// What a frame should draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSelection {
    /// `None` only for an empty collection.
    pub geometry_index: Option<usize>,
    pub color: f32,
}

/// Per-frame animation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationCursor {
    pub index: usize,
    pub direction: Direction,
    pub frame_counter: u32,
    pub color: f32,
    pub color_direction: Direction,
}

impl Default for AnimationCursor {
    fn default() -> Self {
        Self {
            index: 0,
            direction: Direction::Forward,
            frame_counter: 0,
            color: 0.0,
            color_direction: Direction::Forward,
        }
    }
}

impl AnimationCursor {
    /// Steps the color ramp and the geometry cycle by one frame.
    ///
    /// Both bounces look at the value *before* it is updated: the color may
    /// overshoot `[0, 1]` by one step, and the index reverses only once it
    /// is past `collection_len - 2`, so it visits `0..=collection_len - 1`.
    pub fn advance_frame(
        &mut self,
        settings: &AnimationSettings,
        collection_len: usize,
    ) -> FrameSelection {
        if self.color > 1.0 {
            self.color_direction = Direction::Backward;
        } else if self.color < 0.0 {
            self.color_direction = Direction::Forward;
        }
        self.color += self.color_direction.sign() as f32 * settings.color_step;

        self.frame_counter += 1;
        if self.frame_counter >= settings.frames_per_step {
            self.step_index(collection_len);
            self.frame_counter = 0;
        }

        FrameSelection {
            geometry_index: (self.index < collection_len).then_some(self.index),
            color: self.color,
        }
    }

    fn step_index(&mut self, collection_len: usize) {
        if collection_len < 2 {
            self.index = 0;
            return;
        }

        if self.index > collection_len - 2 {
            self.direction = Direction::Backward;
        } else if self.index == 0 {
            self.direction = Direction::Forward;
        }

        let next = self.index as i64 + self.direction.sign() as i64;
        debug_assert!(
            (0..collection_len as i64).contains(&next),
            "quad index {} left 0..{}",
            next,
            collection_len
        );
        self.index = next.max(0) as usize;
    }
}

/// Cycles a [`QuadCollection`] through a linked program, pulsing the
/// program's color uniform.
pub struct QuadAnimator {
    collection: QuadCollection,
    cursor: AnimationCursor,
    settings: AnimationSettings,
    color_location: UniformLocation,
}

impl QuadAnimator {
    pub fn new(
        collection: QuadCollection,
        settings: AnimationSettings,
        color_location: UniformLocation,
    ) -> Self {
        Self {
            collection,
            cursor: AnimationCursor::default(),
            settings,
            color_location,
        }
    }

    pub fn cursor(&self) -> &AnimationCursor {
        &self.cursor
    }

    pub fn collection(&self) -> &QuadCollection {
        &self.collection
    }

    /// Selects this frame's quad and color, applies both, then draws.
    pub fn render<D: GraphicsDevice + ?Sized>(&mut self, device: &mut D, program: &ShaderProgram) {
        let selection = self
            .cursor
            .advance_frame(&self.settings, self.collection.len());

        let Some(geometry) = selection
            .geometry_index
            .and_then(|index| self.collection.get(index))
        else {
            return;
        };

        program.activate(device);
        geometry.bind(device);
        device.set_uniform_vec4(
            self.color_location,
            self.settings.color(selection.color).to_array(),
        );
        geometry.draw(device);
    }

    pub fn release<D: GraphicsDevice + ?Sized>(self, device: &mut D) {
        self.collection.release(device);
    }
}
