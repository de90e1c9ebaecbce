//! Redraw state for the slider demo.
//!
//! The transform parameters live in one plain value that the UI glue owns
//! and updates; the current matrix is recomputed from it on every redraw
//! instead of being accumulated anywhere.

use crate::m3::Mat3;

/// Which way a growing slider angle turns the geometry on screen.
///
/// The projection flips the y axis, so a mathematically counter-clockwise
/// rotation appears clockwise on screen. Pick the convention at the
/// degrees-to-radians boundary rather than baking it into the matrix math.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationDirection {
    CounterClockwise,
    Clockwise,
}

/// Converts a slider angle in degrees (0..=360) to radians under the given
/// on-screen direction convention.
pub fn angle_from_degrees(degrees: f32, direction: RotationDirection) -> f32 {
    match direction {
        RotationDirection::CounterClockwise => (360.0 - degrees).to_radians(),
        RotationDirection::Clockwise => degrees.to_radians(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scene {
    pub translation: [f32; 2],
    pub angle_radians: f32,
    pub scale: [f32; 2],
}

impl Scene {
    pub fn new() -> Self {
        Self {
            translation: [200.0, 150.0],
            angle_radians: 0.0,
            scale: [1.0, 1.0],
        }
    }

    /// The full transform for the current parameters and viewport: scale,
    /// then rotate, then translate, then project into clip space.
    pub fn matrix(&self, width: f32, height: f32) -> Mat3 {
        Mat3::projection(width, height)
            .translate(self.translation[0], self.translation[1])
            .rotate(self.angle_radians)
            .scale(self.scale[0], self.scale[1])
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
