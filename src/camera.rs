//! Pinhole camera pose.
//!
//! # Coordinate System
//!
//! Uses a **right-handed** world:
//! - X: positive right
//! - Y: positive up
//! - Z: positive towards the viewer
//!
//! The camera looks down its local **-Z** axis, so points in front of it have a
//! negative camera-space z. The depth buffer relies on that sign (it stores `1/-z`).
//!
//! # Orientation
//!
//! The orientation is a [`Mat3`] whose columns are the camera's right, up and
//! forward vectors, where "forward" points from the look-at target back towards the
//! camera. A world point is taken into camera space with `(p - position) * orientation`.

use crate::input::{Axis, Command};
use crate::math::mat3::Mat3;
use crate::math::vec3::Vec3;

pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, 10.0);
pub const DEFAULT_FOCAL_LENGTH: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    orientation: Mat3,
    focal_length: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_POSITION, DEFAULT_FOCAL_LENGTH)
    }
}

impl Camera {
    /// Creates a camera at `position` with identity orientation.
    pub fn new(position: Vec3, focal_length: f32) -> Self {
        Self {
            position,
            orientation: Mat3::identity(),
            focal_length,
        }
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    /// Re-aims the camera at `target`, keeping world +Y as the up reference.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = (self.position - target).normalize();
        let right = Vec3::UP.cross(forward).normalize();
        let up = forward.cross(right).normalize();
        self.orientation = Mat3::from_basis(right, up, forward);
    }

    /// Rotates the orientation about the X axis.
    pub fn rotate_x(&mut self, angle: f32) {
        self.orientation = self.orientation * Mat3::rotation_x(angle);
    }

    /// Rotates the orientation about the Y axis.
    pub fn rotate_y(&mut self, angle: f32) {
        self.orientation = self.orientation * Mat3::rotation_y(angle);
    }

    // =========================================================================
    // Position
    // =========================================================================

    /// Swings the camera position about the world X axis through the origin.
    pub fn orbit_x(&mut self, angle: f32) {
        self.position = self.position * Mat3::rotation_x(angle);
    }

    /// Swings the camera position about the world Y axis through the origin.
    pub fn orbit_y(&mut self, angle: f32) {
        self.position = self.position * Mat3::rotation_y(angle);
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Mat3 {
        self.orientation
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    /// Takes a world-space point into camera space.
    #[inline]
    pub fn to_camera_space(&self, point: Vec3) -> Vec3 {
        (point - self.position) * self.orientation
    }
}

// =============================================================================
// Camera Controller
// =============================================================================

/// Step sizes for discrete, per-keypress camera commands.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// World units per translation command.
    pub move_step: f32,
    /// Radians per rotation or orbit command.
    pub turn_step: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            move_step: 0.5,
            turn_step: 0.1,
        }
    }
}

impl CameraController {
    /// Applies a camera command. Returns false for commands that do not move the
    /// camera.
    pub fn apply(&self, camera: &mut Camera, command: Command) -> bool {
        let step = |positive: bool, amount: f32| if positive { amount } else { -amount };
        match command {
            Command::Move { axis, positive } => {
                let amount = step(positive, self.move_step);
                let delta = match axis {
                    Axis::X => Vec3::new(amount, 0.0, 0.0),
                    Axis::Y => Vec3::new(0.0, amount, 0.0),
                    Axis::Z => Vec3::new(0.0, 0.0, amount),
                };
                camera.translate(delta);
            }
            Command::Orbit { axis, positive } => {
                let angle = step(positive, self.turn_step);
                match axis {
                    Axis::X => camera.orbit_x(angle),
                    Axis::Y => camera.orbit_y(angle),
                    Axis::Z => return false,
                }
            }
            Command::Turn { axis, positive } => {
                let angle = step(positive, self.turn_step);
                match axis {
                    Axis::X => camera.rotate_x(angle),
                    Axis::Y => camera.rotate_y(angle),
                    Axis::Z => return false,
                }
            }
            _ => return false,
        }
        true
    }
}

// =============================================================================
// Tests
// =============================================================================
