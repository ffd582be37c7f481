//! Small linear-algebra types used by the camera and projector.

pub mod mat3;
pub mod vec3;
