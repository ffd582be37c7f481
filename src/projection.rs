//! Pinhole projection from world space to screen space.
//!
//! ```text
//! screen_x = round(-(k * f * cam.x / cam.z) + width / 2)
//! screen_y = round( (k * f * cam.y / cam.z) + height / 2)
//! ```
//!
//! where `k` is the image-plane multiplier and `f` the camera focal length. Since
//! `cam.z` is negative in front of the camera, the leading minus on x keeps world
//! +X to the right of the screen while +Y (screen rows grow downwards) flips
//! naturally. The camera-space z is carried through unprojected as the point depth.

use log::trace;

use crate::camera::Camera;
use crate::math::vec3::Vec3;
use crate::mesh::MeshTriangle;
use crate::render::{ScreenPoint, ScreenTriangle};

/// Scene-scale factor between focal length and pixels.
pub const PLANE_MULTIPLIER: f32 = 250.0;

#[derive(Debug, Clone, Copy)]
pub struct Projector {
    width: u32,
    height: u32,
    plane_multiplier: f32,
}

impl Projector {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            plane_multiplier: PLANE_MULTIPLIER,
        }
    }

    /// Projects a camera-space point. No guard against `cam.z == 0`.
    #[inline]
    pub fn project_camera_point(&self, cam: Vec3, focal_length: f32) -> ScreenPoint {
        let scale = self.plane_multiplier * focal_length;
        ScreenPoint::new(
            (-(scale * (cam.x / cam.z)) + (self.width / 2) as f32).round(),
            ((scale * (cam.y / cam.z)) + (self.height / 2) as f32).round(),
            cam.z,
        )
    }

    /// Projects a mesh triangle through `camera`.
    ///
    /// Returns `None` when any vertex lies on or behind the camera plane
    /// (`cam.z >= 0`); such triangles are skipped rather than divided by zero.
    pub fn project(&self, face: &MeshTriangle, camera: &Camera) -> Option<ScreenTriangle> {
        let mut points = [ScreenPoint::new(0.0, 0.0, 0.0); 3];
        for (j, vertex) in face.vertices.iter().enumerate() {
            let cam = camera.to_camera_space(*vertex);
            if cam.z >= 0.0 || !cam.is_finite() {
                trace!("skipping triangle with vertex at camera z = {}", cam.z);
                return None;
            }
            let mut point = self.project_camera_point(cam, camera.focal_length());
            if let Some(texture_points) = &face.texture_points {
                point = point.with_texture(texture_points[j]);
            }
            points[j] = point;
        }
        Some(ScreenTriangle { vertices: points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Color;
    use crate::render::TexturePoint;
    use approx::assert_relative_eq;

    fn face(vertices: [Vec3; 3]) -> MeshTriangle {
        MeshTriangle::new(vertices, Color::rgb(255, 0, 0))
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let projector = Projector::new(640, 480);
        let camera = Camera::default();
        let tri = projector
            .project(&face([Vec3::ZERO, Vec3::ZERO, Vec3::ZERO]), &camera)
            .unwrap();
        assert_eq!((tri[0].x, tri[0].y), (320.0, 240.0));
        assert_relative_eq!(tri[0].depth, -10.0);
    }

    #[test]
    fn world_axes_map_to_screen_directions() {
        let projector = Projector::new(640, 480);
        let camera = Camera::default();
        let tri = projector
            .project(
                &face([
                    Vec3::new(1.0, 1.0, 0.0),
                    Vec3::new(-1.0, 0.0, 0.0),
                    Vec3::new(0.0, 0.0, 5.0),
                ]),
                &camera,
            )
            .unwrap();
        // 250 * 2 * 1 / 10 = 50 pixels
        assert_eq!((tri[0].x, tri[0].y), (370.0, 190.0));
        assert_eq!((tri[1].x, tri[1].y), (270.0, 240.0));
        assert_relative_eq!(tri[2].depth, -5.0);
    }

    #[test]
    fn odd_extents_use_integer_centre() {
        let projector = Projector::new(5, 3);
        let point = projector.project_camera_point(Vec3::new(0.0, 0.0, -1.0), 1.0);
        assert_eq!((point.x, point.y), (2.0, 1.0));
    }

    #[test]
    fn texture_points_are_carried_through() {
        let projector = Projector::new(100, 100);
        let camera = Camera::default();
        let uv = [
            TexturePoint::new(1.0, 2.0),
            TexturePoint::new(3.0, 4.0),
            TexturePoint::new(5.0, 6.0),
        ];
        let mesh_face = face([Vec3::ZERO, Vec3::ONE, Vec3::new(1.0, 0.0, 0.0)]).with_texture(uv);
        let tri = projector.project(&mesh_face, &camera).unwrap();
        assert_eq!(tri[1].texture_point, Some(uv[1]));
    }

    #[test]
    fn vertices_on_or_behind_camera_plane_skip_the_triangle() {
        let projector = Projector::new(100, 100);
        let camera = Camera::default();
        let on_plane = face([Vec3::ZERO, Vec3::new(1.0, 0.0, 10.0), Vec3::ONE]);
        let behind = face([Vec3::ZERO, Vec3::new(0.0, 0.0, 12.0), Vec3::ONE]);
        assert!(projector.project(&on_plane, &camera).is_none());
        assert!(projector.project(&behind, &camera).is_none());
    }
}
