//! 3x3 matrix used for camera orientation.
//!
//! # Convention
//! - Stored as `data[row][col]`
//! - The camera basis vectors (right, up, forward) are the **columns**
//! - Points are transformed as **row vectors** on the left: `v * M`, which
//!   yields `(v·right, v·up, v·forward)`
//! - Rotations are applied by post-multiplying: `M * R` or `v * R`

use std::ops::Mul;

use super::vec3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    data: [[f32; 3]; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat3 {
    pub fn new(data: [[f32; 3]; 3]) -> Self {
        Mat3 { data }
    }

    pub fn identity() -> Self {
        Mat3::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Builds an orientation whose columns are the given basis vectors.
    pub fn from_basis(right: Vec3, up: Vec3, forward: Vec3) -> Self {
        Mat3::new([
            [right.x, up.x, forward.x],
            [right.y, up.y, forward.y],
            [right.z, up.z, forward.z],
        ])
    }

    /// Rotation about the X axis for row-vector post-multiplication.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat3::new([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    /// Rotation about the Y axis for row-vector post-multiplication.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat3::new([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    pub fn column(&self, col: usize) -> Vec3 {
        Vec3::new(self.data[0][col], self.data[1][col], self.data[2][col])
    }

    pub fn right(&self) -> Vec3 {
        self.column(0)
    }

    pub fn up(&self) -> Vec3 {
        self.column(1)
    }

    pub fn forward(&self) -> Vec3 {
        self.column(2)
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        let mut result = [[0.0f32; 3]; 3];

        for row in 0..3 {
            for col in 0..3 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col];
            }
        }

        Mat3::new(result)
    }
}

/// Row vector times matrix: `v * M`.
impl Mul<Mat3> for Vec3 {
    type Output = Vec3;

    fn mul(self, m: Mat3) -> Self::Output {
        Vec3::new(
            self.dot(m.column(0)),
            self.dot(m.column(1)),
            self.dot(m.column(2)),
        )
    }
}
