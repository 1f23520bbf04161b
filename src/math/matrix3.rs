use super::{Mat4, Vec3};
use super::matrix4::is_singular;

/// 3x3 matrix (column-major), used for normal transforms and 2D homogeneous work
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub data: [f32; 9],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat3 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0,
                0.0, 1.0, 0.0,
                0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[col * 3 + row]
    }

    /// Upper-left 3x3 of a 4x4 transform
    pub fn from_mat4(m: &Mat4) -> Self {
        let mut data = [0.0f32; 9];
        for col in 0..3 {
            for row in 0..3 {
                data[col * 3 + row] = m.data[col * 4 + row];
            }
        }
        Self { data }
    }

    /// Matrix for transforming normals by `model_view`: the inverse-transpose
    /// of its upper 3x3. Singular inputs fall back to the plain upper 3x3.
    pub fn normal_matrix(model_view: &Mat4) -> Self {
        let upper = Self::from_mat4(model_view);
        upper
            .inverse()
            .map(|inv| inv.transpose())
            .unwrap_or(upper)
    }

    /// 2D homogeneous translation
    pub fn translation(tx: f32, ty: f32) -> Self {
        let mut m = Self::identity();
        m.data[6] = tx;
        m.data[7] = ty;
        m
    }

    /// 2D homogeneous scale
    pub fn scale(sx: f32, sy: f32) -> Self {
        let mut m = Self::identity();
        m.data[0] = sx;
        m.data[4] = sy;
        m
    }

    /// 2D homogeneous counter-clockwise rotation, radians
    pub fn rotation(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, s, 0.0,
                -s, c, 0.0,
                0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn mul(&self, other: &Mat3) -> Self {
        let mut result = [0.0f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                result[col * 3 + row] = (0..3)
                    .map(|k| self.data[k * 3 + row] * other.data[col * 3 + k])
                    .sum();
            }
        }
        Self { data: result }
    }

    pub fn transpose(&self) -> Self {
        let mut result = [0.0f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                result[row * 3 + col] = self.data[col * 3 + row];
            }
        }
        Self { data: result }
    }

    pub fn determinant(&self) -> f32 {
        let m = |r, c| self.get(r, c);
        m(0, 0) * (m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1))
            - m(0, 1) * (m(1, 0) * m(2, 2) - m(1, 2) * m(2, 0))
            + m(0, 2) * (m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0))
    }

    /// Inverse via the adjugate, `None` when singular
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if is_singular(det, &self.data, 3) {
            return None;
        }
        let inv = 1.0 / det;
        let m = |r, c| self.get(r, c);

        let mut out = Mat3 { data: [0.0; 9] };
        let mut set = |r: usize, c: usize, v: f32| out.data[c * 3 + r] = v * inv;

        set(0, 0, m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1));
        set(0, 1, m(0, 2) * m(2, 1) - m(0, 1) * m(2, 2));
        set(0, 2, m(0, 1) * m(1, 2) - m(0, 2) * m(1, 1));
        set(1, 0, m(1, 2) * m(2, 0) - m(1, 0) * m(2, 2));
        set(1, 1, m(0, 0) * m(2, 2) - m(0, 2) * m(2, 0));
        set(1, 2, m(0, 2) * m(1, 0) - m(0, 0) * m(1, 2));
        set(2, 0, m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0));
        set(2, 1, m(0, 1) * m(2, 0) - m(0, 0) * m(2, 1));
        set(2, 2, m(0, 0) * m(1, 1) - m(0, 1) * m(1, 0));

        Some(out)
    }

    pub fn transform_vec3(&self, v: Vec3) -> Vec3 {
        let d = &self.data;
        Vec3::new(
            d[0] * v.x + d[3] * v.y + d[6] * v.z,
            d[1] * v.x + d[4] * v.y + d[7] * v.z,
            d[2] * v.x + d[5] * v.y + d[8] * v.z,
        )
    }

    /// Transform a 2D point with w = 1
    pub fn transform_point2(&self, x: f32, y: f32) -> (f32, f32) {
        let p = self.transform_vec3(Vec3::new(x, y, 1.0));
        (p.x, p.y)
    }

    pub fn approx_eq(&self, other: &Mat3, epsilon: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    /// Get as slice for WebGL
    pub fn as_slice(&self) -> &[f32; 9] {
        &self.data
    }
}
