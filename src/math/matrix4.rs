use std::fmt;
use super::{Point4, Vec3};

/// 4x4 matrix for transformations (column-major for WebGL)
///
/// Element `(row, col)` lives at `data[col * 4 + row]`, which is the layout
/// `uniformMatrix4fv` expects with `transpose = false`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn from_cols_array(data: [f32; 16]) -> Self {
        Self { data }
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[12] = x;
        m.data[13] = y;
        m.data[14] = z;
        m
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[0] = x;
        m.data[5] = y;
        m.data[10] = z;
        m
    }

    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, c, s, 0.0,
                0.0, -s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, s, 0.0, 0.0,
                -s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Counter-clockwise rotation of `angle` radians about an arbitrary axis.
    /// A zero-length axis yields the identity.
    pub fn rotation(angle: f32, axis: Vec3) -> Self {
        let len = axis.length();
        if len == 0.0 {
            return Self::identity();
        }
        let Vec3 { x, y, z } = axis.scale(1.0 / len);
        let c = angle.cos();
        let s = angle.sin();
        let t = 1.0 - c;

        Self {
            data: [
                t * x * x + c, t * x * y + s * z, t * x * z - s * y, 0.0,
                t * x * y - s * z, t * y * y + c, t * y * z + s * x, 0.0,
                t * x * z + s * y, t * y * z - s * x, t * z * z + c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Perspective projection matrix, `fov_y` in radians
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Perspective projection from an explicit view volume (glFrustum)
    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let nf = 1.0 / (near - far);

        Self {
            data: [
                2.0 * near * rl, 0.0, 0.0, 0.0,
                0.0, 2.0 * near * tb, 0.0, 0.0,
                (right + left) * rl, (top + bottom) * tb, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Orthographic projection (glOrtho)
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let fn_ = 1.0 / (far - near);

        Self {
            data: [
                2.0 * rl, 0.0, 0.0, 0.0,
                0.0, 2.0 * tb, 0.0, 0.0,
                0.0, 0.0, -2.0 * fn_, 0.0,
                -(right + left) * rl, -(top + bottom) * tb, -(far + near) * fn_, 1.0,
            ],
        }
    }

    /// Look-at view matrix. `up` must not be parallel to `target - eye`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    /// Matrix multiplication: `self * other`
    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[row + k * 4] * other.data[k + col * 4];
                }
                result[row + col * 4] = sum;
            }
        }

        Self { data: result }
    }

    /// Product of the matrices from left to right; empty input gives identity
    pub fn multiply_series(matrices: &[Mat4]) -> Self {
        matrices
            .iter()
            .fold(Self::identity(), |acc, m| acc.mul(m))
    }

    pub fn transpose(&self) -> Self {
        let mut result = [0.0f32; 16];
        for row in 0..4 {
            for col in 0..4 {
                result[row * 4 + col] = self.data[col * 4 + row];
            }
        }
        Self { data: result }
    }

    pub fn determinant(&self) -> f32 {
        self.cofactors().12
    }

    /// Inverse matrix, or `None` when the matrix is singular
    pub fn inverse(&self) -> Option<Self> {
        let (b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11, det) = self.cofactors();
        if is_singular(det, &self.data, 4) {
            return None;
        }
        let inv = 1.0 / det;
        let a = &self.data;
        let (a00, a01, a02, a03) = (a[0], a[1], a[2], a[3]);
        let (a10, a11, a12, a13) = (a[4], a[5], a[6], a[7]);
        let (a20, a21, a22, a23) = (a[8], a[9], a[10], a[11]);
        let (a30, a31, a32, a33) = (a[12], a[13], a[14], a[15]);

        Some(Self {
            data: [
                (a11 * b11 - a12 * b10 + a13 * b09) * inv,
                (a02 * b10 - a01 * b11 - a03 * b09) * inv,
                (a31 * b05 - a32 * b04 + a33 * b03) * inv,
                (a22 * b04 - a21 * b05 - a23 * b03) * inv,
                (a12 * b08 - a10 * b11 - a13 * b07) * inv,
                (a00 * b11 - a02 * b08 + a03 * b07) * inv,
                (a32 * b02 - a30 * b05 - a33 * b01) * inv,
                (a20 * b05 - a22 * b02 + a23 * b01) * inv,
                (a10 * b10 - a11 * b08 + a13 * b06) * inv,
                (a01 * b08 - a00 * b10 - a03 * b06) * inv,
                (a30 * b04 - a31 * b02 + a33 * b00) * inv,
                (a21 * b02 - a20 * b04 - a23 * b00) * inv,
                (a11 * b07 - a10 * b09 - a12 * b06) * inv,
                (a00 * b09 - a01 * b07 + a02 * b06) * inv,
                (a31 * b01 - a30 * b03 - a32 * b00) * inv,
                (a20 * b03 - a21 * b01 + a22 * b00) * inv,
            ],
        })
    }

    /// 2x2 sub-determinants shared by `determinant` and `inverse`, plus the determinant
    #[allow(clippy::type_complexity)]
    fn cofactors(&self) -> (f32, f32, f32, f32, f32, f32, f32, f32, f32, f32, f32, f32, f32) {
        let a = &self.data;
        let (a00, a01, a02, a03) = (a[0], a[1], a[2], a[3]);
        let (a10, a11, a12, a13) = (a[4], a[5], a[6], a[7]);
        let (a20, a21, a22, a23) = (a[8], a[9], a[10], a[11]);
        let (a30, a31, a32, a33) = (a[12], a[13], a[14], a[15]);

        let b00 = a00 * a11 - a01 * a10;
        let b01 = a00 * a12 - a02 * a10;
        let b02 = a00 * a13 - a03 * a10;
        let b03 = a01 * a12 - a02 * a11;
        let b04 = a01 * a13 - a03 * a11;
        let b05 = a02 * a13 - a03 * a12;
        let b06 = a20 * a31 - a21 * a30;
        let b07 = a20 * a32 - a22 * a30;
        let b08 = a20 * a33 - a23 * a30;
        let b09 = a21 * a32 - a22 * a31;
        let b10 = a21 * a33 - a23 * a31;
        let b11 = a22 * a33 - a23 * a32;

        let det = b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06;
        (b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11, det)
    }

    /// Transform a point (applies translation)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * p.x + self.data[4] * p.y + self.data[8] * p.z + self.data[12],
            self.data[1] * p.x + self.data[5] * p.y + self.data[9] * p.z + self.data[13],
            self.data[2] * p.x + self.data[6] * p.y + self.data[10] * p.z + self.data[14],
        )
    }

    /// Transform a direction (ignores translation)
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * d.x + self.data[4] * d.y + self.data[8] * d.z,
            self.data[1] * d.x + self.data[5] * d.y + self.data[9] * d.z,
            self.data[2] * d.x + self.data[6] * d.y + self.data[10] * d.z,
        )
    }

    /// Full homogeneous product, no perspective divide
    pub fn transform_point4(&self, p: Point4) -> Point4 {
        let d = &self.data;
        Point4::new(
            d[0] * p.x + d[4] * p.y + d[8] * p.z + d[12] * p.w,
            d[1] * p.x + d[5] * p.y + d[9] * p.z + d[13] * p.w,
            d[2] * p.x + d[6] * p.y + d[10] * p.z + d[14] * p.w,
            d[3] * p.x + d[7] * p.y + d[11] * p.z + d[15] * p.w,
        )
    }

    pub fn approx_eq(&self, other: &Mat4, epsilon: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    /// Get as slice for WebGL
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}

impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            writeln!(
                f,
                "{:8.3} {:8.3} {:8.3} {:8.3}",
                self.get(row, 0),
                self.get(row, 1),
                self.get(row, 2),
                self.get(row, 3),
            )?;
        }
        Ok(())
    }
}

/// Determinants this small next to the product of the column lengths
/// (its largest possible magnitude) are treated as zero.
const SINGULAR_RATIO: f32 = 1e-7;

/// Scale-independent singularity test for a column-major `n`x`n` matrix
pub(crate) fn is_singular(det: f32, data: &[f32], n: usize) -> bool {
    let volume: f32 = data
        .chunks(n)
        .map(|col| col.iter().map(|v| v * v).sum::<f32>().sqrt())
        .product();
    !det.is_finite() || volume == 0.0 || det.abs() <= volume * SINGULAR_RATIO
}
