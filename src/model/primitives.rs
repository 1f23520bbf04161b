//! Hard-coded teaching models: pyramid, cube, axes, sphere, and a
//! height-field surface.

use std::f32::consts::{PI, TAU};
use crate::math::Vec3;
use super::arrays::{face_normal, ModelArrays};

pub const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
pub const YELLOW: Vec3 = Vec3::new(1.0, 1.0, 0.0);
pub const MAGENTA: Vec3 = Vec3::new(1.0, 0.0, 1.0);
pub const CYAN: Vec3 = Vec3::new(0.0, 1.0, 1.0);

/// Square pyramid: base of side 1 on the y = 0 plane, apex at (0, 1, 0).
/// Each face has its own color.
pub fn pyramid() -> ModelArrays {
    let a = Vec3::new(-0.5, 0.0, 0.5);
    let b = Vec3::new(0.5, 0.0, 0.5);
    let c = Vec3::new(0.5, 0.0, -0.5);
    let d = Vec3::new(-0.5, 0.0, -0.5);
    let apex = Vec3::new(0.0, 1.0, 0.0);

    let mut model = ModelArrays::new("pyramid");
    let t = &mut model.triangles;
    t.add_triangle([a, b, apex], RED);
    t.add_triangle([b, c, apex], GREEN);
    t.add_triangle([c, d, apex], BLUE);
    t.add_triangle([d, a, apex], MAGENTA);
    t.add_triangle([a, d, c], YELLOW);
    t.add_triangle([a, c, b], YELLOW);
    model
}

/// Axis-aligned cube centered on the origin
pub fn cube(size: f32) -> ModelArrays {
    let h = size / 2.0;
    let x = Vec3::RIGHT;
    let y = Vec3::UP;
    let z = Vec3::FORWARD;

    // (normal, u, v) with u x v == normal so the corners wind counter-clockwise
    let faces = [
        (x, y, z, RED),
        (-x, z, y, CYAN),
        (y, z, x, GREEN),
        (-y, x, z, MAGENTA),
        (z, x, y, BLUE),
        (-z, y, x, YELLOW),
    ];

    let mut model = ModelArrays::new("cube");
    for (n, u, v, color) in faces {
        let center = n.scale(h);
        let corner = |su: f32, sv: f32| center + u.scale(su * h) + v.scale(sv * h);
        let p0 = corner(-1.0, -1.0);
        let p1 = corner(1.0, -1.0);
        let p2 = corner(1.0, 1.0);
        let p3 = corner(-1.0, 1.0);
        model.triangles.add_triangle([p0, p1, p2], color);
        model.triangles.add_triangle([p0, p2, p3], color);
    }
    model
}

/// Coordinate axes as three lines from the origin: x red, y green, z blue
pub fn axes(length: f32) -> ModelArrays {
    let mut model = ModelArrays::new("axes");
    model.lines.add_line(Vec3::ZERO, Vec3::RIGHT.scale(length), RED);
    model.lines.add_line(Vec3::ZERO, Vec3::UP.scale(length), GREEN);
    model.lines.add_line(Vec3::ZERO, Vec3::FORWARD.scale(length), BLUE);
    model
}

/// UV sphere with smooth normals. `slices` is clamped to at least 3 and
/// `stacks` to at least 2.
pub fn uv_sphere(radius: f32, slices: usize, stacks: usize, color: Vec3) -> ModelArrays {
    let slices = slices.max(3);
    let stacks = stacks.max(2);

    let point = |i: usize, j: usize| {
        let theta = PI * i as f32 / stacks as f32;
        let phi = TAU * j as f32 / slices as f32;
        let dir = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
        (dir.scale(radius), dir, [j as f32 / slices as f32, i as f32 / stacks as f32])
    };

    let mut model = ModelArrays::new("sphere");
    let t = &mut model.triangles;
    let mut emit = |corners: [(Vec3, Vec3, [f32; 2]); 3]| {
        let flat = face_normal([corners[0].0, corners[1].0, corners[2].0]);
        for (position, normal, uv) in corners {
            t.push_vertex(position, color, normal, flat, uv);
        }
    };

    for i in 0..stacks {
        for j in 0..slices {
            let a = point(i, j);
            let b = point(i, j + 1);
            let c = point(i + 1, j + 1);
            let d = point(i + 1, j);
            // The pole rows collapse one triangle of each quad
            if i != 0 {
                emit([a, b, c]);
            }
            if i != stacks - 1 {
                emit([a, c, d]);
            }
        }
    }
    model
}

/// Parameters for a height-field surface
#[derive(Debug, Clone, Copy)]
pub struct SurfaceParams {
    /// Cells along each side
    pub resolution: usize,
    /// Side length of the square, centered on the origin in the xz plane
    pub size: f32,
    pub color: Vec3,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            resolution: 32,
            size: 2.0,
            color: Vec3::new(0.3, 0.6, 0.9),
        }
    }
}

/// Triangulated grid displaced along +y by `height(x, z)`, with smooth
/// normals and texture coordinates spanning `[0, 1]`.
pub fn grid_surface(params: &SurfaceParams, height: impl Fn(f32, f32) -> f32) -> ModelArrays {
    let mut model = ModelArrays::new("surface");
    let n = params.resolution;
    if n == 0 {
        return model;
    }

    let step = params.size / n as f32;
    let half = params.size / 2.0;
    let vertex = |i: usize, j: usize| {
        let x = -half + i as f32 * step;
        let z = -half + j as f32 * step;
        (Vec3::new(x, height(x, z), z), [i as f32 / n as f32, j as f32 / n as f32])
    };

    let t = &mut model.triangles;
    for i in 0..n {
        for j in 0..n {
            let p00 = vertex(i, j);
            let p10 = vertex(i + 1, j);
            let p01 = vertex(i, j + 1);
            let p11 = vertex(i + 1, j + 1);
            for corners in [[p00, p01, p11], [p00, p11, p10]] {
                let flat = face_normal(corners.map(|c| c.0));
                for (position, uv) in corners {
                    t.push_vertex(position, params.color, Vec3::ZERO, flat, uv);
                }
            }
        }
    }
    t.compute_smooth_normals();
    model
}
