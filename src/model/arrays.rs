use std::collections::HashMap;
use crate::math::{Mat4, Vec3};

/// Points drawn with `gl.POINTS`. Layout: position(3), color(3) per vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    pub vertices: Vec<f32>,
    pub colors: Vec<f32>,
    /// Rendered point size in pixels
    pub size: f32,
}

impl PointSet {
    pub fn add_point(&mut self, p: Vec3, color: Vec3) {
        self.vertices.extend_from_slice(&p.to_array());
        self.colors.extend_from_slice(&color.to_array());
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Independent line segments drawn with `gl.LINES`, two vertices each
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSet {
    pub vertices: Vec<f32>,
    pub colors: Vec<f32>,
}

impl LineSet {
    pub fn add_line(&mut self, a: Vec3, b: Vec3, color: Vec3) {
        for p in [a, b] {
            self.vertices.extend_from_slice(&p.to_array());
            self.colors.extend_from_slice(&color.to_array());
        }
    }

    /// Consecutive points joined into segments
    pub fn add_polyline(&mut self, points: &[Vec3], color: Vec3) {
        for w in points.windows(2) {
            self.add_line(w[0], w[1], color);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn line_count(&self) -> usize {
        self.vertices.len() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Independent triangles drawn with `gl.TRIANGLES`, three vertices each,
/// counter-clockwise when seen from the front.
///
/// `colors`, `normals`, `flat_normals` hold 3 floats per vertex and
/// `textures` 2; any of them may be empty when the model lacks that attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSet {
    pub vertices: Vec<f32>,
    pub colors: Vec<f32>,
    /// Smooth (per-vertex) normals
    pub normals: Vec<f32>,
    /// Face normal repeated for each corner
    pub flat_normals: Vec<f32>,
    pub textures: Vec<f32>,
}

impl TriangleSet {
    /// Add a triangle with a single color; the flat normal is computed from the winding
    pub fn add_triangle(&mut self, corners: [Vec3; 3], color: Vec3) {
        let normal = face_normal(corners);
        for p in corners {
            self.vertices.extend_from_slice(&p.to_array());
            self.colors.extend_from_slice(&color.to_array());
            self.flat_normals.extend_from_slice(&normal.to_array());
        }
    }

    /// Add one vertex with every attribute supplied
    pub fn push_vertex(&mut self, position: Vec3, color: Vec3, normal: Vec3, flat_normal: Vec3, uv: [f32; 2]) {
        self.vertices.extend_from_slice(&position.to_array());
        self.colors.extend_from_slice(&color.to_array());
        self.normals.extend_from_slice(&normal.to_array());
        self.flat_normals.extend_from_slice(&flat_normal.to_array());
        self.textures.extend_from_slice(&uv);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Corners of triangle `index`
    pub fn triangle(&self, index: usize) -> Option<[Vec3; 3]> {
        let base = index * 9;
        let v = self.vertices.get(base..base + 9)?;
        Some([
            Vec3::new(v[0], v[1], v[2]),
            Vec3::new(v[3], v[4], v[5]),
            Vec3::new(v[6], v[7], v[8]),
        ])
    }

    /// Replace `normals` with area-weighted averages of the face normals of
    /// every triangle sharing each vertex position.
    pub fn compute_smooth_normals(&mut self) {
        let mut sums: HashMap<[u32; 3], Vec3> = HashMap::new();
        for index in 0..self.triangle_count() {
            if let Some(corners) = self.triangle(index) {
                let [a, b, c] = corners;
                let weighted = (b - a).cross(&(c - a));
                for p in corners {
                    let entry = sums.entry(position_key(p)).or_default();
                    *entry = *entry + weighted;
                }
            }
        }

        self.normals = self
            .vertices
            .chunks_exact(3)
            .flat_map(|v| {
                let key = position_key(Vec3::new(v[0], v[1], v[2]));
                sums.get(&key).copied().unwrap_or_default().normalize().to_array()
            })
            .collect();
    }
}

/// Unit normal of a counter-clockwise triangle; zero for degenerate triangles
pub fn face_normal([a, b, c]: [Vec3; 3]) -> Vec3 {
    (b - a).cross(&(c - a)).normalize()
}

fn position_key(p: Vec3) -> [u32; 3] {
    // -0.0 and 0.0 must share a key
    [p.x + 0.0, p.y + 0.0, p.z + 0.0].map(f32::to_bits)
}

/// Vertex color used where a model supplies none
pub const DEFAULT_COLOR: Vec3 = Vec3::new(0.8, 0.8, 0.8);

/// Append `src` to `dst`, where `counts` holds the vertex counts behind each.
/// A side without the attribute gets `fill_dst(count)` or `fill_src(count)`.
fn append_attribute(
    dst: &mut Vec<f32>,
    src: &[f32],
    (dst_count, src_count): (usize, usize),
    fill_dst: impl FnOnce(usize) -> Vec<f32>,
    fill_src: impl FnOnce(usize) -> Vec<f32>,
) {
    if src.is_empty() && (dst.is_empty() || src_count == 0) {
        return;
    }
    if dst.is_empty() && dst_count > 0 {
        *dst = fill_dst(dst_count);
    }
    if src.is_empty() {
        dst.extend(fill_src(src_count));
    } else {
        dst.extend_from_slice(src);
    }
}

fn flat_normals_or_computed(set: &TriangleSet) -> Vec<f32> {
    if set.flat_normals.len() == set.vertices.len() {
        return set.flat_normals.clone();
    }
    (0..set.triangle_count())
        .filter_map(|index| set.triangle(index))
        .flat_map(|corners| face_normal(corners).to_array().repeat(3))
        .collect()
}

/// Plain-data geometry for one model before GPU upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelArrays {
    pub name: String,
    pub points: PointSet,
    pub lines: LineSet,
    pub triangles: TriangleSet,
}

impl ModelArrays {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Check that every attribute array matches its vertex count
    pub fn validate(&self) -> Result<(), String> {
        let check = |set: &str, attr: &str, len: usize, expected: usize| {
            if len == 0 || len == expected {
                Ok(())
            } else {
                Err(format!(
                    "Model '{}': {} {} has {} floats, expected {}",
                    self.name, set, attr, len, expected
                ))
            }
        };

        let p = &self.points;
        if p.vertices.len() % 3 != 0 {
            return Err(format!("Model '{}': point vertices not a multiple of 3", self.name));
        }
        check("points", "colors", p.colors.len(), p.vertices.len())?;

        let l = &self.lines;
        if l.vertices.len() % 6 != 0 {
            return Err(format!("Model '{}': line vertices not a multiple of 6", self.name));
        }
        check("lines", "colors", l.colors.len(), l.vertices.len())?;

        let t = &self.triangles;
        if t.vertices.len() % 9 != 0 {
            return Err(format!("Model '{}': triangle vertices not a multiple of 9", self.name));
        }
        check("triangles", "colors", t.colors.len(), t.vertices.len())?;
        check("triangles", "normals", t.normals.len(), t.vertices.len())?;
        check("triangles", "flat normals", t.flat_normals.len(), t.vertices.len())?;
        check("triangles", "textures", t.textures.len(), t.vertex_count() * 2)?;

        Ok(())
    }

    /// Vertex counts as (points, lines, triangles)
    pub fn vertex_counts(&self) -> (usize, usize, usize) {
        (
            self.points.vertex_count(),
            self.lines.vertex_count(),
            self.triangles.vertex_count(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty() && self.triangles.is_empty()
    }

    fn all_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points
            .vertices
            .chunks_exact(3)
            .chain(self.lines.vertices.chunks_exact(3))
            .chain(self.triangles.vertices.chunks_exact(3))
            .map(|v| Vec3::new(v[0], v[1], v[2]))
    }

    /// Axis-aligned bounding box as (min, max), `None` for an empty model
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.all_positions().fold(None, |acc, p| {
            Some(match acc {
                None => (p, p),
                Some((min, max)) => (
                    Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                    Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
                ),
            })
        })
    }

    /// Bounding sphere (center of the box, radius to the farthest vertex)
    pub fn bounding_sphere(&self) -> Option<(Vec3, f32)> {
        let (min, max) = self.bounds()?;
        let center = min.lerp(&max, 0.5);
        let radius = self
            .all_positions()
            .map(|p| p.distance(&center))
            .fold(0.0f32, f32::max);
        Some((center, radius))
    }

    /// Append another model's geometry. An attribute present on only one side
    /// is filled in for the other so every array stays aligned with its vertices.
    pub fn merge(&mut self, other: &ModelArrays) {
        let gray = DEFAULT_COLOR.to_array();

        let p = &mut self.points;
        let counts = (p.vertex_count(), other.points.vertex_count());
        append_attribute(&mut p.colors, &other.points.colors, counts, |n| gray.repeat(n), |n| gray.repeat(n));
        p.vertices.extend_from_slice(&other.points.vertices);

        let l = &mut self.lines;
        let counts = (l.vertex_count(), other.lines.vertex_count());
        append_attribute(&mut l.colors, &other.lines.colors, counts, |n| gray.repeat(n), |n| gray.repeat(n));
        l.vertices.extend_from_slice(&other.lines.vertices);

        let t = &mut self.triangles;
        let o = &other.triangles;
        let counts = (t.vertex_count(), o.vertex_count());
        let (own_flat, other_flat) = (flat_normals_or_computed(t), flat_normals_or_computed(o));

        append_attribute(&mut t.colors, &o.colors, counts, |n| gray.repeat(n), |n| gray.repeat(n));
        // Smooth normals fall back to the face normals
        append_attribute(&mut t.normals, &o.normals, counts, |_| own_flat.clone(), |_| other_flat.clone());
        append_attribute(&mut t.flat_normals, &o.flat_normals, counts, |_| own_flat, |_| other_flat);
        append_attribute(&mut t.textures, &o.textures, counts, |n| vec![0.0; n * 2], |n| vec![0.0; n * 2]);
        t.vertices.extend_from_slice(&o.vertices);
    }

    /// Copy with every position transformed by `m` and normals by its rotation part
    pub fn transformed(&self, m: &Mat4) -> ModelArrays {
        let normal_matrix = crate::math::Mat3::normal_matrix(m);
        let points = |data: &[f32]| -> Vec<f32> {
            data.chunks_exact(3)
                .flat_map(|v| m.transform_point(Vec3::new(v[0], v[1], v[2])).to_array())
                .collect()
        };
        let normals = |data: &[f32]| -> Vec<f32> {
            data.chunks_exact(3)
                .flat_map(|v| {
                    normal_matrix
                        .transform_vec3(Vec3::new(v[0], v[1], v[2]))
                        .normalize()
                        .to_array()
                })
                .collect()
        };

        let mut out = self.clone();
        out.points.vertices = points(&self.points.vertices);
        out.lines.vertices = points(&self.lines.vertices);
        out.triangles.vertices = points(&self.triangles.vertices);
        out.triangles.normals = normals(&self.triangles.normals);
        out.triangles.flat_normals = normals(&self.triangles.flat_normals);
        out
    }
}
