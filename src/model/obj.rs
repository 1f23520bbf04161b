//! Wavefront OBJ/MTL text to `ModelArrays`, read with `tobj`.
//!
//! Faces are fan-triangulated here rather than by the loader, so a statement
//! with two indices becomes a line segment and one with a single index a
//! point. Materials contribute their diffuse color (`Kd`) as the vertex color.

use std::collections::HashMap;
use std::io::{BufReader, Cursor};
use std::path::Path;

use crate::math::Vec3;
use super::arrays::{face_normal, ModelArrays, DEFAULT_COLOR};

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl From<&tobj::Material> for Material {
    fn from(m: &tobj::Material) -> Self {
        let color = |c: Option<[f32; 3]>, default: Vec3| c.and_then(|c| Vec3::from_slice(&c)).unwrap_or(default);
        Self {
            name: m.name.clone(),
            diffuse: color(m.diffuse, DEFAULT_COLOR),
            specular: color(m.specular, Vec3::ZERO),
            shininess: m.shininess.unwrap_or(30.0),
        }
    }
}

fn text_reader(text: &str) -> BufReader<Cursor<&[u8]>> {
    BufReader::new(Cursor::new(text.as_bytes()))
}

/// Parse MTL text into materials keyed by name
pub fn parse_mtl(text: &str) -> Result<HashMap<String, Material>, String> {
    let (materials, _) = tobj::load_mtl_buf(&mut text_reader(text)).map_err(|e| format!("MTL parse error: {}", e))?;
    Ok(materials.iter().map(|m| (m.name.clone(), Material::from(m))).collect())
}

/// Parse OBJ text. `mtl` answers the file's `mtllib` statement; without it,
/// or for an unknown `usemtl` name, faces are light gray.
pub fn parse_obj(text: &str, mtl: Option<&str>) -> Result<ModelArrays, String> {
    let options = tobj::LoadOptions {
        single_index: true,
        triangulate: false,
        ..Default::default()
    };

    let (models, materials) = tobj::load_obj_buf(&mut text_reader(text), &options, |path: &Path| match mtl {
        Some(mtl) => tobj::load_mtl_buf(&mut text_reader(mtl)),
        None => {
            log::warn!("OBJ references '{}' but no MTL text was supplied", path.display());
            Err(tobj::LoadError::OpenFileFailed)
        }
    })
    .map_err(|e| format!("OBJ parse error: {}", e))?;

    let colors: Vec<Vec3> = match materials {
        Ok(materials) => materials.iter().map(|m| Material::from(m).diffuse).collect(),
        Err(e) => {
            log::debug!("OBJ materials unavailable: {}", e);
            Vec::new()
        }
    };

    let name = models.first().map(|m| m.name.as_str()).filter(|n| !n.is_empty()).unwrap_or("obj");
    let mut out = ModelArrays::new(name);
    let mut any_uv = false;
    for model in &models {
        let color = model
            .mesh
            .material_id
            .and_then(|id| colors.get(id).copied())
            .unwrap_or(DEFAULT_COLOR);
        any_uv |= append_mesh(&mut out, &model.mesh, color)?;
    }

    if !any_uv {
        out.triangles.textures.clear();
    }
    log::debug!("OBJ '{}': {} meshes, {} triangles", out.name, models.len(), out.triangles.triangle_count());
    out.validate()?;
    Ok(out)
}

/// Append one loader mesh; returns whether it carried texture coordinates
fn append_mesh(out: &mut ModelArrays, mesh: &tobj::Mesh, color: Vec3) -> Result<bool, String> {
    let vertex_count = mesh.positions.len() / 3;
    let has_normals = mesh.normals.len() == mesh.positions.len();
    let has_uv = !mesh.texcoords.is_empty() && mesh.texcoords.len() == vertex_count * 2;

    let position = |i: u32| {
        let base = i as usize * 3;
        mesh.positions
            .get(base..base + 3)
            .and_then(Vec3::from_slice)
            .ok_or_else(|| format!("OBJ index {} out of range ({} vertices)", i, vertex_count))
    };
    let normal = |i: u32| {
        let base = i as usize * 3;
        mesh.normals.get(base..base + 3).filter(|_| has_normals).and_then(Vec3::from_slice)
    };
    let uv = |i: u32| {
        let base = i as usize * 2;
        match mesh.texcoords.get(base..base + 2) {
            Some(&[u, v]) if has_uv => [u, v],
            _ => [0.0, 0.0],
        }
    };

    // No arities means every face is a triangle
    let arities = if mesh.face_arities.is_empty() {
        vec![3; mesh.indices.len() / 3]
    } else {
        mesh.face_arities.clone()
    };

    let mut start = 0;
    for arity in arities {
        let end = start + arity as usize;
        let face = mesh.indices.get(start..end).ok_or("OBJ face indices are truncated")?;
        start = end;

        match face {
            [] => {}
            [p] => out.points.add_point(position(*p)?, color),
            [a, b] => out.lines.add_line(position(*a)?, position(*b)?, color),
            [first, rest @ ..] => {
                // Fan around the first corner
                for pair in rest.windows(2) {
                    let corners = [*first, pair[0], pair[1]];
                    let points = [position(corners[0])?, position(corners[1])?, position(corners[2])?];
                    let flat = face_normal(points);
                    for (index, p) in corners.into_iter().zip(points) {
                        out.triangles.push_vertex(p, color, normal(index).unwrap_or(flat), flat, uv(index));
                    }
                }
            }
        }
    }
    Ok(has_uv)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "
# a unit square in the xy plane
mtllib scene.mtl
o square
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
usemtl red
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    const MTL: &str = "
newmtl red
Kd 1.0 0.0 0.0
Ks 0.5 0.5 0.5
Ns 96
newmtl blue
Kd 0 0 1
";

    #[test]
    fn test_parse_mtl() {
        let materials = parse_mtl(MTL).expect("valid mtl");
        assert_eq!(materials.len(), 2);
        let red = &materials["red"];
        assert_eq!(red.diffuse, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(red.specular, Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(red.shininess, 96.0);
        assert_eq!(materials["blue"].diffuse, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_mtl_bad_number() {
        assert!(parse_mtl("newmtl red\nKd 1 x 0\n").is_err());
    }

    #[test]
    fn test_quad_is_fan_triangulated() {
        let model = parse_obj(QUAD, Some(MTL)).expect("valid obj");

        assert_eq!(model.name, "square");
        assert_eq!(model.triangles.triangle_count(), 2);
        assert_eq!(model.triangles.textures.len(), 12);
        assert_eq!(&model.triangles.colors[0..3], &[1.0, 0.0, 0.0]);
        assert_eq!(&model.triangles.normals[0..3], &[0.0, 0.0, 1.0]);
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_ngon_triangle_count() {
        let text = "v 0 0 0\nv 1 0 0\nv 2 1 0\nv 1 2 0\nv 0 2 0\nv -1 1 0\nf 1 2 3 4 5 6\n";
        let model = parse_obj(text, None).expect("valid obj");
        assert_eq!(model.triangles.triangle_count(), 4);
        // No vt anywhere, so no texture array
        assert!(model.triangles.textures.is_empty());
        // Missing vn falls back to the face normal
        assert_eq!(&model.triangles.normals[0..3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_negative_indices() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let model = parse_obj(text, None).expect("valid obj");
        let tri = model.triangles.triangle(0).expect("one triangle");
        assert_eq!(tri[0], Vec3::ZERO);
        assert_eq!(tri[2], Vec3::UP);
    }

    #[test]
    fn test_lines_and_points() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nl 1 2\np 3\n";
        let model = parse_obj(text, None).expect("valid obj");
        assert_eq!(model.lines.line_count(), 1);
        assert_eq!(model.points.vertex_count(), 1);
        assert!(model.triangles.is_empty());
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        let err = parse_obj("v 0 zero 0\n", None).unwrap_err();
        assert!(err.starts_with("OBJ parse error"), "{}", err);

        assert!(parse_obj("v 0 0 0\nf 1 2 3\n", None).is_err());
    }

    #[test]
    fn test_missing_mtl_uses_default_color() {
        let model = parse_obj(QUAD, None).expect("materials are optional");
        assert_eq!(model.triangles.triangle_count(), 2);
        assert_eq!(&model.triangles.colors[0..3], &[0.8, 0.8, 0.8]);

        let text = "mtllib scene.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl missing\nf 1 2 3\n";
        let model = parse_obj(text, Some(MTL)).expect("valid obj");
        assert_eq!(&model.triangles.colors[0..3], &[0.8, 0.8, 0.8]);
    }
}
