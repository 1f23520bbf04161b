pub mod arrays;
pub mod primitives;
pub mod obj;

pub use arrays::{LineSet, ModelArrays, PointSet, TriangleSet, DEFAULT_COLOR};
pub use obj::{parse_mtl, parse_obj, Material};
