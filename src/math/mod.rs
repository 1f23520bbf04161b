pub mod vec3;
pub mod point4;
pub mod matrix3;
pub mod matrix4;

pub use vec3::Vec3;
pub use point4::Point4;
pub use matrix3::Mat3;
pub use matrix4::Mat4;
