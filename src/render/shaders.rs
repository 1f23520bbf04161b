//! GLSL sources. Attribute locations are fixed so every program can share
//! the buffers uploaded by `ModelVobs`.

pub const ATTRIB_VERTEX: u32 = 0;
pub const ATTRIB_COLOR: u32 = 1;
pub const ATTRIB_NORMAL: u32 = 2;

/// Per-vertex color, single combined transform
pub const COLOR_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_vertex;
layout(location = 1) in vec3 a_color;

uniform mat4 u_transform;
uniform float u_point_size;

out vec4 v_color;

void main() {
    gl_Position = u_transform * vec4(a_vertex, 1.0);
    gl_PointSize = u_point_size;
    v_color = vec4(a_color, 1.0);
}
"#;

pub const COLOR_FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;

in vec4 v_color;
out vec4 fragColor;

void main() {
    fragColor = v_color;
}
"#;

/// Phong lighting computed per fragment in camera space
pub const LIGHTING_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_vertex;
layout(location = 1) in vec3 a_color;
layout(location = 2) in vec3 a_normal;

uniform mat4 u_model_view;
uniform mat4 u_projection;
uniform mat3 u_normal_matrix;

out vec3 v_position;
out vec3 v_normal;
out vec3 v_color;

void main() {
    vec4 camera_pos = u_model_view * vec4(a_vertex, 1.0);
    v_position = camera_pos.xyz;
    v_normal = normalize(u_normal_matrix * a_normal);
    v_color = a_color;
    gl_Position = u_projection * camera_pos;
}
"#;

pub const LIGHTING_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_position;
in vec3 v_normal;
in vec3 v_color;

uniform vec3 u_light_position;
uniform vec3 u_light_color;
uniform float u_ambient;
uniform float u_diffuse;
uniform float u_specular;
uniform float u_shininess;

out vec4 fragColor;

void main() {
    vec3 normal = normalize(v_normal);
    vec3 to_light = normalize(u_light_position - v_position);

    float lambert = max(dot(normal, to_light), 0.0);

    float spec = 0.0;
    if (lambert > 0.0) {
        vec3 reflection = reflect(-to_light, normal);
        vec3 to_camera = normalize(-v_position);
        spec = pow(max(dot(reflection, to_camera), 0.0), u_shininess);
    }

    vec3 color = v_color * (u_ambient + u_diffuse * lambert) * u_light_color
        + u_light_color * u_specular * spec;
    fragColor = vec4(clamp(color, 0.0, 1.0), 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_version() {
        for src in [
            COLOR_VERTEX_SHADER,
            COLOR_FRAGMENT_SHADER,
            LIGHTING_VERTEX_SHADER,
            LIGHTING_FRAGMENT_SHADER,
        ] {
            assert!(src.starts_with("#version 300 es"));
        }
    }

    #[test]
    fn test_attribute_locations_match_constants() {
        for src in [COLOR_VERTEX_SHADER, LIGHTING_VERTEX_SHADER] {
            assert!(src.contains(&format!("layout(location = {}) in vec3 a_vertex", ATTRIB_VERTEX)));
            assert!(src.contains(&format!("layout(location = {}) in vec3 a_color", ATTRIB_COLOR)));
        }
        assert!(LIGHTING_VERTEX_SHADER
            .contains(&format!("layout(location = {}) in vec3 a_normal", ATTRIB_NORMAL)));
    }
}
