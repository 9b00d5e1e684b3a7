use crate::material::{LightState, Material};
use glam::{Vec2, Vec3, Vec4Swizzles};

/// Scene-wide ambient term applied on top of the light's own ambient
const GLOBAL_AMBIENT: f32 = 0.2;

/// Law of cosines: the side opposite `gamma_deg` in a triangle with sides `a` and `b`
pub fn law_of_cosines(a: f32, b: f32, gamma_deg: f32) -> f32 {
    let c2 = a * a + b * b - 2.0 * a * b * gamma_deg.to_radians().cos();
    c2.max(0.0).sqrt()
}

/// Chord between two points at distance `arm` from a hub, `alpha_deg` apart
pub fn chord_length(arm: f32, alpha_deg: f32) -> f32 {
    law_of_cosines(arm, arm, alpha_deg)
}

/// Law of sines: the angle (degrees) opposite `arm` in a triangle whose side
/// `chord` faces `alpha_deg`. Degenerate triangles give zero.
pub fn mount_angle(arm: f32, alpha_deg: f32, chord: f32) -> f32 {
    if chord <= f32::EPSILON {
        return 0.0;
    }
    let ratio = (arm * alpha_deg.to_radians().sin() / chord).clamp(-1.0, 1.0);
    ratio.asin().to_degrees()
}

/// Length of the long truss member between the inner ring and the sector edge.
///
/// The cross term is halved, which is not the symmetric law-of-cosines chord.
pub fn primary_chord(arm: f32, alpha_deg: f32) -> f32 {
    let c2 = (arm / 2.0).powi(2) + arm.powi(2)
        - 2.0 * arm.powi(2) * alpha_deg.to_radians().cos() / 2.0;
    c2.max(0.0).sqrt()
}

/// Length of the short truss member near the middle ring.
///
/// Works on half the spoke angle and divides the cross term by four.
pub fn secondary_chord(arm: f32, alpha_deg: f32) -> f32 {
    let half = alpha_deg / 2.0;
    let c2 = (3.0 * arm / 4.0).powi(2) + arm.powi(2)
        - 6.0 * arm.powi(2) * half.to_radians().cos() / 4.0;
    c2.max(0.0).sqrt()
}

/// Solved length and mount angle for one family of truss members
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chord {
    pub length: f32,
    pub angle_deg: f32,
}

/// Both truss chords for a wheel with structural arm `arm` and spoke angle `alpha_deg`
pub fn truss_chords(arm: f32, alpha_deg: f32) -> (Chord, Chord) {
    let primary = primary_chord(arm, alpha_deg);
    let secondary = secondary_chord(arm, alpha_deg);
    (
        Chord {
            length: primary,
            angle_deg: mount_angle(arm, alpha_deg, primary),
        },
        Chord {
            length: secondary,
            angle_deg: mount_angle(arm, alpha_deg / 2.0, secondary),
        },
    )
}

/// Edge function used in rasterization
pub fn edge_function(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

/// Calculates the normal vector of a triangle
pub fn calculate_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Fixed-function style lighting of a surface point, returned as linear RGB in [0, 1]
pub fn shade(
    material: &Material,
    light: &LightState,
    normal: Vec3,
    position: Vec3,
    eye: Vec3,
) -> Vec3 {
    let light_pos = light.position();
    let to_light = if light_pos.w == 0.0 {
        light_pos.xyz().normalize_or_zero()
    } else {
        (light_pos.xyz() - position).normalize_or_zero()
    };
    let to_eye = (eye - position).normalize_or_zero();

    // Surfaces are lit from whichever side faces the viewer
    let normal = if normal.dot(to_eye) < 0.0 { -normal } else { normal };

    let mut color = material.ambient.xyz() * GLOBAL_AMBIENT
        + light.ambient.xyz() * material.ambient.xyz();

    let diffuse = normal.dot(to_light);
    if diffuse > 0.0 {
        color += light.diffuse.xyz() * material.diffuse.xyz() * diffuse;
        let half = (to_light + to_eye).normalize_or_zero();
        let specular = normal.dot(half).max(0.0).powf(material.shininess);
        color += light.specular.xyz() * material.specular.xyz() * specular;
    }
    color.clamp(Vec3::ZERO, Vec3::ONE)
}

/// Converts a linear [0, 1] color to 8-bit channels
pub fn to_rgb8(color: Vec3) -> [u8; 3] {
    let c = color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]
}
