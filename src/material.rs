use glam::{Vec3, Vec4};

/// Lower and upper bound for any user-entered coordinate
pub const COORDINATE_LIMIT: f32 = 750.0;

/// Clamps a spinner value into the range the control panel allows
pub fn clamp_coordinate(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(-COORDINATE_LIMIT, COORDINATE_LIMIT)
}

/// Surface reflectance used by the shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
}

/// The fixed palette the wheel is painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaterialPreset {
    #[default]
    RedPlastic,
    BlackPlastic,
    DarkBrownPlastic,
    LightBrownPlastic,
}

impl MaterialPreset {
    pub fn material(self) -> Material {
        let ambient = Vec4::new(0.3, 0.0, 0.0, 1.0);
        let specular = Vec4::new(0.9, 0.9, 0.9, 1.0);
        let diffuse = match self {
            MaterialPreset::RedPlastic => Vec4::new(0.8, 0.0, 0.0, 1.0),
            MaterialPreset::BlackPlastic => Vec4::new(0.0, 0.0, 0.0, 1.0),
            MaterialPreset::DarkBrownPlastic => Vec4::new(0.4, 0.15, 0.05, 1.0),
            MaterialPreset::LightBrownPlastic => Vec4::new(0.8, 0.5, 0.25, 1.0),
        };
        Material {
            ambient,
            diffuse,
            specular,
            shininess: 64.0,
        }
    }
}

/// The single positional light illuminating the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightState {
    position: Vec4,
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
}

impl LightState {
    pub fn position(&self) -> Vec4 {
        self.position
    }

    pub fn position3(&self) -> Vec3 {
        self.position.truncate()
    }

    /// Sets one axis (0 = x, 1 = y, 2 = z) of the light position, clamped
    pub fn set_axis(&mut self, axis: usize, value: f32) {
        if axis < 3 {
            self.position[axis] = clamp_coordinate(value);
        }
    }
}

impl Default for LightState {
    fn default() -> Self {
        LightState {
            position: Vec4::new(-208.0, 17.7, -173.0, 1.0),
            ambient: Vec4::new(0.0, 0.0, 0.0, 1.0),
            diffuse: Vec4::ONE,
            specular: Vec4::ONE,
        }
    }
}
