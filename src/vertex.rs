use glam::{Vec2, Vec3};

/// Vertex structure with world position, screen position, depth, and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub screen_position: Vec2,
    /// Normalized device depth, smaller is closer
    pub depth: f32,
    pub normal: Vec3,
}
