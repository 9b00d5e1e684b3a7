//! Explicit transform hierarchy for one frame.
//!
//! A [`SceneBuilder`] records translate/rotate/scale steps, material changes
//! and primitive draws into a tree of [`SceneNode`]s. A transform affects
//! every later sibling in the same group; a group restores the matrix it was
//! opened with when it ends. [`Scene::flatten`] walks the tree and yields the
//! world matrix of every primitive in submission order.

use crate::material::MaterialPreset;
use glam::{Mat4, Vec3};

/// Local transform step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate(Vec3),
    /// Rotation in degrees around an axis that need not be normalized
    Rotate { degrees: f32, axis: Vec3 },
    Scale(Vec3),
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Transform::Translate(offset) => Mat4::from_translation(offset),
            Transform::Rotate { degrees, axis } => {
                let axis = axis.normalize_or_zero();
                if axis == Vec3::ZERO {
                    Mat4::IDENTITY
                } else {
                    Mat4::from_axis_angle(axis, degrees.to_radians())
                }
            }
            Transform::Scale(factor) => Mat4::from_scale(factor),
        }
    }
}

/// Solid shapes the wheel is built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Unit cube centred on the origin
    Cube,
    /// Tube of radius `inner_radius` swept around +Z at `outer_radius`
    Torus { inner_radius: f32, outer_radius: f32 },
    /// Open tube along +Z from the origin to `height`
    Cylinder {
        base_radius: f32,
        top_radius: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Transform(Transform),
    Draw {
        primitive: Primitive,
        material: MaterialPreset,
    },
    Group(Vec<SceneNode>),
}

/// A primitive placed in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub world: Mat4,
    pub primitive: Primitive,
    pub material: MaterialPreset,
}

/// Root of a frame's hierarchy
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn flatten(&self) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        flatten_into(&self.nodes, Mat4::IDENTITY, &mut out);
        out
    }

    /// Number of primitives in the tree
    pub fn draw_count(&self) -> usize {
        fn count(nodes: &[SceneNode]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    SceneNode::Draw { .. } => 1,
                    SceneNode::Group(children) => count(children),
                    SceneNode::Transform(_) => 0,
                })
                .sum()
        }
        count(&self.nodes)
    }
}

fn flatten_into(nodes: &[SceneNode], parent: Mat4, out: &mut Vec<DrawCommand>) {
    let mut current = parent;
    for node in nodes {
        match node {
            SceneNode::Transform(transform) => current *= transform.matrix(),
            SceneNode::Draw {
                primitive,
                material,
            } => out.push(DrawCommand {
                world: current,
                primitive: *primitive,
                material: *material,
            }),
            SceneNode::Group(children) => flatten_into(children, current, out),
        }
    }
}

/// Records a scene with push/pop scoping.
///
/// The current material is not part of the scope: like a renderer's global
/// state it stays in effect after a group closes.
pub struct SceneBuilder {
    stack: Vec<Vec<SceneNode>>,
    material: MaterialPreset,
}

impl SceneBuilder {
    pub fn new() -> Self {
        SceneBuilder {
            stack: vec![Vec::new()],
            material: MaterialPreset::default(),
        }
    }

    fn push_node(&mut self, node: SceneNode) {
        if let Some(top) = self.stack.last_mut() {
            top.push(node);
        }
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.push_node(SceneNode::Transform(Transform::Translate(Vec3::new(x, y, z))));
        self
    }

    pub fn rotate(&mut self, degrees: f32, x: f32, y: f32, z: f32) -> &mut Self {
        self.push_node(SceneNode::Transform(Transform::Rotate {
            degrees,
            axis: Vec3::new(x, y, z),
        }));
        self
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.push_node(SceneNode::Transform(Transform::Scale(Vec3::new(x, y, z))));
        self
    }

    pub fn set_material(&mut self, material: MaterialPreset) -> &mut Self {
        self.material = material;
        self
    }

    pub fn draw(&mut self, primitive: Primitive) -> &mut Self {
        let material = self.material;
        self.push_node(SceneNode::Draw {
            primitive,
            material,
        });
        self
    }

    /// Runs `f` inside a nested group. Transforms recorded by `f` are undone
    /// once it returns.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.stack.push(Vec::new());
        let result = f(self);
        let children = self.stack.pop().unwrap_or_default();
        self.push_node(SceneNode::Group(children));
        result
    }

    pub fn finish(mut self) -> Scene {
        Scene {
            nodes: self.stack.pop().unwrap_or_default(),
        }
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(command: &DrawCommand) -> Vec3 {
        command.world.transform_point3(Vec3::ZERO)
    }

    #[test]
    fn siblings_do_not_see_each_other() {
        let mut builder = SceneBuilder::new();
        builder.scoped(|b| {
            b.translate(5.0, 0.0, 0.0).draw(Primitive::Cube);
        });
        builder.draw(Primitive::Cube);
        let commands = builder.finish().flatten();
        assert_eq!(position(&commands[0]), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(position(&commands[1]), Vec3::ZERO);
    }

    #[test]
    fn transforms_accumulate_within_a_group() {
        let mut builder = SceneBuilder::new();
        builder.translate(1.0, 0.0, 0.0).draw(Primitive::Cube);
        builder.translate(1.0, 0.0, 0.0).draw(Primitive::Cube);
        let commands = builder.finish().flatten();
        assert_eq!(position(&commands[1]), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn transforms_compose_in_local_order() {
        let mut builder = SceneBuilder::new();
        builder.rotate(90.0, 0.0, 0.0, 1.0).translate(1.0, 0.0, 0.0);
        builder.draw(Primitive::Cube);
        let commands = builder.finish().flatten();
        assert!((position(&commands[0]) - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn material_survives_scope_exit() {
        let mut builder = SceneBuilder::new();
        builder.scoped(|b| {
            b.set_material(MaterialPreset::BlackPlastic);
        });
        builder.draw(Primitive::Cube);
        let commands = builder.finish().flatten();
        assert_eq!(commands[0].material, MaterialPreset::BlackPlastic);
    }

    #[test]
    fn zero_axis_rotation_is_identity() {
        let rotate = Transform::Rotate {
            degrees: 45.0,
            axis: Vec3::ZERO,
        };
        assert_eq!(rotate.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn draw_count_walks_groups() {
        let mut builder = SceneBuilder::new();
        builder.draw(Primitive::Cube);
        builder.scoped(|b| {
            b.draw(Primitive::Cube);
            b.scoped(|b| {
                b.draw(Primitive::Cube);
            });
        });
        let scene = builder.finish();
        assert_eq!(scene.draw_count(), 3);
        assert_eq!(scene.flatten().len(), 3);
    }
}
