//! Triangle meshes for the scene primitives.

use crate::config::TessellationConfig;
use crate::math::calculate_normal;
use crate::scene::Primitive;
use glam::Vec3;
use std::f32::consts::TAU;

/// Indexed triangle list with per-vertex normals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        self.positions.push(position);
        self.normals.push(normal);
        (self.positions.len() - 1) as u32
    }

    fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    #[cfg(test)]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over triangles as vertex index triples
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }
}

/// Unit cube centred on the origin
pub fn cube() -> Mesh {
    let corners = [
        Vec3::new(-0.5, -0.5, -0.5),
        Vec3::new(0.5, -0.5, -0.5),
        Vec3::new(0.5, 0.5, -0.5),
        Vec3::new(-0.5, 0.5, -0.5),
        Vec3::new(-0.5, -0.5, 0.5),
        Vec3::new(0.5, -0.5, 0.5),
        Vec3::new(0.5, 0.5, 0.5),
        Vec3::new(-0.5, 0.5, 0.5),
    ];
    let faces = [
        [3, 2, 1, 0],
        [4, 5, 6, 7],
        [0, 4, 7, 3],
        [1, 2, 6, 5],
        [0, 1, 5, 4],
        [3, 7, 6, 2],
    ];

    let mut mesh = Mesh::default();
    for [a, b, c, d] in faces {
        let normal = calculate_normal(corners[a], corners[b], corners[c]);
        let ia = mesh.add_vertex(corners[a], normal);
        let ib = mesh.add_vertex(corners[b], normal);
        let ic = mesh.add_vertex(corners[c], normal);
        let id = mesh.add_vertex(corners[d], normal);
        mesh.add_quad(ia, ib, ic, id);
    }
    mesh
}

/// Torus lying in the XY plane around the Z axis
pub fn torus(inner_radius: f32, outer_radius: f32, sides: u32, rings: u32) -> Mesh {
    let mut mesh = Mesh::default();
    for i in 0..rings {
        let theta = i as f32 / rings as f32 * TAU;
        let (sin_t, cos_t) = theta.sin_cos();
        for j in 0..sides {
            let phi = j as f32 / sides as f32 * TAU;
            let (sin_p, cos_p) = phi.sin_cos();
            let normal = Vec3::new(cos_p * cos_t, cos_p * sin_t, sin_p);
            let ring = outer_radius + inner_radius * cos_p;
            let position = Vec3::new(ring * cos_t, ring * sin_t, inner_radius * sin_p);
            mesh.add_vertex(position, normal);
        }
    }
    for i in 0..rings {
        let next_ring = (i + 1) % rings;
        for j in 0..sides {
            let next_side = (j + 1) % sides;
            mesh.add_quad(
                i * sides + j,
                next_ring * sides + j,
                next_ring * sides + next_side,
                i * sides + next_side,
            );
        }
    }
    mesh
}

/// Open tube along +Z from z = 0 to z = `height`
pub fn cylinder(base_radius: f32, top_radius: f32, height: f32, slices: u32) -> Mesh {
    let mut mesh = Mesh::default();
    let slope = if height.abs() > f32::EPSILON {
        (base_radius - top_radius) / height
    } else {
        0.0
    };
    for i in 0..slices {
        let angle = i as f32 / slices as f32 * TAU;
        let (sin_a, cos_a) = angle.sin_cos();
        let normal = Vec3::new(cos_a, sin_a, slope).normalize();
        mesh.add_vertex(Vec3::new(base_radius * cos_a, base_radius * sin_a, 0.0), normal);
        mesh.add_vertex(
            Vec3::new(top_radius * cos_a, top_radius * sin_a, height),
            normal,
        );
    }
    for i in 0..slices {
        let next = (i + 1) % slices;
        mesh.add_quad(2 * i, 2 * next, 2 * next + 1, 2 * i + 1);
    }
    mesh
}

/// Tessellates a scene primitive with the configured density
pub fn tessellate(primitive: &Primitive, tessellation: &TessellationConfig) -> Mesh {
    match *primitive {
        Primitive::Cube => cube(),
        Primitive::Torus {
            inner_radius,
            outer_radius,
        } => torus(
            inner_radius,
            outer_radius,
            tessellation.torus_sides,
            tessellation.torus_rings,
        ),
        Primitive::Cylinder {
            base_radius,
            top_radius,
            height,
        } => cylinder(base_radius, top_radius, height, tessellation.cylinder_slices),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_outward_normals() {
        let mesh = cube();
        assert_eq!(mesh.positions.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
            assert!(position.dot(*normal) > 0.0);
            assert!((normal.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn torus_vertices_sit_on_the_tube() {
        let mesh = torus(0.5, 10.0, 6, 24);
        assert_eq!(mesh.positions.len(), 6 * 24);
        assert_eq!(mesh.triangle_count(), 2 * 6 * 24);
        for (position, normal) in mesh.positions.iter().zip(&mesh.normals) {
            let axis_point = Vec3::new(position.x, position.y, 0.0).normalize() * 10.0;
            assert!(((*position - axis_point).length() - 0.5).abs() < 1e-4);
            assert!((*position - axis_point).normalize().dot(*normal) > 0.999);
        }
    }

    #[test]
    fn cylinder_spans_its_height() {
        let mesh = cylinder(0.2, 0.2, 14.0, 8);
        assert_eq!(mesh.triangle_count(), 16);
        let max_z = mesh.positions.iter().map(|p| p.z).fold(f32::MIN, f32::max);
        let min_z = mesh.positions.iter().map(|p| p.z).fold(f32::MAX, f32::min);
        assert_eq!((min_z, max_z), (0.0, 14.0));
        assert!(mesh.normals.iter().all(|n| n.z.abs() < 1e-6));
    }

    #[test]
    fn indices_stay_in_bounds() {
        let tessellation = TessellationConfig::default();
        for primitive in [
            Primitive::Cube,
            Primitive::Torus {
                inner_radius: 0.2,
                outer_radius: 30.0,
            },
            Primitive::Cylinder {
                base_radius: 0.4,
                top_radius: 0.4,
                height: 40.0,
            },
        ] {
            let mesh = tessellate(&primitive, &tessellation);
            assert!(mesh.triangles().flatten().all(|i| i < mesh.positions.len()));
        }
    }
}
