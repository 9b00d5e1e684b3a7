use crate::camera::Camera;
use crate::config::TessellationConfig;
use crate::material::{LightState, Material};
use crate::math::{edge_function, shade, to_rgb8};
use crate::mesh::tessellate;
use crate::scene::DrawCommand;
use crate::vertex::Vertex;
use glam::{Mat3, Vec2, Vec3};

/// Color written by `clear`
pub const CLEAR_COLOR: [u8; 3] = [255, 255, 255];

/// Color and depth surface the scene is rasterized into
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
    depth: Vec<f32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            pixels: vec![CLEAR_COLOR; width * height],
            depth: vec![f32::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != (self.width, self.height) {
            *self = Framebuffer::new(width, height);
        }
    }

    pub fn clear(&mut self, color: [u8; 3]) {
        self.pixels.fill(color);
        self.depth.fill(f32::INFINITY);
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels[y * self.width + x]
    }

    fn put(&mut self, x: usize, y: usize, color: [u8; 3]) {
        self.pixels[y * self.width + x] = color;
    }
}

/// Everything a draw call needs besides its geometry
pub struct RenderContext<'a> {
    pub camera: &'a Camera,
    pub light: &'a LightState,
    pub tessellation: &'a TessellationConfig,
    pub wireframe: bool,
}

/// Rasterizes the scene's draw commands in submission order
pub fn render_scene(framebuffer: &mut Framebuffer, commands: &[DrawCommand], context: &RenderContext) {
    framebuffer.clear(CLEAR_COLOR);
    let view_projection = context.camera.view_projection();
    let size = Vec2::new(framebuffer.width() as f32, framebuffer.height() as f32);

    for command in commands {
        let material = command.material.material();
        let mesh = tessellate(&command.primitive, context.tessellation);
        let normal_matrix = Mat3::from_mat4(command.world).inverse().transpose();

        let vertices: Vec<Option<Vertex>> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .map(|(&local, &normal)| {
                let position = command.world.transform_point3(local);
                let clip = view_projection * position.extend(1.0);
                if clip.w <= f32::EPSILON {
                    return None;
                }
                let ndc = clip.truncate() / clip.w;
                if !(-1.0..=1.0).contains(&ndc.z) {
                    return None;
                }
                Some(Vertex {
                    position,
                    screen_position: Vec2::new(
                        (ndc.x + 1.0) * 0.5 * size.x,
                        (1.0 - ndc.y) * 0.5 * size.y,
                    ),
                    depth: ndc.z,
                    normal: (normal_matrix * normal).normalize_or_zero(),
                })
            })
            .collect();

        for [a, b, c] in mesh.triangles() {
            let (Some(v0), Some(v1), Some(v2)) = (vertices[a], vertices[b], vertices[c]) else {
                continue;
            };
            if context.wireframe {
                let color = to_rgb8(material.diffuse.truncate());
                for (start, end) in [(v0, v1), (v1, v2), (v2, v0)] {
                    draw_line(start.screen_position, end.screen_position, framebuffer, color);
                }
            } else {
                draw_triangle(&v0, &v1, &v2, framebuffer, &material, context);
            }
        }
    }
}

/// Draws a triangle with per-pixel lighting
pub fn draw_triangle(
    v0: &Vertex,
    v1: &Vertex,
    v2: &Vertex,
    framebuffer: &mut Framebuffer,
    material: &Material,
    context: &RenderContext,
) {
    let width = framebuffer.width();
    let height = framebuffer.height();
    if width == 0 || height == 0 {
        return;
    }

    // Compute bounding box of the triangle
    let min = v0.screen_position.min(v1.screen_position).min(v2.screen_position);
    let max = v0.screen_position.max(v1.screen_position).max(v2.screen_position);
    if max.x < 0.0 || max.y < 0.0 || min.x >= width as f32 || min.y >= height as f32 {
        return;
    }
    let min_x = min.x.floor().max(0.0) as usize;
    let max_x = max.x.ceil().min(width as f32 - 1.0) as usize;
    let min_y = min.y.floor().max(0.0) as usize;
    let max_y = max.y.ceil().min(height as f32 - 1.0) as usize;

    // Precompute area of the triangle
    let area = edge_function(v0.screen_position, v1.screen_position, v2.screen_position);
    if area.abs() <= f32::EPSILON {
        return;
    }

    let eye = context.camera.eye();
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

            // Normalized barycentric coordinates, valid for either winding
            let w0 = edge_function(v1.screen_position, v2.screen_position, p) / area;
            let w1 = edge_function(v2.screen_position, v0.screen_position, p) / area;
            let w2 = edge_function(v0.screen_position, v1.screen_position, p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            // Depth test
            let depth = v0.depth * w0 + v1.depth * w1 + v2.depth * w2;
            let offset = y * width + x;
            if depth >= framebuffer.depth[offset] {
                continue;
            }
            framebuffer.depth[offset] = depth;

            let position = v0.position * w0 + v1.position * w1 + v2.position * w2;
            let normal: Vec3 = (v0.normal * w0 + v1.normal * w1 + v2.normal * w2).normalize_or_zero();
            let color = shade(material, context.light, normal, position, eye);
            framebuffer.put(x, y, to_rgb8(color));
        }
    }
}

/// Draws a line between two points in the pixel buffer using Bresenham's algorithm
pub fn draw_line(from: Vec2, to: Vec2, framebuffer: &mut Framebuffer, color: [u8; 3]) {
    let width = framebuffer.width() as isize;
    let height = framebuffer.height() as isize;
    let limit = 4.0 * (width + height).max(1) as f32;
    if from.abs().max_element() > limit || to.abs().max_element() > limit {
        return;
    }

    let (mut x0, mut y0, x1, y1) = (
        from.x.round() as isize,
        from.y.round() as isize,
        to.x.round() as isize,
        to.y.round() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        if x0 >= 0 && x0 < width && y0 >= 0 && y0 < height {
            framebuffer.put(x0 as usize, y0 as usize, color);
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
