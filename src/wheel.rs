//! Hierarchical model of the ferris wheel.
//!
//! Each frame the whole wheel is rebuilt from the [`WheelConfig`] and the
//! current spin. The rings and spokes of a wheel share one rotating frame; the
//! chairs are hung from a separate hub and counter-rotated so they stay level.

use crate::config::{ChairDimensions, WheelConfig};
use crate::material::MaterialPreset;
use crate::math::{truss_chords, Chord};
use crate::scene::{Primitive, Scene, SceneBuilder};
use glam::Vec3;
use tracing::trace;

/// Offset of the spoke structure in front of the wheel's hub
const HUB_DEPTH: f32 = 0.25;
/// Tube radius of the three structural rings
const RING_TUBE: f32 = 0.5;
/// Tube radius of the decorative rings
const TRIM_TUBE: f32 = 0.2;
/// Radius of a main spoke
const MAIN_SPOKE: f32 = 0.4;
/// Radius of every truss member
const THIN_SPOKE: f32 = 0.2;
/// Radial distance between two decorative rings
const TRIM_SPACING: usize = 3;

/// Where one chair hangs on the rim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChairPlacement {
    pub base_angle_deg: f32,
    pub applies_rotation: bool,
}

/// Evenly spaced chair positions, one per chair index
pub fn chair_placements(config: &WheelConfig, rotating: bool) -> Vec<ChairPlacement> {
    let count = config.chair_count();
    (0..count)
        .map(|i| ChairPlacement {
            base_angle_deg: (i * 360) as f32 / count as f32,
            applies_rotation: rotating,
        })
        .collect()
}

/// Solved truss for one wheel size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Truss {
    pub primary: Chord,
    pub secondary: Chord,
}

impl Truss {
    pub fn new(config: &WheelConfig) -> Self {
        let arm = 2.0 * config.radius() / 3.0;
        let alpha = 2.0 * config.spoke_step_angle() as f32 / 3.0;
        let (primary, secondary) = truss_chords(arm, alpha);
        Truss { primary, secondary }
    }
}

fn cylinder(radius: f32, height: f32) -> Primitive {
    Primitive::Cylinder {
        base_radius: radius,
        top_radius: radius,
        height,
    }
}

fn torus(tube: f32, radius: f32) -> Primitive {
    Primitive::Torus {
        inner_radius: tube,
        outer_radius: radius,
    }
}

/// Builds both wheels and every chair. `angle` is the wheel spin in
/// degrees, or `None` when the wheel is stopped.
pub fn build_ferris_wheel(config: &WheelConfig, angle: Option<f32>) -> Scene {
    let mut builder = SceneBuilder::new();
    let front = config.position();
    let back = front + Vec3::Z * config.ring_separation();
    build_wheel(&mut builder, config, front, angle);
    build_wheel(&mut builder, config, back, angle);
    build_chairs(&mut builder, config, angle);
    let scene = builder.finish();
    trace!(draws = scene.draw_count(), ?angle, "built ferris wheel");
    scene
}

/// Rings and spokes of a single wheel centred at `center`
pub fn build_wheel(builder: &mut SceneBuilder, config: &WheelConfig, center: Vec3, angle: Option<f32>) {
    let radius = config.radius();
    let truss = Truss::new(config);
    builder.scoped(|b| {
        b.translate(center.x, center.y, center.z);
        if let Some(theta) = angle {
            b.rotate(theta, 0.0, 0.0, 1.0);
        }
        b.translate(0.0, 0.0, HUB_DEPTH);
        b.scoped(|b| build_rings(b, radius));

        b.rotate(90.0, 90.0, 0.0, 1.0);
        let mut sector_angle = 0.0;
        for _ in 0..config.sector_count() {
            b.rotate(sector_angle, 0.0, sector_angle, 1.0);
            build_sector(b, config, &truss);
            sector_angle = config.sector_angle() as f32;
        }
    });
}

fn build_rings(b: &mut SceneBuilder, radius: f32) {
    b.set_material(MaterialPreset::DarkBrownPlastic);
    b.draw(torus(RING_TUBE, radius));
    b.draw(torus(RING_TUBE, 2.0 * radius / 3.0));
    b.draw(torus(RING_TUBE, radius / 3.0));

    // Trim rings across the outer third of the wheel
    let span = radius.trunc() as usize / 3;
    for step in (0..span).step_by(TRIM_SPACING) {
        if step % 2 == 1 {
            b.set_material(MaterialPreset::BlackPlastic);
        } else {
            b.set_material(MaterialPreset::LightBrownPlastic);
        }
        b.draw(torus(TRIM_TUBE, 2.0 * radius / 3.0 + step as f32));
    }
}

/// One pie slice: a main spoke, its truss, and the finer spokes that fan
/// out from it
fn build_sector(b: &mut SceneBuilder, config: &WheelConfig, truss: &Truss) {
    let radius = config.radius();
    b.set_material(MaterialPreset::DarkBrownPlastic);
    b.draw(cylinder(MAIN_SPOKE, radius));
    b.scoped(|b| {
        b.scoped(|b| build_truss(b, radius, truss, true));
        let step = config.spoke_step_angle() as f32;
        for _ in 0..config.secondary_spokes_per_sector() {
            b.rotate(step, 0.0, step, 1.0);
            b.draw(cylinder(THIN_SPOKE, 2.0 * radius / 3.0));
            build_truss(b, radius, truss, false);
        }
    });
}

/// Six truss members mirrored about the current spoke. When
/// `contrast_supports` is set the support spokes are drawn dark brown and the
/// material is left light brown afterwards.
fn build_truss(b: &mut SceneBuilder, radius: f32, truss: &Truss, contrast_supports: bool) {
    let Truss { primary, secondary } = *truss;
    let mirrored = [
        (primary.angle_deg, secondary.angle_deg),
        (360.0 - primary.angle_deg, 360.0 - secondary.angle_deg),
    ];
    for (chord_angle, support_angle) in mirrored {
        b.scoped(|b| {
            b.translate(0.0, 0.0, radius / 3.0)
                .rotate(chord_angle, 0.0, chord_angle, 1.0)
                .draw(cylinder(THIN_SPOKE, primary.length));
        });
        b.scoped(|b| {
            if contrast_supports {
                b.set_material(MaterialPreset::DarkBrownPlastic);
            }
            b.rotate(support_angle, 0.0, support_angle, 1.0)
                .draw(cylinder(THIN_SPOKE, 2.0 * radius / 3.0));
            if contrast_supports {
                b.set_material(MaterialPreset::LightBrownPlastic);
            }
        });
        b.scoped(|b| {
            b.translate(0.0, 0.0, radius / 2.0)
                .rotate(support_angle, 0.0, support_angle, 1.0)
                .draw(cylinder(THIN_SPOKE, secondary.length));
        });
    }
}

fn build_chairs(builder: &mut SceneBuilder, config: &WheelConfig, angle: Option<f32>) {
    let hub = config.position() / 2.0;
    let radius = config.radius();
    builder.scoped(|b| {
        b.translate(hub.x, hub.y, 0.0);
        b.set_material(MaterialPreset::RedPlastic);
        for placement in chair_placements(config, angle.is_some()) {
            let base = placement.base_angle_deg;
            b.scoped(|b| {
                match angle {
                    Some(theta) if placement.applies_rotation => b.rotate(theta + base, 0.0, 0.0, 1.0),
                    _ => b.rotate(base, 0.0, 0.0, 1.0),
                };
                let counter = angle.filter(|_| placement.applies_rotation);
                build_chair(b, config.chair(), -base, Vec3::new(0.0, radius, 0.0), counter);
            });
        }
    });
}

/// A seat and a backrest hanging at `offset`, turned by `-theta` to cancel
/// the wheel's spin
fn build_chair(
    builder: &mut SceneBuilder,
    chair: ChairDimensions,
    chair_angle: f32,
    offset: Vec3,
    theta: Option<f32>,
) {
    let ChairDimensions {
        width,
        length,
        height,
        thickness,
    } = chair;
    builder.scoped(|b| {
        b.translate(offset.x, offset.y, offset.z);
        b.rotate(chair_angle, 0.0, 0.0, 1.0);
        if let Some(theta) = theta {
            b.rotate(-theta, 0.0, 0.0, 1.0);
        }
        // backrest
        b.scoped(|b| {
            b.translate(thickness / 4.0, -height / 2.0, width / 2.0)
                .scale(thickness, height, width)
                .draw(Primitive::Cube);
        });
        // seat
        b.scoped(|b| {
            b.translate(length / 2.0 - thickness / 4.0, thickness / 2.0 - height, width / 2.0)
                .scale(length, thickness, width)
                .draw(Primitive::Cube);
        });
    });
}
