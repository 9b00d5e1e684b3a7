use clap::Parser;
use glam::Vec3;
use std::path::PathBuf;
use thiserror::Error;

/// Largest chair count whose spoke step is still a whole, non-zero angle
pub const MAX_CHAIRS: u32 = 360;

/// Largest wheel radius; keeps the rim inside the range the eye can reach
pub const MAX_RADIUS: f32 = 500.0;

/// Finest segment count accepted for any tessellated primitive
pub const MAX_SEGMENTS: u32 = 256;

/// Errors raised while validating the startup configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("wheel radius must be a positive finite number, got {0}")]
    InvalidRadius(f32),
    #[error("wheel radius {0} exceeds the maximum of {max}", max = MAX_RADIUS)]
    RadiusTooLarge(f32),
    #[error("ring separation must be a positive finite number, got {0}")]
    InvalidSeparation(f32),
    #[error("chair count must be a positive multiple of 9, got {0}")]
    ChairCountNotMultipleOfNine(u32),
    #[error("chair count {0} exceeds the maximum of {max}", max = MAX_CHAIRS)]
    TooManyChairs(u32),
    #[error("frame rate must be at least 1")]
    ZeroFrameRate,
    #[error("{name} must be at least 3, got {value}")]
    TessellationTooCoarse { name: &'static str, value: u32 },
    #[error("{name} must be at most {max}, got {value}", max = MAX_SEGMENTS)]
    TessellationTooFine { name: &'static str, value: u32 },
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Radius of each wheel ring
    #[arg(long, default_value_t = 40.0)]
    pub radius: f32,
    /// Number of chairs hung around the rim (multiple of 9)
    #[arg(long, default_value_t = 18)]
    pub chairs: u32,
    /// Distance between the front and back wheel rings
    #[arg(long, default_value_t = 4.4)]
    pub ring_separation: f32,
    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    pub frame_rate: u32,
    /// Segments around a torus tube
    #[arg(long, default_value_t = 6)]
    pub torus_sides: u32,
    /// Segments around a torus ring
    #[arg(long, default_value_t = 48)]
    pub torus_rings: u32,
    /// Segments around a cylinder
    #[arg(long, default_value_t = 6)]
    pub cylinder_slices: u32,
    /// Write tracing output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Dimensions of a single chair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChairDimensions {
    pub width: f32,
    pub length: f32,
    pub height: f32,
    pub thickness: f32,
}

impl Default for ChairDimensions {
    fn default() -> Self {
        ChairDimensions {
            width: 4.4,
            length: 2.0,
            height: 2.5,
            thickness: 0.4,
        }
    }
}

/// Fixed shape of the ferris wheel for the lifetime of the program
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelConfig {
    radius: f32,
    chair_count: u32,
    ring_separation: f32,
    position: Vec3,
    chair: ChairDimensions,
}

impl WheelConfig {
    /// Validates the parameters and builds a config at the default position
    pub fn new(radius: f32, chair_count: u32, ring_separation: f32) -> Result<Self, ConfigError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(radius));
        }
        if radius > MAX_RADIUS {
            return Err(ConfigError::RadiusTooLarge(radius));
        }
        if !ring_separation.is_finite() || ring_separation <= 0.0 {
            return Err(ConfigError::InvalidSeparation(ring_separation));
        }
        if chair_count == 0 || chair_count % 9 != 0 {
            return Err(ConfigError::ChairCountNotMultipleOfNine(chair_count));
        }
        if chair_count > MAX_CHAIRS {
            return Err(ConfigError::TooManyChairs(chair_count));
        }
        Ok(WheelConfig {
            radius,
            chair_count,
            ring_separation,
            position: Vec3::new(0.0, 2.0, 0.0),
            chair: ChairDimensions::default(),
        })
    }

    #[cfg(test)]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_chair(mut self, chair: ChairDimensions) -> Self {
        self.chair = chair;
        self
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn chair_count(&self) -> u32 {
        self.chair_count
    }

    pub fn ring_separation(&self) -> f32 {
        self.ring_separation
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn chair(&self) -> ChairDimensions {
        self.chair
    }

    /// Number of pie-slice sectors the spokes are tiled into
    pub fn sector_count(&self) -> u32 {
        self.chair_count / 3
    }

    /// Repeats of the finer spoke pattern inside one sector
    pub fn secondary_spokes_per_sector(&self) -> u32 {
        self.chair_count / 9
    }

    /// Angle between two sectors, truncated to whole degrees
    pub fn sector_angle(&self) -> u32 {
        360 / self.sector_count()
    }

    /// Angle between the finer spokes inside a sector, truncated to whole degrees
    pub fn spoke_step_angle(&self) -> u32 {
        self.sector_angle() / 3
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        WheelConfig {
            radius: 40.0,
            chair_count: 18,
            ring_separation: 4.4,
            position: Vec3::new(0.0, 2.0, 0.0),
            chair: ChairDimensions::default(),
        }
    }
}

/// Segment counts used when turning primitives into triangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationConfig {
    pub torus_sides: u32,
    pub torus_rings: u32,
    pub cylinder_slices: u32,
}

impl TessellationConfig {
    pub fn new(torus_sides: u32, torus_rings: u32, cylinder_slices: u32) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("torus sides", torus_sides),
            ("torus rings", torus_rings),
            ("cylinder slices", cylinder_slices),
        ] {
            if value < 3 {
                return Err(ConfigError::TessellationTooCoarse { name, value });
            }
            if value > MAX_SEGMENTS {
                return Err(ConfigError::TessellationTooFine { name, value });
            }
        }
        Ok(TessellationConfig {
            torus_sides,
            torus_rings,
            cylinder_slices,
        })
    }
}

impl Default for TessellationConfig {
    fn default() -> Self {
        TessellationConfig {
            torus_sides: 6,
            torus_rings: 48,
            cylinder_slices: 6,
        }
    }
}

/// Fully validated startup configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub wheel: WheelConfig,
    pub tessellation: TessellationConfig,
    pub frame_rate: u32,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        if args.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(Config {
            // chairs span the gap between the two rings
            wheel: WheelConfig::new(args.radius, args.chairs, args.ring_separation)?.with_chair(
                ChairDimensions {
                    width: args.ring_separation,
                    ..ChairDimensions::default()
                },
            ),
            tessellation: TessellationConfig::new(
                args.torus_sides,
                args.torus_rings,
                args.cylinder_slices,
            )?,
            frame_rate: args.frame_rate,
            log_file: args.log_file,
        })
    }

    /// Time between two ticks of the frame loop
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(u64::from(1000 / self.frame_rate).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["ferris-wheel"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn defaults_match_the_classic_wheel() {
        let config = Config::from_args(parse(&[])).unwrap();
        assert_eq!(config.wheel, WheelConfig::default());
        assert_eq!(config.wheel.sector_count(), 6);
        assert_eq!(config.wheel.secondary_spokes_per_sector(), 2);
        assert_eq!(config.wheel.sector_angle(), 60);
        assert_eq!(config.wheel.spoke_step_angle(), 20);
        assert_eq!(config.frame_interval().as_millis(), 16);
    }

    #[test]
    fn chair_count_must_be_multiple_of_nine() {
        assert_eq!(
            WheelConfig::new(40.0, 12, 4.4),
            Err(ConfigError::ChairCountNotMultipleOfNine(12))
        );
        assert_eq!(
            WheelConfig::new(40.0, 0, 4.4),
            Err(ConfigError::ChairCountNotMultipleOfNine(0))
        );
        assert_eq!(
            WheelConfig::new(40.0, 369, 4.4),
            Err(ConfigError::TooManyChairs(369))
        );
        assert!(WheelConfig::new(40.0, 27, 4.4).is_ok());
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(
            WheelConfig::new(-1.0, 18, 4.4),
            Err(ConfigError::InvalidRadius(-1.0))
        );
        assert!(matches!(
            WheelConfig::new(f32::NAN, 18, 4.4),
            Err(ConfigError::InvalidRadius(_))
        ));
        assert_eq!(
            WheelConfig::new(40.0, 18, 0.0),
            Err(ConfigError::InvalidSeparation(0.0))
        );
    }

    #[test]
    fn rejects_zero_frame_rate_and_coarse_meshes() {
        assert_eq!(
            Config::from_args(parse(&["--frame-rate", "0"])),
            Err(ConfigError::ZeroFrameRate)
        );
        assert_eq!(
            Config::from_args(parse(&["--cylinder-slices", "2"])),
            Err(ConfigError::TessellationTooCoarse {
                name: "cylinder slices",
                value: 2
            })
        );
    }

    #[test]
    fn rejects_oversized_wheels_and_meshes() {
        assert_eq!(
            WheelConfig::new(1.0e7, 18, 4.4),
            Err(ConfigError::RadiusTooLarge(1.0e7))
        );
        assert!(WheelConfig::new(MAX_RADIUS, 18, 4.4).is_ok());
        assert_eq!(
            Config::from_args(parse(&["--torus-rings", "100000"])),
            Err(ConfigError::TessellationTooFine {
                name: "torus rings",
                value: 100000
            })
        );
        assert!(TessellationConfig::new(MAX_SEGMENTS, MAX_SEGMENTS, MAX_SEGMENTS).is_ok());
    }

    #[test]
    fn chairs_span_the_ring_separation() {
        let config = Config::from_args(parse(&["--ring-separation", "6"])).unwrap();
        assert_eq!(config.wheel.chair().width, 6.0);
        assert_eq!(config.wheel.chair().length, ChairDimensions::default().length);
    }

    #[test]
    fn cli_overrides_are_applied() {
        let config = Config::from_args(parse(&["--radius", "30", "--chairs", "27"])).unwrap();
        assert_eq!(config.wheel.radius(), 30.0);
        assert_eq!(config.wheel.chair_count(), 27);
        assert_eq!(config.wheel.sector_count(), 9);
        assert_eq!(config.wheel.spoke_step_angle(), 13);
    }
}
