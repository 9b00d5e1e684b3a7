//! A hierarchically modelled ferris wheel rendered into the terminal.
//!
//! [`wheel`] builds the frame's transform tree from a [`config::WheelConfig`]
//! and the wheel's spin, [`graphics`] rasterizes it with per-pixel lighting,
//! and [`widget`] presents the result and routes keyboard controls into
//! [`state::AppState`].

pub mod camera;
pub mod config;
pub mod controls;
pub mod graphics;
pub mod material;
pub mod math;
pub mod mesh;
pub mod rotation;
pub mod scene;
pub mod state;
pub mod vertex;
pub mod wheel;
pub mod widget;
