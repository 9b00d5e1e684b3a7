use crate::config::{TessellationConfig, WheelConfig};
use crate::controls::control_for_key;
use crate::graphics::{render_scene, Framebuffer, RenderContext, CLEAR_COLOR};
use crate::rotation::Motion;
use crate::state::{AppState, Response};
use crate::wheel::build_ferris_wheel;
use crossterm::cursor::MoveTo;
use crossterm::event::Event;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use std::time::Instant;
use tracing::{debug, trace};

/// Terminal rows kept for the control panel below the image
pub const PANEL_ROWS: u16 = 2;

/// Glyph whose foreground paints the top pixel and background the bottom one
const HALF_BLOCK: char = '\u{2580}';

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb { r, g, b }
}

/// Ferris wheel view filling the terminal
pub struct WheelWidget {
    wheel: WheelConfig,
    tessellation: TessellationConfig,
    framebuffer: Framebuffer,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
    /// Pending redraw; several requests before a frame collapse into one
    needs_paint: bool,
    columns: u16,
    rows: u16,
}

impl WheelWidget {
    pub fn new(wheel: WheelConfig, tessellation: TessellationConfig) -> Self {
        WheelWidget {
            wheel,
            tessellation,
            framebuffer: Framebuffer::new(0, 0),
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
            needs_paint: true,
            columns: 0,
            rows: 0,
        }
    }

    pub fn request_paint(&mut self) {
        self.needs_paint = true;
    }

    #[cfg(test)]
    pub fn needs_paint(&self) -> bool {
        self.needs_paint
    }

    #[cfg(test)]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Sizes the framebuffer to a terminal of `columns` × `rows` cells and
    /// updates the projection aspect ratio
    pub fn layout(&mut self, columns: u16, rows: u16, data: &mut AppState) {
        self.columns = columns;
        self.rows = rows;
        let width = columns as usize;
        let height = rows.saturating_sub(PANEL_ROWS) as usize * 2;
        self.framebuffer.resize(width, height);
        data.camera.resize(width, height);
        debug!(columns, rows, width, height, "layout");
        self.request_paint();
    }

    /// Handles an input event. Returns `Quit` when the user asked to leave.
    pub fn event(&mut self, event: &Event, data: &mut AppState) -> Option<Response> {
        match event {
            Event::Key(key) => {
                let control = control_for_key(*key)?;
                let response = data.apply(control);
                if response == Response::Redraw {
                    self.request_paint();
                }
                Some(response)
            }
            Event::Resize(columns, rows) => {
                self.layout(*columns, *rows, data);
                Some(Response::Redraw)
            }
            _ => None,
        }
    }

    /// Advances the wheel by one frame
    pub fn tick(&mut self, data: &mut AppState) {
        if data.rotation.is_enabled() {
            data.rotation.tick();
            self.request_paint();
        }
    }

    /// Builds and rasterizes the current frame without presenting it
    pub fn render(&mut self, data: &AppState) {
        let scene = build_ferris_wheel(&self.wheel, data.rotation.applied_angle());
        let commands = scene.flatten();
        let context = RenderContext {
            camera: &data.camera,
            light: &data.light,
            tessellation: &self.tessellation,
            wireframe: data.wireframe,
        };
        render_scene(&mut self.framebuffer, &commands, &context);
        trace!(draws = commands.len(), "rendered frame");
    }

    /// Renders and presents the frame if a redraw is pending
    pub fn paint<W: Write>(&mut self, out: &mut W, data: &AppState) -> io::Result<()> {
        if !self.needs_paint {
            return Ok(());
        }
        self.needs_paint = false;

        // Update FPS calculation
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        self.render(data);
        self.present(out)?;
        self.paint_panel(out, data)?;
        if data.debug {
            self.paint_debug(out, data)?;
        }
        queue!(out, ResetColor)?;
        out.flush()
    }

    fn present<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let width = self.framebuffer.width();
        let height = self.framebuffer.height();
        for row in 0..height / 2 {
            queue!(out, MoveTo(0, row as u16))?;
            let mut current = None;
            for x in 0..width {
                let top = self.framebuffer.pixel(x, row * 2);
                let bottom = if row * 2 + 1 < height {
                    self.framebuffer.pixel(x, row * 2 + 1)
                } else {
                    CLEAR_COLOR
                };
                if current != Some((top, bottom)) {
                    queue!(out, SetForegroundColor(rgb(top)), SetBackgroundColor(rgb(bottom)))?;
                    current = Some((top, bottom));
                }
                queue!(out, Print(HALF_BLOCK))?;
            }
        }
        Ok(())
    }

    fn paint_panel<W: Write>(&self, out: &mut W, data: &AppState) -> io::Result<()> {
        let top = self.rows.saturating_sub(PANEL_ROWS);
        let motion = match data.rotation.motion() {
            Motion::Stopped => "stopped",
            Motion::RunningClockwise => "clockwise",
            Motion::RunningCounterClockwise => "counterclockwise",
        };
        let eye = data.camera.eye();
        let light = data.light.position3();
        let status = format!(
            " speed {} | {} | eye ({:.1}, {:.1}, {:.1}) | light ({:.1}, {:.1}, {:.1}) | [{}] {:.1}",
            data.speed.label(),
            motion,
            eye.x,
            eye.y,
            eye.z,
            light.x,
            light.y,
            light.z,
            data.selected.label(),
            data.field_value(data.selected),
        );
        let help = " 0-4 speed  c/v direction  tab field  up/down pgup/pgdn adjust  w wireframe  d debug  r reset  q quit";
        queue!(
            out,
            ResetColor,
            MoveTo(0, top),
            Print(truncate(&status, self.columns)),
            Clear(ClearType::UntilNewLine),
            MoveTo(0, top + 1),
            Print(truncate(help, self.columns)),
            Clear(ClearType::UntilNewLine),
        )
    }

    fn paint_debug<W: Write>(&self, out: &mut W, data: &AppState) -> io::Result<()> {
        let light = data.light.position3();
        let lines = [
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!("Angle: {:.2}", data.rotation.angle()),
            format!("Light: ({:.2}, {:.2}, {:.2})", light.x, light.y, light.z),
            format!("FPS: {:.2}", self.fps),
        ];
        queue!(out, SetForegroundColor(Color::Black), SetBackgroundColor(Color::White))?;
        for (row, line) in lines.iter().enumerate() {
            queue!(out, MoveTo(1, row as u16), Print(truncate(line, self.columns)))?;
        }
        Ok(())
    }
}

fn truncate(text: &str, columns: u16) -> String {
    text.chars().take(columns as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::Speed;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn widget() -> (WheelWidget, AppState) {
        let mut state = AppState::default();
        let mut widget = WheelWidget::new(WheelConfig::default(), TessellationConfig::default());
        widget.layout(40, 22, &mut state);
        (widget, state)
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn layout_reserves_the_panel() {
        let (widget, state) = widget();
        assert_eq!(widget.framebuffer().width(), 40);
        assert_eq!(widget.framebuffer().height(), 40);
        assert_eq!(state.camera.aspect(), 1.0);
    }

    #[test]
    fn redraw_requests_collapse_into_one_frame() {
        let (mut widget, state) = widget();
        widget.request_paint();
        widget.request_paint();
        let mut out = Vec::new();
        widget.paint(&mut out, &state).unwrap();
        assert!(!out.is_empty());
        assert!(!widget.needs_paint());
        let mut second = Vec::new();
        widget.paint(&mut second, &state).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn ticking_only_redraws_while_spinning() {
        let (mut widget, mut state) = widget();
        widget.paint(&mut Vec::new(), &state).unwrap();
        widget.tick(&mut state);
        assert!(!widget.needs_paint());
        assert_eq!(widget.event(&key('4'), &mut state), Some(Response::Redraw));
        assert_eq!(state.speed, Speed::Four);
        widget.paint(&mut Vec::new(), &state).unwrap();
        assert_eq!(state.rotation.angle(), 3.0);
        widget.tick(&mut state);
        assert!(widget.needs_paint());
        assert_eq!(state.rotation.angle(), 6.0);
    }

    #[test]
    fn quit_key_is_reported() {
        let (mut widget, mut state) = widget();
        assert_eq!(widget.event(&key('q'), &mut state), Some(Response::Quit));
        assert_eq!(widget.event(&key('#'), &mut state), None);
    }

    #[test]
    fn resize_event_relayouts() {
        let (mut widget, mut state) = widget();
        widget.event(&Event::Resize(60, 12), &mut state);
        assert_eq!(widget.framebuffer().width(), 60);
        assert_eq!(widget.framebuffer().height(), 20);
        assert_eq!(state.camera.aspect(), 3.0);
    }
}
