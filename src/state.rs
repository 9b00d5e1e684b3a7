use crate::camera::Camera;
use crate::controls::{Control, Field};
use crate::material::LightState;
use crate::rotation::{Direction, RotationState, Speed};
use tracing::debug;

/// What the frame loop must do after a control is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Redraw,
    Quit,
}

/// Application state
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    /// Spin of the wheel
    pub rotation: RotationState,
    /// Selected speed, shown in the panel
    pub speed: Speed,
    /// Viewer position and projection
    pub camera: Camera,
    /// Light position in world space
    pub light: LightState,
    /// Spinner field the arrow keys adjust
    pub selected: Field,
    /// Enable debug overlay
    pub debug: bool,
    /// Wireframe mode enabled
    pub wireframe: bool,
}

impl AppState {
    pub fn field_value(&self, field: Field) -> f32 {
        match field {
            Field::EyeX => self.camera.eye().x,
            Field::EyeY => self.camera.eye().y,
            Field::EyeZ => self.camera.eye().z,
            Field::LightX => self.light.position().x,
            Field::LightY => self.light.position().y,
            Field::LightZ => self.light.position().z,
        }
    }

    /// Stores a spinner value, clamped to the coordinate limits
    pub fn set_field(&mut self, field: Field, value: f32) {
        match field {
            Field::EyeX => self.camera.set_eye_axis(0, value),
            Field::EyeY => self.camera.set_eye_axis(1, value),
            Field::EyeZ => self.camera.set_eye_axis(2, value),
            Field::LightX => self.light.set_axis(0, value),
            Field::LightY => self.light.set_axis(1, value),
            Field::LightZ => self.light.set_axis(2, value),
        }
    }

    /// Selecting a speed or direction advances the wheel one step at once
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
        self.rotation.set_speed(speed);
        self.rotation.tick();
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.rotation.set_direction(direction);
        self.rotation.tick();
    }

    /// Restores the initial view, light and spin while keeping display toggles
    pub fn reset(&mut self) {
        let aspect = self.camera.aspect();
        *self = AppState {
            debug: self.debug,
            selected: self.selected,
            ..AppState::default()
        };
        // aspect belongs to the surface, not the view
        self.camera.set_aspect(aspect);
    }

    pub fn apply(&mut self, control: Control) -> Response {
        debug!(?control, "applying control");
        match control {
            Control::SetSpeed(speed) => self.set_speed(speed),
            Control::SetDirection(direction) => self.set_direction(direction),
            Control::SelectNext => self.selected = self.selected.next(),
            Control::SelectPrevious => self.selected = self.selected.previous(),
            Control::Nudge(delta) => {
                let value = self.field_value(self.selected) + delta;
                self.set_field(self.selected, value);
            }
            Control::ToggleDebug => self.debug = !self.debug,
            Control::ToggleWireframe => self.wireframe = !self.wireframe,
            Control::Reset => self.reset(),
            Control::Quit => return Response::Quit,
        }
        Response::Redraw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::Motion;

    #[test]
    fn setters_clamp_to_panel_limits() {
        let mut state = AppState::default();
        state.set_field(Field::EyeX, 10000.0);
        assert_eq!(state.field_value(Field::EyeX), 750.0);
        state.set_field(Field::EyeX, -10000.0);
        assert_eq!(state.field_value(Field::EyeX), -750.0);
        state.set_field(Field::LightZ, 10000.0);
        assert_eq!(state.field_value(Field::LightZ), 750.0);
        state.set_field(Field::LightY, -10000.0);
        assert_eq!(state.field_value(Field::LightY), -750.0);
    }

    #[test]
    fn nudging_adjusts_the_selected_field() {
        let mut state = AppState::default();
        state.apply(Control::SelectNext);
        assert_eq!(state.selected, Field::EyeY);
        assert_eq!(state.apply(Control::Nudge(10.0)), Response::Redraw);
        assert_eq!(state.field_value(Field::EyeY), 42.0);
        for _ in 0..100 {
            state.apply(Control::Nudge(10.0));
        }
        assert_eq!(state.field_value(Field::EyeY), 750.0);
    }

    #[test]
    fn speed_and_direction_drive_the_rotation() {
        let mut state = AppState::default();
        assert_eq!(state.rotation.motion(), Motion::Stopped);
        state.apply(Control::SetSpeed(Speed::Two));
        state.apply(Control::SetDirection(Direction::CounterClockwise));
        assert_eq!(state.rotation.motion(), Motion::RunningCounterClockwise);
        state.rotation.tick();
        assert_eq!(state.rotation.angle(), -0.5);
        state.apply(Control::SetSpeed(Speed::Off));
        assert_eq!(state.rotation.motion(), Motion::Stopped);
        assert_eq!(state.rotation.angle(), -0.5);
    }

    #[test]
    fn selections_step_the_wheel_immediately() {
        let mut state = AppState::default();
        state.apply(Control::SetSpeed(Speed::Four));
        assert_eq!(state.rotation.angle(), 3.0);
        state.apply(Control::SetDirection(Direction::CounterClockwise));
        assert_eq!(state.rotation.angle(), 0.0);
        state.apply(Control::SetDirection(Direction::CounterClockwise));
        assert_eq!(state.rotation.angle(), -3.0);
    }

    #[test]
    fn reset_keeps_surface_aspect_and_debug() {
        let mut state = AppState::default();
        state.camera.resize(300, 100);
        state.debug = true;
        state.wireframe = true;
        state.set_field(Field::LightX, 5.0);
        state.apply(Control::SetSpeed(Speed::Four));
        state.rotation.tick();
        state.apply(Control::Reset);
        assert!(state.debug);
        assert!(!state.wireframe);
        assert_eq!(state.rotation.angle(), 0.0);
        assert_eq!(state.light, LightState::default());
        assert!((state.camera.aspect() - 3.0).abs() < 1e-3);
    }

    #[test]
    fn quit_is_reported() {
        let mut state = AppState::default();
        assert_eq!(state.apply(Control::Quit), Response::Quit);
    }
}
