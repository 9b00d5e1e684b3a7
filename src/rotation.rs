/// Direction the wheel turns in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

/// Coarse speed selector from the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    #[default]
    Off,
    One,
    Two,
    Three,
    Four,
}

impl Speed {
    pub const ALL: [Speed; 5] = [Speed::Off, Speed::One, Speed::Two, Speed::Three, Speed::Four];

    /// Degrees added to the wheel angle on every tick
    pub fn angular_step(self) -> f32 {
        match self {
            Speed::Off => 0.0,
            Speed::One => 0.1,
            Speed::Two => 0.5,
            Speed::Three => 1.0,
            Speed::Four => 3.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Speed::Off => "off",
            Speed::One => "1",
            Speed::Two => "2",
            Speed::Three => "3",
            Speed::Four => "4",
        }
    }
}

/// Observable phase of the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Stopped,
    RunningClockwise,
    RunningCounterClockwise,
}

/// Current spin of the wheel, advanced once per tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    angle: f32,
    direction: Direction,
    angular_step: f32,
    enabled: bool,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current wheel angle in degrees, kept strictly inside (-360, 360)
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Angle the geometry should be posed at, or `None` while stopped
    pub fn applied_angle(&self) -> Option<f32> {
        self.enabled.then_some(self.angle)
    }

    pub fn motion(&self) -> Motion {
        match (self.enabled, self.direction) {
            (false, _) => Motion::Stopped,
            (true, Direction::Clockwise) => Motion::RunningClockwise,
            (true, Direction::CounterClockwise) => Motion::RunningCounterClockwise,
        }
    }

    /// Selecting `Off` stops the wheel but keeps the angle it stopped at.
    pub fn set_speed(&mut self, speed: Speed) {
        self.enabled = speed != Speed::Off;
        self.angular_step = speed.angular_step();
    }

    /// Overrides the step with an arbitrary non-negative value in degrees
    #[cfg(test)]
    pub fn set_angular_step(&mut self, step: f32) {
        self.angular_step = step.max(0.0);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Advances the angle by one step. A full turn resets to zero rather
    /// than carrying the remainder over.
    pub fn tick(&mut self) {
        if !self.enabled {
            return;
        }
        match self.direction {
            Direction::CounterClockwise => {
                self.angle -= self.angular_step;
                if self.angle <= -360.0 {
                    self.angle = 0.0;
                }
            }
            Direction::Clockwise => {
                self.angle += self.angular_step;
                if self.angle >= 360.0 {
                    self.angle = 0.0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_table() {
        let steps: Vec<f32> = Speed::ALL.iter().map(|s| s.angular_step()).collect();
        assert_eq!(steps, vec![0.0, 0.1, 0.5, 1.0, 3.0]);
    }

    #[test]
    fn stopped_wheel_does_not_move() {
        let mut rotation = RotationState::new();
        rotation.set_angular_step(5.0);
        rotation.tick();
        assert_eq!(rotation.angle(), 0.0);
        assert_eq!(rotation.motion(), Motion::Stopped);
        assert_eq!(rotation.applied_angle(), None);
    }

    #[test]
    fn clockwise_wraps_to_zero() {
        let mut rotation = RotationState::new();
        rotation.set_speed(Speed::Four);
        for _ in 0..119 {
            rotation.tick();
        }
        assert!((rotation.angle() - 357.0).abs() < 1e-3);
        rotation.tick();
        assert_eq!(rotation.angle(), 0.0);
    }

    #[test]
    fn counter_clockwise_wraps_to_zero() {
        let mut rotation = RotationState::new();
        rotation.set_speed(Speed::Three);
        rotation.set_direction(Direction::CounterClockwise);
        assert_eq!(rotation.motion(), Motion::RunningCounterClockwise);
        for _ in 0..359 {
            rotation.tick();
        }
        assert!((rotation.angle() + 359.0).abs() < 1e-3);
        rotation.tick();
        assert_eq!(rotation.angle(), 0.0);
    }

    #[test]
    fn oversized_step_resets_instead_of_carrying() {
        let mut rotation = RotationState::new();
        rotation.set_speed(Speed::One);
        rotation.set_angular_step(400.0);
        rotation.tick();
        assert_eq!(rotation.angle(), 0.0);
    }

    #[test]
    fn angle_stays_in_range_for_every_speed() {
        for speed in Speed::ALL {
            for direction in [Direction::Clockwise, Direction::CounterClockwise] {
                let mut rotation = RotationState::new();
                rotation.set_speed(speed);
                rotation.set_direction(direction);
                let mut revisited_zero = speed == Speed::Off;
                for _ in 0..5000 {
                    rotation.tick();
                    assert!(rotation.angle() > -360.0 && rotation.angle() < 360.0);
                    if rotation.angle().abs() < 1e-6 {
                        revisited_zero = true;
                    }
                }
                assert!(revisited_zero, "{speed:?} {direction:?} never wrapped");
            }
        }
    }

    #[test]
    fn turning_off_keeps_the_angle() {
        let mut rotation = RotationState::new();
        rotation.set_speed(Speed::Three);
        rotation.tick();
        rotation.tick();
        rotation.set_speed(Speed::Off);
        rotation.tick();
        assert_eq!(rotation.angle(), 2.0);
        assert_eq!(rotation.applied_angle(), None);
        rotation.set_speed(Speed::Two);
        assert_eq!(rotation.applied_angle(), Some(2.0));
    }
}
