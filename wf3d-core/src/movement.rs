//! Per-tick camera navigation driven by an input snapshot
use std::time::Duration;

use crate::transform::Transform;
use crate::vector::Vector3;

/// World-space rise direction. Screen Y grows downwards, so up is -Y.
pub const WORLD_UP: Vector3 = Vector3::new(0.0, -1.0, 0.0);

/// Mouse movement since the previous sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseDelta {
    pub dx: f64,
    pub dy: f64,
}

/// Snapshot of the navigation inputs for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    pub forward: bool,
    pub left: bool,
    pub back: bool,
    pub right: bool,
    pub up: bool,
    pub fast: bool,
    pub slow: bool,
    pub mouse: MouseDelta,
}

impl InputState {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.left || self.back || self.right || self.up)
            && self.mouse == MouseDelta::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedMode {
    Slow,
    Base,
    Fast,
}

impl SpeedMode {
    /// Fast wins over slow when both modifiers are held.
    pub fn from_input(input: &InputState) -> Self {
        if input.fast {
            Self::Fast
        } else if input.slow {
            Self::Slow
        } else {
            Self::Base
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationState {
    #[default]
    Idle,
    Navigating,
}

/// Speeds are distances per reference tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    pub base_speed: f64,
    pub fast_speed: f64,
    pub slow_speed: f64,
    /// Radians per unit of mouse movement
    pub look_sensitivity: f64,
    /// Tick length the speeds are expressed against
    pub reference_tick: Duration,
}

impl MovementConfig {
    pub fn speed(&self, mode: SpeedMode) -> f64 {
        match mode {
            SpeedMode::Slow => self.slow_speed,
            SpeedMode::Base => self.base_speed,
            SpeedMode::Fast => self.fast_speed,
        }
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.4,
            fast_speed: 1.1,
            slow_speed: 0.05,
            look_sensitivity: 0.02,
            reference_tick: Duration::from_secs(1) / 30,
        }
    }
}

/// Moves a camera transform while camera-mode is on.
#[derive(Debug, Clone, Default)]
pub struct MovementController {
    config: MovementConfig,
    state: NavigationState,
}

impl MovementController {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            state: NavigationState::Idle,
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut MovementConfig {
        &mut self.config
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn is_navigating(&self) -> bool {
        self.state == NavigationState::Navigating
    }

    pub fn set_camera_mode(&mut self, enabled: bool) {
        let next = if enabled {
            NavigationState::Navigating
        } else {
            NavigationState::Idle
        };
        if next != self.state {
            log::debug!("camera mode {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Advance one tick. Returns true when the transform changed and the
    /// view needs a redraw.
    ///
    /// Without `elapsed` every tick moves one full step; with it the step is
    /// scaled by `elapsed / reference_tick`. Mouse-look is never time scaled.
    pub fn on_tick(&self, transform: &mut Transform, input: &InputState, elapsed: Option<Duration>) -> bool {
        if !self.is_navigating() {
            return false;
        }

        let step = self.step_length(input, elapsed);
        let before = *transform;

        if step != 0.0 {
            let forward = transform.forward() * step;
            let right = transform.right() * step;

            if input.forward {
                transform.position += forward;
            }
            if input.left {
                transform.position -= right;
            }
            if input.back {
                transform.position -= forward;
            }
            if input.right {
                transform.position += right;
            }
            if input.up {
                transform.position += WORLD_UP * step;
            }
        }

        let sensitivity = self.config.look_sensitivity;
        transform.look(-input.mouse.dx * sensitivity, input.mouse.dy * sensitivity);

        let changed = *transform != before;
        if changed {
            log::trace!(
                "camera moved to {:.3} yaw {:.3} pitch {:.3}",
                transform.position,
                transform.yaw,
                transform.pitch
            );
        }
        changed
    }

    fn step_length(&self, input: &InputState, elapsed: Option<Duration>) -> f64 {
        let speed = self.config.speed(SpeedMode::from_input(input));
        match elapsed {
            None => speed,
            Some(elapsed) if self.config.reference_tick.is_zero() => {
                log::warn!("zero reference tick, ignoring elapsed {elapsed:?}");
                speed
            }
            Some(elapsed) => speed * elapsed.as_secs_f64() / self.config.reference_tick.as_secs_f64(),
        }
    }
}
