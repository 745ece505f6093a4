use crate::Params;

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub aspect_ratio: f32,
    pub paddle_width_ratio: f32,
    pub paddle_height_ratio: f32,
    pub ball_size_divisor: f32,
    pub ball_speed_ratio: f32,
    pub acceleration: f32,
    pub speed_cap: f32,
    pub bounce_perturbation: f32,
    pub win_score: u8,
    pub victory_hold_ms: u64,
    pub countdown_ms: u64,
    pub countdown_ready_ms: u64,
    pub fixed_step_ms: f32,
    pub max_frame_ms: f32,
    pub substeps: u32,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aspect_ratio: Params::ASPECT_RATIO,
            paddle_width_ratio: Params::PADDLE_WIDTH_RATIO,
            paddle_height_ratio: Params::PADDLE_HEIGHT_RATIO,
            ball_size_divisor: Params::BALL_SIZE_DIVISOR,
            ball_speed_ratio: Params::BALL_SPEED_RATIO,
            acceleration: Params::ACCELERATION,
            speed_cap: Params::SPEED_CAP,
            bounce_perturbation: Params::BOUNCE_PERTURBATION,
            win_score: Params::WIN_SCORE,
            victory_hold_ms: Params::VICTORY_HOLD_MS,
            countdown_ms: Params::COUNTDOWN_MS,
            countdown_ready_ms: Params::COUNTDOWN_READY_MS,
            fixed_step_ms: Params::FIXED_STEP_MS,
            max_frame_ms: Params::MAX_FRAME_MS,
            substeps: Params::SUBSTEPS,
            debug: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Speed after one top/bottom wall bounce.
    ///
    /// The cap is checked before multiplying, so the last increase may
    /// overshoot `speed_cap` by up to one factor of `acceleration`.
    pub fn accelerate(&self, speed: f32) -> f32 {
        if speed / self.acceleration < self.speed_cap {
            speed * self.acceleration
        } else {
            speed
        }
    }
}
