use glam::Vec2;

use crate::{Config, Params, Side};

/// Axis-aligned rectangle given by center and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }
}

/// Table geometry derived from the viewport size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub ball_size: f32,
    pub initial_ball_speed: f32,
}

impl Layout {
    /// Fit the table into the viewport, letterboxed to the configured aspect ratio
    pub fn from_viewport(viewport_width: f32, viewport_height: f32, config: &Config) -> Self {
        let window_ratio = viewport_width / viewport_height;
        let (width, height) = if window_ratio > config.aspect_ratio {
            (viewport_height * config.aspect_ratio, viewport_height)
        } else {
            (viewport_width, viewport_width / config.aspect_ratio)
        };

        Self {
            width,
            height,
            paddle_width: width * config.paddle_width_ratio,
            paddle_height: height * config.paddle_height_ratio,
            ball_size: height / config.ball_size_divisor,
            initial_ball_speed: width * config.ball_speed_ratio,
        }
    }

    /// Whether the table has a real area to scale from
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn ball_radius(&self) -> f32 {
        self.ball_size / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// X position of a paddle; each paddle sits one paddle width in from its edge
    pub fn paddle_x(&self, side: Side) -> f32 {
        let inset = self.paddle_width / 2.0 + self.paddle_width;
        match side {
            Side::Left => inset,
            Side::Right => self.width - inset,
        }
    }

    pub fn paddle_size(&self) -> Vec2 {
        Vec2::new(self.paddle_width, self.paddle_height)
    }

    /// Distance from paddle center to ball center while a serve is pending
    pub fn ready_offset(&self) -> f32 {
        self.paddle_width / 2.0 + self.ball_size / 2.0
    }

    /// Distance from paddle center to ball center at the moment of launch
    pub fn launch_offset(&self) -> f32 {
        self.paddle_width / 2.0 + self.paddle_width + self.ball_size / 2.0 + Params::SERVE_GAP
    }

    pub fn top_wall(&self) -> Rect {
        Rect::new(
            Vec2::new(self.width / 2.0, -Params::SIDE_WALL_OFFSET),
            Vec2::new(self.width, Params::WALL_THICKNESS),
        )
    }

    pub fn bottom_wall(&self) -> Rect {
        Rect::new(
            Vec2::new(self.width / 2.0, self.height + Params::SIDE_WALL_OFFSET),
            Vec2::new(self.width, Params::WALL_THICKNESS),
        )
    }

    /// End wall behind the given side's paddle
    pub fn end_wall(&self, side: Side) -> Rect {
        let half = Params::WALL_THICKNESS / 2.0;
        let x = match side {
            Side::Left => -half,
            Side::Right => self.width + half,
        };
        Rect::new(
            Vec2::new(x, self.height / 2.0),
            Vec2::new(Params::WALL_THICKNESS, self.height),
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}
