use glam::Vec2;

/// Player side (left paddle is red, right paddle is blue)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Direction the ball leaves this side's paddle along x
    pub fn serve_direction(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    /// Player colour shown in messages
    pub fn name(self) -> &'static str {
        match self {
            Side::Left => "Red",
            Side::Right => "Blue",
        }
    }
}

/// Horizontal walls the ball bounces off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
}

impl Wall {
    /// Sign of the y velocity that carries the ball away from this wall (y grows downward)
    pub fn away_sign(self) -> f32 {
        match self {
            Wall::Top => 1.0,
            Wall::Bottom => -1.0,
        }
    }
}

/// Body pose in table coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub pos: Vec2,
    pub angle: f32,
}

impl Transform {
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Self { pos, angle }
    }
}

/// Velocity in table units per simulation step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

/// Collision shape of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { half_extents: Vec2 },
}

/// Per-body material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub restitution: f32,
    pub friction: f32,
    pub is_static: bool,
}

impl Material {
    /// Fixed body that never moves on its own (paddles, walls)
    pub fn fixed() -> Self {
        Self {
            restitution: 1.0,
            friction: 0.0,
            is_static: true,
        }
    }

    /// Perfectly elastic, frictionless moving body (the ball)
    pub fn bouncy() -> Self {
        Self {
            restitution: 1.0,
            friction: 0.0,
            is_static: false,
        }
    }
}
