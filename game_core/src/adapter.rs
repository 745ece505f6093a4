//! Physics adapter
//!
//! Owns the seven table bodies. State machine [`Command`]s become engine
//! mutations, and engine contacts become [`MatchInput`]s.

use glam::Vec2;

use crate::physics::PhysicsEngine;
use crate::{
    Command, Layout, MatchInput, Material, PaddlePose, Rect, Shape, Side, Transform, Wall,
};

/// Role of a body on the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Ball,
    Paddle(Side),
    SideWall(Wall),
    EndWall(Side),
}

/// Engine handles of every table body
#[derive(Debug, Clone, Copy)]
pub struct Bodies<B> {
    pub ball: B,
    pub left_paddle: B,
    pub right_paddle: B,
    pub top_wall: B,
    pub bottom_wall: B,
    pub left_wall: B,
    pub right_wall: B,
}

impl<B: Copy + Eq> Bodies<B> {
    pub fn all(&self) -> [(BodyKind, B); 7] {
        [
            (BodyKind::Ball, self.ball),
            (BodyKind::Paddle(Side::Left), self.left_paddle),
            (BodyKind::Paddle(Side::Right), self.right_paddle),
            (BodyKind::SideWall(Wall::Top), self.top_wall),
            (BodyKind::SideWall(Wall::Bottom), self.bottom_wall),
            (BodyKind::EndWall(Side::Left), self.left_wall),
            (BodyKind::EndWall(Side::Right), self.right_wall),
        ]
    }

    pub fn kind_of(&self, body: B) -> Option<BodyKind> {
        self.all()
            .into_iter()
            .find(|(_, b)| *b == body)
            .map(|(kind, _)| kind)
    }

    pub fn paddle(&self, side: Side) -> B {
        match side {
            Side::Left => self.left_paddle,
            Side::Right => self.right_paddle,
        }
    }
}

/// A body as the renderer needs it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyView {
    pub kind: BodyKind,
    pub transform: Transform,
    pub shape: Shape,
}

pub struct PhysicsAdapter<E: PhysicsEngine> {
    engine: E,
    layout: Layout,
    bodies: Bodies<E::Body>,
    left_pose: PaddlePose,
    right_pose: PaddlePose,
}

impl<E: PhysicsEngine> PhysicsAdapter<E> {
    pub fn new(mut engine: E, layout: Layout) -> Self {
        let center = layout.center();
        let paddle_size = layout.paddle_size();
        let paddle_at = |side| Vec2::new(layout.paddle_x(side), center.y);

        let left_paddle =
            engine.create_rectangle(paddle_at(Side::Left), paddle_size, Material::fixed());
        let right_paddle =
            engine.create_rectangle(paddle_at(Side::Right), paddle_size, Material::fixed());
        let ball = engine.create_circle(center, layout.ball_radius(), Material::bouncy());

        let mut wall =
            |rect: Rect| engine.create_rectangle(rect.center, rect.size, Material::fixed());
        let top_wall = wall(layout.top_wall());
        let bottom_wall = wall(layout.bottom_wall());
        let left_wall = wall(layout.end_wall(Side::Left));
        let right_wall = wall(layout.end_wall(Side::Right));

        let rest = PaddlePose::new(center.y, 0.0);
        Self {
            engine,
            layout,
            bodies: Bodies {
                ball,
                left_paddle,
                right_paddle,
                top_wall,
                bottom_wall,
                left_wall,
                right_wall,
            },
            left_pose: rest,
            right_pose: rest,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn bodies(&self) -> &Bodies<E::Body> {
        &self.bodies
    }

    /// Last pose applied to a paddle
    pub fn paddle_state(&self, side: Side) -> PaddlePose {
        match side {
            Side::Left => self.left_pose,
            Side::Right => self.right_pose,
        }
    }

    pub fn ball_transform(&self) -> Transform {
        self.engine
            .transform(self.bodies.ball)
            .unwrap_or_else(|| Transform::new(self.layout.center(), 0.0))
    }

    pub fn ball_velocity(&self) -> Vec2 {
        self.engine.velocity(self.bodies.ball).unwrap_or(Vec2::ZERO)
    }

    pub fn set_paddle_pose(&mut self, side: Side, pose: PaddlePose) {
        match side {
            Side::Left => self.left_pose = pose,
            Side::Right => self.right_pose = pose,
        }
        self.place_paddle(side);
    }

    /// No hand seen: hold both paddles at their last pose
    pub fn freeze_paddles(&mut self) {
        self.place_paddle(Side::Left);
        self.place_paddle(Side::Right);
    }

    fn place_paddle(&mut self, side: Side) {
        let pose = self.paddle_state(side);
        let body = self.bodies.paddle(side);
        let pos = Vec2::new(self.layout.paddle_x(side), pose.position_y);
        self.engine.set_position(body, pos);
        self.engine.set_angle(body, pose.angle);
    }

    fn paddle_transform(&self, side: Side) -> Transform {
        let pose = self.paddle_state(side);
        self.engine
            .transform(self.bodies.paddle(side))
            .unwrap_or_else(|| {
                Transform::new(
                    Vec2::new(self.layout.paddle_x(side), pose.position_y),
                    pose.angle,
                )
            })
    }

    pub fn apply(&mut self, command: Command) {
        let ball = self.bodies.ball;
        match command {
            Command::ResetBall { side } => {
                self.engine.set_velocity(ball, Vec2::ZERO);
                self.attach_ball(side);
            }
            Command::AttachBall { side } => self.attach_ball(side),
            Command::LaunchBall { side, speed } => {
                let paddle = self.paddle_transform(side);
                let dir = side.serve_direction();

                // A paddle looks the same turned half a revolution; always
                // serve towards the opponent
                let mut vel = Vec2::from_angle(paddle.angle).rotate(Vec2::new(dir * speed, 0.0));
                if vel.x * dir < 0.0 {
                    vel = -vel;
                }

                let pos = Vec2::new(
                    paddle.pos.x + dir * self.layout.launch_offset(),
                    paddle.pos.y,
                );
                self.engine.set_position(ball, pos);
                self.engine.set_velocity(ball, vel);
            }
            Command::NormalizeBallSpeed { speed } => {
                let dir = self.ball_velocity().normalize_or_zero();
                if dir != Vec2::ZERO {
                    self.engine.set_velocity(ball, dir * speed);
                }
            }
            Command::ReflectBall {
                wall,
                perturbation,
                speed,
            } => {
                let mut dir = self.ball_velocity().normalize_or_zero();
                if dir == Vec2::ZERO {
                    dir = Vec2::new(0.0, wall.away_sign());
                }
                dir.y = wall.away_sign() * dir.y.abs();
                let dir = Vec2::from_angle(perturbation).rotate(dir);
                self.engine.set_velocity(ball, dir * speed);
            }
        }
    }

    /// Park the ball against `side`'s paddle, matching its pose
    fn attach_ball(&mut self, side: Side) {
        let paddle = self.paddle_transform(side);
        let pos = Vec2::new(
            paddle.pos.x + side.serve_direction() * self.layout.ready_offset(),
            paddle.pos.y,
        );
        self.engine.set_position(self.bodies.ball, pos);
        self.engine.set_angle(self.bodies.ball, paddle.angle);
    }

    /// Run one fixed step and translate what happened.
    ///
    /// Contacts come first, in engine order; the out-of-table check is only
    /// made while a rally is live.
    pub fn step(&mut self, playing: bool) -> Vec<MatchInput> {
        let ball = self.bodies.ball;
        let mut inputs: Vec<MatchInput> = self
            .engine
            .step()
            .into_iter()
            .filter_map(|contact| contact.other(ball))
            .filter_map(|other| self.bodies.kind_of(other))
            .filter_map(contact_input)
            .collect();

        if playing {
            let pos = self.ball_transform().pos;
            if !self.layout.contains(pos) {
                let side = if pos.x < self.layout.width / 2.0 {
                    Side::Left
                } else {
                    Side::Right
                };
                inputs.push(MatchInput::BoundaryCrossed(side));
            }
        }

        inputs
    }

    /// Rebuild every body for a new table size, keeping the ball and paddles
    /// at the same relative place.
    ///
    /// Coming from a table with no area there is nothing to scale: the ball
    /// stops at the centre and both paddles return there.
    pub fn reflow(&mut self, layout: Layout) {
        let old = self.layout;
        self.layout = layout;

        let ball = self.bodies.ball;
        let (ball_pos, ball_vel) = if old.has_area() {
            let scale = Vec2::new(layout.width / old.width, layout.height / old.height);
            self.left_pose.position_y *= scale.y;
            self.right_pose.position_y *= scale.y;
            (
                self.ball_transform().pos * scale,
                self.ball_velocity() * scale.x,
            )
        } else {
            let center = layout.center();
            self.left_pose.position_y = center.y;
            self.right_pose.position_y = center.y;
            (center, Vec2::ZERO)
        };
        self.engine.set_circle_radius(ball, layout.ball_radius());
        self.engine.set_position(ball, ball_pos);
        self.engine.set_velocity(ball, ball_vel);

        for side in [Side::Left, Side::Right] {
            let body = self.bodies.paddle(side);
            self.engine.set_rectangle_size(body, layout.paddle_size());
        }
        self.freeze_paddles();

        for (body, rect) in [
            (self.bodies.top_wall, layout.top_wall()),
            (self.bodies.bottom_wall, layout.bottom_wall()),
            (self.bodies.left_wall, layout.end_wall(Side::Left)),
            (self.bodies.right_wall, layout.end_wall(Side::Right)),
        ] {
            self.engine.set_rectangle_size(body, rect.size);
            self.engine.set_position(body, rect.center);
        }
    }

    /// Every body with its current pose
    pub fn scene(&self) -> Vec<BodyView> {
        self.bodies
            .all()
            .into_iter()
            .filter_map(|(kind, body)| {
                Some(BodyView {
                    kind,
                    transform: self.engine.transform(body)?,
                    shape: self.engine.shape(body)?,
                })
            })
            .collect()
    }
}

fn contact_input(kind: BodyKind) -> Option<MatchInput> {
    match kind {
        BodyKind::Ball => None,
        BodyKind::Paddle(side) => Some(MatchInput::BallHitPaddle(side)),
        BodyKind::SideWall(wall) => Some(MatchInput::BallHitWall(wall)),
        BodyKind::EndWall(side) => Some(MatchInput::BoundaryCrossed(side)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, SimWorld};
    use std::f32::consts::FRAC_PI_8;

    fn adapter() -> PhysicsAdapter<SimWorld> {
        let layout = Layout::from_viewport(1280.0, 720.0, &Config::new());
        PhysicsAdapter::new(SimWorld::default(), layout)
    }

    #[test]
    fn test_creates_seven_bodies() {
        let adapter = adapter();
        assert_eq!(adapter.engine().body_count(), 7);
        assert_eq!(adapter.scene().len(), 7);
        let ball = adapter.ball_transform();
        assert_eq!(ball.pos, adapter.layout().center());
    }

    #[test]
    fn test_freeze_is_idempotent() {
        let mut adapter = adapter();
        let pose = PaddlePose::new(200.0, 0.3);
        adapter.set_paddle_pose(Side::Left, pose);

        for _ in 0..3 {
            adapter.freeze_paddles();
        }

        assert_eq!(adapter.paddle_state(Side::Left), pose);
        let body = adapter.bodies().left_paddle;
        let transform = adapter.engine().transform(body).unwrap();
        assert_eq!(transform.pos.y, 200.0);
        assert_eq!(transform.angle, 0.3);
    }

    #[test]
    fn test_attach_mirrors_paddle_pose() {
        let mut adapter = adapter();
        adapter.set_paddle_pose(Side::Right, PaddlePose::new(300.0, 0.2));
        adapter.apply(Command::AttachBall { side: Side::Right });

        let layout = *adapter.layout();
        let ball = adapter.ball_transform();
        let expected_x = layout.paddle_x(Side::Right) - layout.ready_offset();
        assert!((ball.pos.x - expected_x).abs() < 1e-3);
        assert_eq!(ball.pos.y, 300.0);
        assert_eq!(ball.angle, 0.2);
    }

    #[test]
    fn test_launch_along_paddle_angle() {
        let mut adapter = adapter();
        adapter.set_paddle_pose(Side::Left, PaddlePose::new(360.0, FRAC_PI_8));
        adapter.apply(Command::LaunchBall {
            side: Side::Left,
            speed: 10.0,
        });

        let vel = adapter.ball_velocity();
        assert!((vel.length() - 10.0).abs() < 1e-4);
        assert!((vel.y.atan2(vel.x) - FRAC_PI_8).abs() < 1e-4);
    }

    #[test]
    fn test_launch_always_heads_to_opponent() {
        let mut adapter = adapter();
        // Upright hand on the left gives a half-turned paddle
        adapter.set_paddle_pose(Side::Left, PaddlePose::new(360.0, std::f32::consts::PI));
        adapter.apply(Command::LaunchBall {
            side: Side::Left,
            speed: 10.0,
        });
        assert!(adapter.ball_velocity().x > 9.9);

        adapter.set_paddle_pose(Side::Right, PaddlePose::new(360.0, 0.0));
        adapter.apply(Command::LaunchBall {
            side: Side::Right,
            speed: 10.0,
        });
        assert!(adapter.ball_velocity().x < -9.9);
    }

    #[test]
    fn test_reflect_leaves_wall_at_speed() {
        let mut adapter = adapter();
        let ball = adapter.bodies().ball;
        adapter.engine.set_velocity(ball, Vec2::new(3.0, -4.0));

        adapter.apply(Command::ReflectBall {
            wall: Wall::Top,
            perturbation: 0.0,
            speed: 20.0,
        });
        let vel = adapter.ball_velocity();
        assert!(vel.y > 0.0);
        assert!((vel - Vec2::new(12.0, 16.0)).length() < 1e-3);

        // Already moving away from the bottom wall: still heads up
        adapter.engine.set_velocity(ball, Vec2::new(3.0, -4.0));
        adapter.apply(Command::ReflectBall {
            wall: Wall::Bottom,
            perturbation: 0.1,
            speed: 5.0,
        });
        let vel = adapter.ball_velocity();
        assert!(vel.y < 0.0);
        assert!((vel.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_normalize_keeps_direction() {
        let mut adapter = adapter();
        let ball = adapter.bodies().ball;
        adapter.engine.set_velocity(ball, Vec2::new(-6.0, 8.0));
        adapter.apply(Command::NormalizeBallSpeed { speed: 20.0 });
        assert!((adapter.ball_velocity() - Vec2::new(-12.0, 16.0)).length() < 1e-3);
    }

    #[test]
    fn test_reset_stops_ball() {
        let mut adapter = adapter();
        let ball = adapter.bodies().ball;
        adapter.engine.set_velocity(ball, Vec2::new(5.0, 5.0));
        adapter.apply(Command::ResetBall { side: Side::Left });
        assert_eq!(adapter.ball_velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_wall_contact_becomes_bounce_event() {
        let mut adapter = adapter();
        let ball = adapter.bodies().ball;
        let radius = adapter.layout().ball_radius();
        adapter
            .engine
            .set_position(ball, Vec2::new(640.0, 10.0 + radius + 2.0));
        adapter.engine.set_velocity(ball, Vec2::new(0.0, -4.0));

        let inputs = adapter.step(true);
        assert_eq!(inputs, vec![MatchInput::BallHitWall(Wall::Top)]);
    }

    #[test]
    fn test_end_wall_contact_is_boundary() {
        let mut adapter = adapter();
        let ball = adapter.bodies().ball;
        let radius = adapter.layout().ball_radius();
        adapter
            .engine
            .set_position(ball, Vec2::new(1280.0 - radius - 1.0, 100.0));
        adapter.engine.set_velocity(ball, Vec2::new(4.0, 0.0));

        let inputs = adapter.step(false);
        assert_eq!(inputs, vec![MatchInput::BoundaryCrossed(Side::Right)]);
    }

    #[test]
    fn test_out_of_table_only_reported_while_playing() {
        let mut adapter = adapter();
        let ball = adapter.bodies().ball;
        adapter.engine.set_position(ball, Vec2::new(200.0, -200.0));

        assert!(adapter.step(false).is_empty());
        assert_eq!(
            adapter.step(true),
            vec![MatchInput::BoundaryCrossed(Side::Left)]
        );
    }

    #[test]
    fn test_reflow_scales_bodies() {
        let mut adapter = adapter();
        adapter.set_paddle_pose(Side::Left, PaddlePose::new(180.0, 0.1));

        let smaller = Layout::from_viewport(640.0, 360.0, &Config::new());
        adapter.reflow(smaller);

        assert_eq!(adapter.layout(), &smaller);
        assert!((adapter.paddle_state(Side::Left).position_y - 90.0).abs() < 1e-2);
        assert!((adapter.ball_transform().pos - smaller.center()).length() < 1e-2);
        let paddle = adapter.engine().shape(adapter.bodies().left_paddle).unwrap();
        assert_eq!(
            paddle,
            Shape::Rectangle {
                half_extents: smaller.paddle_size() / 2.0
            }
        );
    }

    #[test]
    fn test_reflow_from_empty_table_recentres() {
        let config = Config::new();
        let empty = Layout::from_viewport(0.0, 0.0, &config);
        assert!(!empty.has_area());
        let mut adapter = PhysicsAdapter::new(SimWorld::default(), empty);

        let table = Layout::from_viewport(1280.0, 720.0, &config);
        adapter.reflow(table);

        let ball = adapter.ball_transform().pos;
        assert!(ball.is_finite());
        assert!((ball - table.center()).length() < 1e-2);
        assert_eq!(adapter.ball_velocity(), Vec2::ZERO);
        for side in [Side::Left, Side::Right] {
            let pose = adapter.paddle_state(side);
            assert!((pose.position_y - table.center().y).abs() < 1e-2);
        }
        assert!(adapter.step(true).is_empty());
    }
}
