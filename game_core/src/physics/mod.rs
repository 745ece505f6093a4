//! Physics engine capability
//!
//! The match only needs rigid bodies it can place, spin, push and hear
//! collide. [`PhysicsEngine`] is that surface; [`SimWorld`] is the built-in
//! fixed-step implementation on hecs.

pub mod collision;
pub mod world;

pub use world::SimWorld;

use glam::Vec2;

use crate::{Material, Shape, Transform};

/// A pair of bodies that started touching during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact<B> {
    pub a: B,
    pub b: B,
}

impl<B: Copy + Eq> Contact<B> {
    pub fn new(a: B, b: B) -> Self {
        Self { a, b }
    }

    /// The partner of `body` in this contact
    pub fn other(&self, body: B) -> Option<B> {
        if self.a == body {
            Some(self.b)
        } else if self.b == body {
            Some(self.a)
        } else {
            None
        }
    }
}

pub trait PhysicsEngine {
    type Body: Copy + Eq + std::fmt::Debug;

    fn create_rectangle(&mut self, center: Vec2, size: Vec2, material: Material) -> Self::Body;
    fn create_circle(&mut self, center: Vec2, radius: f32, material: Material) -> Self::Body;

    fn set_position(&mut self, body: Self::Body, pos: Vec2);
    fn set_angle(&mut self, body: Self::Body, angle: f32);
    fn set_velocity(&mut self, body: Self::Body, vel: Vec2);
    fn set_rectangle_size(&mut self, body: Self::Body, size: Vec2);
    fn set_circle_radius(&mut self, body: Self::Body, radius: f32);

    fn transform(&self, body: Self::Body) -> Option<Transform>;
    fn velocity(&self, body: Self::Body) -> Option<Vec2>;
    fn shape(&self, body: Self::Body) -> Option<Shape>;

    /// Advance one fixed step and report the contacts that began in it
    fn step(&mut self) -> Vec<Contact<Self::Body>>;
}
