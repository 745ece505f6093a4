use glam::Vec2;
use hecs::{Entity, World};

use super::collision::{circle_vs_box, circle_vs_circle};
use super::{Contact, PhysicsEngine};
use crate::{Material, Shape, Transform, Velocity};

/// Fixed-step rigid body world.
///
/// Velocities are in table units per step. Each step is split into
/// substeps so a fast ball cannot skip through a thin paddle. Only moving
/// circles collide, and only against static bodies, which is all a Pong
/// table needs.
pub struct SimWorld {
    world: World,
    substeps: u32,
    touching: Vec<(Entity, Entity)>,
}

impl SimWorld {
    pub fn new(substeps: u32) -> Self {
        Self {
            world: World::new(),
            substeps: substeps.max(1),
            touching: Vec::new(),
        }
    }

    pub fn body_count(&self) -> u32 {
        self.world.len()
    }

    fn spawn(&mut self, pos: Vec2, shape: Shape, material: Material) -> Entity {
        self.world.spawn((
            Transform::new(pos, 0.0),
            Velocity::default(),
            shape,
            material,
        ))
    }
}

impl Default for SimWorld {
    fn default() -> Self {
        Self::new(crate::Params::SUBSTEPS)
    }
}

impl PhysicsEngine for SimWorld {
    type Body = Entity;

    fn create_rectangle(&mut self, center: Vec2, size: Vec2, material: Material) -> Entity {
        self.spawn(
            center,
            Shape::Rectangle {
                half_extents: size / 2.0,
            },
            material,
        )
    }

    fn create_circle(&mut self, center: Vec2, radius: f32, material: Material) -> Entity {
        self.spawn(center, Shape::Circle { radius }, material)
    }

    fn set_position(&mut self, body: Entity, pos: Vec2) {
        if let Ok(mut transform) = self.world.get::<&mut Transform>(body) {
            transform.pos = pos;
        }
    }

    fn set_angle(&mut self, body: Entity, angle: f32) {
        if let Ok(mut transform) = self.world.get::<&mut Transform>(body) {
            transform.angle = angle;
        }
    }

    fn set_velocity(&mut self, body: Entity, vel: Vec2) {
        if let Ok(mut velocity) = self.world.get::<&mut Velocity>(body) {
            velocity.0 = vel;
        }
    }

    fn set_rectangle_size(&mut self, body: Entity, size: Vec2) {
        if let Ok(mut shape) = self.world.get::<&mut Shape>(body) {
            if let Shape::Rectangle { half_extents } = &mut *shape {
                *half_extents = size / 2.0;
            }
        }
    }

    fn set_circle_radius(&mut self, body: Entity, radius: f32) {
        if let Ok(mut shape) = self.world.get::<&mut Shape>(body) {
            if let Shape::Circle { radius: r } = &mut *shape {
                *r = radius;
            }
        }
    }

    fn transform(&self, body: Entity) -> Option<Transform> {
        self.world.get::<&Transform>(body).ok().map(|t| *t)
    }

    fn velocity(&self, body: Entity) -> Option<Vec2> {
        self.world.get::<&Velocity>(body).ok().map(|v| v.0)
    }

    fn shape(&self, body: Entity) -> Option<Shape> {
        self.world.get::<&Shape>(body).ok().map(|s| *s)
    }

    fn step(&mut self) -> Vec<Contact<Entity>> {
        let fraction = 1.0 / self.substeps as f32;
        let mut touching_now = Vec::new();

        for _ in 0..self.substeps {
            integrate(&mut self.world, fraction);
            resolve_contacts(&mut self.world, &mut touching_now);
        }

        let started = touching_now
            .iter()
            .filter(|pair| !self.touching.contains(pair))
            .map(|&(a, b)| Contact::new(a, b))
            .collect();
        self.touching = touching_now;
        started
    }
}

/// Move every dynamic body by its share of this step's velocity
fn integrate(world: &mut World, fraction: f32) {
    for (_entity, (transform, velocity, material)) in
        world.query_mut::<(&mut Transform, &Velocity, &Material)>()
    {
        if !material.is_static {
            transform.pos += velocity.0 * fraction;
        }
    }
}

/// Push moving circles out of static bodies and bounce them
fn resolve_contacts(world: &mut World, touching: &mut Vec<(Entity, Entity)>) {
    // Collect static bodies first (deterministic: sort by entity ID)
    let mut fixed: Vec<(Entity, Transform, Shape, Material)> = world
        .query::<(&Transform, &Shape, &Material)>()
        .iter()
        .filter(|(_e, (_t, _s, m))| m.is_static)
        .map(|(e, (t, s, m))| (e, *t, *s, *m))
        .collect();
    fixed.sort_by_key(|(e, ..)| e.id());

    for (entity, (transform, velocity, shape, material)) in
        world.query_mut::<(&mut Transform, &mut Velocity, &Shape, &Material)>()
    {
        if material.is_static {
            continue;
        }
        let Shape::Circle { radius } = *shape else {
            continue;
        };

        for (other, other_transform, other_shape, other_material) in &fixed {
            let hit = match *other_shape {
                Shape::Rectangle { half_extents } => circle_vs_box(
                    transform.pos,
                    radius,
                    other_transform.pos,
                    half_extents,
                    other_transform.angle,
                ),
                Shape::Circle { radius: other_radius } => {
                    circle_vs_circle(transform.pos, radius, other_transform.pos, other_radius)
                }
            };
            let Some(hit) = hit else {
                continue;
            };

            transform.pos += hit.normal * hit.depth;

            let approach = velocity.0.dot(hit.normal);
            if approach < 0.0 {
                let restitution = material.restitution.max(other_material.restitution);
                let friction = material.friction.min(other_material.friction);
                let normal_part = hit.normal * approach;
                let tangent_part = velocity.0 - normal_part;
                velocity.0 = tangent_part * (1.0 - friction) - normal_part * restitution;
            }

            let pair = (entity, *other);
            if !touching.contains(&pair) {
                touching.push(pair);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn world_with_floor() -> (SimWorld, Entity) {
        let mut world = SimWorld::new(4);
        let floor = world.create_rectangle(
            Vec2::new(0.0, 10.0),
            Vec2::new(100.0, 2.0),
            Material::fixed(),
        );
        (world, floor)
    }

    #[test]
    fn test_ball_moves_by_velocity_per_step() {
        let mut world = SimWorld::new(4);
        let ball = world.create_circle(Vec2::ZERO, 1.0, Material::bouncy());
        world.set_velocity(ball, Vec2::new(3.0, -2.0));

        let contacts = world.step();

        assert!(contacts.is_empty());
        let pos = world.transform(ball).unwrap().pos;
        assert!((pos - Vec2::new(3.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_static_bodies_do_not_move() {
        let (mut world, floor) = world_with_floor();
        world.set_velocity(floor, Vec2::new(5.0, 0.0));
        world.step();
        assert_eq!(world.transform(floor).unwrap().pos, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_ball_bounces_off_floor_once() {
        let (mut world, floor) = world_with_floor();
        let ball = world.create_circle(Vec2::new(0.0, 7.5), 1.0, Material::bouncy());
        world.set_velocity(ball, Vec2::new(1.0, 2.0));

        let contacts = world.step();

        assert_eq!(contacts, vec![Contact::new(ball, floor)]);
        let vel = world.velocity(ball).unwrap();
        assert!(vel.y < 0.0, "ball should bounce up, got {vel:?}");
        assert!((vel.x - 1.0).abs() < 1e-5, "x velocity unchanged");
        assert!((vel.length() - Vec2::new(1.0, 2.0).length()).abs() < 1e-4);
        assert!(world.transform(ball).unwrap().pos.y <= 8.0 + 1e-4);

        // Moving away: no new contact
        assert!(world.step().is_empty());
    }

    #[test]
    fn test_resting_contact_reported_once() {
        let (mut world, floor) = world_with_floor();
        let ball = world.create_circle(Vec2::new(0.0, 8.0), 1.0, Material::bouncy());

        let first = world.step();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].other(ball), Some(floor));

        assert!(world.step().is_empty(), "still touching, not a new contact");
    }

    #[test]
    fn test_rotated_paddle_deflects_ball() {
        let mut world = SimWorld::new(4);
        let paddle = world.create_rectangle(Vec2::ZERO, Vec2::new(1.0, 10.0), Material::fixed());
        world.set_angle(paddle, FRAC_PI_4);
        let ball = world.create_circle(Vec2::new(3.0, 0.0), 1.0, Material::bouncy());
        world.set_velocity(ball, Vec2::new(-2.0, 0.0));

        for _ in 0..5 {
            world.step();
        }

        let vel = world.velocity(ball).unwrap();
        assert!(vel.y.abs() > 0.5, "tilted paddle should add vertical motion, got {vel:?}");
        assert!((vel.length() - 2.0).abs() < 1e-3, "elastic bounce keeps speed");
    }

    #[test]
    fn test_resize_shapes() {
        let mut world = SimWorld::default();
        let paddle = world.create_rectangle(Vec2::ZERO, Vec2::new(1.0, 4.0), Material::fixed());
        let ball = world.create_circle(Vec2::ZERO, 1.0, Material::bouncy());

        world.set_rectangle_size(paddle, Vec2::new(2.0, 8.0));
        world.set_circle_radius(ball, 3.0);
        // Mismatched resize is ignored
        world.set_circle_radius(paddle, 9.0);

        assert_eq!(
            world.shape(paddle),
            Some(Shape::Rectangle {
                half_extents: Vec2::new(1.0, 4.0)
            })
        );
        assert_eq!(world.shape(ball), Some(Shape::Circle { radius: 3.0 }));
        assert_eq!(world.body_count(), 2);
    }
}
