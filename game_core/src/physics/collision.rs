use glam::Vec2;

/// Overlap of a circle with another shape.
///
/// `normal` points from the other shape towards the circle centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    pub normal: Vec2,
    pub depth: f32,
}

/// Circle against a rectangle rotated by `angle` around its centre
pub fn circle_vs_box(
    center: Vec2,
    radius: f32,
    box_pos: Vec2,
    half_extents: Vec2,
    angle: f32,
) -> Option<Penetration> {
    // Work in the box's local frame
    let local = Vec2::from_angle(-angle).rotate(center - box_pos);
    let closest = local.clamp(-half_extents, half_extents);
    let delta = local - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > radius * radius {
        return None;
    }

    let (normal_local, depth) = if dist_sq > f32::EPSILON {
        let dist = dist_sq.sqrt();
        (delta / dist, radius - dist)
    } else {
        // Centre inside the box: leave through the nearest face
        let dx = half_extents.x - local.x.abs();
        let dy = half_extents.y - local.y.abs();
        if dx < dy {
            (Vec2::new(local.x.signum(), 0.0), dx + radius)
        } else {
            (Vec2::new(0.0, local.y.signum()), dy + radius)
        }
    };

    Some(Penetration {
        normal: Vec2::from_angle(angle).rotate(normal_local),
        depth,
    })
}

pub fn circle_vs_circle(center: Vec2, radius: f32, other: Vec2, other_radius: f32) -> Option<Penetration> {
    let delta = center - other;
    let reach = radius + other_radius;
    let dist_sq = delta.length_squared();

    if dist_sq > reach * reach {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > f32::EPSILON { delta / dist } else { Vec2::Y };
    Some(Penetration {
        normal,
        depth: reach - dist,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_circle_clear_of_box() {
        let hit = circle_vs_box(
            Vec2::new(10.0, 0.0),
            1.0,
            Vec2::ZERO,
            Vec2::new(2.0, 2.0),
            0.0,
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_circle_touching_box_face() {
        let hit = circle_vs_box(
            Vec2::new(2.5, 0.0),
            1.0,
            Vec2::ZERO,
            Vec2::new(2.0, 2.0),
            0.0,
        )
        .unwrap();
        assert!((hit.normal - Vec2::X).length() < 1e-5);
        assert!((hit.depth - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_rotated_box() {
        // A tall thin box turned on its side becomes wide and flat
        let half = Vec2::new(0.5, 4.0);
        let above = Vec2::new(3.0, 1.2);
        assert!(circle_vs_box(above, 1.0, Vec2::ZERO, half, 0.0).is_none());

        let hit = circle_vs_box(above, 1.0, Vec2::ZERO, half, FRAC_PI_2).unwrap();
        assert!(hit.normal.y > 0.99, "normal {:?}", hit.normal);
        assert!((hit.depth - 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_centre_inside_box_pushes_out_nearest_face() {
        let hit = circle_vs_box(
            Vec2::new(0.0, -1.8),
            0.5,
            Vec2::ZERO,
            Vec2::new(3.0, 2.0),
            0.0,
        )
        .unwrap();
        assert_eq!(hit.normal, Vec2::new(0.0, -1.0));
        assert!((hit.depth - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_circle_vs_circle() {
        assert!(circle_vs_circle(Vec2::ZERO, 1.0, Vec2::new(3.0, 0.0), 1.0).is_none());
        let hit = circle_vs_circle(Vec2::ZERO, 1.0, Vec2::new(1.5, 0.0), 1.0).unwrap();
        assert!((hit.normal + Vec2::X).length() < 1e-5);
        assert!((hit.depth - 0.5).abs() < 1e-5);
    }
}
