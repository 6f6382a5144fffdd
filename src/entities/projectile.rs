use glam::Vec2;

use super::{DrawTarget, Entity, FrameContext, Tint};
use crate::config::ProjectileTuning;
use crate::geometry::{Field, heading, velocity_from_angle};

#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub radius: f32,
    /// Fixed at creation
    pub velocity: Vec2,
}

impl Projectile {
    /// Fires from `origin` along `angle` (radians, atan2 convention)
    pub fn new(origin: Vec2, angle: f32, tuning: &ProjectileTuning) -> Self {
        Self {
            pos: origin,
            radius: tuning.radius,
            velocity: velocity_from_angle(angle, tuning.speed),
        }
    }

    /// Fires from `origin` toward `target`
    pub fn aimed(origin: Vec2, target: Vec2, tuning: &ProjectileTuning) -> Self {
        Self::new(origin, heading(origin, target), tuning)
    }

    pub fn is_out_of_bounds(&self, field: &Field, margin: f32) -> bool {
        !field.contains(self.pos, margin)
    }
}

impl Entity for Projectile {
    fn update(&mut self, _ctx: &FrameContext) {
        self.pos += self.velocity;
    }

    fn draw(&self, target: &mut dyn DrawTarget) {
        target.fill_circle(self.pos, self.radius, Tint::Yellow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MoveKeys;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn ctx() -> FrameContext {
        let field = Field::new(800.0, 600.0);
        FrameContext {
            field,
            keys: MoveKeys::default(),
            player_pos: field.center(),
        }
    }

    #[test]
    fn test_projectile_new() {
        let projectile = Projectile::new(Vec2::new(10.0, 10.0), 0.0, &ProjectileTuning::default());
        assert_eq!(projectile.pos, Vec2::new(10.0, 10.0));
        assert_eq!(projectile.radius, 5.0);
        assert!((projectile.velocity.x - 8.0).abs() < 1e-5);
        assert!(projectile.velocity.y.abs() < 1e-5);
    }

    #[test]
    fn test_projectile_moves_by_velocity() {
        let mut projectile =
            Projectile::new(Vec2::new(10.0, 10.0), FRAC_PI_2, &ProjectileTuning::default());
        projectile.update(&ctx());
        assert!((projectile.pos.x - 10.0).abs() < 1e-4);
        assert!((projectile.pos.y - 18.0).abs() < 1e-4);

        projectile.update(&ctx());
        assert!((projectile.pos.y - 26.0).abs() < 1e-4);
    }

    #[test]
    fn test_aimed_projectile_heads_for_target() {
        let projectile = Projectile::aimed(
            Vec2::new(100.0, 100.0),
            Vec2::new(100.0, 50.0),
            &ProjectileTuning::default(),
        );
        assert!(projectile.velocity.x.abs() < 1e-4);
        assert!((projectile.velocity.y + 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_projectile_leaves_field_without_bounds_check() {
        let mut projectile = Projectile::new(Vec2::new(790.0, 300.0), 0.0, &ProjectileTuning::default());
        for _ in 0..100 {
            projectile.update(&ctx());
        }
        assert!(projectile.pos.x > 1500.0);
    }

    #[test]
    fn test_projectile_out_of_bounds() {
        let field = Field::new(800.0, 600.0);
        let tuning = ProjectileTuning::default();

        let inside = Projectile::new(Vec2::new(400.0, 300.0), 0.0, &tuning);
        assert!(!inside.is_out_of_bounds(&field, 40.0));

        let within_margin = Projectile::new(Vec2::new(830.0, 300.0), 0.0, &tuning);
        assert!(!within_margin.is_out_of_bounds(&field, 40.0));

        let beyond = Projectile::new(Vec2::new(400.0, -41.0), 0.0, &tuning);
        assert!(beyond.is_out_of_bounds(&field, 40.0));
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_velocity_is_constant(
                angle in -PI..PI,
                steps in 1usize..50
            ) {
                let mut projectile =
                    Projectile::new(Vec2::new(400.0, 300.0), angle, &ProjectileTuning::default());
                let velocity = projectile.velocity;
                for _ in 0..steps {
                    projectile.update(&ctx());
                }
                prop_assert_eq!(projectile.velocity, velocity);
                prop_assert!((projectile.velocity.length() - 8.0).abs() < 1e-3);
            }
        }
    }
}
