use glam::Vec2;
use rand::Rng;

use super::{DrawTarget, Entity, FrameContext, Tint};
use crate::config::ParticleTuning;

/// Cosmetic hit spark; never collides with anything
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
    pub life: u32,
}

impl Particle {
    pub fn new(pos: Vec2, velocity: Vec2, life: u32, radius: f32) -> Self {
        Self {
            pos,
            radius,
            velocity,
            life,
        }
    }

    /// Creates a spark at `pos` drifting in a random direction
    pub fn burst<R: Rng + ?Sized>(pos: Vec2, tuning: &ParticleTuning, rng: &mut R) -> Self {
        let spread = tuning.velocity_spread;
        let velocity = Vec2::new(
            (rng.random::<f32>() - 0.5) * spread,
            (rng.random::<f32>() - 0.5) * spread,
        );
        Self::new(pos, velocity, tuning.life, tuning.radius)
    }

    pub fn is_dead(&self) -> bool {
        self.life == 0
    }
}

impl Entity for Particle {
    fn update(&mut self, _ctx: &FrameContext) {
        self.pos += self.velocity;
        self.life = self.life.saturating_sub(1);
    }

    fn draw(&self, target: &mut dyn DrawTarget) {
        target.fill_square(self.pos, self.radius, Tint::Orange);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MoveKeys;
    use crate::geometry::Field;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ctx() -> FrameContext {
        let field = Field::new(800.0, 600.0);
        FrameContext {
            field,
            keys: MoveKeys::default(),
            player_pos: field.center(),
        }
    }

    #[test]
    fn test_particle_new() {
        let particle = Particle::new(Vec2::new(10.0, 10.0), Vec2::new(1.0, -1.0), 30, 2.0);
        assert_eq!(particle.pos, Vec2::new(10.0, 10.0));
        assert_eq!(particle.velocity, Vec2::new(1.0, -1.0));
        assert_eq!(particle.life, 30);
        assert_eq!(particle.radius, 2.0);
    }

    #[test]
    fn test_particle_update_position() {
        let mut particle = Particle::new(Vec2::new(10.0, 10.0), Vec2::new(2.0, -1.0), 10, 2.0);
        particle.update(&ctx());
        assert_eq!(particle.pos, Vec2::new(12.0, 9.0));
        assert_eq!(particle.life, 9);
    }

    #[test]
    fn test_particle_expires_after_its_life() {
        let mut particle =
            Particle::burst(Vec2::new(10.0, 10.0), &ParticleTuning::default(), &mut Pcg32::seed_from_u64(1));
        for _ in 0..29 {
            particle.update(&ctx());
            assert!(!particle.is_dead());
        }
        particle.update(&ctx());
        assert!(particle.is_dead());
    }

    #[test]
    fn test_particle_draws_orange_square() {
        struct Recorder(Vec<(Vec2, f32, Tint)>);
        impl DrawTarget for Recorder {
            fn fill_circle(&mut self, _: Vec2, _: f32, _: Tint) {}
            fn fill_square(&mut self, corner: Vec2, side: f32, tint: Tint) {
                self.0.push((corner, side, tint));
            }
        }

        let particle = Particle::new(Vec2::new(5.0, 6.0), Vec2::ZERO, 30, 2.0);
        let mut recorder = Recorder(Vec::new());
        particle.draw(&mut recorder);
        assert_eq!(recorder.0, vec![(Vec2::new(5.0, 6.0), 2.0, Tint::Orange)]);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_burst_velocity_within_spread(seed in any::<u64>()) {
                let mut rng = Pcg32::seed_from_u64(seed);
                let particle = Particle::burst(Vec2::ZERO, &ParticleTuning::default(), &mut rng);
                prop_assert!(particle.velocity.x >= -3.0 && particle.velocity.x < 3.0);
                prop_assert!(particle.velocity.y >= -3.0 && particle.velocity.y < 3.0);
            }
        }
    }
}
