use glam::Vec2;
use rand::Rng;

use super::{DrawTarget, Entity, FrameContext, Tint};
use crate::config::EnemyTuning;
use crate::geometry::{Field, heading, velocity_from_angle};

/// Field edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Uniformly random point along this edge
    pub fn random_point<R: Rng + ?Sized>(self, field: &Field, rng: &mut R) -> Vec2 {
        let t: f32 = rng.random();
        match self {
            Edge::Left => Vec2::new(0.0, t * field.height),
            Edge::Right => Vec2::new(field.width, t * field.height),
            Edge::Top => Vec2::new(t * field.width, 0.0),
            Edge::Bottom => Vec2::new(t * field.width, field.height),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub(crate) hp: i32,
}

impl Enemy {
    pub fn new(pos: Vec2, speed: f32, hp: i32, radius: f32) -> Self {
        Self {
            pos,
            radius,
            speed,
            hp,
        }
    }

    /// Spawns a wave-scaled enemy on a random field edge
    pub fn spawn<R: Rng + ?Sized>(
        wave: u32,
        field: &Field,
        tuning: &EnemyTuning,
        rng: &mut R,
    ) -> Self {
        let speed = tuning.base_speed
            + rng.random::<f32>() * tuning.speed_spread_per_wave * wave as f32;
        let pos = Edge::random(rng).random_point(field, rng);

        Self::new(pos, speed, tuning.hp_for_wave(wave), tuning.radius)
    }

    // hp only moves through the combat resolver
    pub(crate) fn take_damage(&mut self, damage: i32) {
        self.hp -= damage;
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

impl Entity for Enemy {
    /// Pure pursuit of the player's current position
    fn update(&mut self, ctx: &FrameContext) {
        let angle = heading(self.pos, ctx.player_pos);
        self.pos += velocity_from_angle(angle, self.speed);
    }

    fn draw(&self, target: &mut dyn DrawTarget) {
        target.fill_circle(self.pos, self.radius, Tint::Red);
    }
}
