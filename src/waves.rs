//! Wave spawning and level progression

use rand::Rng;

use crate::config::{EnemyTuning, ProgressionRules};
use crate::entities::{Enemy, Player};
use crate::geometry::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    pub wave: u32,
    pub level: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self { wave: 1, level: 1 }
    }
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enemies in the batch for the current wave
    pub fn wave_size(&self, rules: &ProgressionRules) -> usize {
        (self.wave * rules.enemies_per_wave) as usize
    }

    /// Spawns the full batch for the current wave
    pub fn spawn_wave<R: Rng + ?Sized>(
        &self,
        field: &Field,
        rules: &ProgressionRules,
        tuning: &EnemyTuning,
        rng: &mut R,
    ) -> Vec<Enemy> {
        (0..self.wave_size(rules))
            .map(|_| Enemy::spawn(self.wave, field, tuning, rng))
            .collect()
    }

    /// Starts the next wave once every enemy is gone.
    ///
    /// Returns the new wave number when a wave was cleared.
    pub fn advance_wave<R: Rng + ?Sized>(
        &mut self,
        enemies: &mut Vec<Enemy>,
        field: &Field,
        rules: &ProgressionRules,
        tuning: &EnemyTuning,
        rng: &mut R,
    ) -> Option<u32> {
        if !enemies.is_empty() {
            return None;
        }

        self.wave += 1;
        enemies.extend(self.spawn_wave(field, rules, tuning, rng));
        Some(self.wave)
    }

    /// xp required to leave the current level
    pub fn next_level_xp(&self, rules: &ProgressionRules) -> u32 {
        self.level * rules.xp_per_level
    }

    /// Grants at most one level per call.
    ///
    /// Returns the new level when the player levelled up.
    pub fn check_level_up(&mut self, player: &mut Player, rules: &ProgressionRules) -> Option<u32> {
        if player.xp < self.next_level_xp(rules) {
            return None;
        }

        self.level += 1;
        player.speed += rules.speed_per_level;
        Some(self.level)
    }
}
