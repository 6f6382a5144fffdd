//! Frame-stepped simulation
//!
//! Owns every entity and advances them one frame at a time in a fixed order:
//! player, projectiles (resolved against enemies), enemies (resolved against
//! the player), particles, wave clear, level up, defeat. Rendering is a side
//! channel: each entity emits its draw call right after its update.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::combat;
use crate::config::GameConfig;
use crate::entities::{DrawTarget, Enemy, Entity, FrameContext, MoveKeys, Particle, Player, Projectile};
use crate::geometry::Field;
use crate::waves::Progression;

/// Something noteworthy that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    EnemyHit { at: Vec2, remaining_hp: i32 },
    EnemyKilled { at: Vec2 },
    PlayerHurt { hp: i32 },
    WaveCleared { next_wave: u32 },
    LevelUp { level: u32, speed: f32 },
    PlayerDefeated,
}

/// Numbers shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub hp: i32,
    pub xp: u32,
    pub level: u32,
    pub wave: u32,
    pub enemies: usize,
}

pub struct Simulation {
    pub field: Field,
    pub config: GameConfig,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub progression: Progression,
    defeated: bool,
    rng: Pcg32,
}

impl Simulation {
    /// Creates a run with the player centered and wave 1 already spawned
    pub fn new(field: Field, config: GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let progression = Progression::new();
        let enemies = progression.spawn_wave(&field, &config.progression, &config.enemy, &mut rng);

        Self {
            field,
            config,
            player: Player::new(field.center(), &config.player),
            projectiles: Vec::new(),
            enemies,
            particles: Vec::new(),
            progression,
            defeated: false,
            rng,
        }
    }

    /// Fires one projectile from the player toward `target`, immediately
    pub fn fire_at(&mut self, target: Vec2) {
        if self.defeated {
            return;
        }
        self.projectiles.push(Projectile::aimed(
            self.player.pos,
            target,
            &self.config.projectile,
        ));
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    pub fn stats(&self) -> Stats {
        Stats {
            hp: self.player.hp(),
            xp: self.player.xp,
            level: self.progression.level,
            wave: self.progression.wave,
            enemies: self.enemies.len(),
        }
    }

    /// Advances exactly one frame. Does nothing once the player is defeated.
    pub fn step(&mut self, keys: &MoveKeys, target: &mut dyn DrawTarget) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.defeated {
            return events;
        }

        let mut ctx = FrameContext {
            field: self.field,
            keys: *keys,
            player_pos: self.player.pos,
        };

        self.player.update(&ctx);
        self.player.draw(target);
        ctx.player_pos = self.player.pos;

        let Self {
            field,
            config,
            player,
            projectiles,
            enemies,
            particles,
            rng,
            ..
        } = self;

        let cull_margin =
            combat::cull_margin(config.projectile.cull_margin, field, enemies, player);

        projectiles.retain_mut(|projectile| {
            projectile.update(&ctx);
            projectile.draw(target);

            match combat::resolve_projectile(projectile, enemies, player, &config.combat) {
                Some(strike) => {
                    particles.push(Particle::burst(strike.at, &config.particle, rng));
                    events.push(GameEvent::EnemyHit {
                        at: strike.at,
                        remaining_hp: strike.remaining_hp,
                    });
                    if strike.killed {
                        events.push(GameEvent::EnemyKilled { at: strike.at });
                    }
                    false
                }
                None => !projectile.is_out_of_bounds(field, cull_margin),
            }
        });

        for enemy in enemies.iter_mut() {
            enemy.update(&ctx);
            enemy.draw(target);
            if combat::resolve_contact(enemy, player, &config.combat) {
                events.push(GameEvent::PlayerHurt { hp: player.hp() });
            }
        }

        particles.retain_mut(|particle| {
            particle.update(&ctx);
            particle.draw(target);
            !particle.is_dead()
        });

        if let Some(next_wave) = self.progression.advance_wave(
            &mut self.enemies,
            &self.field,
            &self.config.progression,
            &self.config.enemy,
            &mut self.rng,
        ) {
            events.push(GameEvent::WaveCleared { next_wave });
        }

        if let Some(level) = self
            .progression
            .check_level_up(&mut self.player, &self.config.progression)
        {
            events.push(GameEvent::LevelUp {
                level,
                speed: self.player.speed,
            });
        }

        if !self.player.is_alive() {
            self.defeated = true;
            events.push(GameEvent::PlayerDefeated);
        }

        events
    }
}
