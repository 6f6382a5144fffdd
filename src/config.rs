//! Gameplay tuning
//!
//! Every number the simulation plays by. Defaults reproduce the classic
//! rules: wave-scaled enemies, 10 damage per hit, 50 xp per level.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    pub radius: f32,
    /// Movement per held key per frame
    pub speed: f32,
    pub hp: i32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: 20.0,
            speed: 4.0,
            hp: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileTuning {
    pub radius: f32,
    pub speed: f32,
    /// How far outside the field a projectile may travel before it is culled.
    /// Keep this at or above the enemy radius so culling never drops a hit.
    pub cull_margin: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            radius: 5.0,
            speed: 8.0,
            cull_margin: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTuning {
    pub radius: f32,
    pub base_hp: i32,
    pub hp_per_wave: i32,
    pub base_speed: f32,
    /// Upper bound of the random speed bonus, multiplied by the wave number
    pub speed_spread_per_wave: f32,
}

impl EnemyTuning {
    pub fn hp_for_wave(&self, wave: u32) -> i32 {
        self.base_hp + self.hp_per_wave * wave as i32
    }
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            radius: 20.0,
            base_hp: 20,
            hp_per_wave: 5,
            base_speed: 2.0,
            speed_spread_per_wave: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleTuning {
    pub radius: f32,
    pub life: u32,
    /// Each velocity component is drawn from [-spread/2, spread/2)
    pub velocity_spread: f32,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            radius: 2.0,
            life: 30,
            velocity_spread: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatRules {
    pub projectile_damage: i32,
    pub xp_per_kill: u32,
    /// Player hp lost per overlapping enemy per frame
    pub contact_damage: i32,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            projectile_damage: 10,
            xp_per_kill: 10,
            contact_damage: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressionRules {
    pub enemies_per_wave: u32,
    pub xp_per_level: u32,
    pub speed_per_level: f32,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            enemies_per_wave: 3,
            xp_per_level: 50,
            speed_per_level: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameConfig {
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    pub enemy: EnemyTuning,
    pub particle: ParticleTuning,
    pub combat: CombatRules,
    pub progression: ProgressionRules,
}
