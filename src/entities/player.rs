use glam::Vec2;

use super::{DrawTarget, Entity, FrameContext, Tint};
use crate::config::PlayerTuning;

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub(crate) hp: i32,
    pub xp: u32,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &PlayerTuning) -> Self {
        Self {
            pos,
            radius: tuning.radius,
            speed: tuning.speed,
            hp: tuning.hp,
            xp: 0,
        }
    }

    pub fn move_left(&mut self) {
        self.pos.x -= self.speed;
    }

    pub fn move_right(&mut self) {
        self.pos.x += self.speed;
    }

    pub fn move_up(&mut self) {
        self.pos.y -= self.speed;
    }

    pub fn move_down(&mut self) {
        self.pos.y += self.speed;
    }

    // hp only moves through the combat resolver
    pub(crate) fn take_damage(&mut self, damage: i32) {
        self.hp -= damage;
    }

    pub(crate) fn gain_xp(&mut self, xp: u32) {
        self.xp += xp;
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

impl Entity for Player {
    fn update(&mut self, ctx: &FrameContext) {
        // Each held key applies on its own; diagonals are intentionally faster
        if ctx.keys.up {
            self.move_up();
        }
        if ctx.keys.down {
            self.move_down();
        }
        if ctx.keys.left {
            self.move_left();
        }
        if ctx.keys.right {
            self.move_right();
        }

        self.pos = ctx.field.clamp(self.pos, self.radius);
    }

    fn draw(&self, target: &mut dyn DrawTarget) {
        target.fill_circle(self.pos, self.radius, Tint::Cyan);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Field;

    fn ctx(keys: MoveKeys) -> FrameContext {
        let field = Field::new(800.0, 600.0);
        FrameContext {
            field,
            keys,
            player_pos: field.center(),
        }
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), &PlayerTuning::default())
    }

    #[test]
    fn test_player_new() {
        let player = player_at(400.0, 300.0);
        assert_eq!(player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(player.radius, 20.0);
        assert_eq!(player.speed, 4.0);
        assert_eq!(player.hp(), 100);
        assert_eq!(player.xp, 0);
    }

    #[test]
    fn test_player_no_keys_stays_put() {
        let mut player = player_at(400.0, 300.0);
        player.update(&ctx(MoveKeys::default()));
        assert_eq!(player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_player_movement_each_direction() {
        let mut player = player_at(400.0, 300.0);
        player.update(&ctx(MoveKeys {
            up: true,
            ..MoveKeys::default()
        }));
        assert_eq!(player.pos, Vec2::new(400.0, 296.0));

        player.update(&ctx(MoveKeys {
            right: true,
            ..MoveKeys::default()
        }));
        assert_eq!(player.pos, Vec2::new(404.0, 296.0));

        player.update(&ctx(MoveKeys {
            down: true,
            ..MoveKeys::default()
        }));
        assert_eq!(player.pos, Vec2::new(404.0, 300.0));

        player.update(&ctx(MoveKeys {
            left: true,
            ..MoveKeys::default()
        }));
        assert_eq!(player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_player_diagonal_is_not_normalized() {
        let mut player = player_at(400.0, 300.0);
        player.update(&ctx(MoveKeys {
            up: true,
            right: true,
            ..MoveKeys::default()
        }));
        assert_eq!(player.pos, Vec2::new(404.0, 296.0));
    }

    #[test]
    fn test_player_opposite_keys_cancel() {
        let mut player = player_at(400.0, 300.0);
        player.update(&ctx(MoveKeys {
            up: true,
            down: true,
            left: true,
            right: true,
        }));
        assert_eq!(player.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_player_clamped_at_edges() {
        let mut player = player_at(21.0, 579.0);
        player.update(&ctx(MoveKeys {
            left: true,
            down: true,
            ..MoveKeys::default()
        }));
        assert_eq!(player.pos, Vec2::new(20.0, 580.0));
    }

    #[test]
    fn test_player_take_damage_goes_negative() {
        let mut player = player_at(400.0, 300.0);
        player.take_damage(30);
        assert_eq!(player.hp, 70);
        assert!(player.is_alive());

        player.take_damage(80);
        assert_eq!(player.hp, -10);
        assert!(!player.is_alive());
    }

    #[test]
    fn test_player_draws_cyan_circle() {
        struct Recorder(Vec<(Vec2, f32, Tint)>);
        impl DrawTarget for Recorder {
            fn fill_circle(&mut self, center: Vec2, radius: f32, tint: Tint) {
                self.0.push((center, radius, tint));
            }
            fn fill_square(&mut self, _: Vec2, _: f32, _: Tint) {}
        }

        let player = player_at(50.0, 60.0);
        let mut recorder = Recorder(Vec::new());
        player.draw(&mut recorder);
        assert_eq!(recorder.0, vec![(Vec2::new(50.0, 60.0), 20.0, Tint::Cyan)]);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_keys() -> impl Strategy<Value = MoveKeys> {
            (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
                |(up, down, left, right)| MoveKeys {
                    up,
                    down,
                    left,
                    right,
                },
            )
        }

        proptest! {
            #[test]
            fn test_player_stays_in_bounds(
                x in 20.0f32..780.0,
                y in 20.0f32..580.0,
                speed in 0.5f32..40.0,
                moves in prop::collection::vec(any_keys(), 0..200)
            ) {
                let mut player = player_at(x, y);
                player.speed = speed;
                for keys in moves {
                    player.update(&ctx(keys));
                    prop_assert!(player.pos.x >= 20.0 && player.pos.x <= 780.0);
                    prop_assert!(player.pos.y >= 20.0 && player.pos.y <= 580.0);
                }
            }
        }
    }
}
