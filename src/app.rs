use color_eyre::{Result, eyre::ensure};
use log::{debug, info};
use rand::Rng;
use ratatui::{Terminal, backend::Backend, layout::Rect};
use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::geometry::Field;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView, Scene, ScreenLayout, Viewport};
use crate::sim::{GameEvent, Simulation};

/// Smallest terminal that still leaves a playable arena
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;

/// Frame budget for ~60 frames per second
const FRAME_DURATION: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    game_state: GameState,
    sim: Simulation,
    /// Draw calls from the last simulated frame
    scene: Scene,
    /// Fixed at startup; restarts reuse it
    field: Field,
    config: GameConfig,
    /// Terminal area of the last rendered frame
    area: Rect,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// Game timers
    game_start_time: Instant,
    final_time_secs: Option<u64>,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new [`App`] sized to the terminal area it starts in.
    pub fn new(area: Rect, release_events: bool) -> Result<Self> {
        ensure!(
            area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT,
            "terminal is {}x{}, need at least {}x{}",
            area.width,
            area.height,
            MIN_WIDTH,
            MIN_HEIGHT
        );

        let field = ScreenLayout::new(area).field();
        let config = GameConfig::default();
        info!(
            "Field {}x{} world units from a {}x{} terminal",
            field.width, field.height, area.width, area.height
        );

        let now = Instant::now();
        Ok(Self {
            running: true,
            game_state: GameState::Playing,
            sim: new_simulation(field, config),
            scene: Scene::new(),
            field,
            config,
            area,
            last_frame_time: now,
            fps: 0,
            game_start_time: now,
            final_time_secs: None,
            input_manager: InputManager::new(release_events),
            renderer: GameRenderer::new(),
        })
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();
            let frame_time = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            self.input_manager.poll_events(self.game_state)?;
            let actions = self.input_manager.actions().to_vec();
            self.process_actions(&actions);

            if self.game_state == GameState::Playing {
                self.update_game();
            }
            self.input_manager.end_frame();

            terminal.draw(|frame| {
                self.area = frame.area();
                let elapsed_time_secs = self
                    .final_time_secs
                    .unwrap_or_else(|| self.game_start_time.elapsed().as_secs());
                let view = RenderView {
                    game_state: self.game_state,
                    scene: &self.scene,
                    stats: self.sim.stats(),
                    field: self.field,
                    area: self.area,
                    fps: self.fps,
                    elapsed_time_secs,
                };
                self.renderer.render(frame, &view);
            })?;

            // Sleep off what is left of the frame budget
            if let Some(rest) = FRAME_DURATION.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
        Ok(())
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match *action {
                InputAction::Quit => {
                    info!("Quit requested");
                    self.running = false;
                }
                InputAction::Pause => {
                    self.game_state = GameState::Paused;
                }
                InputAction::Resume => {
                    self.game_state = GameState::Playing;
                }
                InputAction::Restart => self.restart(),
                InputAction::FireAt { column, row } => {
                    let viewport = Viewport::new(ScreenLayout::new(self.area).arena_inner, self.field);
                    if let Some(target) = viewport.to_world(column, row) {
                        self.sim.fire_at(target);
                    }
                }
            }
        }
    }

    /// Advance the simulation one frame and react to what happened
    fn update_game(&mut self) {
        self.scene.clear();
        let keys = self.input_manager.move_keys();
        let events = self.sim.step(&keys, &mut self.scene);

        for event in events {
            match event {
                GameEvent::EnemyHit { at, remaining_hp } => {
                    debug!("Enemy hit at ({:.0}, {:.0}), {} hp left", at.x, at.y, remaining_hp);
                }
                GameEvent::EnemyKilled { at } => {
                    debug!("Enemy killed at ({:.0}, {:.0})", at.x, at.y);
                }
                GameEvent::PlayerHurt { hp } => {
                    debug!("Player hurt, hp {}", hp);
                }
                GameEvent::WaveCleared { next_wave } => {
                    info!(
                        "Wave {} cleared, spawning {} enemies",
                        next_wave - 1,
                        self.sim.enemies.len()
                    );
                }
                GameEvent::LevelUp { level, speed } => {
                    info!("Level up to {} (speed {:.1})", level, speed);
                }
                GameEvent::PlayerDefeated => {
                    let stats = self.sim.stats();
                    info!(
                        "Player defeated on wave {} at level {} with {} xp",
                        stats.wave, stats.level, stats.xp
                    );
                    // Capture final time when transitioning to game over
                    self.final_time_secs = Some(self.game_start_time.elapsed().as_secs());
                    self.game_state = GameState::GameOver;
                }
            }
        }
    }

    fn restart(&mut self) {
        info!("Restarting");
        self.sim = new_simulation(self.field, self.config);
        self.scene.clear();
        self.game_state = GameState::Playing;
        self.game_start_time = Instant::now();
        self.final_time_secs = None;
    }
}

fn new_simulation(field: Field, config: GameConfig) -> Simulation {
    let seed = rand::rng().random();
    debug!("Simulation seed {}", seed);
    Simulation::new(field, config, seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Rect::new(0, 0, 100, 40), true).expect("terminal is large enough")
    }

    #[test]
    fn test_rejects_tiny_terminal() {
        assert!(App::new(Rect::new(0, 0, 20, 5), true).is_err());
    }

    #[test]
    fn test_field_fixed_from_startup_area() {
        let app = app();
        assert_eq!(app.field, Field::new(98.0 * 8.0, 36.0 * 16.0));
        assert_eq!(app.sim.field, app.field);
    }

    #[test]
    fn test_click_fires_toward_cell() {
        let mut app = app();
        app.process_actions(&[InputAction::FireAt { column: 50, row: 2 }]);
        assert_eq!(app.sim.projectiles.len(), 1);
        // Top row of the arena is above the centered player
        assert!(app.sim.projectiles[0].velocity.y < 0.0);

        // Clicks on the HUD row are outside the arena
        app.process_actions(&[InputAction::FireAt { column: 50, row: 0 }]);
        assert_eq!(app.sim.projectiles.len(), 1);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut app = app();
        app.process_actions(&[InputAction::Pause]);
        assert_eq!(app.game_state, GameState::Paused);
        app.process_actions(&[InputAction::Resume]);
        assert_eq!(app.game_state, GameState::Playing);
    }

    #[test]
    fn test_defeat_then_restart() {
        let mut app = app();
        app.sim.player.hp = 1;
        let player_pos = app.sim.player.pos;
        app.sim.enemies = vec![crate::entities::Enemy::new(player_pos, 0.0, 25, 20.0)];

        app.update_game();
        assert_eq!(app.game_state, GameState::GameOver);
        assert!(app.final_time_secs.is_some());

        app.process_actions(&[InputAction::Restart]);
        assert_eq!(app.game_state, GameState::Playing);
        assert_eq!(app.sim.player.hp, 100);
        assert_eq!(app.sim.stats().wave, 1);
        assert!(app.final_time_secs.is_none());
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut app = app();
        app.process_actions(&[InputAction::Quit]);
        assert!(!app.running);
    }
}
