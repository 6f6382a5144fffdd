use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

use crate::app::GameState;
use crate::entities::MoveKeys;

/// Frames a press keeps its key held when the terminal never reports releases.
/// About 640 ms, past the auto-repeat start delay of most terminals.
/// Terminal auto-repeat refreshes it while the key stays down.
pub const KEY_HOLD_FRAMES: u8 = 40;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Fire toward a terminal cell
    FireAt { column: u16, row: u16 },
    Pause,
    Resume,
    Restart,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Held movement keys. With release events a key is held until released;
/// without them each press holds it for [`KEY_HOLD_FRAMES`].
#[derive(Debug, Default)]
struct KeyState {
    up: u8,
    down: u8,
    left: u8,
    right: u8,
}

impl KeyState {
    fn slot(&mut self, direction: Direction) -> &mut u8 {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    fn tick(&mut self) {
        for slot in [&mut self.up, &mut self.down, &mut self.left, &mut self.right] {
            *slot = slot.saturating_sub(1);
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn keys(&self) -> MoveKeys {
        MoveKeys {
            up: self.up > 0,
            down: self.down > 0,
            left: self.left > 0,
            right: self.right > 0,
        }
    }
}

/// Manages input polling and translates raw terminal events into game input
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Terminal reports key releases (keyboard enhancement active)
    release_events: bool,
}

impl InputManager {
    pub fn new(release_events: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            release_events,
        }
    }

    /// Drains every pending terminal event without blocking.
    /// Should be called once per frame before reading actions or keys.
    pub fn poll_events(&mut self, game_state: GameState) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(event, game_state);
        }

        Ok(())
    }

    /// Applies a single terminal event
    pub fn handle_event(&mut self, event: Event, game_state: GameState) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event, game_state),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event, game_state),
            // Losing focus means releases will never arrive
            Event::FocusLost => self.key_state.clear(),
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event, game_state),
            KeyEventKind::Repeat => {
                if game_state == GameState::Playing {
                    self.hold(key_event.code);
                }
            }
            KeyEventKind::Release => {
                if let Some(direction) = Direction::from_key(key_event.code) {
                    *self.key_state.slot(direction) = 0;
                }
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: GameState) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match game_state {
            GameState::Playing => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.key_state.clear();
                    self.oneshot_actions.push(InputAction::Pause);
                    return;
                }
                self.hold(key_event.code);
            }
            GameState::Paused => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.oneshot_actions.push(InputAction::Resume);
                }
            }
            GameState::GameOver => {
                if matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                    self.key_state.clear();
                    self.oneshot_actions.push(InputAction::Restart);
                }
            }
        }
    }

    fn hold(&mut self, code: KeyCode) {
        let Some(direction) = Direction::from_key(code) else {
            return;
        };
        *self.key_state.slot(direction) = if self.release_events {
            u8::MAX
        } else {
            KEY_HOLD_FRAMES
        };
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent, game_state: GameState) {
        if game_state != GameState::Playing {
            return;
        }
        if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
            self.oneshot_actions.push(InputAction::FireAt {
                column: mouse_event.column,
                row: mouse_event.row,
            });
        }
    }

    /// One-shot actions collected by the last poll, in arrival order
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Movement keys held this frame
    pub fn move_keys(&self) -> MoveKeys {
        self.key_state.keys()
    }

    /// Ages timed holds; call once after each simulated frame
    pub fn end_frame(&mut self) {
        if !self.release_events {
            self.key_state.tick();
        }
    }
}
