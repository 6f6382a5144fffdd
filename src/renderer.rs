use glam::Vec2;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Painter, Shape},
    },
};

use crate::app::GameState;
use crate::entities::{DrawTarget, Tint};
use crate::geometry::Field;
use crate::sim::Stats;

/// World units covered by one terminal cell horizontally
pub const CELL_WIDTH: f32 = 8.0;
/// World units covered by one terminal cell vertically
pub const CELL_HEIGHT: f32 = 16.0;

/// One recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Circle { center: Vec2, radius: f32, tint: Tint },
    Square { corner: Vec2, side: f32, tint: Tint },
}

/// Draw calls for one frame, replayed by the renderer
#[derive(Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl DrawTarget for Scene {
    fn fill_circle(&mut self, center: Vec2, radius: f32, tint: Tint) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            tint,
        });
    }

    fn fill_square(&mut self, corner: Vec2, side: f32, tint: Tint) {
        self.commands.push(DrawCommand::Square { corner, side, tint });
    }
}

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Cyan => Color::Cyan,
        Tint::Yellow => Color::Yellow,
        Tint::Red => Color::Red,
        Tint::Orange => Color::Rgb(255, 165, 0),
    }
}

/// Screen regions: HUD row, bordered arena, controls row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub hud: Rect,
    pub arena: Rect,
    /// Arena minus its border; this is where the field is drawn
    pub arena_inner: Rect,
    pub controls: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let [hud, arena, controls] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);
        let arena_inner = arena_block().inner(arena);

        Self {
            hud,
            arena,
            arena_inner,
            controls,
        }
    }

    /// Field matching the arena at its current size, one cell per
    /// [`CELL_WIDTH`] x [`CELL_HEIGHT`] world units
    pub fn field(&self) -> Field {
        Field::new(
            self.arena_inner.width as f32 * CELL_WIDTH,
            self.arena_inner.height as f32 * CELL_HEIGHT,
        )
    }
}

fn arena_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Maps terminal cells onto the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub field: Field,
}

impl Viewport {
    pub fn new(area: Rect, field: Field) -> Self {
        Self { area, field }
    }

    /// Center of the world region under a terminal cell, or `None` outside the arena
    pub fn to_world(&self, column: u16, row: u16) -> Option<Vec2> {
        if self.area.width == 0
            || self.area.height == 0
            || column < self.area.x
            || row < self.area.y
            || column >= self.area.x + self.area.width
            || row >= self.area.y + self.area.height
        {
            return None;
        }

        let cell_w = self.field.width / self.area.width as f32;
        let cell_h = self.field.height / self.area.height as f32;
        Some(Vec2::new(
            (column - self.area.x) as f32 * cell_w + cell_w / 2.0,
            (row - self.area.y) as f32 * cell_h + cell_h / 2.0,
        ))
    }
}

/// Scene drawn as filled shapes on a ratatui canvas
struct FilledScene<'a> {
    commands: &'a [DrawCommand],
    field: Field,
    /// Sampling distance in world units, finer than one Braille dot
    step: f64,
}

impl FilledScene<'_> {
    /// Paints every sample point in the box that passes `inside`.
    /// World y grows downward, canvas y grows upward.
    fn fill(
        &self,
        painter: &mut Painter,
        min: Vec2,
        max: Vec2,
        color: Color,
        inside: impl Fn(f64, f64) -> bool,
    ) {
        let height = self.field.height as f64;
        let mut y = min.y as f64;
        while y <= max.y as f64 {
            let mut x = min.x as f64;
            while x <= max.x as f64 {
                if inside(x, y)
                    && let Some((px, py)) = painter.get_point(x, height - y)
                {
                    painter.paint(px, py, color);
                }
                x += self.step;
            }
            y += self.step;
        }
    }
}

impl Shape for FilledScene<'_> {
    fn draw(&self, painter: &mut Painter) {
        for command in self.commands {
            match *command {
                DrawCommand::Circle {
                    center,
                    radius,
                    tint,
                } => {
                    let (cx, cy, r) = (center.x as f64, center.y as f64, radius as f64);
                    let reach = Vec2::splat(radius);
                    self.fill(
                        painter,
                        center - reach,
                        center + reach,
                        tint_color(tint),
                        |x, y| (x - cx).powi(2) + (y - cy).powi(2) <= r * r,
                    );
                    // Tiny circles still get their center dot
                    if let Some((px, py)) = painter.get_point(cx, self.field.height as f64 - cy) {
                        painter.paint(px, py, tint_color(tint));
                    }
                }
                DrawCommand::Square { corner, side, tint } => {
                    self.fill(
                        painter,
                        corner,
                        corner + Vec2::splat(side),
                        tint_color(tint),
                        |_, _| true,
                    );
                }
            }
        }
    }
}

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub scene: &'a Scene,
    pub stats: Stats,
    pub field: Field,
    pub area: Rect,
    pub fps: u32,
    pub elapsed_time_secs: u64,
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => self.render_paused(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let layout = ScreenLayout::new(view.area);

        // Braille cells are 2 dots wide and 4 tall; sample twice per dot
        let dots_x = (layout.arena_inner.width.max(1) * 2) as f64;
        let dots_y = (layout.arena_inner.height.max(1) * 4) as f64;
        let step = (view.field.width as f64 / dots_x)
            .min(view.field.height as f64 / dots_y)
            / 2.0;

        let scene = FilledScene {
            commands: view.scene.commands(),
            field: view.field,
            step: step.max(0.25),
        };

        let canvas = Canvas::default()
            .block(arena_block())
            .marker(Marker::Braille)
            .x_bounds([0.0, view.field.width as f64])
            .y_bounds([0.0, view.field.height as f64])
            .paint(|ctx| ctx.draw(&scene));
        frame.render_widget(canvas, layout.arena);

        frame.render_widget(Paragraph::new(stats_line(view)), layout.hud);

        // Timer on the right of the header
        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;
        let timer_text = Line::from(vec![
            Span::styled("Time: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:02}:{:02}", minutes, seconds),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(timer_text).right_aligned(), layout.hud);

        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Click: Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        frame.render_widget(Paragraph::new(controls).centered(), layout.controls);
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);

        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let pause_area = Rect {
            x: area.x + (area.width / 2).saturating_sub(15),
            y: area.y + (area.height / 2).saturating_sub(3),
            width: area.width.min(30),
            height: area.height.min(6),
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let minutes = view.elapsed_time_secs / 60;
        let seconds = view.elapsed_time_secs % 60;

        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║      OVERRUN!             ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!(
                "Reached wave {} at level {}",
                view.stats.wave, view.stats.level
            ))
            .centered()
            .yellow()
            .bold(),
            Line::from(format!("Experience: {}", view.stats.xp))
                .centered()
                .yellow(),
            Line::from(format!("Time Survived: {:02}:{:02}", minutes, seconds))
                .centered()
                .cyan()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }
}

fn stats_line(view: &RenderView) -> Line<'static> {
    let label = Style::default().fg(Color::DarkGray);
    let hp = view.stats.hp;
    let hp_style = if hp > 50 {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if hp > 25 {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    };

    Line::from(vec![
        Span::styled(" HP: ", label),
        Span::styled(format!("{}", hp), hp_style),
        Span::styled("  Level: ", label),
        Span::styled(
            format!("{}", view.stats.level),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Wave: ", label),
        Span::styled(
            format!("{}", view.stats.wave),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  XP: ", label),
        Span::styled(format!("{}", view.stats.xp), Style::default().fg(Color::White)),
        Span::styled("  Enemies: ", label),
        Span::styled(
            format!("{}", view.stats.enemies),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  FPS: ", label),
        Span::styled(format!("{}", view.fps), Style::default().fg(Color::White)),
    ])
}
