use crate::config::Settings;
use crate::error::SnakeError;
use crate::host::{key_direction, Blits, KeyState};
use crate::snake::{SnakeState, TickOutcome};
use crossterm::event::{KeyCode, KeyEvent};
use log::{debug, info};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{canvas::Canvas, *},
};

#[derive(Debug)]
pub enum GameState {
    ReadyToStart,
    Playing(SnakeState),
    Paused(SnakeState),
    GameOver { snake: SnakeState, eaten: u32 },
    Exit,
}

pub struct Game {
    state: GameState,
    settings: Settings,
    keys: KeyState,
    best_length: usize,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        Game {
            state: GameState::ReadyToStart,
            settings,
            keys: KeyState::default(),
            best_length: 0,
        }
    }

    pub fn is_exit(&self) -> bool {
        matches!(self.state, GameState::Exit)
    }

    fn end_round(&mut self, snake: SnakeState) -> GameState {
        let eaten = snake.foods_eaten();
        self.best_length = self.best_length.max(snake.len());
        info!("Round over: length {}, food eaten {}", snake.len(), eaten);
        GameState::GameOver { snake, eaten }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Result<(), SnakeError> {
        let state = std::mem::replace(&mut self.state, GameState::Exit);

        self.state = match state {
            GameState::ReadyToStart => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => GameState::Exit,
                KeyCode::Char(' ') => match SnakeState::new(&self.settings) {
                    Ok(snake) => {
                        self.keys.clear();
                        info!("Round started with {} segments", snake.len());
                        GameState::Playing(snake)
                    }
                    Err(e) => {
                        self.state = GameState::ReadyToStart;
                        return Err(e);
                    }
                },
                _ => GameState::ReadyToStart,
            },
            GameState::Playing(snake) => match key.code {
                KeyCode::Char('q') => self.end_round(snake),
                KeyCode::Esc => GameState::Exit,
                KeyCode::Char(' ') => GameState::Paused(snake),
                code => {
                    if let Some(dir) = key_direction(code) {
                        self.keys.press(dir);
                    }
                    GameState::Playing(snake)
                }
            },
            GameState::Paused(snake) => match key.code {
                KeyCode::Char('q') => self.end_round(snake),
                KeyCode::Esc => GameState::Exit,
                KeyCode::Char(' ') => {
                    self.keys.clear();
                    GameState::Playing(snake)
                }
                _ => GameState::Paused(snake),
            },
            GameState::GameOver { snake, eaten } => match key.code {
                KeyCode::Esc => GameState::Exit,
                KeyCode::Char(' ') | KeyCode::Char('q') => GameState::ReadyToStart,
                _ => GameState::GameOver { snake, eaten },
            },
            GameState::Exit => GameState::Exit,
        };

        if self.is_exit() {
            info!("Exit requested");
        }
        Ok(())
    }

    pub fn update(&mut self) -> Result<(), SnakeError> {
        let outcome = match &mut self.state {
            GameState::Playing(snake) => {
                if snake.steer(&self.keys) {
                    debug!("Heading {:?}", snake.heading());
                }
                self.keys.clear();

                let outcome = snake.tick()?;
                if outcome == TickOutcome::Ate {
                    debug!("Nom, length now {}", snake.len());
                }
                outcome
            }
            _ => return Ok(()),
        };

        if outcome == TickOutcome::Collided {
            if let GameState::Playing(snake) = std::mem::replace(&mut self.state, GameState::Exit)
            {
                self.state = self.end_round(snake);
            }
        }
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame) {
        let status = match &self.state {
            GameState::Playing(snake) | GameState::Paused(snake) => format!(
                "{}    Best: {}    Length: {}    Eaten: {}",
                self.settings.title,
                self.best_length,
                snake.len(),
                snake.foods_eaten()
            ),
            _ => format!("{}    Best: {}", self.settings.title, self.best_length),
        };

        let layout = Layout::default()
            .direction(layout::Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + status
                Constraint::Min(0),    // Play field
            ])
            .split(frame.area());

        frame.render_widget(
            Paragraph::new(status)
                .alignment(Alignment::Left)
                .block(Block::default().borders(Borders::ALL)),
            layout[0],
        );

        match &self.state {
            GameState::ReadyToStart => {
                frame.render_widget(
                    Paragraph::new("Press SPACE to start")
                        .alignment(Alignment::Center)
                        .block(Block::default().borders(Borders::ALL)),
                    layout[1],
                );
            }
            GameState::Playing(snake) => {
                let block = Block::default().title("Playing").borders(Borders::ALL);
                render_field(frame, snake, block, layout[1]);
            }
            GameState::Paused(snake) => {
                let block = Block::default()
                    .title("Paused. Press SPACE to continue")
                    .borders(Borders::ALL);
                render_field(frame, snake, block, layout[1]);
            }
            GameState::GameOver { snake, eaten } => {
                let block = Block::default().borders(Borders::ALL);
                let inner_area = block.inner(layout[1]);
                render_field(frame, snake, block, layout[1]);
                frame.render_widget(
                    Paragraph::new(format!(
                        "GAME OVER\nLength: {}  Eaten: {}\nPress SPACE to play again",
                        snake.len(),
                        eaten
                    ))
                    .alignment(Alignment::Center),
                    inner_area,
                );
            }
            GameState::Exit => {}
        }
    }
}

fn render_field(frame: &mut Frame, snake: &SnakeState, block: Block, area: Rect) {
    let blits = Blits::new(snake.field(), snake.render());
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::HalfBlock)
        .x_bounds(blits.x_bounds())
        .y_bounds(blits.y_bounds())
        .paint(|ctx| ctx.draw(&blits));
    frame.render_widget(canvas, area);
}
