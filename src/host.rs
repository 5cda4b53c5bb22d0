use crate::geometry::{Direction, Rect, Size};
use crossterm::event::KeyCode;
use ratatui::style::Color;
use ratatui::widgets::canvas::{Painter, Shape};

/// Direction keys seen since the last tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    up: bool,
    right: bool,
    down: bool,
    left: bool,
}

impl KeyState {
    /// Order in which pressed keys are considered.
    pub const PRIORITY: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Right,
        Direction::Left,
    ];

    pub fn press(&mut self, dir: Direction) {
        match dir {
            Direction::Up => self.up = true,
            Direction::Right => self.right = true,
            Direction::Down => self.down = true,
            Direction::Left => self.left = true,
        }
    }

    pub fn is_pressed(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
        }
    }

    pub fn pressed(&self) -> impl Iterator<Item = Direction> + '_ {
        Self::PRIORITY
            .into_iter()
            .filter(move |dir| self.is_pressed(*dir))
    }

    pub fn clear(&mut self) {
        *self = KeyState::default();
    }
}

pub fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

/// Blits coloured rectangles of logical pixels onto a canvas whose bounds are
/// `[0, width - 1] x [0, height - 1]`. Logical y grows downwards.
pub struct Blits<I> {
    field: Size,
    rects: I,
}

impl<I> Blits<I>
where
    I: Iterator<Item = (Rect, Color)> + Clone,
{
    pub fn new(field: Size, rects: I) -> Self {
        Blits { field, rects }
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, f64::from(self.field.width.saturating_sub(1))]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        [0.0, f64::from(self.field.height.saturating_sub(1))]
    }
}

impl<I> Shape for Blits<I>
where
    I: Iterator<Item = (Rect, Color)> + Clone,
{
    fn draw(&self, painter: &mut Painter) {
        let bottom = self.field.height as i32 - 1;
        for (rect, color) in self.rects.clone() {
            for py in rect.y.max(0)..(rect.y + rect.height).min(self.field.height as i32) {
                for px in rect.x.max(0)..(rect.x + rect.width).min(self.field.width as i32) {
                    if let Some((x, y)) = painter.get_point(px as f64, (bottom - py) as f64) {
                        painter.paint(x, y, color);
                    }
                }
            }
        }
    }
}
