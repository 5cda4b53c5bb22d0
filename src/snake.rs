use crate::config::Settings;
use crate::error::SnakeError;
use crate::geometry::{Direction, PosDelta, Rect, Size};
use crate::host::KeyState;
use crate::palette::Palette;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::style::Color;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub rect: Rect,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    /// The next head would leave the field, nothing moved.
    Blocked,
    /// The next head runs into the body, nothing moved.
    Collided,
}

/// The snake, its food and the play field it lives in.
///
/// The body is ordered tail first, head last. Every segment is a one-pixel
/// slice across the direction it was travelling, `thickness` pixels wide.
#[derive(Clone, Debug)]
pub struct SnakeState<R = StdRng> {
    field: Size,
    thickness: i32,
    body: VecDeque<Segment>,
    heading: Direction,
    food: Rect,
    food_color: Color,
    palette: Palette,
    max_food_attempts: u32,
    end_on_collision: bool,
    foods_eaten: u32,
    rng: R,
}

impl SnakeState<StdRng> {
    pub fn new(settings: &Settings) -> Result<Self, SnakeError> {
        Self::new_with_rng(settings, StdRng::from_entropy())
    }
}

impl<R: Rng> SnakeState<R> {
    pub fn new_with_rng(settings: &Settings, mut rng: R) -> Result<Self, SnakeError> {
        settings.validate()?;

        let thickness = settings.segment_thickness as i32;
        let mut palette = Palette::new(settings.palette, settings.segment_thickness);
        let body = (0..settings.initial_length as i32)
            .map(|x| Segment {
                rect: Rect::sliver(x, 0, Direction::Right, thickness),
                color: palette.next_color(&mut rng),
            })
            .collect();

        let mut state = SnakeState {
            field: settings.field,
            thickness,
            body,
            heading: Direction::Right,
            food: Rect::new(0, 0, thickness, thickness),
            food_color: settings.food_color,
            palette,
            max_food_attempts: settings.max_food_attempts,
            end_on_collision: settings.end_on_collision,
            foods_eaten: 0,
            rng,
        };
        state.regenerate_food()?;
        Ok(state)
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn head(&self) -> Option<&Segment> {
        self.body.back()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn field(&self) -> Size {
        self.field
    }

    pub fn foods_eaten(&self) -> u32 {
        self.foods_eaten
    }

    /// Turn towards `requested`. Going straight on or reversing is ignored.
    /// Returns whether the heading changed.
    pub fn set_heading(&mut self, requested: Direction) -> bool {
        if requested == self.heading || requested == self.heading.opposite() {
            return false;
        }
        self.reshape_corner(self.heading, requested);
        self.heading = requested;
        true
    }

    /// Apply one tick's worth of key input. The first pressed key, in
    /// priority order, that is a valid turn wins.
    pub fn steer(&mut self, keys: &KeyState) -> bool {
        keys.pressed().any(|dir| self.set_heading(dir))
    }

    // The newest segments were sliced for the old heading. Re-slice the
    // square they cover along the new heading so the bend has no gaps.
    fn reshape_corner(&mut self, from: Direction, to: Direction) {
        let n = self.body.len().min(self.thickness as usize);
        if n == 0 {
            return;
        }
        let first = self.body.len() - n;
        let anchor = self.body[first].rect;
        let k = self.thickness - 1;

        let (x, y) = match (from, to) {
            (Direction::Left, Direction::Down) => (anchor.x - k, anchor.y),
            (Direction::Right, Direction::Down) => (anchor.x, anchor.y),
            (Direction::Left, Direction::Up) => (anchor.x - k, anchor.y + k),
            (Direction::Right, Direction::Up) => (anchor.x, anchor.y + k),
            (Direction::Up, Direction::Right) => (anchor.x, anchor.y - k),
            (Direction::Down, Direction::Right) => (anchor.x, anchor.y),
            (Direction::Up, Direction::Left) => (anchor.x + k, anchor.y - k),
            (Direction::Down, Direction::Left) => (anchor.x + k, anchor.y),
            _ => return,
        };

        let step = PosDelta::from(to);
        for i in 0..n {
            let offset = i as i32;
            let rect = Rect::sliver(x + step.x * offset, y + step.y * offset, to, self.thickness);
            let color = self.palette.next_color(&mut self.rng);
            self.body[first + i] = Segment { rect, color };
        }
    }

    pub fn tick(&mut self) -> Result<TickOutcome, SnakeError> {
        let Some(head) = self.head() else {
            return Ok(TickOutcome::Blocked);
        };
        // The head is always sliced for the current heading
        let next = head.rect.translated(self.heading.into());

        if !next.fits_within(self.field) {
            return Ok(TickOutcome::Blocked);
        }

        let eats = next.overlaps(&self.food);
        if self.end_on_collision && self.would_hit_body(&next, eats) {
            return Ok(TickOutcome::Collided);
        }

        let color = self.palette.next_color(&mut self.rng);
        self.body.push_back(Segment { rect: next, color });

        if eats {
            // Food has to land clear of the grown body, or the move is undone
            if let Err(e) = self.regenerate_food() {
                self.body.pop_back();
                return Err(e);
            }
            self.foods_eaten += 1;
            Ok(TickOutcome::Ate)
        } else {
            self.body.pop_front();
            Ok(TickOutcome::Moved)
        }
    }

    // The neck always touches the head, and the tail is about to move away
    // unless the snake is eating.
    fn would_hit_body(&self, next: &Rect, eats: bool) -> bool {
        let neck = self.body.len().min(self.thickness as usize);
        let start = if eats { 0 } else { 1 };
        let end = self.body.len() - neck;
        start < end
            && self
                .body
                .range(start..end)
                .any(|segment| segment.rect.overlaps(next))
    }

    pub fn regenerate_food(&mut self) -> Result<(), SnakeError> {
        let max_x = self.field.width as i32 - self.thickness;
        let max_y = self.field.height as i32 - self.thickness;

        for _ in 0..self.max_food_attempts {
            let candidate = Rect::new(
                self.rng.gen_range(0..=max_x),
                self.rng.gen_range(0..=max_y),
                self.thickness,
                self.thickness,
            );
            if !self.body.iter().any(|s| s.rect.overlaps(&candidate)) {
                debug!("Food placed at ({}, {})", candidate.x, candidate.y);
                self.food = candidate;
                return Ok(());
            }
        }

        warn!(
            "No free food spot after {} attempts with {} segments",
            self.max_food_attempts,
            self.body.len()
        );
        Err(SnakeError::FieldSaturated {
            attempts: self.max_food_attempts,
        })
    }

    /// What to draw this frame: every segment from tail to head, then food.
    pub fn render(&self) -> impl Iterator<Item = (Rect, Color)> + Clone + '_ {
        self.body
            .iter()
            .map(|s| (s.rect, s.color))
            .chain(std::iter::once((self.food, self.food_color)))
    }
}
