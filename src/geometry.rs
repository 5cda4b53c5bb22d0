#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PosDelta {
    pub x: i32,
    pub y: i32,
}

impl From<Direction> for PosDelta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => PosDelta { x: 0, y: -1 },
            Direction::Down => PosDelta { x: 0, y: 1 },
            Direction::Right => PosDelta { x: 1, y: 0 },
            Direction::Left => PosDelta { x: -1, y: 0 },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

/// Axis-aligned rectangle in logical pixels. `x`/`y` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// The one-pixel-deep slice a segment travelling along `dir` occupies.
    pub fn sliver(x: i32, y: i32, dir: Direction, thickness: i32) -> Self {
        if dir.is_horizontal() {
            Rect::new(x, y, 1, thickness)
        } else {
            Rect::new(x, y, thickness, 1)
        }
    }

    /// Last column covered, inclusive.
    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Last row covered, inclusive.
    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }

    pub fn translated(&self, delta: PosDelta) -> Rect {
        Rect {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    pub fn fits_within(&self, field: Size) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x + self.width <= field.width as i32
            && self.y + self.height <= field.height as i32
    }
}
