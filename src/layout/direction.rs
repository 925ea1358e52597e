/// Side of a rectangle, or the direction a candidate travels while sliding.
///
/// Real directions cycle counterclockwise: Left → Down → Right → Up → Left.
/// `None` is the sentinel recorded for the very first placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// The four real directions, in counterclockwise order starting at Left.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Up,
    ];

    /// Next direction counterclockwise. `None` stays `None`.
    pub fn rotate_counterclockwise(self) -> Self {
        match self {
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
            Direction::Up => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    /// Geometric opposite. `None` stays `None`.
    pub fn revert(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::None => Direction::None,
        }
    }

    /// Unbounded sequence starting at `self` and rotating counterclockwise.
    /// Callers bound it with `take`.
    pub fn rotations(self) -> Rotations {
        Rotations { next: self }
    }
}

/// Iterator returned by [`Direction::rotations`]. Cloning restarts from the
/// current position.
#[derive(Debug, Clone)]
pub struct Rotations {
    next: Direction,
}

impl Iterator for Rotations {
    type Item = Direction;

    fn next(&mut self) -> Option<Direction> {
        let current = self.next;
        self.next = current.rotate_counterclockwise();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
