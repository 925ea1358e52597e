use super::direction::Direction;
use super::IndexError;
use crate::geometry::Rect;

/// Placed rectangles kept in four parallel orders, one per approach
/// direction.
///
/// Rank 0 in a direction's order is the rectangle whose leading edge a
/// sweep in that direction meets first:
///
/// | direction | order               |
/// |-----------|---------------------|
/// | Left      | right edge, desc    |
/// | Right     | left edge, asc      |
/// | Up        | bottom edge, desc   |
/// | Down      | top edge, asc       |
///
/// Equal edges are ordered by recency, newest first, so every order is
/// strict. Rectangles live once in `rects` (insertion order); the orders
/// hold ids into it.
#[derive(Debug, Default, Clone)]
pub struct SortedRects {
    rects: Vec<Rect>,
    orders: [Vec<u32>; 4],
}

impl SortedRects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rectangles (same in every order).
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Rectangles in insertion order.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Insert into all four orders.
    pub fn add(&mut self, rect: Rect) {
        let id = self.rects.len() as u32;
        self.rects.push(rect);

        for direction in Direction::CARDINAL {
            if let Some(slot) = slot(direction) {
                let key = leading_edge(direction, &rect);
                let rects = &self.rects;
                let order = &mut self.orders[slot];
                // Newest goes ahead of every equal key.
                let at = order.partition_point(|&other| {
                    leading_edge(direction, &rects[other as usize]) < key
                });
                order.insert(at, id);
            }
        }
    }

    /// Rectangle at `index` in `direction`'s order.
    pub fn get(&self, direction: Direction, index: usize) -> Result<Rect, IndexError> {
        let order = self.order(direction)?;
        let id = order.get(index).ok_or(IndexError::OutOfRange {
            index,
            len: self.len(),
        })?;
        Ok(self.rects[*id as usize])
    }

    /// Rank of the first rectangle at or after `start` in `direction`'s order
    /// that overlaps `rect`.
    ///
    /// Linear scan. Entries are ordered by proximity along the sweep, so the
    /// first hit is usually close to `start`.
    pub fn has_intersection(
        &self,
        rect: &Rect,
        direction: Direction,
        start: usize,
    ) -> Result<Option<usize>, IndexError> {
        let order = self.order(direction)?;
        let hit = order
            .iter()
            .enumerate()
            .skip(start)
            .find(|&(_, &id)| rect.intersects(&self.rects[id as usize]))
            .map(|(rank, _)| rank);
        Ok(hit)
    }

    /// Iterate one direction's order from rank 0.
    pub fn iter(
        &self,
        direction: Direction,
    ) -> Result<impl Iterator<Item = &Rect> + '_, IndexError> {
        let order = self.order(direction)?;
        Ok(order.iter().map(move |&id| &self.rects[id as usize]))
    }

    fn order(&self, direction: Direction) -> Result<&[u32], IndexError> {
        slot(direction)
            .map(|s| self.orders[s].as_slice())
            .ok_or(IndexError::UnsupportedDirection(direction))
    }
}

fn slot(direction: Direction) -> Option<usize> {
    match direction {
        Direction::Left => Some(0),
        Direction::Right => Some(1),
        Direction::Up => Some(2),
        Direction::Down => Some(3),
        Direction::None => None,
    }
}

/// Ascending sort key for a direction: smaller means met earlier by a sweep
/// travelling that way.
fn leading_edge(direction: Direction, rect: &Rect) -> i64 {
    match direction {
        Direction::Left => -(rect.right() as i64),
        Direction::Right => rect.left() as i64,
        Direction::Up => -(rect.bottom() as i64),
        Direction::Down => rect.top() as i64,
        Direction::None => 0,
    }
}
