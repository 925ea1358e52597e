pub mod direction;
pub mod sorted;
pub mod spiral;

pub use direction::Direction;
pub use sorted::SortedRects;
pub use spiral::{SpiralEntry, SpiralLayouter};

use crate::geometry::{Rect, Size};

/// Anything that places rectangles one at a time around a center.
pub trait CloudLayouter {
    /// Place the next rectangle of exactly `size`. Never overlaps anything
    /// this layouter returned before.
    fn put_next_rectangle(&mut self, size: Size) -> Result<Rect, LayoutError>;
}

/// Misuse of [`SortedRects`]. Not reachable through [`CloudLayouter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("index {index} out of range for {len} rectangles")]
    OutOfRange { index: usize, len: usize },
    #[error("unsupported sorting direction: {0:?}")]
    UnsupportedDirection(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Width or height is zero or negative. Nothing was changed.
    #[error("rectangle size must be positive, got {0}")]
    NonPositiveSize(Size),
    /// Some spot this size could land on has an edge outside the `i32`
    /// range. Nothing was changed.
    #[error("a {size} rectangle does not fit in the coordinate range")]
    CoordinateOverflow { size: Size },
    /// Backtracking emptied the spiral without finding a free spot. Indicates
    /// a bug, not bad input.
    #[error("unable to find a suitable location for a {size} rectangle after {placed} placements")]
    PlacementExhausted { size: Size, placed: usize },
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl LayoutError {
    /// The size was refused up front and the layouter is unchanged, so the
    /// caller can skip it and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LayoutError::NonPositiveSize(_) | LayoutError::CoordinateOverflow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_refused_sizes_are_recoverable() {
        let size = Size::new(3, 4);
        assert!(LayoutError::NonPositiveSize(Size::new(0, 4)).is_recoverable());
        assert!(LayoutError::CoordinateOverflow { size }.is_recoverable());
        assert!(!LayoutError::PlacementExhausted { size, placed: 7 }.is_recoverable());
        assert!(!LayoutError::from(IndexError::OutOfRange { index: 2, len: 1 }).is_recoverable());
    }
}
