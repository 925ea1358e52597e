use super::direction::Direction;
use super::sorted::SortedRects;
use super::{CloudLayouter, IndexError, LayoutError};
use crate::geometry::{Point, Rect, Size};

/// Sides walked per attempt: the anchor's four sides once, then the first
/// side again starting from its far corner.
const SIDE_PASSES: usize = 5;

/// One accepted placement on the spiral stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiralEntry {
    pub rect: Rect,
    /// Which way this rectangle faces its predecessor on the stack.
    /// `Direction::None` for the first placement.
    pub direction_to_previous: Direction,
}

/// Packs rectangles around a fixed center by walking the perimeter of the
/// most recently placed rectangle.
///
/// Every placed rectangle stays in the sorted index for good. The spiral
/// stack can shrink: when no side of its top entry has room, the top is
/// popped and the search continues around the entry below it.
#[derive(Debug, Clone)]
pub struct SpiralLayouter {
    center: Point,
    placed: SortedRects,
    spiral: Vec<SpiralEntry>,
    extent: Extent,
}

/// Bounds of the center and everything placed, widened to `i64` so the
/// overflow check itself cannot overflow.
#[derive(Debug, Clone, Copy)]
struct Extent {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl Extent {
    fn around(point: Point) -> Self {
        Self {
            left: point.x as i64,
            top: point.y as i64,
            right: point.x as i64,
            bottom: point.y as i64,
        }
    }

    fn include(&mut self, rect: &Rect) {
        self.left = self.left.min(rect.left() as i64);
        self.top = self.top.min(rect.top() as i64);
        self.right = self.right.max(rect.right() as i64);
        self.bottom = self.bottom.max(rect.bottom() as i64);
    }

    /// Every candidate for `size` lies within one `size` of these bounds, so
    /// if that margin is representable no placement arithmetic overflows.
    fn fits(&self, size: Size) -> bool {
        let (w, h) = (size.width as i64, size.height as i64);
        let range = i32::MIN as i64..=i32::MAX as i64;
        [self.left - w, self.right + w, self.top - h, self.bottom + h]
            .iter()
            .all(|edge| range.contains(edge))
    }
}

impl SpiralLayouter {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            placed: SortedRects::new(),
            spiral: Vec::new(),
            extent: Extent::around(center),
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Number of rectangles placed so far.
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Placed rectangles, in placement order.
    pub fn rectangles(&self) -> &[Rect] {
        self.placed.rects()
    }

    /// Current spiral stack, bottom first. Shorter than [`len`](Self::len)
    /// once backtracking has happened.
    pub fn spiral(&self) -> &[SpiralEntry] {
        &self.spiral
    }

    /// Place a rectangle of exactly `size` so it overlaps nothing placed
    /// before. Non-positive sizes, and sizes too large for the remaining
    /// coordinate range, are rejected without touching any state.
    pub fn put_next_rectangle(&mut self, size: Size) -> Result<Rect, LayoutError> {
        if !size.is_positive() {
            return Err(LayoutError::NonPositiveSize(size));
        }
        if !self.extent.fits(size) {
            return Err(LayoutError::CoordinateOverflow { size });
        }

        let entry = self.next_entry(size)?;
        self.extent.include(&entry.rect);
        self.placed.add(entry.rect);
        self.spiral.push(entry);

        tracing::trace!(
            "Placed #{} {} facing {:?} (spiral depth {})",
            self.placed.len(),
            entry.rect,
            entry.direction_to_previous,
            self.spiral.len()
        );
        Ok(entry.rect)
    }

    fn next_entry(&mut self, size: Size) -> Result<SpiralEntry, LayoutError> {
        match self.spiral.as_slice() {
            [] => {
                return Ok(SpiralEntry {
                    rect: centered(size, self.center),
                    direction_to_previous: Direction::None,
                })
            }
            [first] => return Ok(beside_first(size, &first.rect)),
            _ => {}
        }

        while self.spiral.len() >= 2 {
            if let Some(entry) = self.attach_to_spiral(size)? {
                return Ok(entry);
            }
            if let Some(dropped) = self.spiral.pop() {
                tracing::debug!(
                    "No free side around {} for {}, backtracking to depth {}",
                    dropped.rect,
                    size,
                    self.spiral.len()
                );
            }
        }

        Err(LayoutError::PlacementExhausted {
            size,
            placed: self.placed.len(),
        })
    }

    /// Slide a candidate around the top entry, one side per pass. Each pass
    /// pushes the candidate past whatever it overlaps until it is clear or
    /// has travelled beyond the side's far corner.
    fn attach_to_spiral(&self, size: Size) -> Result<Option<SpiralEntry>, LayoutError> {
        let [.., before, anchor] = self.spiral.as_slice() else {
            return Ok(None);
        };

        let start = anchor.direction_to_previous;
        let mut candidate = attach_to_side(size, before.rect.location(), &anchor.rect, start);

        for direction in start.rotations().take(SIDE_PASSES) {
            let target = target_point(size, &anchor.rect, direction)?;
            let mut hit = self.placed.has_intersection(&candidate, direction, 0)?;
            let mut overshot = false;

            while let (Some(rank), false) = (hit, overshot) {
                let obstacle = self.placed.get(direction, rank)?;
                candidate = attach_to_side(size, candidate.location(), &obstacle, direction);
                hit = self.placed.has_intersection(&candidate, direction, rank + 1)?;
                overshot = is_overshot(candidate.location(), target, direction)?;
            }

            if hit.is_none() && !overshot {
                return Ok(Some(SpiralEntry {
                    rect: candidate,
                    direction_to_previous: direction.revert(),
                }));
            }

            candidate = Rect::from_location(target, size);
        }

        Ok(None)
    }
}

impl CloudLayouter for SpiralLayouter {
    fn put_next_rectangle(&mut self, size: Size) -> Result<Rect, LayoutError> {
        SpiralLayouter::put_next_rectangle(self, size)
    }
}

fn centered(size: Size, center: Point) -> Rect {
    Rect::from_location(center - size.half(), size)
}

/// Second placement: whichever of "left of" or "above" the first rectangle
/// brings the centers closer. Ties go above.
fn beside_first(size: Size, first: &Rect) -> SpiralEntry {
    let center = first.center();
    let half_first = first.size().half();
    let half_size = size.half();
    // Center-to-center distances; either sum can exceed i32.
    let dist_if_left = size.width as i64 + half_first.width as i64;
    let dist_if_up = size.height as i64 + half_first.height as i64;

    if dist_if_left < dist_if_up {
        SpiralEntry {
            rect: Rect::new(
                first.left() - size.width,
                center.y - half_size.height,
                size.width,
                size.height,
            ),
            direction_to_previous: Direction::Right,
        }
    } else {
        SpiralEntry {
            rect: Rect::new(
                center.x - half_size.width,
                first.top() - size.height,
                size.width,
                size.height,
            ),
            direction_to_previous: Direction::Down,
        }
    }
}

/// Rectangle of `size` flush against `direction`'s side of `to`. The other
/// coordinate comes from `fallback`.
fn attach_to_side(size: Size, fallback: Point, to: &Rect, direction: Direction) -> Rect {
    let x = match direction {
        Direction::Left => to.left() - size.width,
        Direction::Right => to.right(),
        _ => fallback.x,
    };
    let y = match direction {
        Direction::Up => to.top() - size.height,
        Direction::Down => to.bottom(),
        _ => fallback.y,
    };
    Rect::new(x, y, size.width, size.height)
}

/// Far corner reached by sliding a `size` rectangle along one full side of
/// `around` while moving in `direction`.
fn target_point(size: Size, around: &Rect, direction: Direction) -> Result<Point, IndexError> {
    match direction {
        Direction::Left => Ok(around.location() - size),
        Direction::Right => Ok(around.location() + around.size()),
        Direction::Up => Ok(Point::new(around.right(), around.top() - size.height)),
        Direction::Down => Ok(Point::new(around.left() - size.width, around.bottom())),
        Direction::None => Err(IndexError::UnsupportedDirection(direction)),
    }
}

fn is_overshot(position: Point, target: Point, direction: Direction) -> Result<bool, IndexError> {
    match direction {
        Direction::Left => Ok(position.x < target.x),
        Direction::Right => Ok(position.x > target.x),
        Direction::Up => Ok(position.y < target.y),
        Direction::Down => Ok(position.y > target.y),
        Direction::None => Err(IndexError::UnsupportedDirection(direction)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FailureSnapshot;
    use crate::verify::find_overlaps;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn layouter() -> SpiralLayouter {
        SpiralLayouter::new(Point::ORIGIN)
    }

    fn random_sizes(seed: u64, count: usize) -> Vec<Size> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| Size::new(rng.random_range(2..100), rng.random_range(2..100)))
            .collect()
    }

    fn place_all(layouter: &mut SpiralLayouter, sizes: &[Size]) -> Vec<Rect> {
        sizes
            .iter()
            .map(|&s| layouter.put_next_rectangle(s).unwrap())
            .collect()
    }

    #[test]
    fn first_rectangle_is_centered() {
        for (w, h, x, y) in [(1, 1, 0, 0), (4, 6, -2, -3), (5, 7, -2, -3)] {
            let rect = layouter().put_next_rectangle(Size::new(w, h)).unwrap();
            assert_eq!(rect.location(), Point::new(x, y), "size {w}x{h}");
            assert_eq!(rect.size(), Size::new(w, h));
        }
    }

    #[test]
    fn first_rectangle_uses_given_center() {
        let mut layouter = SpiralLayouter::new(Point::new(7, 10));
        let rect = layouter.put_next_rectangle(Size::new(5, 5)).unwrap();
        assert_eq!(rect.location(), Point::new(5, 8));
    }

    #[test]
    fn non_positive_sizes_are_rejected() {
        for (w, h) in [(0, 1), (-1, 1), (1, 0), (1, -1)] {
            let mut layouter = layouter();
            let err = layouter.put_next_rectangle(Size::new(w, h)).unwrap_err();
            assert_eq!(err, LayoutError::NonPositiveSize(Size::new(w, h)));
            assert!(layouter.is_empty());
        }
    }

    #[test]
    fn rejected_size_leaves_no_trace() {
        let sizes = random_sizes(5, 40);
        let expected = place_all(&mut layouter(), &sizes);

        let mut interrupted = layouter();
        let mut got = Vec::new();
        for (i, &size) in sizes.iter().enumerate() {
            if i % 7 == 3 {
                assert!(interrupted.put_next_rectangle(Size::new(0, 3)).is_err());
            }
            got.push(interrupted.put_next_rectangle(size).unwrap());
        }
        assert_eq!(got, expected);
    }

    #[test]
    fn second_rectangle_goes_left_of_tall_first() {
        let mut layouter = layouter();
        layouter.put_next_rectangle(Size::new(2, 10)).unwrap();
        let second = layouter.put_next_rectangle(Size::new(4, 4)).unwrap();
        assert_eq!(second, Rect::new(-5, -2, 4, 4));
        assert_eq!(layouter.spiral()[1].direction_to_previous, Direction::Right);
    }

    #[test]
    fn second_rectangle_goes_above_wide_first() {
        let mut layouter = layouter();
        layouter.put_next_rectangle(Size::new(10, 2)).unwrap();
        let second = layouter.put_next_rectangle(Size::new(4, 4)).unwrap();
        assert_eq!(second, Rect::new(-2, -5, 4, 4));
        assert_eq!(layouter.spiral()[1].direction_to_previous, Direction::Down);
    }

    #[test]
    fn second_rectangle_tie_goes_above() {
        let mut layouter = layouter();
        layouter.put_next_rectangle(Size::new(4, 4)).unwrap();
        let second = layouter.put_next_rectangle(Size::new(2, 2)).unwrap();
        assert_eq!(second, Rect::new(-1, -4, 2, 2));
        assert_eq!(layouter.spiral()[1].direction_to_previous, Direction::Down);
    }

    #[test]
    fn equal_squares_follow_the_spiral() {
        let mut layouter = layouter();
        let rects = place_all(&mut layouter, &[Size::new(2, 2); 4]);
        assert_eq!(
            rects,
            [
                Rect::new(-1, -1, 2, 2),
                Rect::new(-1, -3, 2, 2),
                Rect::new(-3, -1, 2, 2),
                Rect::new(-5, -3, 2, 2),
            ]
        );
        let directions: Vec<_> = layouter
            .spiral()
            .iter()
            .map(|e| e.direction_to_previous)
            .collect();
        assert_eq!(
            directions,
            [Direction::None, Direction::Down, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn thousand_random_rectangles_do_not_overlap() {
        let sizes = random_sizes(2024, 1_000);
        let mut layouter = layouter();
        let rects = place_all(&mut layouter, &sizes);
        let _snapshot = FailureSnapshot::new(
            "thousand_random_rectangles_do_not_overlap",
            layouter.center(),
            &rects,
        );

        assert_eq!(rects.len(), 1_000);
        for (rect, size) in rects.iter().zip(&sizes) {
            assert_eq!(rect.size(), *size);
        }
        assert_eq!(find_overlaps(&rects), Vec::new());
        assert_eq!(layouter.rectangles(), rects.as_slice());
        // Some placements only succeed after popping the spiral.
        assert!(layouter.spiral().len() < layouter.len());
    }

    #[test]
    fn boxed_in_anchor_is_popped() {
        let mut layouter = layouter();
        let sizes = [
            Size::new(2, 2),
            Size::new(6, 3),
            Size::new(4, 3),
            Size::new(4, 4),
            Size::new(3, 2),
        ];
        place_all(&mut layouter, &sizes);
        assert_eq!(layouter.spiral().len(), 5);
        let boxed_in = layouter.spiral()[4].rect;
        assert_eq!(boxed_in, Rect::new(-7, -3, 3, 2));

        let wide = layouter.put_next_rectangle(Size::new(10, 4)).unwrap();
        assert_eq!(wide, Rect::new(-7, -8, 10, 4));

        // The 3x2 left the spiral but still blocks space.
        assert_eq!(layouter.len(), 6);
        assert_eq!(layouter.spiral().len(), 5);
        assert!(layouter.spiral().iter().all(|e| e.rect != boxed_in));
        assert!(layouter.rectangles().contains(&boxed_in));
        assert_eq!(layouter.spiral()[4].direction_to_previous, Direction::Down);
        assert!(find_overlaps(layouter.rectangles()).is_empty());
    }

    #[test]
    fn oversized_rectangle_is_refused_without_panicking() {
        let huge = Size::new(2_000_000_000, 1);
        let mut layouter = layouter();
        let first = layouter.put_next_rectangle(huge).unwrap();
        assert_eq!(first, Rect::new(-1_000_000_000, 0, 2_000_000_000, 1));

        let err = layouter.put_next_rectangle(huge).unwrap_err();
        assert_eq!(err, LayoutError::CoordinateOverflow { size: huge });
        assert_eq!(layouter.len(), 1);
        assert_eq!(layouter.spiral().len(), 1);

        let small = layouter.put_next_rectangle(Size::new(3, 3)).unwrap();
        assert!(!small.intersects(&first));
    }

    #[test]
    fn center_near_the_coordinate_limit() {
        let mut layouter = SpiralLayouter::new(Point::new(i32::MAX - 10, i32::MIN + 10));
        assert_eq!(
            layouter.put_next_rectangle(Size::new(11, 1)),
            Err(LayoutError::CoordinateOverflow {
                size: Size::new(11, 1)
            })
        );
        assert!(layouter.is_empty());

        let rects = place_all(&mut layouter, &[Size::new(2, 2); 3]);
        assert!(find_overlaps(&rects).is_empty());
    }

    #[test]
    fn placement_is_deterministic() {
        let sizes = random_sizes(99, 300);
        let a = place_all(&mut layouter(), &sizes);
        let b = place_all(&mut layouter(), &sizes);
        assert_eq!(a, b);
    }

    #[test]
    fn usable_through_trait_object() {
        let mut boxed: Box<dyn CloudLayouter> = Box::new(layouter());
        let rects: Vec<_> = random_sizes(1, 50)
            .into_iter()
            .map(|s| boxed.put_next_rectangle(s).unwrap())
            .collect();
        assert!(find_overlaps(&rects).is_empty());
    }

    #[test]
    fn helpers_reject_sentinel_direction() {
        let anchor = Rect::new(0, 0, 3, 3);
        assert!(target_point(Size::new(1, 1), &anchor, Direction::None).is_err());
        assert!(is_overshot(Point::ORIGIN, Point::ORIGIN, Direction::None).is_err());
    }

    #[test]
    fn targets_are_far_corners() {
        let anchor = Rect::new(10, 20, 4, 6);
        let size = Size::new(3, 2);
        assert_eq!(target_point(size, &anchor, Direction::Left).unwrap(), Point::new(7, 18));
        assert_eq!(target_point(size, &anchor, Direction::Right).unwrap(), Point::new(14, 26));
        assert_eq!(target_point(size, &anchor, Direction::Up).unwrap(), Point::new(14, 18));
        assert_eq!(target_point(size, &anchor, Direction::Down).unwrap(), Point::new(7, 26));
    }
}
