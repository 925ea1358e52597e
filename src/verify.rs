use rayon::prelude::*;

use crate::geometry::{Point, Rect};

/// Every overlapping pair `(i, j)` with `i < j`, in ascending order.
///
/// Brute force over all pairs, split across threads by the first index.
pub fn find_overlaps(rects: &[Rect]) -> Vec<(usize, usize)> {
    rects
        .par_iter()
        .enumerate()
        .flat_map_iter(|(i, a)| {
            rects[i + 1..]
                .iter()
                .enumerate()
                .filter(move |(_, b)| a.intersects(b))
                .map(move |(offset, _)| (i, i + 1 + offset))
        })
        .collect()
}

/// Shape summary of a finished cloud.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudStats {
    pub count: usize,
    pub bounds: Rect,
    /// Sum of rectangle areas.
    pub covered_area: i64,
    /// `covered_area` over the bounding box area.
    pub density: f64,
    /// Largest distance from the center to any rectangle corner.
    pub max_radius: f64,
    /// `covered_area` over the area of the circle of `max_radius`.
    pub circle_fill: f64,
}

impl CloudStats {
    /// `None` for an empty cloud.
    pub fn compute(rects: &[Rect], center: Point) -> Option<Self> {
        let first = rects.first()?;
        let bounds = rects.iter().fold(*first, |acc, r| acc.union(r));
        let covered_area: i64 = rects.iter().map(Rect::area).sum();

        let max_radius = rects
            .par_iter()
            .map(|r| {
                let (cx, cy) = (center.x as i64, center.y as i64);
                let dx = (r.left() as i64 - cx).abs().max((r.right() as i64 - cx).abs()) as f64;
                let dy = (r.top() as i64 - cy).abs().max((r.bottom() as i64 - cy).abs()) as f64;
                dx.hypot(dy)
            })
            .reduce(|| 0.0, f64::max);

        let circle_area = std::f64::consts::PI * max_radius * max_radius;
        Some(Self {
            count: rects.len(),
            bounds,
            covered_area,
            density: covered_area as f64 / bounds.area().max(1) as f64,
            max_radius,
            circle_fill: if circle_area > 0.0 {
                covered_area as f64 / circle_area
            } else {
                0.0
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_each_overlapping_pair_once() {
        let rects = [
            Rect::new(0, 0, 10, 10),
            Rect::new(5, 5, 10, 10),
            Rect::new(10, 4, 5, 5),
            Rect::new(100, 100, 1, 1),
            Rect::new(5, -5, 5, 5),
        ];
        // The last one only shares an edge with the first.
        assert_eq!(find_overlaps(&rects), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn empty_and_single_have_no_overlaps() {
        assert!(find_overlaps(&[]).is_empty());
        assert!(find_overlaps(&[Rect::new(0, 0, 3, 3)]).is_empty());
    }

    #[test]
    fn stats_for_two_by_two_block() {
        let rects = [
            Rect::new(-2, -2, 2, 2),
            Rect::new(0, -2, 2, 2),
            Rect::new(-2, 0, 2, 2),
            Rect::new(0, 0, 2, 2),
        ];
        let stats = CloudStats::compute(&rects, Point::ORIGIN).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.bounds, Rect::new(-2, -2, 4, 4));
        assert_eq!(stats.covered_area, 16);
        assert!((stats.density - 1.0).abs() < 1e-9);
        assert!((stats.max_radius - 8f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn stats_of_nothing() {
        assert_eq!(CloudStats::compute(&[], Point::ORIGIN), None);
    }
}
