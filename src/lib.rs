// Public library interface for tagcloud-rs
// The binaries and tests build on these modules

pub mod geometry;
pub mod layout;
pub mod render;
pub mod sizes;
pub mod verify;

pub use geometry::{Point, Rect, Size};
pub use layout::{CloudLayouter, Direction, LayoutError, SpiralLayouter};
