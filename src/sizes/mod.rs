//! Where rectangle sizes come from: text lines or a random generator.
//! Both only produce [`Size`](crate::geometry::Size) values; positivity is
//! checked by the layouter.

pub mod parse;
pub mod random;

pub use parse::{parse_size, read_sizes, ParseSizeError, SizeLine, SizeLines, SizeReadError};
pub use random::{GenerationSettings, SettingsError};
