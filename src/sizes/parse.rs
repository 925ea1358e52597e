use std::io::{self, BufRead, Lines};

use compact_str::CompactString;

use crate::geometry::Size;

/// A line that is not two whitespace-separated integers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unable to parse line '{line}', expected \"<width> <height>\"")]
pub struct ParseSizeError {
    pub line: CompactString,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to read line {line_number}")]
pub struct SizeReadError {
    pub line_number: usize,
    #[source]
    pub source: io::Error,
}

/// One non-blank input line and what it parsed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeLine {
    /// 1-based, counting blank lines too.
    pub line_number: usize,
    pub size: Result<Size, ParseSizeError>,
}

/// Parse `"<width> <height>"`. Extra tokens or non-integers are an error;
/// zero and negative values are not.
pub fn parse_size(line: &str) -> Result<Size, ParseSizeError> {
    let invalid = || ParseSizeError {
        line: CompactString::new(line.trim()),
    };

    let mut parts = line.split_whitespace();
    let (Some(width), Some(height), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    match (width.parse::<i32>(), height.parse::<i32>()) {
        (Ok(width), Ok(height)) => Ok(Size::new(width, height)),
        _ => Err(invalid()),
    }
}

/// Lazily parse every non-blank line of `reader`.
pub fn read_sizes<R: BufRead>(reader: R) -> SizeLines<R> {
    SizeLines {
        lines: reader.lines(),
        line_number: 0,
    }
}

/// Iterator returned by [`read_sizes`].
pub struct SizeLines<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> Iterator for SizeLines<R> {
    type Item = Result<SizeLine, SizeReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_number += 1;

            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(SizeReadError {
                        line_number: self.line_number,
                        source,
                    }))
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            return Some(Ok(SizeLine {
                line_number: self.line_number,
                size: parse_size(&line),
            }));
        }
    }
}
