use std::str::FromStr;

use compact_str::CompactString;
use rand::Rng;

use crate::geometry::Size;

/// How many random sizes to generate and from which ranges. Both ranges are
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSettings {
    pub count: usize,
    pub min_width: i32,
    pub max_width: i32,
    pub min_height: i32,
    pub max_height: i32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            count: 300,
            min_width: 20,
            max_width: 120,
            min_height: 10,
            max_height: 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("expected 5 values (count minWidth maxWidth minHeight maxHeight), got {0}")]
    WrongArity(usize),
    #[error("'{0}' is not a valid number")]
    InvalidNumber(CompactString),
    #[error("minimum {axis} must be positive, got {min}")]
    NonPositive { axis: &'static str, min: i32 },
    #[error("empty {axis} range {min}..={max}")]
    EmptyRange {
        axis: &'static str,
        min: i32,
        max: i32,
    },
}

impl GenerationSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (axis, min, max) in [
            ("width", self.min_width, self.max_width),
            ("height", self.min_height, self.max_height),
        ] {
            if min <= 0 {
                return Err(SettingsError::NonPositive { axis, min });
            }
            if min > max {
                return Err(SettingsError::EmptyRange { axis, min, max });
            }
        }
        Ok(())
    }

    /// `count` sizes drawn uniformly from the configured ranges.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Size>, SettingsError> {
        self.validate()?;
        Ok((0..self.count)
            .map(|_| {
                Size::new(
                    rng.random_range(self.min_width..=self.max_width),
                    rng.random_range(self.min_height..=self.max_height),
                )
            })
            .collect())
    }
}

/// Parses `"<count> <minWidth> <maxWidth> <minHeight> <maxHeight>"`.
impl FromStr for GenerationSettings {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() != 5 {
            return Err(SettingsError::WrongArity(parts.len()));
        }

        let number = |text: &str| -> Result<i32, SettingsError> {
            text.parse()
                .map_err(|_| SettingsError::InvalidNumber(CompactString::new(text)))
        };
        let count = parts[0]
            .parse()
            .map_err(|_| SettingsError::InvalidNumber(CompactString::new(parts[0])))?;

        let settings = Self {
            count,
            min_width: number(parts[1])?,
            max_width: number(parts[2])?,
            min_height: number(parts[3])?,
            max_height: number(parts[4])?,
        };
        settings.validate()?;
        Ok(settings)
    }
}
