use std::fmt;
use std::str::FromStr;

use compact_str::CompactString;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// How rectangles are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Independent random channels in 64..=255, so nothing is near-black.
    #[default]
    Random,
    /// Hue advances with placement order: the center is red, the rim violet.
    Spectrum,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color mode '{0}' (expected random or spectrum)")]
pub struct ParseColorModeError(pub CompactString);

impl FromStr for ColorMode {
    type Err = ParseColorModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(ColorMode::Random),
            "spectrum" => Ok(ColorMode::Spectrum),
            _ => Err(ParseColorModeError(CompactString::new(s))),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorMode::Random => "Random",
            ColorMode::Spectrum => "Spectrum",
        })
    }
}

/// Color with float channels in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl CloudColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// One color per rectangle, in placement order. Deterministic for a given
/// mode, count and seed.
pub fn palette(mode: ColorMode, count: usize, seed: u64) -> Vec<CloudColor> {
    match mode {
        ColorMode::Random => {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..count)
                .map(|_| {
                    CloudColor::from_rgba8([
                        rng.random_range(64..=255),
                        rng.random_range(64..=255),
                        rng.random_range(64..=255),
                        255,
                    ])
                })
                .collect()
        }
        ColorMode::Spectrum => (0..count)
            .map(|i| {
                let t = if count > 1 {
                    i as f32 / (count - 1) as f32
                } else {
                    0.0
                };
                hsv_to_rgb(t * 0.8, 0.72, 0.92)
            })
            .collect(),
    }
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> CloudColor {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let i = h6.floor() as i32;
    let f = h6 - i as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    CloudColor::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_palette_avoids_dark_channels() {
        let colors = palette(ColorMode::Random, 256, 9);
        assert_eq!(colors.len(), 256);
        for c in colors {
            let [r, g, b, a] = c.to_rgba8();
            assert!(r >= 64 && g >= 64 && b >= 64, "{c:?}");
            assert_eq!(a, 255);
        }
    }

    #[test]
    fn random_palette_is_seeded() {
        assert_eq!(
            palette(ColorMode::Random, 10, 1),
            palette(ColorMode::Random, 10, 1)
        );
        assert_ne!(
            palette(ColorMode::Random, 10, 1),
            palette(ColorMode::Random, 10, 2)
        );
    }

    #[test]
    fn spectrum_starts_red() {
        let colors = palette(ColorMode::Spectrum, 5, 0);
        let [r, g, b, _] = colors[0].to_rgba8();
        assert!(r > g && r > b);
        assert_eq!(palette(ColorMode::Spectrum, 1, 0).len(), 1);
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("Spectrum".parse::<ColorMode>(), Ok(ColorMode::Spectrum));
        assert_eq!("random".parse::<ColorMode>(), Ok(ColorMode::Random));
        assert_eq!(
            "plaid".parse::<ColorMode>(),
            Err(ParseColorModeError("plaid".into()))
        );
        assert_eq!(ColorMode::Spectrum.to_string(), "Spectrum");
        assert_eq!(ColorMode::Random.to_string(), "Random");
    }

    #[test]
    fn rgba8_round_trips_exactly() {
        let px = [64, 128, 200, 255];
        assert_eq!(CloudColor::from_rgba8(px).to_rgba8(), px);
    }
}
