use crate::geometry::{Point, Rect};
use crate::render::colors::{self, ColorMode};

/// Rasterization parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Background RGBA.
    pub background: [u8; 4],
    /// Outline thickness in pixels. Ignored when `fill` is set.
    pub pen_width: u32,
    /// Fill rectangles instead of outlining them.
    pub fill: bool,
    pub color_mode: ColorMode,
    /// Seed for [`ColorMode::Random`].
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: [0, 0, 0, 255],
            pen_width: 1,
            fill: false,
            color_mode: ColorMode::Random,
            seed: 0,
        }
    }
}

/// CPU-rasterize rectangles into an RGBA8 buffer of `width × height`.
///
/// `origin` is the pixel the cloud coordinate (0, 0) maps to. Rectangles are
/// drawn in order, so later ones win where outlines touch. Anything outside
/// the buffer is clipped.
pub fn rasterize_rects(
    width: u32,
    height: u32,
    origin: Point,
    rects: &[Rect],
    config: &RenderConfig,
) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    let mut buf = vec![0u8; w * h * 4];

    for pixel in buf.chunks_exact_mut(4) {
        pixel.copy_from_slice(&config.background);
    }

    let palette = colors::palette(config.color_mode, rects.len(), config.seed);

    for (rect, color) in rects.iter().zip(palette) {
        let rgba = color.to_rgba8();

        // Cell bounds in pixels, end-exclusive
        let x0 = rect.left() as i64 + origin.x as i64;
        let y0 = rect.top() as i64 + origin.y as i64;
        let x1 = rect.right() as i64 + origin.x as i64;
        let y1 = rect.bottom() as i64 + origin.y as i64;

        let pen = if config.fill {
            i64::MAX
        } else {
            config.pen_width.max(1) as i64
        };

        let px0 = clamp_to(x0, w);
        let py0 = clamp_to(y0, h);
        let px1 = clamp_to(x1, w);
        let py1 = clamp_to(y1, h);

        for py in py0..py1 {
            let row = py as i64;
            let on_edge_row = row - y0 < pen || y1 - 1 - row < pen;
            let row_offset = py * w;

            for px in px0..px1 {
                let col = px as i64;
                let on_edge = on_edge_row || col - x0 < pen || x1 - 1 - col < pen;
                if on_edge {
                    let idx = (row_offset + px) * 4;
                    buf[idx..idx + 4].copy_from_slice(&rgba);
                }
            }
        }
    }

    buf
}

fn clamp_to(v: i64, max: usize) -> usize {
    v.clamp(0, max as i64) as usize
}
