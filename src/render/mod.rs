pub mod colors;
pub mod raster;

use std::path::Path;

use crate::geometry::{Point, Rect};
pub use colors::{ColorMode, ParseColorModeError};
pub use raster::{rasterize_rects, RenderConfig};

/// Largest canvas side we are willing to allocate.
pub const MAX_CANVAS_SIDE: u32 = 16_384;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("canvas {width}x{height} exceeds the {max}px side limit", max = MAX_CANVAS_SIDE)]
    CanvasTooLarge { width: u64, height: u64 },
    #[error("pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
    #[error("failed to encode image")]
    Image(#[from] image::ImageError),
}

/// Collects placed rectangles and turns them into an image whose center is
/// the cloud center.
#[derive(Debug, Clone)]
pub struct CloudCanvas {
    center: Point,
    rects: Vec<Rect>,
}

impl CloudCanvas {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            rects: Vec::new(),
        }
    }

    pub fn add(&mut self, rect: Rect) {
        self.rects.push(rect);
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Canvas size: twice the farthest extent from the center on each axis,
    /// so the center lands in the middle. 1×1 when empty.
    pub fn dimensions(&self) -> (u64, u64) {
        if self.rects.is_empty() {
            return (1, 1);
        }

        let c = self.center;
        let (half_w, half_h) = self.rects.iter().fold((0u64, 0u64), |(hw, hh), r| {
            let dx = (r.left() as i64 - c.x as i64)
                .unsigned_abs()
                .max((r.right() as i64 - c.x as i64).unsigned_abs());
            let dy = (r.top() as i64 - c.y as i64)
                .unsigned_abs()
                .max((r.bottom() as i64 - c.y as i64).unsigned_abs());
            (hw.max(dx), hh.max(dy))
        });
        (2 * half_w, 2 * half_h)
    }

    /// RGBA8 pixels plus their dimensions.
    pub fn rasterize(&self, config: &RenderConfig) -> Result<(u32, u32, Vec<u8>), RenderError> {
        let (width, height) = self.dimensions();
        if width > MAX_CANVAS_SIDE as u64 || height > MAX_CANVAS_SIDE as u64 {
            return Err(RenderError::CanvasTooLarge { width, height });
        }
        let (width, height) = (width as u32, height as u32);

        // Cloud coordinate (0, 0) sits this far from the image's top-left.
        let origin = Point::new(
            (width / 2) as i32 - self.center.x,
            (height / 2) as i32 - self.center.y,
        );

        tracing::info!(
            "Rasterizing {} rectangles onto {}x{} canvas ({})",
            self.rects.len(),
            width,
            height,
            config.color_mode
        );
        let pixels = rasterize_rects(width, height, origin, &self.rects, config);
        Ok((width, height, pixels))
    }

    pub fn save_png(
        &self,
        path: impl AsRef<Path>,
        config: &RenderConfig,
    ) -> Result<(), RenderError> {
        let (width, height, pixels) = self.rasterize(config)?;
        let image = image::RgbaImage::from_raw(width, height, pixels)
            .ok_or(RenderError::BufferSize { width, height })?;
        image.save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        tracing::info!("Saved {}", path.as_ref().display());
        Ok(())
    }
}

impl Extend<Rect> for CloudCanvas {
    fn extend<T: IntoIterator<Item = Rect>>(&mut self, iter: T) {
        self.rects.extend(iter);
    }
}

/// Renders a cloud to `failed_tests/<name>.png` if the owning test panics.
#[cfg(test)]
pub(crate) struct FailureSnapshot {
    path: std::path::PathBuf,
    canvas: CloudCanvas,
}

#[cfg(test)]
impl FailureSnapshot {
    pub(crate) fn new(name: &str, center: Point, rects: &[Rect]) -> Self {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("failed_tests");
        Self::in_dir(dir, name, center, rects)
    }

    pub(crate) fn in_dir(
        dir: impl AsRef<Path>,
        name: &str,
        center: Point,
        rects: &[Rect],
    ) -> Self {
        let mut canvas = CloudCanvas::new(center);
        canvas.extend(rects.iter().copied());
        Self {
            path: dir.as_ref().join(format!("{name}.png")),
            canvas,
        }
    }
}

#[cfg(test)]
impl Drop for FailureSnapshot {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            return;
        }
        if let Some(dir) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(dir) {
                eprintln!("Could not create {}: {}", dir.display(), err);
                return;
            }
        }
        match self.canvas.save_png(&self.path, &RenderConfig::default()) {
            Ok(()) => eprintln!("Tag cloud saved to {}", self.path.display()),
            Err(err) => eprintln!("Could not save {}: {}", self.path.display(), err),
        }
    }
}
